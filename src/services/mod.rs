pub mod detail_service;
pub mod graph_parser;
pub mod model_service;
pub mod prompt_builder;
pub mod quest_service;
pub mod question_validator;
