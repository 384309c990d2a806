pub mod quest_repository;

pub use quest_repository::{MongoQuestRepository, QuestRepository};
