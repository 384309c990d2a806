pub mod health_handler;
pub mod quest_handler;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quest_handler::{complete_quest, generate_quest, get_history, get_quest, get_quest_details};
