pub mod graph;
pub mod quest;
pub mod quest_detail;

pub use graph::{Edge, GraphElement, Node};
pub use quest::{NewQuest, Quest};
pub use quest_detail::{DetailOutcome, QuestDetail, QuizItem};
