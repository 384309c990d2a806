use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// One fill-in-the-blank item.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizItem {
    pub quiz: String,
    pub answer: String,
}

/// Summary and quizzes derived for a single quest step. Not persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestDetail {
    pub summary: String,
    pub quizzes: Vec<QuizItem>,
}

/// What the detail pipeline hands back to a client: the detail, or an error payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetailOutcome {
    Ready(QuestDetail),
    Failed { error: String },
}

impl DetailOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, DetailOutcome::Ready(_))
    }
}
