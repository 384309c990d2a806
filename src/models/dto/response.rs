use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{
    quest::Quest,
    quest_detail::{DetailOutcome, QuizItem},
};

/// Result of a successful generation call.
///
/// The graph text goes back to the caller either way; the variant says whether it
/// also made it into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Stored { quest_id: i64, graph: String },
    GeneratedButNotStored { graph: String, reason: String },
}

impl GenerationOutcome {
    pub fn graph(&self) -> &str {
        match self {
            GenerationOutcome::Stored { graph, .. } => graph,
            GenerationOutcome::GeneratedButNotStored { graph, .. } => graph,
        }
    }

    pub fn quest_id(&self) -> Option<i64> {
        match self {
            GenerationOutcome::Stored { quest_id, .. } => Some(*quest_id),
            GenerationOutcome::GeneratedButNotStored { .. } => None,
        }
    }

    pub fn is_stored(&self) -> bool {
        self.quest_id().is_some()
    }
}

/// Listing view of a stored quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct HistoryEntry {
    pub id: i64,
    pub question: String,
}

impl From<Quest> for HistoryEntry {
    fn from(quest: Quest) -> Self {
        HistoryEntry {
            id: quest.id,
            question: quest.question,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct CompletedNode {
    pub status: String,
    pub completed_node: String,
}

impl CompletedNode {
    pub fn success(node_id: &str) -> Self {
        CompletedNode {
            status: "success".to_string(),
            completed_node: node_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct GeneratedQuest {
    pub quest_id: Option<i64>,
    pub stored: bool,
    pub graph: String,
}

impl From<GenerationOutcome> for GeneratedQuest {
    fn from(outcome: GenerationOutcome) -> Self {
        GeneratedQuest {
            quest_id: outcome.quest_id(),
            stored: outcome.is_stored(),
            graph: outcome.graph().to_string(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct QuestDetailPayload {
    pub summary: Option<String>,
    pub quizzes: Vec<QuizItem>,
    pub error: Option<String>,
}

impl From<DetailOutcome> for QuestDetailPayload {
    fn from(outcome: DetailOutcome) -> Self {
        match outcome {
            DetailOutcome::Ready(detail) => QuestDetailPayload {
                summary: Some(detail.summary),
                quizzes: detail.quizzes,
                error: None,
            },
            DetailOutcome::Failed { error } => QuestDetailPayload {
                summary: None,
                quizzes: Vec::new(),
                error: Some(error),
            },
        }
    }
}
