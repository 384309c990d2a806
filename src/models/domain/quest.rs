use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::graph::GRAPH_SCHEMA_VERSION;

/// One persisted generation result.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quest {
    pub id: i64, // assigned by the store, ascending in creation order
    pub question: String,
    pub nodes_json: String,
    pub edges_json: String,
    pub schema_version: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A quest that has not been given an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuest {
    pub question: String,
    pub nodes_json: String,
    pub edges_json: String,
}

impl NewQuest {
    pub fn new(question: &str, nodes_json: String, edges_json: String) -> Self {
        NewQuest {
            question: question.to_string(),
            nodes_json,
            edges_json,
        }
    }

    pub fn into_quest(self, id: i64) -> Quest {
        Quest {
            id,
            question: self.question,
            nodes_json: self.nodes_json,
            edges_json: self.edges_json,
            schema_version: GRAPH_SCHEMA_VERSION,
            created_at: Some(Utc::now()),
        }
    }
}
