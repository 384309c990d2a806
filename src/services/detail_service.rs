use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    constants::quiz_prompt::{DETAIL_FAILURE_MESSAGE, QUIZ_COUNT},
    models::domain::quest_detail::{DetailOutcome, QuestDetail, QuizItem},
    services::{
        model_service::{ModelClient, ModelError},
        prompt_builder,
    },
};

#[derive(Debug, Error)]
enum DetailError {
    #[error("quest text is empty")]
    EmptyQuestText,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("quiz reply is not the expected JSON object: {0}")]
    QuizJson(#[from] serde_json::Error),

    #[error("expected {expected} quizzes, got {0}", expected = QUIZ_COUNT)]
    QuizCount(usize),
}

#[derive(Debug, Deserialize)]
struct QuizReply {
    quizzes: Vec<QuizItem>,
}

/// Derives the summary and quizzes for one quest step.
pub struct DetailService {
    model: Arc<dyn ModelClient>,
}

impl DetailService {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Never fails: any problem along the way becomes [`DetailOutcome::Failed`].
    pub async fn generate_details(&self, quest_text: &str) -> DetailOutcome {
        match self.summarise_and_quiz(quest_text).await {
            Ok(detail) => DetailOutcome::Ready(detail),
            Err(e) => {
                log::error!("Failed to generate quest details: {}", e);
                DetailOutcome::Failed {
                    error: DETAIL_FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn summarise_and_quiz(&self, quest_text: &str) -> Result<QuestDetail, DetailError> {
        if quest_text.trim().is_empty() {
            return Err(DetailError::EmptyQuestText);
        }

        let summary = self
            .model
            .invoke(&prompt_builder::summary_prompt(quest_text), false)
            .await?;

        // The quiz prompt is built from the summary, so this call has to wait for it.
        let quiz_reply = self
            .model
            .invoke(&prompt_builder::quiz_prompt(&summary), true)
            .await?;

        let quizzes = parse_quizzes(&quiz_reply)?;
        log::info!("Generated summary and {} quizzes", quizzes.len());

        Ok(QuestDetail { summary, quizzes })
    }
}

fn parse_quizzes(reply: &str) -> Result<Vec<QuizItem>, DetailError> {
    let reply: QuizReply = serde_json::from_str(reply)?;
    if reply.quizzes.len() != QUIZ_COUNT {
        return Err(DetailError::QuizCount(reply.quizzes.len()));
    }
    Ok(reply.quizzes)
}
