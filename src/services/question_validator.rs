use std::sync::Arc;

use crate::{
    constants::prompts::VALIDATION_ACCEPT_TOKEN,
    services::{
        model_service::{ModelClient, ModelResult},
        prompt_builder,
    },
};

/// Asks the model whether a question is worth a generation call.
pub struct QuestionValidator {
    model: Arc<dyn ModelClient>,
}

impl QuestionValidator {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    pub async fn is_meaningful(&self, question: &str) -> ModelResult<bool> {
        let prompt = prompt_builder::question_validation_prompt(question);
        let reply = self.model.invoke(&prompt, false).await?;
        let accepted = reply_accepts(&reply);

        log::info!(
            "Question screening {} ({} chars)",
            if accepted { "accepted" } else { "rejected" },
            question.chars().count()
        );
        Ok(accepted)
    }
}

fn reply_accepts(reply: &str) -> bool {
    reply.trim().to_uppercase().contains(VALIDATION_ACCEPT_TOKEN)
}
