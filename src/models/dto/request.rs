use serde::Deserialize;
use validator::Validate;

/// Query string of `GET /generate-quest`. Questions are stored in a column of at most
/// 1000 characters.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestQuery {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
}

/// Body of `POST /get-quest-details`. A missing `questText` is answered with an error
/// payload, not a rejected request.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestDetailsRequest {
    #[serde(rename = "questText", default)]
    pub quest_text: Option<String>,
}

/// Body of `POST /complete-quest`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteQuestRequest {
    #[serde(default)]
    pub id: Option<String>,
}
