use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema as GraphQLSchema};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::dto::{
        request::GenerateQuestQuery,
        response::{CompletedNode, GeneratedQuest, HistoryEntry, QuestDetailPayload},
    },
};

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Stored quests, newest first.
    async fn history(&self, ctx: &Context<'_>) -> AppResult<Vec<HistoryEntry>> {
        let state = ctx.data::<AppState>()?;
        Ok(state.quest_service.get_history().await)
    }

    /// Graph text of one quest, `[]` when it is unknown or unreadable.
    async fn quest(&self, ctx: &Context<'_>, id: i64) -> AppResult<String> {
        let state = ctx.data::<AppState>()?;
        Ok(state.quest_service.get_quest_by_id(id).await)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn generate_quest(
        &self,
        ctx: &Context<'_>,
        question: String,
    ) -> async_graphql::Result<GeneratedQuest> {
        let state = ctx.data::<AppState>()?;

        let query = GenerateQuestQuery { question };
        query
            .validate()
            .map_err(|e| AppError::from(e).extend())?;

        state
            .quest_service
            .generate_quest(&query.question)
            .await
            .map(GeneratedQuest::from)
            .map_err(|e| e.extend())
    }

    async fn quest_details(
        &self,
        ctx: &Context<'_>,
        quest_text: String,
    ) -> AppResult<QuestDetailPayload> {
        let state = ctx.data::<AppState>()?;
        let outcome = state.detail_service.generate_details(&quest_text).await;
        Ok(outcome.into())
    }

    async fn complete_quest(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<CompletedNode> {
        let state = ctx.data::<AppState>()?;
        state.quest_service.complete_quest(&id).map_err(|e| e.extend())
    }
}

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::Config,
        constants::prompts::INVALID_QUESTION_MESSAGE,
        test_utils::{
            fakes::{InMemoryQuestRepository, ScriptedModelClient},
            fixtures::{SAMPLE_GRAPH, SAMPLE_QUIZ_REPLY, SAMPLE_SUMMARY},
        },
    };

    fn schema(replies: &[&str]) -> Schema {
        create_schema(AppState::from_parts(
            Arc::new(InMemoryQuestRepository::new()),
            Arc::new(ScriptedModelClient::replying(replies)),
            Config::test_config(),
        ))
    }

    #[tokio::test]
    async fn generate_then_read_back() {
        let schema = schema(&["YES", SAMPLE_GRAPH]);

        let res = schema
            .execute(r#"mutation { generateQuest(question: "空はなぜ青いの？") { questId stored graph } }"#)
            .await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);
        let data = res.data.into_json().unwrap();
        assert_eq!(data["generateQuest"]["questId"], 1);
        assert_eq!(data["generateQuest"]["stored"], true);

        let res = schema.execute("{ history { id question } quest(id: 1) }").await;
        let data = res.data.into_json().unwrap();
        assert_eq!(
            data["history"],
            serde_json::json!([{ "id": 1, "question": "空はなぜ青いの？" }])
        );
        let graph: serde_json::Value =
            serde_json::from_str(data["quest"].as_str().unwrap()).unwrap();
        assert_eq!(graph, serde_json::from_str::<serde_json::Value>(SAMPLE_GRAPH).unwrap());
    }

    #[tokio::test]
    async fn rejected_question_carries_error_code() {
        let schema = schema(&["NO"]);

        let res = schema
            .execute(r#"mutation { generateQuest(question: "hello") { stored } }"#)
            .await;

        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].message, INVALID_QUESTION_MESSAGE);
        let code = res.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("INVALID_INPUT")));
    }

    #[tokio::test]
    async fn quest_details_and_completion() {
        let schema = schema(&[SAMPLE_SUMMARY, SAMPLE_QUIZ_REPLY]);

        let res = schema
            .execute(
                r#"mutation {
                    questDetails(questText: "光とは何か？") { summary quizzes { quiz answer } error }
                    completeQuest(id: "2") { status completedNode }
                }"#,
            )
            .await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);

        let data = res.data.into_json().unwrap();
        assert_eq!(data["questDetails"]["summary"], SAMPLE_SUMMARY);
        assert_eq!(data["questDetails"]["quizzes"].as_array().unwrap().len(), 3);
        assert!(data["questDetails"]["error"].is_null());
        assert_eq!(data["completeQuest"]["completedNode"], "2");
    }

    #[tokio::test]
    async fn blank_completion_id_is_rejected_like_rest() {
        let res = schema(&[])
            .execute(r#"mutation { completeQuest(id: " ") { status } }"#)
            .await;

        assert_eq!(res.errors.len(), 1);
        let code = res.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("VALIDATION_ERROR")));
    }

    #[tokio::test]
    async fn unknown_quest_is_empty_graph() {
        let res = schema(&[]).execute("{ quest(id: 42) }").await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["quest"], "[]");
    }
}
