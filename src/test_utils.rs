#[cfg(test)]
pub mod fixtures {
    /// A well-formed five step quest as the model is asked to produce it.
    pub const SAMPLE_GRAPH: &str = r#"[
  {"id": "1", "type": "input", "data": {"label": "探求の始まり: 空はなぜ青いの？", "subject": "総合"}},
  {"id": "2", "data": {"label": "光にはどんな色が含まれているのだろう？", "subject": "物理"}},
  {"id": "3", "data": {"label": "昔の人は空の色をどう説明していたのだろう？", "subject": "歴史"}},
  {"id": "4", "data": {"label": "夕焼けが赤くなるのはなぜだろう？", "subject": "地学"}},
  {"id": "5", "data": {"label": "画家は空の青をどう表現してきたのだろう？", "subject": "芸術"}},
  {"id": "e1-2", "source": "1", "target": "2", "animated": true},
  {"id": "e1-3", "source": "1", "target": "3", "animated": true},
  {"id": "e2-4", "source": "2", "target": "4", "animated": true},
  {"id": "e3-5", "source": "3", "target": "5", "animated": true}
]"#;

    pub const SAMPLE_SUMMARY: &str =
        "空が青く見えるのは、太陽の光が大気中の分子にぶつかって散らばるからです。";

    pub const SAMPLE_QUIZ_REPLY: &str = r#"{
  "quizzes": [
    {"quiz": "空が青く見えるのは光が[BLANK]するからです。", "answer": "散乱"},
    {"quiz": "太陽の光は[BLANK]の色を含んでいます。", "answer": "さまざま"},
    {"quiz": "夕焼けが赤いのは光が通る[BLANK]が長いからです。", "answer": "距離"}
  ]
}"#;
}

#[cfg(test)]
pub mod fakes {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::{AppError, AppResult},
        models::domain::quest::{NewQuest, Quest},
        repositories::QuestRepository,
        services::model_service::{strip_code_fence, ModelClient, ModelError, ModelResult},
    };

    /// Model client that answers from a fixed script and records every prompt.
    ///
    /// A `None` entry in the script simulates a failed call.
    pub struct ScriptedModelClient {
        replies: Mutex<VecDeque<Option<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModelClient {
        pub fn new(replies: &[Option<&str>]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(replies: &[&str]) -> Self {
            let script: Vec<Option<&str>> = replies.iter().copied().map(Some).collect();
            Self::new(&script)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedModelClient {
        async fn invoke(&self, prompt: &str, strip_fence: bool) -> ModelResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .flatten()
                .ok_or(ModelError::MissingContent)?;

            Ok(if strip_fence {
                strip_code_fence(&reply)
            } else {
                reply
            })
        }
    }

    #[derive(Default)]
    pub struct InMemoryQuestRepository {
        quests: RwLock<Vec<Quest>>,
        fail_reads: bool,
    }

    impl InMemoryQuestRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store whose reads always fail.
        pub fn unavailable() -> Self {
            Self {
                quests: RwLock::new(Vec::new()),
                fail_reads: true,
            }
        }

        pub async fn insert_raw(&self, quest: Quest) {
            self.quests.write().await.push(quest);
        }

        pub async fn len(&self) -> usize {
            self.quests.read().await.len()
        }

        fn check_available(&self) -> AppResult<()> {
            if self.fail_reads {
                return Err(AppError::DatabaseError("store unavailable".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl QuestRepository for InMemoryQuestRepository {
        async fn create(&self, quest: NewQuest) -> AppResult<Quest> {
            let mut quests = self.quests.write().await;
            let id = quests.iter().map(|q| q.id).max().unwrap_or(0) + 1;
            let quest = quest.into_quest(id);
            quests.push(quest.clone());
            Ok(quest)
        }

        async fn find_by_id(&self, id: i64) -> AppResult<Option<Quest>> {
            self.check_available()?;
            Ok(self.quests.read().await.iter().find(|q| q.id == id).cloned())
        }

        async fn find_all_newest_first(&self) -> AppResult<Vec<Quest>> {
            self.check_available()?;
            let mut quests = self.quests.read().await.clone();
            quests.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(quests)
        }

        async fn health_check(&self) -> AppResult<()> {
            self.check_available()
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::*;
    use crate::{
        models::domain::quest::NewQuest, repositories::QuestRepository,
        services::model_service::ModelClient,
    };

    #[tokio::test]
    async fn scripted_model_client_replays_in_order() {
        let model = ScriptedModelClient::new(&[Some("first"), None]);

        assert_eq!(model.invoke("a", false).await.unwrap(), "first");
        assert!(model.invoke("b", false).await.is_err());
        assert_eq!(model.prompts(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn in_memory_repository_assigns_ascending_ids() {
        let repo = InMemoryQuestRepository::new();

        let first = repo.create(NewQuest::new("a", "[]".into(), "[]".into())).await.unwrap();
        let second = repo.create(NewQuest::new("b", "[]".into(), "[]".into())).await.unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(repo.len().await, 2);
    }
}
