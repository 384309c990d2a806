use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuestRepository, QuestRepository},
    services::{
        detail_service::DetailService,
        model_service::{ModelClient, OpenAiModelClient},
        quest_service::QuestService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quest_service: Arc<QuestService>,
    pub detail_service: Arc<DetailService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quest_repository = Arc::new(MongoQuestRepository::new(&db, &config));
        quest_repository.ensure_indexes().await?;

        let model = Arc::new(OpenAiModelClient::new(&config)?);
        log::info!("Model endpoint: {}", model.endpoint());

        Ok(Self::from_parts(quest_repository, model, config))
    }

    /// Wires the services around an already built store and model client.
    pub fn from_parts(
        repository: Arc<dyn QuestRepository>,
        model: Arc<dyn ModelClient>,
        config: Config,
    ) -> Self {
        Self {
            quest_service: Arc::new(QuestService::new(repository, Arc::clone(&model))),
            detail_service: Arc::new(DetailService::new(model)),
            config: Arc::new(config),
        }
    }
}
