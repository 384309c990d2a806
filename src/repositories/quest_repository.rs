use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::Deserialize;

use crate::{
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    models::domain::quest::{NewQuest, Quest},
};

const QUEST_SEQUENCE: &str = "quests";

#[async_trait]
pub trait QuestRepository: Send + Sync {
    /// Stores the quest under the next id in the sequence.
    async fn create(&self, quest: NewQuest) -> AppResult<Quest>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quest>>;
    async fn find_all_newest_first(&self) -> AppResult<Vec<Quest>>;
    async fn health_check(&self) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct SequenceCounter {
    seq: i64,
}

pub struct MongoQuestRepository {
    db: Database,
    collection: Collection<Quest>,
    counters: Collection<SequenceCounter>,
}

impl MongoQuestRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection(&config.quests_collection),
            counters: db.get_collection(&config.counters_collection),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quests collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for quests collection");
        Ok(())
    }

    async fn next_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": QUEST_SEQUENCE }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError("Quest id sequence returned no document".to_string())
            })?;

        Ok(counter.seq)
    }
}

#[async_trait]
impl QuestRepository for MongoQuestRepository {
    async fn create(&self, quest: NewQuest) -> AppResult<Quest> {
        let id = self.next_id().await?;
        let quest = quest.into_quest(id);
        self.collection.insert_one(&quest).await?;
        Ok(quest)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quest>> {
        let quest = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quest)
    }

    async fn find_all_newest_first(&self) -> AppResult<Vec<Quest>> {
        let find_options = FindOptions::builder().sort(doc! { "id": -1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(find_options).await?;
        let quests: Vec<Quest> = cursor.try_collect().await?;
        Ok(quests)
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
