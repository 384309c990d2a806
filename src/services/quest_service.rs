use std::sync::Arc;

use crate::{
    constants::prompts::INVALID_QUESTION_MESSAGE,
    errors::{AppError, AppResult},
    models::{
        domain::quest::NewQuest,
        dto::response::{CompletedNode, GenerationOutcome, HistoryEntry},
    },
    repositories::QuestRepository,
    services::{
        graph_parser::{self, GraphParseError, SplitGraph, EMPTY_GRAPH},
        model_service::ModelClient,
        prompt_builder,
        question_validator::QuestionValidator,
    },
};

pub struct QuestService {
    repository: Arc<dyn QuestRepository>,
    model: Arc<dyn ModelClient>,
    validator: QuestionValidator,
}

impl QuestService {
    pub fn new(repository: Arc<dyn QuestRepository>, model: Arc<dyn ModelClient>) -> Self {
        Self {
            repository,
            validator: QuestionValidator::new(Arc::clone(&model)),
            model,
        }
    }

    /// Screens the question, generates its quest graph and stores it.
    ///
    /// Rejected questions never reach the generation prompt. A reply that cannot be
    /// split into nodes and edges is still handed back, marked as not stored.
    pub async fn generate_quest(&self, question: &str) -> AppResult<GenerationOutcome> {
        let meaningful = self.validator.is_meaningful(question).await.map_err(|e| {
            log::error!("Question screening call failed: {}", e);
            AppError::from(e)
        })?;
        if !meaningful {
            return Err(AppError::InvalidInput(INVALID_QUESTION_MESSAGE.to_string()));
        }

        let prompt = prompt_builder::quest_generation_prompt(question);
        let graph = self.model.invoke(&prompt, true).await.map_err(|e| {
            log::error!("Quest generation call failed: {}", e);
            AppError::from(e)
        })?;

        let new_quest = match shape_for_storage(question, &graph) {
            Ok(new_quest) => new_quest,
            Err(e) => {
                log::warn!(
                    "Generated quest could not be split for storage, returning it unsaved: {}",
                    e
                );
                return Ok(GenerationOutcome::GeneratedButNotStored {
                    graph,
                    reason: e.to_string(),
                });
            }
        };

        let quest = self.repository.create(new_quest).await?;
        log::info!("Stored quest {}", quest.id);

        Ok(GenerationOutcome::Stored {
            quest_id: quest.id,
            graph,
        })
    }

    /// Combined graph text of a stored quest, or `[]` when it cannot be produced.
    pub async fn get_quest_by_id(&self, id: i64) -> String {
        let quest = match self.repository.find_by_id(id).await {
            Ok(Some(quest)) => quest,
            Ok(None) => {
                log::info!("Quest {} not found", id);
                return EMPTY_GRAPH.to_string();
            }
            Err(e) => {
                log::error!("Failed to load quest {}: {}", id, e);
                return EMPTY_GRAPH.to_string();
            }
        };

        graph_parser::reassemble(&quest.nodes_json, &quest.edges_json, quest.schema_version)
            .unwrap_or_else(|e| {
                log::warn!("Failed to reassemble quest {}: {}", id, e);
                EMPTY_GRAPH.to_string()
            })
    }

    /// Every stored quest, newest first, without its graph.
    pub async fn get_history(&self) -> Vec<HistoryEntry> {
        match self.repository.find_all_newest_first().await {
            Ok(quests) => quests.into_iter().map(HistoryEntry::from).collect(),
            Err(e) => {
                log::error!("Failed to load quest history: {}", e);
                Vec::new()
            }
        }
    }

    /// Records that the learner finished one step. The node id must not be blank.
    pub fn complete_quest(&self, node_id: &str) -> AppResult<CompletedNode> {
        let node_id = node_id.trim();
        if node_id.is_empty() {
            return Err(AppError::ValidationError("id is required".to_string()));
        }

        log::info!("Quest step completed: {}", node_id);
        Ok(CompletedNode::success(node_id))
    }

    pub async fn store_health(&self) -> AppResult<()> {
        self.repository.health_check().await
    }
}

fn shape_for_storage(question: &str, graph: &str) -> Result<NewQuest, GraphParseError> {
    let split = SplitGraph::parse(graph)?;

    let dangling = split.dangling_edges();
    if !dangling.is_empty() {
        let ids: Vec<&str> = dangling.iter().map(|e| e.id.as_str()).collect();
        log::warn!("Generated quest has edges to unknown nodes: {:?}", ids);
    }
    if split.root().is_none() && !split.nodes.is_empty() {
        log::warn!("Generated quest has no input node");
    }

    Ok(NewQuest::new(question, split.nodes_json()?, split.edges_json()?))
}
