use actix_web::{get, http::header::ContentType, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::{CompleteQuestRequest, GenerateQuestQuery, QuestDetailsRequest},
    services::graph_parser::EMPTY_GRAPH,
};

pub const QUEST_STORED_HEADER: &str = "x-quest-stored";
pub const QUEST_ID_HEADER: &str = "x-quest-id";

#[get("/generate-quest")]
pub async fn generate_quest(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<GenerateQuestQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let outcome = state
        .quest_service
        .generate_quest(&query.question)
        .await
        .inspect_err(|e| {
            log::warn!(
                "generate-quest failed [request {}]: {}",
                get_request_id(&req).unwrap_or_default(),
                e
            )
        })?;

    let mut response = HttpResponse::Ok();
    response
        .content_type(ContentType::json())
        .insert_header((QUEST_STORED_HEADER, outcome.is_stored().to_string()));
    if let Some(id) = outcome.quest_id() {
        response.insert_header((QUEST_ID_HEADER, id.to_string()));
    }

    Ok(response.body(outcome.graph().to_string()))
}

#[post("/get-quest-details")]
pub async fn get_quest_details(
    state: web::Data<AppState>,
    request: web::Json<QuestDetailsRequest>,
) -> HttpResponse {
    let quest_text = request.into_inner().quest_text.unwrap_or_default();
    let outcome = state.detail_service.generate_details(&quest_text).await;
    HttpResponse::Ok().json(outcome)
}

#[post("/complete-quest")]
pub async fn complete_quest(
    state: web::Data<AppState>,
    request: web::Json<CompleteQuestRequest>,
) -> Result<HttpResponse, AppError> {
    let node_id = request.into_inner().id.unwrap_or_default();
    let completed = state.quest_service.complete_quest(&node_id)?;
    Ok(HttpResponse::Ok().json(completed))
}

#[get("/history")]
pub async fn get_history(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.quest_service.get_history().await)
}

#[get("/quest/{id}")]
pub async fn get_quest(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    let graph = match id.parse::<i64>() {
        Ok(id) => state.quest_service.get_quest_by_id(id).await,
        Err(_) => {
            log::info!("Quest id {:?} is not numeric", id.as_str());
            EMPTY_GRAPH.to_string()
        }
    };

    HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(graph)
}
