use crate::error::{AppError, Result};
use crate::model::{
    IncomingQuery, SetCompletionPercentageRequest, ToDoItemRequest, ToDoItemResponse,
};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tickler_core::{IncomingPeriod, ItemId};
use tracing::info;

type JsonPayload<T> = std::result::Result<Json<T>, JsonRejection>;

fn parse_id(raw: &str) -> Result<ItemId> {
    Ok(raw.parse::<ItemId>()?)
}

fn responses(items: Vec<tickler_core::ToDoItem>) -> Vec<ToDoItemResponse> {
    items.into_iter().map(ToDoItemResponse::from).collect()
}

pub async fn list_items_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ToDoItemResponse>>> {
    let items = state.items().get_all().await?;
    Ok(Json(responses(items)))
}

pub async fn get_item_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ToDoItemResponse>> {
    let id = parse_id(&id)?;
    let item = state
        .items()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {id} not found")))?;
    Ok(Json(item.into()))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    payload: JsonPayload<ToDoItemRequest>,
) -> Result<Response> {
    let Json(request) = payload?;
    request.validate().map_err(AppError::BadRequest)?;

    let id = state.items().add(request.into_item()).await?;
    info!(%id, "item created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/items/{id}"))],
        Json(id),
    )
        .into_response())
}

pub async fn update_item_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: JsonPayload<ToDoItemRequest>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    request.validate().map_err(AppError::BadRequest)?;

    let mut item = state
        .items()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {id} not found")))?;
    request.apply_to(&mut item);
    state.items().update(item).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_completion_percentage_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: JsonPayload<SetCompletionPercentageRequest>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let percentage = request.validate()?;

    state
        .items()
        .set_completion_percentage(&id, i64::from(percentage.value()))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_as_done_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.items().mark_as_done(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.items().delete(&id).await?;
    info!(%id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn incoming_items_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<IncomingQuery>, QueryRejection>,
) -> Result<Json<Vec<ToDoItemResponse>>> {
    let Query(query) = query?;
    let period = query
        .period
        .ok_or_else(|| AppError::BadRequest("missing query parameter: period".to_string()))?
        .parse::<IncomingPeriod>()?;

    let items = state.items().get_incoming(period).await?;
    Ok(Json(responses(items)))
}
