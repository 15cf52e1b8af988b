use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::jewellery;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::jewellery::*;
use crate::state::AppState;
use crate::utils::filter::jewellery_condition;

#[utoipa::path(
    post,
    path = "/jewellery",
    tag = "Jewellery",
    operation_id = "createJewellery",
    summary = "Create a jewellery item",
    description = "Creates a catalog record. `image_url` and `category` are required; omitted or null tag lists are stored as empty lists. The server assigns `id` and `created_at`.",
    request_body = CreateJewelleryRequest,
    responses(
        (status = 201, description = "Item created", body = JewelleryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(category = %payload.category))]
pub async fn create_jewellery(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateJewelleryRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_jewellery(&payload)?;

    let model = insert_jewellery(&state.db, payload).await?;
    tracing::info!(id = %model.id, "Created jewellery item");

    Ok((StatusCode::CREATED, Json(JewelleryResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/jewellery",
    tag = "Jewellery",
    operation_id = "listJewellery",
    summary = "List jewellery items",
    description = "Returns every item matching all supplied filters. `category` and `search` are case-insensitive substring matches (`search` over category, material and notes); `occasion`, `outfit_type` and `color` require an exact tag (`color` checks primary and secondary colors). No filters returns the whole catalog.",
    params(JewelleryListQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<JewelleryResponse>),
        (status = 400, description = "Malformed query string (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(
    category = ?query.category,
    occasion = ?query.occasion,
    outfit_type = ?query.outfit_type,
    color = ?query.color,
    search = ?query.search,
))]
pub async fn list_jewellery(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<JewelleryListQuery>,
) -> Result<Json<Vec<JewelleryResponse>>, AppError> {
    let items = find_matching(&state.db, &query).await?;
    Ok(Json(items.into_iter().map(JewelleryResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/jewellery/{id}",
    tag = "Jewellery",
    operation_id = "getJewellery",
    summary = "Get a jewellery item by ID",
    params(("id" = String, Path, description = "Item ID (UUID)")),
    responses(
        (status = 200, description = "Item details", body = JewelleryResponse),
        (status = 400, description = "Malformed ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_jewellery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JewelleryResponse>, AppError> {
    let id = parse_id(&id)?;
    tracing::Span::current().record("id", tracing::field::display(id));
    let model = find_jewellery(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/jewellery/{id}",
    tag = "Jewellery",
    operation_id = "updateJewellery",
    summary = "Update a jewellery item",
    description = "Applies a sparse change-mapping: only fields present in the body are modified; an explicit `null` clears optional fields and empties tag lists. `image_url` and `category` cannot be null. `id` and `created_at` are never changed. An empty body returns the current record unchanged. Concurrent updates are last-write-wins.",
    params(("id" = String, Path, description = "Item ID (UUID)")),
    request_body = UpdateJewelleryRequest,
    responses(
        (status = 200, description = "Item updated", body = JewelleryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_jewellery(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateJewelleryRequest>,
) -> Result<Json<JewelleryResponse>, AppError> {
    let id = parse_id(&id)?;
    tracing::Span::current().record("id", tracing::field::display(id));
    validate_update_jewellery(&payload)?;

    let model = apply_changes(&state.db, id, payload).await?;
    Ok(Json(model.into()))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::Validation("Invalid jewellery ID".into()))
}

async fn insert_jewellery<C: ConnectionTrait>(
    db: &C,
    payload: CreateJewelleryRequest,
) -> Result<jewellery::Model, AppError> {
    let active = payload.into_active_model(Uuid::now_v7(), chrono::Utc::now());
    Ok(active.insert(db).await?)
}

async fn find_matching<C: ConnectionTrait>(
    db: &C,
    query: &JewelleryListQuery,
) -> Result<Vec<jewellery::Model>, AppError> {
    Ok(jewellery::Entity::find()
        .filter(jewellery_condition(query))
        .order_by_asc(jewellery::Column::CreatedAt)
        .order_by_asc(jewellery::Column::Id)
        .all(db)
        .await?)
}

async fn find_jewellery<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<jewellery::Model, AppError> {
    jewellery::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Jewellery item not found".into()))
}

/// Look up `id`, apply the sparse changes and persist them in one transaction.
/// Nothing is written when the record does not exist.
async fn apply_changes(
    db: &DatabaseConnection,
    id: Uuid,
    changes: UpdateJewelleryRequest,
) -> Result<jewellery::Model, AppError> {
    if changes.is_empty() {
        return find_jewellery(db, id).await;
    }

    let txn = db.begin().await?;

    let existing = find_jewellery(&txn, id).await?;
    let mut active: jewellery::ActiveModel = existing.into();
    changes.apply(&mut active);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(%id, "Updated jewellery item");
    Ok(model)
}
