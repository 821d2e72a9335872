use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::AppError,
    extractors::{RecordId, ValidJson, ValidQuery},
    pagination::Pagination,
    resources::{
        dto::{CreateResource, ResourceResponse},
        repo::ResourceRepo,
    },
    state::AppState,
};

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/resources", get(list_resources).post(add_resource))
        .route("/resources/:id", get(get_resource).delete(delete_resource))
}

#[instrument(skip(state))]
pub async fn list_resources(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<ResourceResponse>>, AppError> {
    let rows = ResourceRepo::new(&state.db).list(page).await?;
    Ok(Json(rows.into_iter().map(ResourceResponse::from).collect()))
}

#[instrument(skip(state, input))]
pub async fn add_resource(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateResource>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<ResourceResponse>), AppError> {
    let resource = ResourceRepo::new(&state.db).create(input).await?;
    info!(id = resource.id, "resource added");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/resources/{}", resource.id))],
        Json(resource.into()),
    ))
}

#[instrument(skip(state))]
pub async fn get_resource(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<ResourceResponse>, AppError> {
    let resource = ResourceRepo::new(&state.db).get(id).await?;
    Ok(Json(resource.into()))
}

#[instrument(skip(state))]
pub async fn delete_resource(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    ResourceRepo::new(&state.db).delete(id).await?;
    info!(id, "resource deleted");
    Ok(StatusCode::NO_CONTENT)
}
