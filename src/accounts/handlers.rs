use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{
        dto::{LoginRequest, MessageResponse},
        repo::AccountRepo,
        repo_types::AccountKind,
        services::{off_executor, verify_password},
    },
    error::AppError,
    extractors::{RecordId, ValidJson, ValidQuery},
    pagination::Pagination,
    state::AppState,
};

/// CRUD + login routes for one account kind, mounted under `/<table>`.
pub fn account_routes<K: AccountKind>() -> Router<AppState> {
    let base = format!("/{}", K::TABLE);
    Router::new()
        .route(&base, get(list::<K>).post(create::<K>))
        .route(&format!("{base}/login"), post(login::<K>))
        .route(
            &format!("{base}/:id"),
            get(fetch::<K>)
                .put(update::<K>)
                .patch(update::<K>)
                .delete(delete::<K>),
        )
}

#[instrument(skip(state, input), fields(kind = K::RESOURCE))]
pub async fn create<K: AccountKind>(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<K::Create>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<K::Response>), AppError> {
    let record = match AccountRepo::<K>::new(&state.db).create(input).await {
        Ok(r) => r,
        Err(e @ AppError::Conflict(_)) => {
            warn!("email already registered");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let id = K::id(&record);
    info!(id, "account created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/{}/{}", K::TABLE, id))],
        Json(K::Response::from(record)),
    ))
}

#[instrument(skip(state), fields(kind = K::RESOURCE))]
pub async fn list<K: AccountKind>(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<K::Response>>, AppError> {
    let records = AccountRepo::<K>::new(&state.db).list(page).await?;
    Ok(Json(records.into_iter().map(K::Response::from).collect()))
}

#[instrument(skip(state), fields(kind = K::RESOURCE))]
pub async fn fetch<K: AccountKind>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<K::Response>, AppError> {
    let record = AccountRepo::<K>::new(&state.db).get(id).await?;
    Ok(Json(K::Response::from(record)))
}

#[instrument(skip(state, patch), fields(kind = K::RESOURCE))]
pub async fn update<K: AccountKind>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(patch): ValidJson<K::Update>,
) -> Result<Json<K::Response>, AppError> {
    let record = AccountRepo::<K>::new(&state.db).update(id, patch).await?;
    info!(id, "account updated");
    Ok(Json(K::Response::from(record)))
}

#[instrument(skip(state), fields(kind = K::RESOURCE))]
pub async fn delete<K: AccountKind>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>, AppError> {
    AccountRepo::<K>::new(&state.db).delete(id).await?;
    info!(id, "account deleted");
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        K::LABEL
    ))))
}

/// Plain credential check. Issues no session or token.
#[instrument(skip(state, payload), fields(kind = K::RESOURCE))]
pub async fn login<K: AccountKind>(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let record = match AccountRepo::<K>::new(&state.db)
        .find_by_email(&payload.email)
        .await?
    {
        Some(r) => r,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::Unauthorized);
        }
    };

    let hash = K::password_hash(&record).to_owned();
    let ok = off_executor(move || verify_password(&payload.password, &hash)).await?;
    if !ok {
        warn!(id = K::id(&record), "login invalid password");
        return Err(AppError::Unauthorized);
    }

    info!(id = K::id(&record), "login ok");
    Ok(Json(MessageResponse::new("Login successful")))
}
