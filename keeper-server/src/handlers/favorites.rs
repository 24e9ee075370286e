use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use keeper_core::FavoriteRecord;

use crate::{errors::AppResult, infra::app_state::FavoritesState};

pub const FAVORITE_SAVED_MESSAGE: &str = "Favorite saved!";

/// Body of `POST /favorites`.
///
/// Fields are taken as raw JSON so any shape reaches the registry, which
/// reports the documented messages. Only JSON strings count as values.
#[derive(Debug, Default, Deserialize)]
pub struct CreateFavoriteRequest {
    pub name: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub url: Option<Value>,
}

impl CreateFavoriteRequest {
    fn field(value: &Option<Value>) -> &str {
        value.as_ref().and_then(Value::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteRecord>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteCreatedResponse {
    pub message: &'static str,
    pub favorite: FavoriteRecord,
}

pub async fn list_favorites_handler(
    State(state): State<FavoritesState>,
) -> AppResult<Json<FavoritesResponse>> {
    let favorites = state.registry.list_all().await?;
    Ok(Json(FavoritesResponse { favorites }))
}

/// An unreadable body (wrong content type, malformed JSON, not an object)
/// is treated as an empty one, so it fails validation like any other
/// request without a usable `type`.
pub async fn create_favorite_handler(
    State(state): State<FavoritesState>,
    body: Result<Json<CreateFavoriteRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<FavoriteCreatedResponse>)> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable favorite body");
            CreateFavoriteRequest::default()
        }
    };

    let favorite = state
        .registry
        .create(
            CreateFavoriteRequest::field(&request.name),
            CreateFavoriteRequest::field(&request.kind),
            CreateFavoriteRequest::field(&request.url),
        )
        .await?;

    info!(id = %favorite.id, name = %favorite.name, "favorite saved");

    Ok((
        StatusCode::CREATED,
        Json(FavoriteCreatedResponse {
            message: FAVORITE_SAVED_MESSAGE,
            favorite,
        }),
    ))
}
