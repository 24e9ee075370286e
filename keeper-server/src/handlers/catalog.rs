use axum::{Json, extract::State};
use serde_json::{Value, json};

use keeper_core::CatalogResource;

use crate::{errors::AppResult, infra::app_state::FavoritesState};

/// `GET /movies`: upstream film listing under a `movies` key.
pub async fn movies_handler(
    State(state): State<FavoritesState>,
) -> AppResult<Json<Value>> {
    let movies = state.catalog.fetch(CatalogResource::Films).await?;
    Ok(Json(json!({ "movies": movies })))
}

/// `GET /people`: upstream character listing under a `people` key.
pub async fn people_handler(
    State(state): State<FavoritesState>,
) -> AppResult<Json<Value>> {
    let people = state.catalog.fetch(CatalogResource::People).await?;
    Ok(Json(json!({ "people": people })))
}
