//! Game API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{CreateGameRequest, Game, GameStatus, NewGame, UpdateGameRequest};
use crate::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/games - List all games.
pub async fn list_games(State(state): State<AppState>) -> ApiResult<Vec<Game>> {
    Ok(Json(state.store.list_games().await))
}

/// GET /api/games/:id - Get a single game.
pub async fn get_game(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Game> {
    match state.store.get_game(&id).await {
        Some(game) => Ok(Json(game)),
        None => Err(game_not_found(&id)),
    }
}

/// POST /api/games - Create a new game.
pub async fn create_game(
    State(state): State<AppState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> ApiResult<Game> {
    let Json(request) = payload?;

    // Validate required fields before touching the store
    let draft = validate_new_game(request)?;

    let game = state.store.add_game(draft).await?;
    Ok(Json(game))
}

/// PUT /api/games/:id - Update a game.
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateGameRequest>, JsonRejection>,
) -> ApiResult<Game> {
    let Json(request) = payload?;

    if request
        .title
        .as_deref()
        .is_some_and(|title| title.trim().is_empty())
    {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }

    match state.store.update_game(&id, &request).await? {
        Some(game) => Ok(Json(game)),
        None => Err(game_not_found(&id)),
    }
}

/// DELETE /api/games/:id - Delete a game.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResponse> {
    if state.store.delete_game(&id).await? {
        Ok(Json(DeleteResponse { success: true }))
    } else {
        Err(game_not_found(&id))
    }
}

/// POST /api/games/:id/play - Record one play of a game.
pub async fn play_game(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Game> {
    match state.store.record_play(&id).await? {
        Some(game) => Ok(Json(game)),
        None => Err(game_not_found(&id)),
    }
}

fn game_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Game {} not found", id))
}

/// Check that every required field is present and non-blank, reporting all
/// missing ones at once, then build the store draft.
fn validate_new_game(request: CreateGameRequest) -> Result<NewGame, AppError> {
    let required = [
        ("title", &request.title),
        ("category", &request.category),
        ("iframeUrl", &request.iframe_url),
        ("thumbnail", &request.thumbnail),
        ("status", &request.status),
    ];

    let missing: Vec<String> = required
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let raw_status = request.status.unwrap_or_default();
    let status = GameStatus::parse(&raw_status).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid status '{}': expected 'active' or 'inactive'",
            raw_status
        ))
    })?;

    Ok(NewGame {
        title: request.title.unwrap_or_default(),
        category: request.category.unwrap_or_default(),
        iframe_url: request.iframe_url.unwrap_or_default(),
        thumbnail: request.thumbnail.unwrap_or_default(),
        description: request.description.filter(|d| !d.trim().is_empty()),
        status,
    })
}
