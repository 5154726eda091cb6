//! The catalog store: games and aggregate stats behind one lock.
//!
//! Each operation holds the lock for its whole read-modify-persist cycle.
//! Mutations are applied to a copy of the document and only committed to
//! memory once the copy has been written to disk.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tokio::sync::Mutex;

use super::{load_document, write_document, StoreError};
use crate::models::{
    CatalogDocument, Game, GameRef, NewGame, StatKind, Stats, UpdateGameRequest,
    UpdateStatsRequest,
};

/// Single shared store for the process, owned by the application state.
pub struct Storage {
    path: PathBuf,
    document: Mutex<CatalogDocument>,
}

impl Storage {
    /// Load the document at `path`, or start empty if it cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = load_document(&path).await;
        tracing::info!(
            "Loaded {} games from {}",
            document.games.len(),
            path.display()
        );

        Self {
            path,
            document: Mutex::new(document),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `next` to disk, then make it the in-memory document.
    async fn commit(
        &self,
        current: &mut CatalogDocument,
        next: CatalogDocument,
    ) -> Result<(), StoreError> {
        write_document(&self.path, &next).await?;
        *current = next;
        Ok(())
    }

    // ==================== GAME OPERATIONS ====================

    /// List all games in insertion order.
    pub async fn list_games(&self) -> Vec<Game> {
        self.document.lock().await.games.clone()
    }

    /// Get a game by exact id.
    pub async fn get_game(&self, id: &str) -> Option<Game> {
        let document = self.document.lock().await;
        document.games.iter().find(|g| g.id == id).cloned()
    }

    /// Create a new game.
    pub async fn add_game(&self, draft: NewGame) -> Result<Game, StoreError> {
        let mut document = self.document.lock().await;

        if title_taken(&document.games, &draft.title, None) {
            return Err(StoreError::DuplicateTitle(draft.title));
        }

        let now = timestamp();
        let game = Game {
            id: fresh_id(&document.games),
            title: draft.title,
            category: draft.category,
            iframe_url: draft.iframe_url,
            thumbnail: draft.thumbnail,
            description: draft.description,
            status: draft.status,
            play_count: 0,
            created_at: now.clone(),
            updated_at: now.clone(),
            added_date: now,
        };

        let mut next = document.clone();
        next.games.push(game.clone());
        self.commit(&mut document, next).await?;

        tracing::info!(
            "Added game {} ({}, {})",
            game.id,
            game.title,
            game.status.as_str()
        );
        Ok(game)
    }

    /// Merge the provided fields onto an existing game.
    ///
    /// Returns `Ok(None)` if no game has this id.
    pub async fn update_game(
        &self,
        id: &str,
        changes: &UpdateGameRequest,
    ) -> Result<Option<Game>, StoreError> {
        let mut document = self.document.lock().await;

        let Some(index) = document.games.iter().position(|g| g.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            if title_taken(&document.games, title, Some(id)) {
                return Err(StoreError::DuplicateTitle(title.clone()));
            }
        }

        let mut next = document.clone();
        let game = &mut next.games[index];
        if let Some(title) = &changes.title {
            game.title = title.clone();
        }
        if let Some(category) = &changes.category {
            game.category = category.clone();
        }
        if let Some(iframe_url) = &changes.iframe_url {
            game.iframe_url = iframe_url.clone();
        }
        if let Some(thumbnail) = &changes.thumbnail {
            game.thumbnail = thumbnail.clone();
        }
        if let Some(description) = &changes.description {
            // A blank description clears it.
            game.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        if let Some(status) = changes.status {
            game.status = status;
        }
        game.updated_at = timestamp();
        let updated = game.clone();

        if let Some(pointer) = next.stats.most_played_game.as_mut() {
            if pointer.id == updated.id {
                pointer.title = updated.title.clone();
            }
        }

        self.commit(&mut document, next).await?;
        tracing::debug!("Updated game {}", updated.id);
        Ok(Some(updated))
    }

    /// Delete a game. Only writes to disk if something was removed.
    pub async fn delete_game(&self, id: &str) -> Result<bool, StoreError> {
        let mut document = self.document.lock().await;

        let Some(index) = document.games.iter().position(|g| g.id == id) else {
            return Ok(false);
        };

        let mut next = document.clone();
        let removed = next.games.remove(index);
        if next
            .stats
            .most_played_game
            .as_ref()
            .is_some_and(|pointer| pointer.id == removed.id)
        {
            next.stats.most_played_game = None;
        }

        self.commit(&mut document, next).await?;
        tracing::info!("Deleted game {} ({})", removed.id, removed.title);
        Ok(true)
    }

    /// Count one play of a game, on the game and on the aggregate counters.
    pub async fn record_play(&self, id: &str) -> Result<Option<Game>, StoreError> {
        let mut document = self.document.lock().await;

        let Some(index) = document.games.iter().position(|g| g.id == id) else {
            return Ok(None);
        };

        let mut next = document.clone();
        let game = &mut next.games[index];
        game.play_count += 1;
        game.updated_at = timestamp();
        let played = game.clone();
        next.stats.total_plays += 1;
        next.stats.today_plays += 1;

        self.commit(&mut document, next).await?;
        Ok(Some(played))
    }

    // ==================== STATS OPERATIONS ====================

    /// Current stats snapshot, as stored.
    pub async fn get_stats(&self) -> Stats {
        self.document.lock().await.stats.clone()
    }

    /// Bump the total and today counters for `kind` by one.
    pub async fn increment_stats(&self, kind: StatKind) -> Result<Stats, StoreError> {
        let mut document = self.document.lock().await;

        let mut next = document.clone();
        match kind {
            StatKind::Visits => {
                next.stats.total_visits += 1;
                next.stats.today_visits += 1;
            }
            StatKind::Plays => {
                next.stats.total_plays += 1;
                next.stats.today_plays += 1;
            }
        }
        let stats = next.stats.clone();

        self.commit(&mut document, next).await?;
        Ok(stats)
    }

    /// Zero the "today" counters. Totals are untouched.
    pub async fn reset_daily_stats(&self) -> Result<Stats, StoreError> {
        let mut document = self.document.lock().await;

        let mut next = document.clone();
        next.stats.today_visits = 0;
        next.stats.today_plays = 0;
        let stats = next.stats.clone();

        self.commit(&mut document, next).await?;
        tracing::info!("Reset daily stats");
        Ok(stats)
    }

    /// Store externally computed fields: active user count and most played game.
    pub async fn update_stats_snapshot(
        &self,
        request: &UpdateStatsRequest,
    ) -> Result<Stats, StoreError> {
        let mut document = self.document.lock().await;

        let mut next = document.clone();
        if let Some(active_users) = request.active_users {
            next.stats.active_users = active_users;
        }
        match &request.most_played_game_id {
            None => {}
            Some(None) => next.stats.most_played_game = None,
            Some(Some(id)) => {
                let game = next
                    .games
                    .iter()
                    .find(|g| &g.id == id)
                    .ok_or_else(|| StoreError::UnknownGame(id.clone()))?;
                next.stats.most_played_game = Some(GameRef {
                    id: game.id.clone(),
                    title: game.title.clone(),
                });
            }
        }
        let stats = next.stats.clone();

        self.commit(&mut document, next).await?;
        Ok(stats)
    }
}

/// Case-insensitive title check, optionally ignoring one game.
fn title_taken(games: &[Game], title: &str, except_id: Option<&str>) -> bool {
    let wanted = title.to_lowercase();
    games
        .iter()
        .filter(|g| Some(g.id.as_str()) != except_id)
        .any(|g| g.title.to_lowercase() == wanted)
}

fn fresh_id(games: &[Game]) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if !games.iter().any(|g| g.id == id) {
            return id;
        }
    }
}

/// Fixed-width UTC timestamp, so string order matches time order.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
