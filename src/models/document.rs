//! The persisted document: the whole catalog in one JSON object.

use serde::{Deserialize, Serialize};

use super::{Game, Stats};

/// Root of the on-disk JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogDocument {
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub stats: Stats,
}
