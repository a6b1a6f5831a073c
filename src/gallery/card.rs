//! Card record and the factory that hands out ids.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// Opaque card identity, rendered as `card-<n>` in markup and form values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u64);

impl CardId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("card-")
            .and_then(|n| n.parse().ok())
            .map(CardId)
            .ok_or_else(|| GalleryError::InvalidCardId(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Informational only.
    pub created_at: DateTime<Utc>,
    pub click_count: u32,
}

/// Builds cards with fresh ids from a monotonic counter.
#[derive(Debug, Clone, Default)]
pub struct CardFactory {
    next_id: u64,
}

impl CardFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_card(&mut self, icon: &str, title: &str, description: &str) -> Card {
        self.next_id += 1;
        Card {
            id: CardId(self.next_id),
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            click_count: 0,
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}
