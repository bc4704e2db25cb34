use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered reader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,
    /// Display name, unique across users
    pub username: String,
    /// Contact email, unique across users
    pub email: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh id
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

/// Explicitly stated reading preferences
///
/// Stated favorites are merged into the taste profile with an additive boost
/// so an unread favorite genre still influences scoring. Page bounds are
/// hard-filter material and never enter the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Genres the reader has declared a taste for
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    /// Authors the reader has declared a taste for
    #[serde(default)]
    pub favorite_authors: Vec<String>,
    /// Preferred minimum page count
    pub min_page_count: Option<u32>,
    /// Preferred maximum page count
    pub max_page_count: Option<u32>,
}
