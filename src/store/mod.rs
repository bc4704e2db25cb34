use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, HistoryEntry, RecommendationFilters, UserPreferences},
};

pub mod memory;

pub use memory::MemoryLibrary;

/// Data-store collaborator consumed by the recommendation service
///
/// The recommender never validates identifiers: a reader the store does not
/// know yields an empty history and default preferences, and scoring degrades
/// gracefully from there. Only `fetch_book` treats absence as an error, since
/// the similar-to entry point cannot proceed without its reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Library: Send + Sync {
    /// A reader's full log with each entry's book resolved
    async fn fetch_history(&self, user_id: Uuid) -> AppResult<Vec<HistoryEntry>>;

    /// A reader's stated preferences; defaults when never set
    async fn fetch_preferences(&self, user_id: Uuid) -> AppResult<UserPreferences>;

    /// Catalog books surviving the given hard filters
    async fn fetch_candidate_pool(
        &self,
        filters: &RecommendationFilters,
    ) -> AppResult<Vec<Book>>;

    /// A single book by id
    async fn fetch_book(&self, book_id: Uuid) -> AppResult<Book>;
}
