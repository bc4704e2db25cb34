use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, HistoryEntry, ReadingEntry, ReadingStatus, RecommendationFilters, User,
        UserPreferences,
    },
};

use super::Library;

/// In-memory implementation of the [`Library`] collaborator
///
/// Holds users, books, readings, and preferences behind a single RwLock.
/// Scoring never runs under the lock: callers fetch snapshots, release, then
/// rank.
#[derive(Default)]
pub struct MemoryLibrary {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    books: HashMap<Uuid, Book>,
    readings: HashMap<Uuid, ReadingEntry>,
    preferences: HashMap<Uuid, UserPreferences>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user; username and email must be unused
    pub async fn create_user(&self, username: &str, email: &str) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|user| user.username == username || user.email == email)
        {
            return Err(AppError::Conflict(
                "A user with this username or email already exists".to_string(),
            ));
        }
        let user = User::new(username, email);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Adds a book to the catalog
    pub async fn create_book(&self, book: Book) -> AppResult<Book> {
        let mut inner = self.inner.write().await;
        if let Some(isbn) = &book.isbn {
            if inner
                .books
                .values()
                .any(|existing| existing.isbn.as_deref() == Some(isbn.as_str()))
            {
                return Err(AppError::Conflict(format!(
                    "A book with ISBN {} already exists",
                    isbn
                )));
            }
        }
        inner.books.insert(book.id, book.clone());
        Ok(book)
    }

    pub async fn get_book(&self, book_id: Uuid) -> AppResult<Book> {
        let inner = self.inner.read().await;
        inner
            .books
            .get(&book_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
    }

    /// Catalog listing with optional genre/author narrowing, sorted by title
    pub async fn list_books(&self, filters: &RecommendationFilters) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        let mut books: Vec<Book> = inner
            .books
            .values()
            .filter(|book| filters.matches(book))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    /// Logs a book into a reader's history; one entry per (user, book)
    pub async fn add_reading(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        rating: Option<f64>,
        status: ReadingStatus,
    ) -> AppResult<ReadingEntry> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        if !inner.books.contains_key(&book_id) {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }
        if inner
            .readings
            .values()
            .any(|entry| entry.user_id == user_id && entry.book_id == book_id)
        {
            return Err(AppError::Conflict(
                "A reading entry for this book already exists".to_string(),
            ));
        }
        let entry = ReadingEntry::new(user_id, book_id, rating, status);
        inner.readings.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// A reader's log, optionally narrowed by status, oldest first
    pub async fn list_readings(
        &self,
        user_id: Uuid,
        status: Option<ReadingStatus>,
    ) -> AppResult<Vec<ReadingEntry>> {
        let inner = self.inner.read().await;
        if !inner.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        let mut readings: Vec<ReadingEntry> = inner
            .readings
            .values()
            .filter(|entry| entry.user_id == user_id)
            .filter(|entry| status.map_or(true, |wanted| entry.status == wanted))
            .cloned()
            .collect();
        readings.sort_by_key(|entry| entry.created_at);
        Ok(readings)
    }

    /// Updates the rating and status of an existing reading entry
    pub async fn update_reading(
        &self,
        user_id: Uuid,
        reading_id: Uuid,
        rating: Option<f64>,
        status: ReadingStatus,
    ) -> AppResult<ReadingEntry> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .readings
            .get_mut(&reading_id)
            .filter(|entry| entry.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Reading {} not found", reading_id)))?;
        entry.rating = rating;
        entry.status = status;
        Ok(entry.clone())
    }

    pub async fn get_preferences(&self, user_id: Uuid) -> AppResult<UserPreferences> {
        let inner = self.inner.read().await;
        if !inner.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        Ok(inner.preferences.get(&user_id).cloned().unwrap_or_default())
    }

    /// Creates or replaces a reader's stated preferences
    pub async fn upsert_preferences(
        &self,
        user_id: Uuid,
        preferences: UserPreferences,
    ) -> AppResult<UserPreferences> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        inner.preferences.insert(user_id, preferences.clone());
        Ok(preferences)
    }
}

#[async_trait]
impl Library for MemoryLibrary {
    async fn fetch_history(&self, user_id: Uuid) -> AppResult<Vec<HistoryEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&ReadingEntry> = inner
            .readings
            .values()
            .filter(|entry| entry.user_id == user_id)
            .collect();
        entries.sort_by_key(|entry| entry.created_at);
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                inner
                    .books
                    .get(&entry.book_id)
                    .map(|book| HistoryEntry::new(book.clone(), entry.rating, entry.status))
            })
            .collect())
    }

    async fn fetch_preferences(&self, user_id: Uuid) -> AppResult<UserPreferences> {
        let inner = self.inner.read().await;
        Ok(inner.preferences.get(&user_id).cloned().unwrap_or_default())
    }

    async fn fetch_candidate_pool(
        &self,
        filters: &RecommendationFilters,
    ) -> AppResult<Vec<Book>> {
        self.list_books(filters).await
    }

    async fn fetch_book(&self, book_id: Uuid) -> AppResult<Book> {
        self.get_book(book_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(title: &str) -> Book {
        Book::new(
            title,
            vec!["fantasy".to_string()],
            vec!["Author".to_string()],
        )
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates() {
        let library = MemoryLibrary::new();
        library.create_user("ada", "ada@example.com").await.unwrap();

        let err = library
            .create_user("ada", "other@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = library
            .create_user("other", "ada@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let library = MemoryLibrary::new();
        let err = library.get_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_isbn_is_a_conflict() {
        let library = MemoryLibrary::new();
        let mut first = sample_book("First");
        first.isbn = Some("978-0-123".to_string());
        let mut second = sample_book("Second");
        second.isbn = Some("978-0-123".to_string());

        library.create_book(first).await.unwrap();
        let err = library.create_book(second).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_duplicate_reading_is_a_conflict() {
        let library = MemoryLibrary::new();
        let user = library.create_user("ada", "ada@example.com").await.unwrap();
        let book = library.create_book(sample_book("Dune")).await.unwrap();

        library
            .add_reading(user.id, book.id, Some(4.0), ReadingStatus::Completed)
            .await
            .unwrap();
        let err = library
            .add_reading(user.id, book.id, None, ReadingStatus::Reading)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_fetch_history_resolves_books() {
        let library = MemoryLibrary::new();
        let user = library.create_user("ada", "ada@example.com").await.unwrap();
        let book = library.create_book(sample_book("Dune")).await.unwrap();
        library
            .add_reading(user.id, book.id, Some(5.0), ReadingStatus::Completed)
            .await
            .unwrap();

        let history = library.fetch_history(user.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].book.title, "Dune");
        assert_eq!(history[0].rating, Some(5.0));
        assert_eq!(history[0].status, ReadingStatus::Completed);
    }

    #[tokio::test]
    async fn test_fetch_history_for_unknown_user_is_empty_not_error() {
        let library = MemoryLibrary::new();
        let history = library.fetch_history(Uuid::new_v4()).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_candidate_pool_applies_filters() {
        let library = MemoryLibrary::new();
        let fantasy = library.create_book(sample_book("Fantasy One")).await.unwrap();
        let mut romance = Book::new("Romance One", vec!["romance".to_string()], vec![]);
        romance.average_rating = Some(4.0);
        library.create_book(romance).await.unwrap();

        let filters = RecommendationFilters {
            genre: Some("fantasy".to_string()),
            ..Default::default()
        };
        let pool = library.fetch_candidate_pool(&filters).await.unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, fantasy.id);
    }

    #[tokio::test]
    async fn test_update_reading_checks_ownership() {
        let library = MemoryLibrary::new();
        let owner = library.create_user("ada", "ada@example.com").await.unwrap();
        let other = library
            .create_user("bob", "bob@example.com")
            .await
            .unwrap();
        let book = library.create_book(sample_book("Dune")).await.unwrap();
        let entry = library
            .add_reading(owner.id, book.id, None, ReadingStatus::Reading)
            .await
            .unwrap();

        let err = library
            .update_reading(other.id, entry.id, Some(3.0), ReadingStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let updated = library
            .update_reading(owner.id, entry.id, Some(3.0), ReadingStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.rating, Some(3.0));
        assert_eq!(updated.status, ReadingStatus::Completed);
    }

    #[tokio::test]
    async fn test_preferences_default_until_upserted() {
        let library = MemoryLibrary::new();
        let user = library.create_user("ada", "ada@example.com").await.unwrap();

        let prefs = library.get_preferences(user.id).await.unwrap();
        assert_eq!(prefs, UserPreferences::default());

        let stated = UserPreferences {
            favorite_genres: vec!["poetry".to_string()],
            ..Default::default()
        };
        library
            .upsert_preferences(user.id, stated.clone())
            .await
            .unwrap();
        let prefs = library.get_preferences(user.id).await.unwrap();
        assert_eq!(prefs, stated);
    }
}
