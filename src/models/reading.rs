use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Book;

/// Where a book sits in a reader's log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    /// On the list, not yet started
    WantToRead,
    /// Currently being read
    Reading,
    /// Finished
    Completed,
}

impl ReadingStatus {
    /// Whether the reader has actually spent time with the book
    ///
    /// Want-to-read entries sit in the log but carry no reading experience,
    /// so they neither feed the taste profile nor block recommendations.
    pub fn is_experienced(&self) -> bool {
        matches!(self, ReadingStatus::Reading | ReadingStatus::Completed)
    }
}

/// One entry in a reader's log, as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingEntry {
    /// Unique identifier for the entry
    pub id: Uuid,
    /// The reader
    pub user_id: Uuid,
    /// The book
    pub book_id: Uuid,
    /// The reader's rating, when given
    pub rating: Option<f64>,
    /// Progress status
    pub status: ReadingStatus,
    /// When the entry was logged
    pub created_at: DateTime<Utc>,
}

impl ReadingEntry {
    /// Creates a new reading entry
    pub fn new(user_id: Uuid, book_id: Uuid, rating: Option<f64>, status: ReadingStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            book_id,
            rating,
            status,
            created_at: Utc::now(),
        }
    }
}

/// A reading-log entry with its book resolved, as the recommender consumes it
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub book: Book,
    pub rating: Option<f64>,
    pub status: ReadingStatus,
}

impl HistoryEntry {
    pub fn new(book: Book, rating: Option<f64>, status: ReadingStatus) -> Self {
        Self {
            book,
            rating,
            status,
        }
    }
}
