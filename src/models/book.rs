use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book in the catalog
///
/// Read-only to the recommender: within a single ranking call the id uniquely
/// determines every other field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier for the book
    pub id: Uuid,
    /// Title of the book
    pub title: String,
    /// Genres the book belongs to
    pub genres: Vec<String>,
    /// Authors of the book
    pub authors: Vec<String>,
    /// Average reader rating on the configured scale
    pub average_rating: Option<f64>,
    /// Number of pages
    pub page_count: Option<u32>,
    /// ISBN, when known
    pub isbn: Option<String>,
    /// Year of first publication
    pub publication_year: Option<i32>,
    /// Back-cover style description
    pub description: Option<String>,
    /// How many ratings the average is based on
    pub ratings_count: Option<u32>,
}

impl Book {
    /// Creates a new book with a fresh id
    pub fn new(title: impl Into<String>, genres: Vec<String>, authors: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            genres,
            authors,
            average_rating: None,
            page_count: None,
            isbn: None,
            publication_year: None,
            description: None,
            ratings_count: None,
        }
    }

    /// Whether the book carries the given genre
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Whether the book was written by the given author
    pub fn has_author(&self, author: &str) -> bool {
        self.authors.iter().any(|a| a == author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book() {
        let book = Book::new(
            "The Name of the Wind",
            vec!["fantasy".to_string()],
            vec!["Patrick Rothfuss".to_string()],
        );
        assert_eq!(book.title, "The Name of the Wind");
        assert!(book.has_genre("fantasy"));
        assert!(book.has_author("Patrick Rothfuss"));
        assert!(book.average_rating.is_none());
    }

    #[test]
    fn test_has_genre_is_exact() {
        let book = Book::new("Dune", vec!["science fiction".to_string()], vec![]);
        assert!(book.has_genre("science fiction"));
        assert!(!book.has_genre("science"));
    }
}
