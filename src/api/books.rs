use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, RecommendationFilters},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub average_rating: Option<f64>,
    pub page_count: Option<u32>,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
    pub ratings_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BookListQuery {
    pub genre: Option<String>,
    pub author: Option<String>,
}

/// Add a book to the catalog
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }
    if let Some(rating) = request.average_rating {
        if !state.scoring.rating_in_scale(rating) {
            return Err(AppError::InvalidInput(format!(
                "average_rating {} is outside the {}..{} scale",
                rating, state.scoring.rating_min, state.scoring.rating_max
            )));
        }
    }

    let mut book = Book::new(request.title.trim(), request.genres, request.authors);
    book.average_rating = request.average_rating;
    book.page_count = request.page_count;
    book.isbn = request.isbn;
    book.publication_year = request.publication_year;
    book.description = request.description;
    book.ratings_count = request.ratings_count;

    let book = state.library.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List catalog books, optionally narrowed by genre or author
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let filters = RecommendationFilters {
        genre: query.genre,
        author: query.author,
        ..Default::default()
    };
    let books = state.library.list_books(&filters).await?;
    Ok(Json(books))
}

/// Get a book by id
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> AppResult<Json<Book>> {
    let book = state.library.get_book(book_id).await?;
    Ok(Json(book))
}
