use crate::book::MarkReadOutcome;
use crate::web::model::{BookResponse, MessageResponse, SaveBookForm, SearchParameter, SearchResultResponse};
use crate::web::{ApiError, AppState};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tokio::task;

/// GET /api/books/search 외부 카탈로그에서 도서를 검색한다.
pub async fn search_books(
    State(state): State<AppState>,
    Query(parameter): Query<SearchParameter>
) -> Result<Json<Vec<SearchResultResponse>>, ApiError> {
    if parameter.query.trim().is_empty() {
        return Err(ApiError::InvalidParameter("query must not be empty".to_owned()));
    }

    let catalog = state.catalog();
    let results = task::spawn_blocking(move || catalog.search(&parameter.query)).await??;

    Ok(Json(results.iter().map(SearchResultResponse::from).collect()))
}

/// POST /api/books/save 새 도서를 Pending 상태로 저장한다.
pub async fn save_book(
    State(state): State<AppState>,
    Json(form): Json<SaveBookForm>
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let new_book = form.to_new_book()?;

    let repository = state.repository();
    let saved = task::spawn_blocking(move || repository.new_book(&new_book)).await??;

    Ok((StatusCode::CREATED, Json(BookResponse::from(&saved))))
}

/// GET /api/books 저장 된 모든 도서를 아이디 오름차순으로 반환한다.
pub async fn get_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let repository = state.repository();
    let books = task::spawn_blocking(move || repository.find_all()).await??;

    Ok(Json(books.iter().map(BookResponse::from).collect()))
}

/// PUT /api/books/{id} Pending 상태의 도서를 Read 상태로 변경한다.
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<u64>
) -> Result<Json<BookResponse>, ApiError> {
    let repository = state.repository();
    let outcome = task::spawn_blocking(move || repository.mark_as_read(book_id)).await??;

    match outcome {
        MarkReadOutcome::Updated(book) => Ok(Json(BookResponse::from(&book))),
        MarkReadOutcome::AlreadyRead => Err(ApiError::AlreadyRead(format!("Book {} is already read", book_id))),
        MarkReadOutcome::NotFound => Err(ApiError::BookNotFound(format!("Book {} not found", book_id))),
    }
}

/// DELETE /api/books/{id} 도서를 삭제한다.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<u64>
) -> Result<Json<MessageResponse>, ApiError> {
    let repository = state.repository();
    let deleted = task::spawn_blocking(move || repository.delete_book(book_id)).await??;

    if !deleted {
        return Err(ApiError::BookNotFound(format!("Book {} not found", book_id)));
    }

    Ok(Json(MessageResponse::new("Book deleted successfully")))
}
