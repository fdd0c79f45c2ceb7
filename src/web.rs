use crate::book::{BookError, SharedBookRepository, StoreError};
use crate::provider::api::{ClientError, SharedCatalogClient};
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

pub mod handler;
pub mod model;

/// API 요청 처리 중 발생한 에러 열거
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 유효하지 않은 요청 파라미터
    InvalidParameter(String),

    /// 대상 도서가 존재하지 않음
    BookNotFound(String),

    /// 이미 읽음 처리 된 도서
    AlreadyRead(String),

    /// 외부 카탈로그 호출 실패
    CatalogUnavailable(String),

    /// 저장소 혹은 내부 처리 실패
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::BookNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyRead(_) => StatusCode::CONFLICT,
            ApiError::CatalogUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &str {
        match self {
            ApiError::InvalidParameter(detail)
            | ApiError::BookNotFound(detail)
            | ApiError::AlreadyRead(detail)
            | ApiError::CatalogUnavailable(detail)
            | ApiError::Internal(detail) => detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::debug!("{:?}", self);
        }

        (status, axum::Json(model::ErrorResponse::new(self.detail()))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(format!("Failed to access book store: {}", e))
    }
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        ApiError::CatalogUnavailable(format!("Error calling book catalog API: {}", e))
    }
}

impl From<BookError> for ApiError {
    fn from(e: BookError) -> Self {
        ApiError::InvalidParameter(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Blocking task failed: {}", e))
    }
}

/// 핸들러에 주입 되는 의존성 묶음
///
/// 저장소와 카탈로그 클라이언트는 트레이트 객체로 주입 되어 테스트에서 교체 할 수 있다.
#[derive(Clone)]
pub struct AppState {
    repository: SharedBookRepository,
    catalog: SharedCatalogClient,
}

impl AppState {
    pub fn new(repository: SharedBookRepository, catalog: SharedCatalogClient) -> Self {
        Self { repository, catalog }
    }

    pub fn repository(&self) -> SharedBookRepository {
        self.repository.clone()
    }

    pub fn catalog(&self) -> SharedCatalogClient {
        self.catalog.clone()
    }
}

/// API 라우터를 구성한다.
pub fn router(state: AppState) -> Router {
    // 로컬 정적 프론트엔드가 어느 포트에서든 호출 할 수 있도록 허용한다
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/books/search", get(handler::search_books))
        .route("/api/books/save", post(handler::save_book))
        .route("/api/books", get(handler::get_books))
        .route("/api/books/{id}", put(handler::update_book).delete(handler::delete_book))
        .layer(cors)
        .with_state(state)
}
