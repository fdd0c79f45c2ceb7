use crate::book::{Book, BookError, NewBook};
use crate::provider::api::SearchResult;
use serde::{Deserialize, Serialize};

/// 도서 등록 요청 바디
///
/// 정의 되지 않은 필드(status 등)는 무시 되며 상태는 항상 Pending으로 저장 된다.
#[derive(Debug, Deserialize)]
pub struct SaveBookForm {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
}

impl SaveBookForm {
    pub fn to_new_book(&self) -> Result<NewBook, BookError> {
        let mut builder = NewBook::builder();

        if let Some(isbn) = &self.isbn {
            builder = builder.isbn(isbn.clone());
        }
        if let Some(title) = &self.title {
            builder = builder.title(title.clone());
        }
        if let Some(author) = &self.author {
            builder = builder.author(author.clone());
        }
        if let Some(year) = self.publication_year {
            builder = builder.publication_year(year);
        }

        builder.build()
    }
}

/// 도서 검색 요청 쿼리
#[derive(Debug, Deserialize)]
pub struct SearchParameter {
    pub query: String,
}

/// 도서 응답 바디
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BookResponse {
    pub id: u64,
    pub isbn: Option<String>,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub status: String,
}

impl BookResponse {
    pub fn from(book: &Book) -> Self {
        Self {
            id: book.id(),
            isbn: book.isbn().map(|isbn| isbn.to_owned()),
            title: book.title().to_owned(),
            author: book.author().to_owned(),
            publication_year: book.publication_year(),
            status: book.status().to_string(),
        }
    }
}

/// 검색 결과 응답 바디
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SearchResultResponse {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
}

impl SearchResultResponse {
    pub fn from(result: &SearchResult) -> Self {
        Self {
            isbn: result.isbn.clone(),
            title: result.title.clone(),
            author: result.author.clone(),
            publication_year: result.publication_year,
        }
    }
}

/// 처리 결과 메시지 응답 바디
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_owned() }
    }
}

/// 에러 응답 바디
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: &str) -> Self {
        Self { detail: detail.to_owned() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Status;

    #[test]
    fn save_form_requires_title() {
        let form = SaveBookForm {
            isbn: None,
            title: None,
            author: Some("Frank Herbert".to_owned()),
            publication_year: None,
        };

        assert_eq!(form.to_new_book(), Err(BookError::RequireArgumentMissing("title".to_owned())));
    }

    #[test]
    fn save_form_rejects_future_publication_year() {
        let form = SaveBookForm {
            isbn: None,
            title: Some("Dune".to_owned()),
            author: Some("Frank Herbert".to_owned()),
            publication_year: Some(2027),
        };

        assert!(matches!(form.to_new_book(), Err(BookError::InvalidArgument(_))));
    }

    #[test]
    fn book_response_serializes_with_snake_case_fields() {
        let book = Book::builder()
            .id(1)
            .title("Dune".to_owned())
            .author("Frank Herbert".to_owned())
            .publication_year(1965)
            .status(Status::Pending)
            .build()
            .unwrap();

        let serialized = serde_json::to_value(BookResponse::from(&book)).unwrap();

        assert_eq!(serialized["id"], 1);
        assert_eq!(serialized["isbn"], serde_json::Value::Null);
        assert_eq!(serialized["title"], "Dune");
        assert_eq!(serialized["author"], "Frank Herbert");
        assert_eq!(serialized["publication_year"], 1965);
        assert_eq!(serialized["status"], "Pending");
    }
}
