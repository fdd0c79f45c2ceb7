pub mod repo;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// 허용되는 최대 출판 연도
pub const MAX_PUBLICATION_YEAR: i32 = 2026;

/// Book 모듈에서 사용할 에러 열거
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// 필수 데이터가 입력 되지 않음
    RequireArgumentMissing(String),

    /// 유효하지 않은 데이터가 입력 됨
    InvalidArgument(String),

    /// 알 수 없는 열거형 코드
    UnknownCode(String)
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 도서의 읽음 상태
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Status {
    Pending,
    Read
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Read => "Read",
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = BookError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Pending" => Ok(Status::Pending),
            "Read" => Ok(Status::Read),
            _ => Err(BookError::UnknownCode(value.to_owned()))
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 도서
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Book {
    id: u64,
    isbn: Option<String>,
    title: String,
    author: String,
    publication_year: Option<i32>,
    status: Status,
}

impl Book {
    pub fn builder() -> BookBuilder {
        BookBuilder::new()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }
}

impl AsRef<Book> for Book {
    fn as_ref(&self) -> &Book {
        self
    }
}

/// Book 빌더
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookBuilder {
    id: Option<u64>,
    isbn: Option<String>,
    title: Option<String>,
    author: Option<String>,
    publication_year: Option<i32>,
    status: Option<Status>,
}

impl BookBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            isbn: None,
            title: None,
            author: None,
            publication_year: None,
            status: None,
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn isbn(mut self, isbn: String) -> Self {
        self.isbn = Some(isbn);
        self
    }

    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn author(mut self, author: String) -> Self {
        self.author = Some(author);
        self
    }

    pub fn publication_year(mut self, publication_year: i32) -> Self {
        self.publication_year = Some(publication_year);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Result<Book, BookError> {
        let title = require_text(self.title, "title")?;
        let author = require_text(self.author, "author")?;

        if let Some(year) = self.publication_year {
            if year > MAX_PUBLICATION_YEAR {
                return Err(BookError::InvalidArgument(format!("publication_year: {}", year)));
            }
        }

        Ok(Book {
            id: self.id.unwrap_or(0),
            isbn: self.isbn,
            title,
            author,
            publication_year: self.publication_year,
            status: self.status.unwrap_or(Status::Pending),
        })
    }
}

/// 도서 등록 입력 값
///
/// 상태 값은 입력 받지 않으며 저장 시 항상 Pending으로 시작한다.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewBook {
    isbn: Option<String>,
    title: String,
    author: String,
    publication_year: Option<i32>,
}

impl NewBook {
    pub fn builder() -> NewBookBuilder {
        NewBookBuilder::new()
    }

    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }
}

/// NewBook 빌더
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewBookBuilder {
    isbn: Option<String>,
    title: Option<String>,
    author: Option<String>,
    publication_year: Option<i32>,
}

impl NewBookBuilder {
    pub fn new() -> Self {
        Self {
            isbn: None,
            title: None,
            author: None,
            publication_year: None,
        }
    }

    pub fn isbn(mut self, isbn: String) -> Self {
        self.isbn = Some(isbn);
        self
    }

    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn author(mut self, author: String) -> Self {
        self.author = Some(author);
        self
    }

    pub fn publication_year(mut self, publication_year: i32) -> Self {
        self.publication_year = Some(publication_year);
        self
    }

    pub fn build(self) -> Result<NewBook, BookError> {
        let title = require_text(self.title, "title")?;
        let author = require_text(self.author, "author")?;

        if let Some(year) = self.publication_year {
            if year > MAX_PUBLICATION_YEAR {
                return Err(BookError::InvalidArgument(format!("publication_year: {}", year)));
            }
        }

        Ok(NewBook {
            isbn: self.isbn,
            title,
            author,
            publication_year: self.publication_year,
        })
    }
}

fn require_text(value: Option<String>, name: &str) -> Result<String, BookError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BookError::RequireArgumentMissing(name.to_owned()))
    }
}

/// 읽음 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkReadOutcome {
    /// 상태가 Pending에서 Read로 변경 됨
    Updated(Book),

    /// 대상 도서가 이미 Read 상태임
    AlreadyRead,

    /// 대상 도서가 존재하지 않음
    NotFound,
}

/// 저장소 작업 중 발생한 에러 열거
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    ConnectError(String),

    SqlExecuteError(String),

    EntityMappingFailed(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type SharedBookRepository = Arc<dyn BookRepository>;

/// 도서 저장소
pub trait BookRepository: Send + Sync {

    /// 전달 받은 입력 값으로 새 도서를 Pending 상태로 저장하고, 아이디가 부여된 도서를 반환한다.
    fn new_book(&self, book: &NewBook) -> Result<Book, StoreError>;

    /// 저장소의 모든 도서를 아이디 오름차순으로 가져온다.
    fn find_all(&self) -> Result<Vec<Book>, StoreError>;

    /// 전달 받은 아이디로 도서를 찾는다.
    fn find_by_id(&self, id: u64) -> Result<Option<Book>, StoreError>;

    /// 전달 받은 아이디의 도서가 Pending 상태일 때만 Read 상태로 변경한다.
    ///
    /// 상태 비교와 변경은 저장소에 대한 단일 조건부 갱신으로 처리 되어야 하며,
    /// 동시에 호출 되어도 하나의 호출만 [`MarkReadOutcome::Updated`]를 반환한다.
    fn mark_as_read(&self, id: u64) -> Result<MarkReadOutcome, StoreError>;

    /// 전달 받은 아이디의 도서를 삭제하고 실제 삭제 여부를 반환한다.
    fn delete_book(&self, id: u64) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_try_from_text() {
        assert_eq!(Status::try_from("Pending"), Ok(Status::Pending));
        assert_eq!(Status::try_from("Read"), Ok(Status::Read));
        assert_eq!(Status::try_from("Unknown"), Err(BookError::UnknownCode("Unknown".to_owned())));
    }

    #[test]
    fn new_book_requires_title_and_author() {
        let missing_title = NewBook::builder()
            .author("Frank Herbert".to_owned())
            .build();
        assert_eq!(missing_title, Err(BookError::RequireArgumentMissing("title".to_owned())));

        let empty_author = NewBook::builder()
            .title("Dune".to_owned())
            .author("   ".to_owned())
            .build();
        assert_eq!(empty_author, Err(BookError::RequireArgumentMissing("author".to_owned())));
    }

    #[test]
    fn new_book_rejects_publication_year_over_bound() {
        let rejected = NewBook::builder()
            .title("Dune".to_owned())
            .author("Frank Herbert".to_owned())
            .publication_year(MAX_PUBLICATION_YEAR + 1)
            .build();
        assert_eq!(rejected, Err(BookError::InvalidArgument(format!("publication_year: {}", MAX_PUBLICATION_YEAR + 1))));

        let accepted = NewBook::builder()
            .title("Dune".to_owned())
            .author("Frank Herbert".to_owned())
            .publication_year(MAX_PUBLICATION_YEAR)
            .build()
            .unwrap();
        assert_eq!(accepted.publication_year(), Some(MAX_PUBLICATION_YEAR));
    }

    #[test]
    fn book_builder_defaults_to_pending() {
        let book = Book::builder()
            .title("Dune".to_owned())
            .author("Frank Herbert".to_owned())
            .build()
            .unwrap();

        assert_eq!(book.id(), 0);
        assert_eq!(book.status(), Status::Pending);
        assert!(book.is_pending());
    }
}
