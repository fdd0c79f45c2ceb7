use crate::book::{Book, BookRepository, MarkReadOutcome, NewBook, Status, StoreError};
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel::sqlite::SqliteConnection;
use r2d2::Pool;

mod schema;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// books 테이블 생성 SQL로 서비스 기동 시 한 번 실행 된다.
/// 테이블이 이미 존재하면 아무 일도 하지 않는다.
const CREATE_BOOKS_TABLE: &'static str = "\
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    isbn TEXT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    publication_year INTEGER,
    status TEXT NOT NULL DEFAULT 'Pending'
)";

/// 저장소 스키마를 초기화 한다.
pub fn init_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    let mut connection = pool.get()
        .map_err(|e| StoreError::ConnectError(e.to_string()))?;

    diesel::sql_query(CREATE_BOOKS_TABLE)
        .execute(&mut connection)
        .map_err(|e| StoreError::SqlExecuteError(e.to_string()))?;

    Ok(())
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = schema::books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookEntity {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub status: String,
}

impl BookEntity {
    fn to_domain(&self) -> Result<Book, StoreError> {
        let status = Status::try_from(self.status.as_str())
            .map_err(|e| StoreError::EntityMappingFailed(e.to_string()))?;

        let mut builder = Book::builder()
            .id(self.id as u64)
            .title(self.title.clone())
            .author(self.author.clone())
            .status(status);

        if let Some(isbn) = &self.isbn {
            builder = builder.isbn(isbn.clone());
        }
        if let Some(year) = self.publication_year {
            builder = builder.publication_year(year);
        }

        builder.build()
            .map_err(|e| StoreError::EntityMappingFailed(e.to_string()))
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::books)]
pub struct NewBookEntity<'a> {
    pub isbn: Option<&'a str>,
    pub title: &'a str,
    pub author: &'a str,
    pub publication_year: Option<i32>,
    pub status: &'a str,
}

impl <'a, 'b> NewBookEntity<'a> where 'b: 'a {
    pub fn from(book: &'b NewBook) -> Self {
        Self {
            isbn: book.isbn(),
            title: book.title(),
            author: book.author(),
            publication_year: book.publication_year(),
            // 저장 시점의 상태는 입력 값과 무관하게 항상 Pending
            status: Status::Pending.as_str(),
        }
    }
}

/// SQLite 기반 도서 저장소
pub struct BookSqliteStore {
    pool: SqlitePool
}

impl BookSqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<SqliteConnection>>, StoreError> {
        self.pool.get()
            .map_err(|e| StoreError::ConnectError(e.to_string()))
    }

    fn find_entity(connection: &mut SqliteConnection, book_id: i64) -> Result<Option<BookEntity>, StoreError> {
        use schema::books::dsl::*;

        books.find(book_id)
            .select(BookEntity::as_select())
            .first(connection)
            .optional()
            .map_err(|e| StoreError::SqlExecuteError(e.to_string()))
    }
}

impl BookRepository for BookSqliteStore {

    fn new_book(&self, book: &NewBook) -> Result<Book, StoreError> {
        use schema::books;

        let mut connection = self.connection()?;
        let entity = diesel::insert_into(books::table)
            .values(NewBookEntity::from(book))
            .returning(BookEntity::as_returning())
            .get_result(&mut connection)
            .map_err(|e| StoreError::SqlExecuteError(e.to_string()))?;

        entity.to_domain()
    }

    fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        use schema::books::dsl::*;

        let mut connection = self.connection()?;
        let entities = books
            .order_by(id.asc())
            .select(BookEntity::as_select())
            .load(&mut connection)
            .map_err(|e| StoreError::SqlExecuteError(e.to_string()))?;

        entities.iter()
            .map(|entity| entity.to_domain())
            .collect()
    }

    fn find_by_id(&self, book_id: u64) -> Result<Option<Book>, StoreError> {
        let mut connection = self.connection()?;

        match Self::find_entity(&mut connection, book_id as i64)? {
            Some(entity) => Ok(Some(entity.to_domain()?)),
            None => Ok(None),
        }
    }

    fn mark_as_read(&self, book_id: u64) -> Result<MarkReadOutcome, StoreError> {
        use schema::books::dsl::*;

        let mut connection = self.connection()?;

        // Pending 상태일 때만 갱신 되는 단일 조건부 UPDATE
        let updated = diesel::update(books.filter(id.eq(book_id as i64).and(status.eq(Status::Pending.as_str()))))
            .set(status.eq(Status::Read.as_str()))
            .execute(&mut connection)
            .map_err(|e| StoreError::SqlExecuteError(e.to_string()))?;

        if updated == 0 {
            // 갱신 된 행이 없을 때 존재 여부로 원인을 구분한다
            return match Self::find_entity(&mut connection, book_id as i64)? {
                Some(_) => Ok(MarkReadOutcome::AlreadyRead),
                None => Ok(MarkReadOutcome::NotFound),
            }
        }

        match Self::find_entity(&mut connection, book_id as i64)? {
            Some(entity) => Ok(MarkReadOutcome::Updated(entity.to_domain()?)),
            None => Ok(MarkReadOutcome::NotFound),
        }
    }

    fn delete_book(&self, book_id: u64) -> Result<bool, StoreError> {
        use schema::books::dsl::*;

        let mut connection = self.connection()?;
        let deleted = diesel::delete(books.filter(id.eq(book_id as i64)))
            .execute(&mut connection)
            .map_err(|e| StoreError::SqlExecuteError(e.to_string()))?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_test_store() -> BookSqliteStore {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .unwrap();

        init_schema(&pool).unwrap();
        BookSqliteStore::new(pool)
    }

    fn dune() -> NewBook {
        NewBook::builder()
            .isbn("ISBN_10: 0441013597".to_owned())
            .title("Dune".to_owned())
            .author("Frank Herbert".to_owned())
            .publication_year(1965)
            .build()
            .unwrap()
    }

    #[test]
    fn new_book_starts_as_pending() {
        let store = new_test_store();

        let saved = store.new_book(&dune()).unwrap();

        assert!(saved.id() > 0);
        assert_eq!(saved.status(), Status::Pending);
        assert_eq!(saved.isbn(), Some("ISBN_10: 0441013597"));
        assert_eq!(saved.publication_year(), Some(1965));
    }

    #[test]
    fn find_all_on_empty_store() {
        let store = new_test_store();

        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn find_all_orders_by_ascending_id() {
        let store = new_test_store();
        for i in 0..3 {
            let book = NewBook::builder()
                .title(format!("Book {}", i))
                .author("Author".to_owned())
                .build()
                .unwrap();
            store.new_book(&book).unwrap();
        }

        let books = store.find_all().unwrap();

        assert_eq!(books.len(), 3);
        assert!(books.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[test]
    fn mark_as_read_updates_only_pending() {
        let store = new_test_store();
        let saved = store.new_book(&dune()).unwrap();

        match store.mark_as_read(saved.id()).unwrap() {
            MarkReadOutcome::Updated(book) => assert_eq!(book.status(), Status::Read),
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(store.mark_as_read(saved.id()).unwrap(), MarkReadOutcome::AlreadyRead);
    }

    #[test]
    fn mark_as_read_on_missing_book() {
        let store = new_test_store();

        assert_eq!(store.mark_as_read(999).unwrap(), MarkReadOutcome::NotFound);
    }

    #[test]
    fn delete_book_reports_effect() {
        let store = new_test_store();

        assert!(!store.delete_book(999).unwrap());

        let saved = store.new_book(&dune()).unwrap();
        assert!(store.delete_book(saved.id()).unwrap());
        assert_eq!(store.find_by_id(saved.id()).unwrap(), None);
    }

    #[test]
    fn book_lifecycle() {
        let store = new_test_store();

        let saved = store.new_book(&dune()).unwrap();
        assert_eq!(store.find_by_id(saved.id()).unwrap().unwrap().status(), Status::Pending);

        match store.mark_as_read(saved.id()).unwrap() {
            MarkReadOutcome::Updated(_) => {},
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(store.find_by_id(saved.id()).unwrap().unwrap().status(), Status::Read);

        assert_eq!(store.mark_as_read(saved.id()).unwrap(), MarkReadOutcome::AlreadyRead);

        assert!(store.delete_book(saved.id()).unwrap());
        assert_eq!(store.find_by_id(saved.id()).unwrap(), None);
        assert_eq!(store.mark_as_read(saved.id()).unwrap(), MarkReadOutcome::NotFound);
    }
}
