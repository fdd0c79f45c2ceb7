mod diesel;

pub use self::diesel::{BookSqliteStore, SqlitePool, init_schema};
