use crate::book::repo::SqlitePool;
use diesel::r2d2::ConnectionManager;
use diesel::sqlite::SqliteConnection;
use r2d2::Pool;
use serde::Deserialize;
use std::env;

pub mod logging;

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// 애플리케이션 설정
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    server: Server,
    logger: logging::Config,
}

impl AppConfig {
    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn logger(&self) -> &logging::Config {
        &self.logger
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Deserialize)]
pub struct Server {
    host: String,
    port: u16,
}

impl Server {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 실행 환경에 맞는 설정 파일을 로드한다.
pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}.json", env)))
        .build()?;

    config.try_deserialize()
}

/// SQLite 데이터베이스 연결 풀을 생성한다.
pub fn connect_to_database() -> SqlitePool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Pool::builder()
        .test_on_check_out(true)
        .build(manager)
        .expect("Could not build connection pool")
}

/// 프로그램에서 사용할 로깅 옵션을 설정한다.
pub fn set_global_logging_config(c: &logging::Config) {
    logging::set_global_logging_config(c);
}
