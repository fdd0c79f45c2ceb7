use book_shelf_rust::book::repo::{BookSqliteStore, init_schema};
use book_shelf_rust::provider::api::google;
use book_shelf_rust::{configs, web};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    configs::load_dotenv();

    let config = configs::load_config()
        .unwrap_or_else(|_| panic!("Cannot loading config"));
    configs::set_global_logging_config(config.logger());

    let pool = configs::connect_to_database();
    init_schema(&pool).expect("Failed to initialize database schema");

    let store = BookSqliteStore::new(pool);
    let catalog = google::Client::new_with_env().expect("GOOGLE_BOOKS_KEY must be set");

    let state = web::AppState::new(Arc::new(store), Arc::new(catalog));
    let app = web::router(state);

    let bind_address = config.server().bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await
        .unwrap_or_else(|e| panic!("Cannot bind to {}: {}", bind_address, e));
    info!("Listening on {}", bind_address);

    axum::serve(listener, app).await
        .expect("Server terminated unexpectedly");
}
