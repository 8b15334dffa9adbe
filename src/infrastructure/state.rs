//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::BookRepository;
use crate::infrastructure::SeaOrmBookRepository;
use crate::infrastructure::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));

        Self {
            db,
            book_repo,
            config: Arc::new(config),
        }
    }

    /// Connection used by the services that query across several tables
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
