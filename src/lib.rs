use playlist_service::PlaylistService;
use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod playlist_service;
pub mod rest_data_access;

#[cfg(test)]
pub mod tests_utils;

pub struct AppData {
    db_pool: SqlitePool,
}

impl AppData {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub fn playlist_service(&self) -> PlaylistService<'_> {
        PlaylistService::new(&self.db_pool)
    }
}
