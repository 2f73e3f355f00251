use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use sqlx::{
    prelude::FromRow,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{AppError, AppErrorKind, IntoAppError};

pub mod fetch_data;
pub mod store_data;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Playlist {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

/// A playlist together with its media items, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlaylistDetails {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub media_items: Vec<MediaItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewPlaylist {
    pub name: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MediaItem {
    pub id: Uuid,
    pub title: String,
    pub media_type: String,
    pub link: Option<String>,
    pub thumbnail: Option<String>,
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .into_app_err(
            "invalid database url",
            AppErrorKind::Database,
            &[&format!("URL: {database_url}")],
        )?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .into_app_err(
            "failed to connect to database",
            AppErrorKind::Database,
            &[&format!("URL: {database_url}")],
        )?;

    migrate(&pool).await?;

    log::info!("connected to database, URL: {database_url}");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .into_app_err(
            "failed to run database migrations",
            AppErrorKind::Database,
            &[],
        )
}
