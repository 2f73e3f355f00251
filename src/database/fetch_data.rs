use sqlx::{prelude::FromRow, SqliteExecutor};
use uuid::Uuid;

use crate::error::{AppError, AppErrorKind, IntoAppError};

use super::{MediaItem, Playlist};

#[derive(FromRow)]
struct MediaItemQueryResult {
    id: String,
    title: String,
    media_type: String,
    link: Option<String>,
    thumbnail: Option<String>,
}

impl TryFrom<MediaItemQueryResult> for MediaItem {
    type Error = AppError;

    fn try_from(value: MediaItemQueryResult) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id).into_app_err(
            "stored media item has an invalid id",
            AppErrorKind::Database,
            &[&format!("MEDIA_ITEM_ID: {}", value.id)],
        )?;

        Ok(MediaItem {
            id,
            title: value.title,
            media_type: value.media_type,
            link: value.link,
            thumbnail: value.thumbnail,
        })
    }
}

/// Without `limit` every playlist starting at `offset` is returned.
pub async fn get_all_playlists_from_db<'e>(
    executor: impl SqliteExecutor<'e>,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<Playlist>, AppError> {
    // a negative limit means no limit for sqlite
    let limit = limit.unwrap_or(-1);
    let offset = offset.unwrap_or(0);

    sqlx::query_as::<_, Playlist>(
        "SELECT id, name, description, thumbnail FROM playlist
        ORDER BY id
        LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
    .into_app_err(
        "failed to get all playlists",
        AppErrorKind::Database,
        &[&format!("LIMIT: {limit}"), &format!("OFFSET: {offset}")],
    )
}

pub async fn get_playlist_from_db<'e>(
    executor: impl SqliteExecutor<'e>,
    playlist_id: i64,
) -> Result<Option<Playlist>, AppError> {
    sqlx::query_as::<_, Playlist>(
        "SELECT id, name, description, thumbnail FROM playlist WHERE id = ?",
    )
    .bind(playlist_id)
    .fetch_optional(executor)
    .await
    .into_app_err(
        "failed to get playlist",
        AppErrorKind::Database,
        &[&format!("PLAYLIST_ID: {playlist_id}")],
    )
}

pub async fn get_playlist_items_from_db<'e>(
    executor: impl SqliteExecutor<'e>,
    playlist_id: i64,
) -> Result<Vec<MediaItem>, AppError> {
    let rows = sqlx::query_as::<_, MediaItemQueryResult>(
        "SELECT media.id, media.title, media.media_type, media.link, media.thumbnail
            FROM media_item media
        INNER JOIN playlist_item items
            ON media.id = items.media_item_id
        WHERE items.playlist_id = ?
        ORDER BY items.position",
    )
    .bind(playlist_id)
    .fetch_all(executor)
    .await
    .into_app_err(
        "failed to get media items in playlist",
        AppErrorKind::Database,
        &[&format!("PLAYLIST_ID: {playlist_id}")],
    )?;

    rows.into_iter().map(TryInto::try_into).collect()
}

pub async fn get_media_item_from_db<'e>(
    executor: impl SqliteExecutor<'e>,
    media_item_id: Uuid,
) -> Result<Option<MediaItem>, AppError> {
    let row = sqlx::query_as::<_, MediaItemQueryResult>(
        "SELECT id, title, media_type, link, thumbnail FROM media_item WHERE id = ?",
    )
    .bind(media_item_id.to_string())
    .fetch_optional(executor)
    .await
    .into_app_err(
        "failed to get media item",
        AppErrorKind::Database,
        &[&format!("MEDIA_ITEM_ID: {media_item_id}")],
    )?;

    row.map(TryInto::try_into).transpose()
}
