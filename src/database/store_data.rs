use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::error::{AppError, AppErrorKind, IntoAppError};

use super::{NewPlaylist, Playlist};

pub async fn store_playlist<'e>(
    executor: impl SqliteExecutor<'e>,
    playlist: NewPlaylist,
) -> Result<Playlist, AppError> {
    let NewPlaylist {
        name,
        description,
        thumbnail,
    } = playlist;

    let result = sqlx::query(
        "INSERT INTO playlist
        (name, description, thumbnail) VALUES (?, ?, ?)",
    )
    .bind(&name)
    .bind(&description)
    .bind(&thumbnail)
    .execute(executor)
    .await
    .into_app_err(
        "failed to create playlist",
        AppErrorKind::Database,
        &[&format!("NAME: {name}")],
    )?;

    Ok(Playlist {
        id: result.last_insert_rowid(),
        name,
        description,
        thumbnail,
    })
}

/// Appends the media item to the end of the playlist.
///
/// Returns `false` without touching anything if the media item is already
/// part of the playlist or if either of them does not exist.
pub async fn store_playlist_item_relation_if_not_exists<'e>(
    executor: impl SqliteExecutor<'e>,
    playlist_id: i64,
    media_item_id: Uuid,
) -> Result<bool, AppError> {
    let media_item_uid = media_item_id.to_string();

    // the WHERE clause is required for sqlite to parse the upsert after a SELECT
    let result = sqlx::query(
        "INSERT INTO playlist_item
        (playlist_id, media_item_id, position)
            SELECT ?, ?, next_position FROM (
                SELECT COALESCE(MAX(position) + 1, 0) AS next_position
                FROM playlist_item WHERE playlist_id = ?
            )
            WHERE EXISTS (SELECT 1 FROM playlist WHERE id = ?)
                AND EXISTS (SELECT 1 FROM media_item WHERE id = ?)
        ON CONFLICT (playlist_id, media_item_id) DO NOTHING",
    )
    .bind(playlist_id)
    .bind(&media_item_uid)
    .bind(playlist_id)
    .bind(playlist_id)
    .bind(&media_item_uid)
    .execute(executor)
    .await
    .into_app_err(
        "failed to add media item to playlist",
        AppErrorKind::Database,
        &[
            &format!("PLAYLIST_ID: {playlist_id}"),
            &format!("MEDIA_ITEM_ID: {media_item_uid}"),
        ],
    )?;

    Ok(result.rows_affected() == 1)
}

/// Returns `false` if the media item was not part of the playlist.
pub async fn remove_playlist_item_relation<'e>(
    executor: impl SqliteExecutor<'e>,
    playlist_id: i64,
    media_item_id: Uuid,
) -> Result<bool, AppError> {
    let media_item_uid = media_item_id.to_string();

    let result = sqlx::query(
        "DELETE FROM playlist_item
        WHERE playlist_id = ? AND media_item_id = ?",
    )
    .bind(playlist_id)
    .bind(&media_item_uid)
    .execute(executor)
    .await
    .into_app_err(
        "failed to remove media item from playlist",
        AppErrorKind::Database,
        &[
            &format!("PLAYLIST_ID: {playlist_id}"),
            &format!("MEDIA_ITEM_ID: {media_item_uid}"),
        ],
    )?;

    Ok(result.rows_affected() > 0)
}
