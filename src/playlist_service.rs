use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool, Transaction};
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    database::{
        fetch_data::{
            get_all_playlists_from_db, get_media_item_from_db, get_playlist_from_db,
            get_playlist_items_from_db,
        },
        store_data::{
            remove_playlist_item_relation, store_playlist,
            store_playlist_item_relation_if_not_exists,
        },
        NewPlaylist, Playlist, PlaylistDetails,
    },
    error::{AppError, AppErrorKind, IntoAppError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlaylistMessage {
    pub message: String,
}

/// Playlist operations, each one running in its own transaction.
#[derive(Debug, Clone, Copy)]
pub struct PlaylistService<'a> {
    db_pool: &'a SqlitePool,
}

impl<'a> PlaylistService<'a> {
    pub fn new(db_pool: &'a SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn list_playlists(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Playlist>, AppError> {
        if limit.is_some_and(|limit| limit < 0) || offset.is_some_and(|offset| offset < 0) {
            return Err(AppError::new(
                AppErrorKind::InvalidInput,
                "'limit' and 'offset' must not be negative.",
                &[&format!("LIMIT: {limit:?}"), &format!("OFFSET: {offset:?}")],
            ));
        }

        get_all_playlists_from_db(self.db_pool, limit, offset).await
    }

    pub async fn get_playlist(&self, playlist_id: i64) -> Result<PlaylistDetails, AppError> {
        let mut tx = self.begin().await?;

        let playlist = get_playlist_from_db(&mut *tx, playlist_id)
            .await?
            .ok_or_else(|| playlist_not_found(playlist_id))?;
        let media_items = get_playlist_items_from_db(&mut *tx, playlist_id).await?;

        commit(tx).await?;

        Ok(PlaylistDetails {
            playlist,
            media_items,
        })
    }

    pub async fn create_playlist(
        &self,
        playlist: Option<NewPlaylist>,
    ) -> Result<Playlist, AppError> {
        let Some(playlist) = playlist else {
            return Err(AppError::new(
                AppErrorKind::InvalidInput,
                "Playlist data is null.",
                &[],
            ));
        };

        let mut tx = self.begin().await?;
        let playlist = store_playlist(&mut *tx, playlist).await?;
        commit(tx).await?;

        log::info!(
            "created playlist, ID: {}, NAME: {}",
            playlist.id,
            playlist.name
        );
        Ok(playlist)
    }

    // The write must be the first statement of the transaction: a read
    // snapshot taken earlier can not be upgraded after another writer commits.
    pub async fn add_media_item(
        &self,
        playlist_id: i64,
        media_item_id: Uuid,
    ) -> Result<PlaylistMessage, AppError> {
        let mut tx = self.begin().await?;

        let added =
            store_playlist_item_relation_if_not_exists(&mut *tx, playlist_id, media_item_id)
                .await?;

        let playlist = get_playlist_from_db(&mut *tx, playlist_id)
            .await?
            .ok_or_else(|| playlist_not_found(playlist_id))?;

        if !added {
            if get_media_item_from_db(&mut *tx, media_item_id)
                .await?
                .is_none()
            {
                return Err(AppError::new(
                    AppErrorKind::NotFound,
                    format!("Media item with ID {media_item_id} not found."),
                    &[&format!("MEDIA_ITEM_ID: {media_item_id}")],
                ));
            }

            return Err(AppError::new(
                AppErrorKind::Conflict,
                format!("Media item with ID {media_item_id} is already in the playlist."),
                &[
                    &format!("PLAYLIST_ID: {playlist_id}"),
                    &format!("MEDIA_ITEM_ID: {media_item_id}"),
                ],
            ));
        }

        commit(tx).await?;

        Ok(PlaylistMessage {
            message: format!("Media item added to playlist '{}'", playlist.name),
        })
    }

    pub async fn remove_media_item(
        &self,
        playlist_id: i64,
        media_item_id: Uuid,
    ) -> Result<PlaylistMessage, AppError> {
        let mut tx = self.begin().await?;

        let removed = remove_playlist_item_relation(&mut *tx, playlist_id, media_item_id).await?;

        let playlist = get_playlist_from_db(&mut *tx, playlist_id)
            .await?
            .ok_or_else(|| playlist_not_found(playlist_id))?;

        if !removed {
            return Err(AppError::new(
                AppErrorKind::NotFound,
                format!("Media item with ID {media_item_id} not found in the playlist."),
                &[
                    &format!("PLAYLIST_ID: {playlist_id}"),
                    &format!("MEDIA_ITEM_ID: {media_item_id}"),
                ],
            ));
        }

        commit(tx).await?;

        Ok(PlaylistMessage {
            message: format!("Media item removed from playlist '{}'", playlist.name),
        })
    }

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        self.db_pool.begin().await.into_app_err(
            "failed to start transaction",
            AppErrorKind::Database,
            &[],
        )
    }
}

async fn commit(tx: Transaction<'static, Sqlite>) -> Result<(), AppError> {
    tx.commit()
        .await
        .into_app_err("failed to commit transaction", AppErrorKind::Database, &[])
}

fn playlist_not_found(playlist_id: i64) -> AppError {
    AppError::new(
        AppErrorKind::NotFound,
        format!("Playlist with ID {playlist_id} not found."),
        &[&format!("PLAYLIST_ID: {playlist_id}")],
    )
}
