use actix_web::{
    delete, get, http::header, post,
    web::{self, Data},
    HttpRequest, HttpResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    database::NewPlaylist,
    error::{AppError, AppErrorKind},
    AppData,
};

#[derive(Deserialize)]
struct OffsetLimitParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Registers the playlist routes under `/api/playlist`.
///
/// Malformed bodies, path segments and query strings are answered with an
/// `InvalidInput` error in the same shape as every other error response.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::new(
            AppErrorKind::InvalidInput,
            format!("Invalid playlist data: {err}"),
            &[],
        )
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        AppError::new(
            AppErrorKind::InvalidInput,
            format!("Invalid path: {err}"),
            &[&format!("PATH: {}", req.path())],
        )
        .into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        AppError::new(
            AppErrorKind::InvalidInput,
            format!("Invalid query: {err}"),
            &[&format!("QUERY: {}", req.query_string())],
        )
        .into()
    }))
    .service(
        web::scope("/api/playlist")
            .service(get_playlists)
            .service(get_playlist)
            .service(create_playlist)
            .service(add_media_item_to_playlist)
            .service(remove_media_item_from_playlist),
    );
}

#[get("")]
pub async fn get_playlists(
    data: Data<AppData>,
    web::Query(OffsetLimitParams { limit, offset }): web::Query<OffsetLimitParams>,
) -> Result<HttpResponse, AppError> {
    let playlists = data.playlist_service().list_playlists(limit, offset).await?;

    Ok(HttpResponse::Ok().json(playlists))
}

#[get("/{id}", name = "get_playlist")]
pub async fn get_playlist(
    data: Data<AppData>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let playlist = data.playlist_service().get_playlist(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(playlist))
}

#[post("")]
pub async fn create_playlist(
    req: HttpRequest,
    data: Data<AppData>,
    playlist: web::Json<Option<NewPlaylist>>,
) -> Result<HttpResponse, AppError> {
    let playlist = data
        .playlist_service()
        .create_playlist(playlist.into_inner())
        .await?;

    let location = match req.url_for("get_playlist", [playlist.id.to_string()]) {
        Ok(url) => url.to_string(),
        Err(err) => {
            log::warn!(
                "failed to build playlist url, falling back to a relative location, ERROR: {err}"
            );
            format!("/api/playlist/{}", playlist.id)
        }
    };

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(playlist))
}

#[post("/{playlist_id}/items/{media_item_id}")]
pub async fn add_media_item_to_playlist(
    data: Data<AppData>,
    path: web::Path<(i64, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (playlist_id, media_item_id) = path.into_inner();
    let msg = data
        .playlist_service()
        .add_media_item(playlist_id, media_item_id)
        .await?;

    Ok(HttpResponse::Ok().json(msg))
}

#[delete("/{playlist_id}/items/{media_item_id}")]
pub async fn remove_media_item_from_playlist(
    data: Data<AppData>,
    path: web::Path<(i64, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (playlist_id, media_item_id) = path.into_inner();
    let msg = data
        .playlist_service()
        .remove_media_item(playlist_id, media_item_id)
        .await?;

    Ok(HttpResponse::Ok().json(msg))
}
