//! API route handlers.

use std::collections::HashMap;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Query, Request, State},
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

use webring_core::constants::{PICTURE_EXTENSIONS, SERVICE_NAME};
use webring_core::error::WebringError;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// Reads `current`, treating an empty value as absent.
fn current_param(params: &HashMap<String, String>) -> Result<&str> {
    params
        .get("current")
        .map(String::as_str)
        .filter(|current| !current.is_empty())
        .ok_or_else(|| WebringError::MissingParameter("current".into()).into())
}

/// GET /
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointsDto::default(),
    })
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cache = state.ring.status();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        url_count: cache.count,
        last_fetched_at: cache.last_fetched_at,
        cache_fresh: cache.fresh,
    })
}

/// GET /next?current=URL
pub async fn next_url(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<UrlResponse>> {
    let current = current_param(&params)?;
    let url = state.ring.next(current).await?;

    debug!(current, next = %url, "Resolved next member");
    Ok(Json(UrlResponse { url }))
}

/// GET /previous?current=URL
pub async fn previous_url(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<UrlResponse>> {
    let current = current_param(&params)?;
    let url = state.ring.previous(current).await?;

    debug!(current, previous = %url, "Resolved previous member");
    Ok(Json(UrlResponse { url }))
}

/// GET /random
pub async fn random_url(State(state): State<Arc<AppState>>) -> Result<Json<UrlResponse>> {
    let url = state.ring.random().await?;
    Ok(Json(UrlResponse { url }))
}

/// GET /list
///
/// An empty ring is reported as `{"urls": [], "count": 0}`, never as an error.
pub async fn list_urls(State(state): State<Arc<AppState>>) -> Json<ListResponse> {
    let urls = state.ring.list().await;

    Json(ListResponse {
        count: urls.len(),
        urls: urls.as_ref().clone(),
    })
}

fn is_picture(filename: &str) -> bool {
    FsPath::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PICTURE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Plain file names only: no separators, no parent hops, no dotfiles.
fn is_servable_name(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(['/', '\\', '\0'])
}

/// Pictures that `get_picture` will actually serve.
fn is_listable(filename: &str) -> bool {
    is_servable_name(filename) && is_picture(filename)
}

async fn is_dir(path: &FsPath) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// GET /pictures/list
pub async fn list_pictures(State(state): State<Arc<AppState>>) -> Result<Json<PictureListResponse>> {
    let dir = &state.config.pictures_dir;
    if !is_dir(dir).await {
        return Err(ApiError::not_found("Pictures directory not found"));
    }

    let mut entries = tokio::fs::read_dir(dir).await.map_err(WebringError::from)?;
    let mut filenames = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(WebringError::from)? {
        let file_type = entry.file_type().await.map_err(WebringError::from)?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_listable(name) {
                filenames.push(name.to_string());
            }
        }
    }
    filenames.sort();

    let pictures: Vec<PictureDto> = filenames.into_iter().map(PictureDto::new).collect();
    Ok(Json(PictureListResponse {
        count: pictures.len(),
        pictures,
    }))
}

/// GET /pictures/:filename
pub async fn get_picture(
    State(state): State<Arc<AppState>>,
    filename: std::result::Result<Path<String>, PathRejection>,
    request: Request,
) -> Result<Response> {
    let not_found = || ApiError::not_found("Picture not found");

    // Undecodable names cannot exist in the directory.
    let Ok(Path(filename)) = filename else {
        return Err(not_found());
    };
    if !is_servable_name(&filename) {
        return Err(not_found());
    }
    let path = state.config.pictures_dir.join(&filename);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(not_found()),
    }

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("cat.png", true)]
    #[test_case("CAT.JPG", true)]
    #[test_case("photo.jpeg", true)]
    #[test_case("anim.gif", true)]
    #[test_case("logo.svg", true)]
    #[test_case("pic.WebP", true)]
    #[test_case("notes.txt", false)]
    #[test_case("png", false)]
    #[test_case(".png", false)]
    #[test_case("archive.png.zip", false)]
    fn test_is_picture(name: &str, expected: bool) {
        assert_eq!(is_picture(name), expected);
    }

    #[test_case("cat.png", true)]
    #[test_case("", false)]
    #[test_case(".env", false)]
    #[test_case("..", false)]
    #[test_case("../secret.png", false)]
    #[test_case("a/b.png", false)]
    #[test_case("a\\b.png", false)]
    fn test_is_servable_name(name: &str, expected: bool) {
        assert_eq!(is_servable_name(name), expected);
    }

    #[test_case("cat.png", true)]
    #[test_case("B.JPG", true)]
    #[test_case(".hidden.png", false)]
    #[test_case("notes.txt", false)]
    #[test_case(".env", false)]
    fn test_is_listable(name: &str, expected: bool) {
        assert_eq!(is_listable(name), expected);
    }

    #[test]
    fn test_current_param() {
        let mut params = HashMap::new();
        assert_eq!(current_param(&params).unwrap_err().message(), "Missing required parameter: current");

        params.insert("current".to_string(), String::new());
        assert!(current_param(&params).is_err());

        params.insert("current".to_string(), "https://a.example/".to_string());
        assert_eq!(current_param(&params).unwrap(), "https://a.example/");
    }
}
