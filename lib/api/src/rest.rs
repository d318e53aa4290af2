use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::NamedFile;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use mediaseq_core::{populate, query_similarity, ImageStore};

use crate::listing::{self, MediaKind, DEFAULT_PER_PAGE};

/// Shared state handed to every request handler.
pub struct AppState {
    pub store: Arc<ImageStore>,
    pub media_root: PathBuf,
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
    per_page: Option<usize>,
}

#[derive(Serialize)]
struct DirectoryIndex {
    directories: Vec<String>,
}

#[derive(Serialize)]
struct DirectoryListing {
    directory: String,
    page: usize,
    per_page: usize,
    total: usize,
    files: Vec<String>,
}

#[derive(Deserialize)]
struct SimilarityQuery {
    media_path: String,
}

#[derive(Serialize)]
struct SimilarityResponse {
    similarity: f64,
    compared_against: Option<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .route("/", web::get().to(index))
                .route("/media", web::get().to(media_index))
                .route("/similarity", web::get().to(similarity))
                // Single-segment paths are directories; deeper paths are
                // files, so the directory route must be registered first.
                .route("/media/{directory}", web::get().to(media_directory))
                .route("/media/{path:.*}", web::get().to(media_file))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("Hello, this is a media server!")
}

async fn media_index(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match listing::list_media_directories(&state.media_root) {
        Ok(directories) => Ok(HttpResponse::Ok().json(DirectoryIndex { directories })),
        Err(e) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

/// One page of a directory listing.
///
/// Every rendered page also runs the decode-and-cache pass over its file
/// names, so images become comparable in listing order. No similarity is
/// computed here; the client asks per file via `/similarity`.
async fn media_directory(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    let directory = path.into_inner();
    if !is_clean_relative(Path::new(&directory)) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid directory name"
        })));
    }

    let dir = state.media_root.join(&directory);
    let files = match listing::list_media_files(&dir) {
        Ok(files) => files,
        Err(e) => {
            return Ok(HttpResponse::NotFound().json(serde_json::json!({
                "error": e.to_string()
            })));
        }
    };

    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
    let page = query.page.unwrap_or(1);
    let slice = listing::paginate(&files, page, per_page);

    let added = populate(&state.store, &dir, slice);
    if added > 0 {
        info!(directory = %directory, added, "cached new images for listing page");
    }

    Ok(HttpResponse::Ok().json(DirectoryListing {
        directory,
        page,
        per_page,
        total: files.len(),
        files: slice.to_vec(),
    }))
}

/// Stream a media file, with range support via [`NamedFile`].
async fn media_file(
    req: HttpRequest,
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let relative = path.into_inner();
    if !is_clean_relative(Path::new(&relative)) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid media path"
        })));
    }
    if listing::classify(&relative) == MediaKind::Other {
        return Ok(HttpResponse::UnsupportedMediaType().json(serde_json::json!({
            "error": "Unsupported file type"
        })));
    }

    let full = state.media_root.join(&relative);
    match NamedFile::open(&full) {
        Ok(file) => Ok(file.into_response(&req)),
        Err(_) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Media file not found"
        }))),
    }
}

/// On-demand similarity of a file against its predecessor in cache order.
///
/// Always answers with a score; 0.0 covers both "nothing to compare
/// against" and genuine dissimilarity, with `compared_against` telling the
/// two cases apart.
async fn similarity(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SimilarityQuery>,
) -> ActixResult<HttpResponse> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let outcome = query_similarity(&state.store, Path::new(&query.media_path), &request_id);

    Ok(HttpResponse::Ok().json(SimilarityResponse {
        similarity: outcome.score(),
        compared_against: outcome.compared_against().cloned(),
    }))
}

/// Reject absolute paths and any path that could escape the media root.
fn is_clean_relative(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_)))
}
