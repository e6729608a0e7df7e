use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_API_KEY: &str = "test-key";

/// Results are capped the same way the real API caps them.
const MAX_TOTAL_HITS: usize = 500;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    #[serde(rename = "pageURL")]
    pub page_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: String,
    #[serde(rename = "previewURL")]
    pub preview_url: String,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "imageWidth")]
    pub image_width: u32,
    #[serde(rename = "imageHeight")]
    pub image_height: u32,
    pub likes: u64,
    pub user: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub total: usize,
    #[serde(rename = "totalHits")]
    pub total_hits: usize,
    pub hits: Vec<Photo>,
}

#[derive(Deserialize)]
pub struct NewPhoto {
    pub tags: String,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user: String,
}

fn default_kind() -> String {
    "photo".to_string()
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub key: Option<String>,
    #[serde(default)]
    pub q: String,
    pub image_type: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    library: Arc<RwLock<Vec<Photo>>>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        library: Arc::new(RwLock::new(seed_photos())),
    };
    Router::new()
        .route("/api/", get(search))
        .route("/api/photos", post(create_photo))
        .route("/status/{code}", any(status))
        .route("/garbage", get(garbage))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn photo(id: u64, tags: &str, kind: &str, user: &str) -> Photo {
    Photo {
        id,
        page_url: format!("https://pixabay.example/photos/{id}/"),
        kind: kind.to_string(),
        tags: tags.to_string(),
        preview_url: format!("https://cdn.pixabay.example/{id}_150.jpg"),
        webformat_url: format!("https://cdn.pixabay.example/{id}_640.jpg"),
        image_width: 4000,
        image_height: 2250,
        likes: id % 97,
        user: user.to_string(),
    }
}

fn seed_photos() -> Vec<Photo> {
    vec![
        photo(1001, "yellow, flowers, spring", "photo", "Josch13"),
        photo(1002, "cat, kitten, pet", "photo", "Mabel"),
        photo(1003, "cat, cartoon, drawing", "illustration", "inkpot"),
        photo(1004, "mountain, lake, sunrise", "photo", "Rolf"),
        photo(1005, "flowers, vase, still life", "photo", "Mabel"),
    ]
}

fn matches(photo: &Photo, terms: &[String]) -> bool {
    let tags = photo.tags.to_lowercase();
    terms.iter().all(|term| tags.contains(term.as_str()))
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    if params.key.as_deref() != Some(&*state.api_key) {
        return (StatusCode::BAD_REQUEST, "[ERROR 400] Invalid or missing API key").into_response();
    }
    let per_page = params.per_page.unwrap_or(20);
    if !(3..=200).contains(&per_page) {
        return (
            StatusCode::BAD_REQUEST,
            "[ERROR 400] \"per_page\" is out of valid range.",
        )
            .into_response();
    }
    let page = params.page.unwrap_or(1).max(1);

    let terms: Vec<String> = params
        .q
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let library = state.library.read().await;
    let found: Vec<&Photo> = library
        .iter()
        .filter(|p| matches(p, &terms))
        .filter(|p| match params.image_type.as_deref() {
            None | Some("all") => true,
            Some(kind) => p.kind == kind,
        })
        .collect();

    let hits = found
        .iter()
        .skip(page.saturating_sub(1).saturating_mul(per_page))
        .take(per_page)
        .map(|p| (*p).clone())
        .collect();
    Json(SearchResults {
        total: found.len(),
        total_hits: found.len().min(MAX_TOTAL_HITS),
        hits,
    })
    .into_response()
}

async fn create_photo(State(state): State<AppState>, Json(input): Json<NewPhoto>) -> Json<Photo> {
    let mut library = state.library.write().await;
    let id = library.iter().map(|p| p.id).max().unwrap_or(1000) + 1;
    let created = photo(id, &input.tags, &input.kind, &input.user);
    library.push(created.clone());
    Json(created)
}

async fn status(Path(code): Path<u16>) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    (status, Json(json!({ "status": code }))).into_response()
}

async fn garbage() -> &'static str {
    "<html>definitely not json</html>"
}
