//! HTTP server.
//!
//! Thin Axum handlers over the configured [`ItemStore`] and the
//! [`ImageStore`]. Handlers only extract input, call the stores, and shape
//! the JSON response.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Greeting (`{"message": "Hello, world!"}`) |
//! | `POST` | `/items` | Submit an item (form or multipart, optional image upload) |
//! | `GET`  | `/items` | All items (`{"items": [...]}`) |
//! | `GET`  | `/items/{id}` | First item with the given id |
//! | `GET`  | `/search?keyword=` | Items whose name contains the keyword |
//! | `GET`  | `/image/{image_filename}` | Stored JPEG, or the default placeholder |
//!
//! # Error Contract
//!
//! ```json
//! { "message": "not found: item 42", "code": "not_found" }
//! ```
//!
//! Codes: `bad_request` (400), `storage_unavailable` (400),
//! `corrupt_data` (400), `not_found` (404).
//!
//! # CORS
//!
//! Only `[server].front_url` (or `FRONT_URL`) may call the API from a
//! browser, with methods GET, PUT, POST and DELETE.

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{
        multipart::Field, DefaultBodyLimit, Form, FromRequest, Multipart, Path, Query, Request,
        State,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use item_catalog_core::models::Message;
use item_catalog_core::store::ItemStore;
use item_catalog_core::{Item, ItemList, StoreError};

use crate::backend::open_store;
use crate::config::{Config, ServerConfig};
use crate::images::ImageStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub images: ImageStore,
}

/// Starts the HTTP server on `[server].bind`.
///
/// Opens the configured item store once and serves until the process is
/// terminated. Failing to bind is the only fatal error.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState {
        store: open_store(config).await?,
        images: ImageStore::new(&config.images.dir),
    };
    let app = router(state, &config.server)?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        front_url = %config.server.front_url,
        backend = ?config.storage.backend,
        "item catalog listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the router with CORS, request tracing, panic recovery, and the
/// configured request body limit (axum's default of 2 MiB is too small for
/// camera photos).
pub fn router(state: AppState, server: &ServerConfig) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&server.front_url)
        .with_context(|| format!("Invalid front URL: {}", server.front_url))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/", get(handle_root))
        .route("/items", get(handle_list_items).post(handle_add_item))
        .route("/items/{id}", get(handle_get_item))
        .route("/search", get(handle_search))
        .route("/image/{image_filename}", get(handle_get_image))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
}

/// Error type that converts into an Axum HTTP response.
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let (status, code) = match &err {
            StoreError::StorageUnavailable(_) => {
                (StatusCode::BAD_REQUEST, "storage_unavailable")
            }
            StoreError::CorruptData(_) => (StatusCode::BAD_REQUEST, "corrupt_data"),
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            StoreError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };
        if status == StatusCode::BAD_REQUEST && code != "bad_request" {
            tracing::warn!(error = %err, "storage error");
        }
        AppError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

// ============ GET / ============

async fn handle_root() -> Json<Message> {
    Json(Message {
        message: "Hello, world!".to_string(),
    })
}

// ============ POST /items ============

/// A decoded `POST /items` body.
///
/// Accepts `multipart/form-data` (with `image` as an uploaded file part)
/// or `application/x-www-form-urlencoded` (no image). Missing `name` or
/// `category` fields are taken as empty strings.
///
/// A text `image` field naming a server-side file path is rejected: stored
/// images are served back by `GET /image`, so accepting a path would let a
/// client publish any file the server can read.
#[derive(Debug, Default)]
pub struct ItemSubmission {
    pub name: String,
    pub category: String,
    pub id: Option<String>,
    pub image: Option<Bytes>,
}

#[derive(Deserialize)]
struct SubmissionForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

impl<S> FromRequest<S> for ItemSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<SubmissionForm>::from_request(req, state)
                .await
                .map_err(|e| bad_request(e.body_text()))?;
            if form.image.as_deref().is_some_and(|s| !s.is_empty()) {
                return Err(bad_request("image must be uploaded as a multipart file part"));
            }
            return Ok(ItemSubmission {
                name: form.name,
                category: form.category,
                id: form.id,
                image: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| bad_request(e.body_text()))?;
        let mut submission = ItemSubmission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| bad_request(e.body_text()))?
        {
            let Some(field_name) = field.name().map(str::to_owned) else {
                continue;
            };
            match field_name.as_str() {
                "image" => {
                    if field.file_name().is_none() {
                        return Err(bad_request("image must be uploaded as a multipart file part"));
                    }
                    let bytes = field.bytes().await.map_err(|e| bad_request(e.body_text()))?;
                    // Browsers send an empty part when no file was chosen.
                    if !bytes.is_empty() {
                        submission.image = Some(bytes);
                    }
                }
                "name" => submission.name = field_text(field).await?,
                "category" => submission.category = field_text(field).await?,
                "id" => submission.id = Some(field_text(field).await?),
                _ => {}
            }
        }

        Ok(submission)
    }
}

async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(|e| bad_request(e.body_text()))
}

/// Handler for `POST /items`.
///
/// Stores the uploaded image (if any), appends the item, and returns the
/// updated collection.
async fn handle_add_item(
    State(state): State<AppState>,
    submission: ItemSubmission,
) -> Result<Json<ItemList>, AppError> {
    tracing::info!(name = %submission.name, category = %submission.category, "receive item");

    let mut item = Item::new(submission.name, submission.category);
    if let Some(id) = submission.id {
        item = item.with_id(id);
    }
    if let Some(bytes) = submission.image {
        item = item.with_image(state.images.store(&bytes).await?);
    }

    let items = state.store.append(item).await?;
    Ok(Json(ItemList::from(items)))
}

// ============ GET /items ============

async fn handle_list_items(State(state): State<AppState>) -> Result<Json<ItemList>, AppError> {
    Ok(Json(ItemList::from(state.store.list().await?)))
}

// ============ GET /items/{id} ============

async fn handle_get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.store.find_by_id(&id).await?))
}

// ============ GET /search ============

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    keyword: String,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ItemList>, AppError> {
    let items = state.store.find_by_name_substring(&params.keyword).await?;
    Ok(Json(ItemList::from(items)))
}

// ============ GET /image/{image_filename} ============

async fn handle_get_image(
    State(state): State<AppState>,
    Path(image_filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = state.images.read(&image_filename).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
