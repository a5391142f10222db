use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, Multipart, Path, Request, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{Post, PostPayload};
use crate::storage::object_key;
use crate::AppState;

/// Name of the multipart file field carrying the cover image
const COVER_FIELD: &str = "cover";

/// A cover image buffered from a multipart form
#[derive(Debug)]
struct CoverUpload {
    filename: Option<String>,
    content_type: String,
    data: Bytes,
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .map(|m| m.type_() == mime::MULTIPART && m.subtype() == mime::FORM_DATA)
        .unwrap_or(false)
}

/// Collect the text fields and the optional cover file of a post form
async fn read_post_form(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> ApiResult<(PostPayload, Option<CoverUpload>)> {
    let mut payload = PostPayload::default();
    let mut cover = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        tracing::debug!("Processing field: {}", field_name);

        match field_name.as_str() {
            "title" => payload.title = field.text().await?,
            "description" => payload.description = field.text().await?,
            "content" => payload.content = field.text().await?,
            COVER_FIELD => {
                let filename = field.file_name().map(str::to_owned);
                let content_type = field
                    .content_type()
                    .map(str::to_owned)
                    .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());
                let data = field.bytes().await?;

                if data.len() > max_file_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "cover exceeds {} bytes",
                        max_file_bytes
                    )));
                }

                // Browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }

                cover = Some(CoverUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            other => tracing::debug!("Ignoring unexpected form field: {}", other),
        }
    }

    Ok((payload, cover))
}

/// Create a post from JSON or from a multipart form with an optional cover
pub async fn create_post(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let (payload, cover) = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state).await?;
        read_post_form(multipart, state.upload.max_file_bytes()).await?
    } else {
        let Json(payload) = Json::<PostPayload>::from_request(request, &state).await?;
        (payload, None)
    };

    payload.validate()?;

    // Upload first so a failed upload never leaves a row behind
    let uploaded = match cover {
        Some(cover) => {
            let key = object_key(cover.filename.as_deref(), chrono::Utc::now().timestamp_millis());
            tracing::info!(
                "Cover received: filename={:?}, size={} bytes, content_type={}",
                cover.filename,
                cover.data.len(),
                cover.content_type
            );
            let url = state
                .storage
                .put_public(&key, cover.data, &cover.content_type)
                .await?;
            Some((key, url))
        }
        None => None,
    };

    let new_post = payload.into_new_post(uploaded.as_ref().map(|(_, url)| url.clone()));

    match state.db.insert_post(&new_post).await {
        Ok(post) => Ok((StatusCode::CREATED, Json(post))),
        Err(e) => {
            if let Some((key, _)) = uploaded {
                tracing::warn!("Post insert failed, removing uploaded cover {}", key);
                if let Err(delete_err) = state.storage.delete(&key).await {
                    tracing::error!("Failed to roll back cover upload: {}", delete_err);
                }
            }
            Err(e.into())
        }
    }
}

pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let posts = state.db.list_posts().await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Post>> {
    let Path(id) = id?;

    state
        .db
        .find_post(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::post_not_found(id))
}

/// Overwrite title, description and content; the cover photo is kept
pub async fn update_post(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PostPayload>, JsonRejection>,
) -> ApiResult<Json<&'static str>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    if !state.db.update_post(id, &payload).await? {
        return Err(ApiError::post_not_found(id));
    }

    Ok(Json("post was updated!"))
}

pub async fn delete_post(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<&'static str>> {
    let Path(id) = id?;

    if !state.db.delete_post(id).await? {
        return Err(ApiError::post_not_found(id));
    }

    Ok(Json("Post was deleted!"))
}
