//! Post handlers: create, update (ownership-guarded), list and fetch.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;
use uuid::Uuid;

use quill_core::domain::{Post, PostUpdate};
use quill_shared::dto::{AuthorResponse, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// How many posts the home page shows.
const HOME_PAGE_LIMIT: u64 = 20;

fn post_response(post: Post, author_id: Uuid, author_username: &str) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        summary: post.summary,
        content: post.content,
        cover: post.cover,
        author: AuthorResponse {
            id: author_id,
            username: author_username.to_string(),
        },
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// The multipart form the SPA submits for post create/update: text
/// fields plus an optional cover image under the `file` field.
#[derive(Default)]
struct PostForm {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

fn bad_multipart(e: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart payload: {e}"))
}

async fn collect_form(mut payload: Multipart) -> Result<PostForm, AppError> {
    let mut form = PostForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            let filename = field
                .content_disposition()
                .get_filename()
                .unwrap_or("upload")
                .to_string();

            let mut data = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                data.extend_from_slice(&chunk);
            }
            form.file = Some((filename, data));
        } else {
            let mut buf = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                buf.extend_from_slice(&chunk);
            }
            let value = String::from_utf8(buf)
                .map_err(|_| AppError::BadRequest(format!("Field '{name}' is not valid UTF-8")))?;

            match name.as_str() {
                "id" => form.id = Some(value),
                "title" => form.title = Some(value),
                "summary" => form.summary = Some(value),
                "content" => form.content = Some(value),
                // Unknown fields are ignored
                _ => {}
            }
        }
    }

    Ok(form)
}

/// POST /post - create a post as the authenticated principal.
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = collect_form(payload).await?;

    let title = form
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing field 'title'".to_string()))?;
    let summary = form.summary.unwrap_or_default();

    // Rich text never reaches the repository unsanitized.
    let content = state.sanitizer.clean(&form.content.unwrap_or_default());

    let cover = match form.file {
        Some((filename, data)) => Some(state.images.store(&filename, data).await?),
        None => None,
    };

    let post = Post::new(identity.user_id, title, summary, content, cover);
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(HttpResponse::Created().json(post_response(
        saved,
        identity.user_id,
        &identity.username,
    )))
}

/// PUT /post - ownership-guarded partial update.
///
/// Valid token, post missing: 404. Valid token, not the author: 403.
/// Author: the mutation is applied and the updated post returned.
pub async fn update_post(
    identity: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = collect_form(payload).await?;

    let id = form
        .id
        .ok_or_else(|| AppError::BadRequest("Missing field 'id'".to_string()))?;
    let id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("Invalid post id".to_string()))?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    // The ownership guard: direct id equality, checked before any mutation.
    post.ensure_author(identity.user_id)?;

    let previous_cover = post.cover.clone();
    let new_cover = match form.file {
        Some((filename, data)) => Some(state.images.store(&filename, data).await?),
        None => None,
    };

    post.apply(PostUpdate {
        title: form.title,
        summary: form.summary,
        content: form.content.map(|c| state.sanitizer.clean(&c)),
        cover: new_cover.clone(),
    });

    let saved = state.posts.save(post).await?;

    // Best-effort cleanup of the replaced cover; the update is already
    // applied, so a failed delete only leaks a file.
    if new_cover.is_some() {
        if let Some(old) = previous_cover {
            if let Err(e) = state.images.delete(&old).await {
                tracing::warn!(reference = %old, "Failed to delete replaced cover image: {e}");
            }
        }
    }

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post updated");

    Ok(HttpResponse::Ok().json(post_response(
        saved,
        identity.user_id,
        &identity.username,
    )))
}

/// GET /post - the latest posts, newest first, authors populated.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_recent(HOME_PAGE_LIMIT).await?;

    let mut responses = Vec::with_capacity(posts.len());
    for post in posts {
        match state.users.find_by_id(post.author_id).await? {
            Some(author) => responses.push(post_response(post, author.id, &author.username)),
            None => tracing::warn!(post_id = %post.id, "Skipping post with missing author"),
        }
    }

    Ok(HttpResponse::Ok().json(responses))
}

/// GET /post/{id} - a single post for the full-article view.
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    let author = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Author missing for post {id}")))?;

    Ok(HttpResponse::Ok().json(post_response(post, author.id, &author.username)))
}
