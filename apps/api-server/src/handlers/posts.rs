//! Post handlers - thin adapters between HTTP and the post store.

use actix_web::{HttpResponse, web};

use blog_core::domain::Post;
use blog_shared::{AckResponse, PostPayload, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostResponse> = state
        .posts
        .list()
        .await?
        .into_iter()
        .map(to_response)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let PostPayload { title, content } = body.into_inner();

    let post = state.posts.create(title, content).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let PostPayload { title, content } = body.into_inner();

    let post = state.posts.update(&id, title, content).await?;
    tracing::info!(post_id = post.id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let deleted = state.posts.delete(&id).await?;
    tracing::info!(post_id = deleted, "Post deleted");

    Ok(HttpResponse::Ok().json(AckResponse::ok("Post deleted successfully")))
}

/// Any other path under /api.
pub async fn api_not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("API endpoint not found".to_string()))
}
