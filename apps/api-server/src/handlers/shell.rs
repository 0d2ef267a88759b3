//! Single-page-app fallback for everything outside /api.

use actix_web::http::{Method, header::ContentType};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Served when `STATIC_DIR/index.html` is missing.
const BUILTIN_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Blog</title>
</head>
<body>
  <div id="app"></div>
</body>
</html>
"#;

/// Any non-API path: GET/HEAD return the client shell, other methods are 404.
pub async fn spa_shell(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if *req.method() != Method::GET && *req.method() != Method::HEAD {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let index = state.static_dir.join("index.html");
    let body = match tokio::fs::read_to_string(&index).await {
        Ok(html) => html,
        Err(e) => {
            tracing::debug!(path = %index.display(), error = %e, "Using built-in app shell");
            BUILTIN_SHELL.to_string()
        }
    };

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(body))
}
