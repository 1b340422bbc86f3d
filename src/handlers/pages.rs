use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::document;
use crate::templates_structs::{IndexTemplate, NotFoundTemplate, PageContext, ScanTemplate};

#[derive(Deserialize)]
pub struct ScanQuery {
    pub mode: Option<String>,
}

/// GET /
pub async fn index(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let counts = document::count_by_status(&mut conn).await?;

    render(IndexTemplate {
        ctx: PageContext::new("/"),
        counts,
    })
}

/// GET /scan?mode=assign|return
pub async fn scan(query: web::Query<ScanQuery>) -> Result<HttpResponse, AppError> {
    render(ScanTemplate::for_mode(query.mode.as_deref()))
}

/// Fallback for unknown routes.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    let body = NotFoundTemplate {
        ctx: PageContext::new(""),
    }
    .render()?;
    Ok(HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
