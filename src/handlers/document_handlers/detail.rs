use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{document, setting};
use crate::templates_structs::{DetailTemplate, DocumentView, PageContext};

/// GET /detail/{qr_id}
pub async fn detail(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let qr_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    let doc = document::find_by_qr_id(&mut conn, &qr_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let settings = setting::get_settings(&mut conn).await?;

    render(DetailTemplate {
        ctx: PageContext::new("/list"),
        doc: DocumentView::new(&doc, &settings),
    })
}
