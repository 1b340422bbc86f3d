use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{document, setting};
use crate::templates_structs::{DocumentView, PageContext, ReturnFormTemplate};

use super::assign::detail_location;

/// GET /return/{qr_id}
/// Renders the return form. A QR ID seen here for the first time gets a stub
/// document so the return can be recorded.
pub async fn return_form(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let qr_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    let doc = document::find_or_create_stub(&mut conn, &qr_id).await?;
    let settings = setting::get_settings(&mut conn).await?;

    render(ReturnFormTemplate {
        ctx: PageContext::new("/scan"),
        doc: DocumentView::new(&doc, &settings),
    })
}

/// POST /return/{qr_id}
pub async fn return_save(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    form: web::Form<document::ReturnForm>,
) -> Result<HttpResponse, AppError> {
    let qr_id = path.into_inner();
    let input = form.to_input()?;

    let mut conn = pool.acquire().await?;
    document::record_return(&mut conn, &qr_id, &input).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", detail_location(&qr_id)))
        .finish())
}
