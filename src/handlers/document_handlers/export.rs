use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::document::{self, export};
use crate::models::setting;

/// GET /export.csv
/// Every document as CSV, headed by the configured extra-field labels.
pub async fn export_csv(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;

    let settings = setting::get_settings(&mut conn).await?;
    let docs = document::find_all(&mut conn, None).await?;
    let csv = export::write_csv(&settings, &docs)?;

    log::info!("Exported {} document(s) as CSV", docs.len());
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .body(csv))
}
