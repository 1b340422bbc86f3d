use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::extra_field::build_label_fields;
use crate::models::setting::{self, SettingsForm};
use crate::templates_structs::{PageContext, SettingsTemplate};

#[derive(Deserialize)]
pub struct SettingsQuery {
    pub saved: Option<String>,
}

/// GET /settings
pub async fn form(
    pool: web::Data<DbPool>,
    query: web::Query<SettingsQuery>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let settings = setting::get_settings(&mut conn).await?;

    render(SettingsTemplate {
        ctx: PageContext::new("/settings"),
        label_fields: build_label_fields(&settings),
        saved: query.saved.is_some(),
    })
}

/// POST /settings
/// Each label is trimmed; a blank label reverts to its positional default.
pub async fn save(
    pool: web::Data<DbPool>,
    form: web::Form<SettingsForm>,
) -> Result<HttpResponse, AppError> {
    let labels = form.normalized_labels();

    let mut conn = pool.acquire().await?;
    setting::save_labels(&mut conn, &labels).await?;
    log::info!("Saved field labels: {}", labels.join(", "));

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/settings?saved=1"))
        .finish())
}
