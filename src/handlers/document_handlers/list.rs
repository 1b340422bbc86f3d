use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::document::{self, DocumentStatus};
use crate::models::extra_field::build_extra_fields;
use crate::models::setting;
use crate::templates_structs::{DocumentView, ListTemplate, PageContext, StatusOption};

#[derive(Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// GET /list?q=&status=
/// Only `status` filters at the query level; `q` is handed to the page,
/// which filters the rendered rows in the browser.
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let status = query.status.as_deref().and_then(DocumentStatus::from_filter);
    let mut conn = pool.acquire().await?;

    let docs = document::find_all(&mut conn, status.as_ref()).await?;
    let settings = setting::get_settings(&mut conn).await?;

    let labels = build_extra_fields(&settings, None)
        .into_iter()
        .map(|f| f.label)
        .collect();
    let docs = docs
        .iter()
        .map(|d| DocumentView::new(d, &settings))
        .collect();

    render(ListTemplate {
        ctx: PageContext::new("/list"),
        docs,
        labels,
        search_query: query.q.clone().unwrap_or_default(),
        status_options: StatusOption::all(status.as_ref()),
        any_status: status.is_none(),
    })
}
