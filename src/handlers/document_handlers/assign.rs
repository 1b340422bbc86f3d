use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{document, setting};
use crate::templates_structs::AssignFormTemplate;

/// GET /assign/{qr_id}
/// Renders the distribution form, pre-filled when the document already exists.
pub async fn assign_form(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let qr_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    let doc = document::find_by_qr_id(&mut conn, &qr_id).await?;
    let settings = setting::get_settings(&mut conn).await?;

    render(AssignFormTemplate::new(&qr_id, doc.as_ref(), &settings))
}

/// POST /assign/{qr_id}
/// Creates or updates the document and marks it assigned.
pub async fn assign_save(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    form: web::Form<document::AssignForm>,
) -> Result<HttpResponse, AppError> {
    let qr_id = path.into_inner();
    let mut conn = pool.acquire().await?;

    let errors = form.validate();
    if !errors.is_empty() {
        let doc = document::find_by_qr_id(&mut conn, &qr_id).await?;
        let settings = setting::get_settings(&mut conn).await?;
        return render(AssignFormTemplate::from_submission(
            &qr_id,
            doc.as_ref(),
            &settings,
            &form,
            errors,
        ));
    }

    let input = form.to_input()?;
    document::assign(&mut conn, &qr_id, &input).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", detail_location(&qr_id)))
        .finish())
}

/// Redirect target for a document's detail page.
pub(crate) fn detail_location(qr_id: &str) -> String {
    format!("/detail/{}", document::qr_path_segment(qr_id))
}
