use actix_web::web;

pub mod document_handlers;
pub mod pages;
pub mod settings_handlers;

/// Register every page route. Static files and the 404 fallback are wired in `main`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/scan", web::get().to(pages::scan))
        // Distribution
        .route("/assign/{qr_id}", web::get().to(document_handlers::assign_form))
        .route("/assign/{qr_id}", web::post().to(document_handlers::assign_save))
        // Return
        .route("/return/{qr_id}", web::get().to(document_handlers::return_form))
        .route("/return/{qr_id}", web::post().to(document_handlers::return_save))
        // Browsing
        .route("/list", web::get().to(document_handlers::list))
        .route("/detail/{qr_id}", web::get().to(document_handlers::detail))
        .route("/export.csv", web::get().to(document_handlers::export_csv))
        // Settings
        .route("/settings", web::get().to(settings_handlers::form))
        .route("/settings", web::post().to(settings_handlers::save));
}
