use actix_web::{App, HttpServer, middleware, web};

use qr_linker::config::AppConfig;
use qr_linker::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    let pool = db::init_pool(&config.database_path, config.pool_size)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool)
        .await
        .map_err(std::io::Error::other)?;
    log::info!("Using database {}", config.database_path.display());

    log::info!("Starting server at http://{}", config.bind_addr);

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            // Static files
            .service(actix_files::Files::new("/static", &static_dir))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::pages::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
