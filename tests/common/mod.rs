//! Shared test infrastructure.
//!
//! `setup_test_db()` creates a temporary SQLite file, runs the migrations and
//! returns a handle that keeps the directory alive for the test's duration.

#![allow(dead_code)]

use actix_web::{App, web};
use sqlx::SqlitePool;
use tempfile::TempDir;

use qr_linker::db;
use qr_linker::handlers;

pub struct TestDb {
    _dir: TempDir,
    pool: SqlitePool,
}

impl TestDb {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> std::path::PathBuf {
        self._dir.path().join("test.db")
    }
}

/// A fresh, migrated database.
pub async fn setup_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pool = db::init_pool(&dir.path().join("test.db"), 2)
        .await
        .expect("Failed to open test DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    TestDb { _dir: dir, pool }
}

/// The application wired the way `main` wires it, minus static files.
pub fn test_app(
    pool: SqlitePool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(pool))
        .configure(handlers::configure)
        .default_service(web::to(handlers::pages::not_found))
}

/// URL-encode form pairs into a request body.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).expect("encode form")
}
