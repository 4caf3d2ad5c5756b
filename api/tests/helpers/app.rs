use super::sheets::FakeSheets;
use api::auth::generate_jwt;
use api::routes::routes;
use api::state::AppState;
use attendance::qr::QrGenerator;
use attendance::{CheckinUrls, FallbackPolicy, SheetsClient};
use axum::{body::Body, http::Request, response::Response};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use std::convert::Infallible;
use std::sync::{Arc, Once};
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::config::AppConfig;

pub const ORIGIN: &str = "https://hmpti.example.org";

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        unsafe {
            std::env::set_var("DATABASE_PATH", "sqlite::memory:");
            std::env::set_var("JWT_SECRET", "test-secret");
        }
        AppConfig::set_jwt_secret("test-secret");
        AppConfig::set_public_origin(ORIGIN);
    });
}

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// Router over a fresh in-memory database, with `sheets` standing in for Google.
pub async fn make_test_app(sheets: Arc<FakeSheets>) -> (TestApp, DatabaseConnection) {
    init_test_config();

    let db = setup_test_db().await;
    let state = AppState::new(
        db.clone(),
        SheetsClient::with_transport(sheets, FallbackPolicy::AnyFailure),
        QrGenerator::new(300, None, reqwest::Client::new()),
        CheckinUrls::new(ORIGIN).expect("valid origin"),
    );

    let router = axum::Router::new().nest("/api", routes(state));
    (router.into_service().boxed_clone(), db)
}

pub fn admin_token() -> String {
    init_test_config();
    generate_jwt(1, true).expect("token").0
}

pub fn user_token() -> String {
    init_test_config();
    generate_jwt(2, false).expect("token").0
}
