use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App};

use tripwise_api::db::users::{InMemoryUserStore, UserRepository};
use tripwise_api::middleware::auth::issue_token;
use tripwise_api::routes;
use tripwise_api::services::catalog::Catalog;

/// Real application wiring against a fresh in-memory user store seeded
/// with the demo account.
pub fn create_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<actix_web::body::BoxBody>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let catalog = web::Data::new(Catalog::new());
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::with_demo_account());

    App::new()
        .wrap(Cors::permissive())
        .route("/health", web::get().to(|| async { "OK" }))
        .app_data(catalog)
        .app_data(web::Data::from(users))
        .configure(routes::configure)
}

pub fn demo_email() -> String {
    "traveler@example.com".to_string()
}

pub fn demo_password() -> String {
    "trip123".to_string()
}

pub fn demo_token() -> String {
    issue_token(&demo_email()).expect("token for demo account")
}
