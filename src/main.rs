use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripwise_api::db::users::{InMemoryUserStore, UserRepository};
use tripwise_api::routes;
use tripwise_api::services::catalog::Catalog;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    println!(
        "Starting TripWise API. GEMINI_API_KEY set?: {}",
        env::var("GEMINI_API_KEY").is_ok()
    );
    println!(
        "GOOGLE_PLACES_KEY set?: {}",
        env::var("GOOGLE_PLACES_KEY").is_ok()
    );

    let catalog = web::Data::new(Catalog::new());
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::with_demo_account());
    let users = web::Data::from(users);

    println!("Attempting to bind to {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(catalog.clone())
            .app_data(users.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
