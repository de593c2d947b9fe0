pub mod account;
pub mod destination;
pub mod trip;

use actix_web::web;

use crate::middleware;

/// Wire the /api scopes. Shared between `main` and the integration tests;
/// `app_data` (catalog, user store) is registered by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(account::signup))
                    .route("/signin", web::post().to(account::signin))
                    .route("/forgot", web::post().to(account::forgot_password))
                    .service(
                        web::scope("")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("/session", web::get().to(account::user_session)),
                    ),
            )
            .service(
                web::scope("/destinations")
                    .route("", web::get().to(destination::get_destinations))
                    .route("/{key}", web::get().to(destination::get_destination)),
            )
            .service(
                web::scope("/trips")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/plan", web::post().to(trip::plan_trip)),
            ),
    );
}
