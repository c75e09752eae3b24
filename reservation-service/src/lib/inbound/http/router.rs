use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::filters::exception_filter;
use super::filters::handle_panic;
use super::handlers::auth::login;
use super::handlers::auth::register;
use super::handlers::genres;
use super::handlers::health;
use super::handlers::movies;
use super::handlers::reservations;
use super::handlers::showtimes;
use super::handlers::theaters;
use super::handlers::users;
use super::interceptors::response_interceptor;
use super::middleware::authenticate;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::genre::ports::GenreServicePort;
use crate::domain::movie::ports::MovieServicePort;
use crate::domain::reservation::ports::ReservationServicePort;
use crate::domain::showtime::ports::ShowtimeServicePort;
use crate::domain::theater::ports::TheaterServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub genre_service: Arc<dyn GenreServicePort>,
    pub movie_service: Arc<dyn MovieServicePort>,
    pub theater_service: Arc<dyn TheaterServicePort>,
    pub showtime_service: Arc<dyn ShowtimeServicePort>,
    pub reservation_service: Arc<dyn ReservationServicePort>,
    pub jwt_handler: Arc<JwtHandler>,
}

/// Build the application router.
///
/// Layers, innermost first: success envelope, panic capture, exception
/// filter, request tracing, CORS.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/genres", get(genres::list_genres))
        .route("/api/genres/:id", get(genres::get_genre))
        .route("/api/movies", get(movies::list_movies))
        .route("/api/movies/:id", get(movies::get_movie))
        .route("/api/theaters", get(theaters::list_theaters))
        .route("/api/theaters/:id", get(theaters::get_theater))
        .route("/api/showtimes", get(showtimes::list_showtimes))
        .route("/api/showtimes/:id", get(showtimes::get_showtime))
        .route(
            "/api/showtimes/:id/availability",
            get(showtimes::get_availability),
        );

    let protected_routes = Router::new()
        .route(
            "/api/users/me",
            get(users::get_me)
                .patch(users::update_me)
                .delete(users::delete_me),
        )
        .route("/api/users/:id", get(users::get_user))
        .route("/api/genres", post(genres::create_genre))
        .route(
            "/api/genres/:id",
            patch(genres::update_genre).delete(genres::delete_genre),
        )
        .route("/api/movies", post(movies::create_movie))
        .route(
            "/api/movies/:id",
            patch(movies::update_movie).delete(movies::delete_movie),
        )
        .route("/api/theaters", post(theaters::create_theater))
        .route(
            "/api/theaters/:id",
            patch(theaters::update_theater).delete(theaters::delete_theater),
        )
        .route("/api/showtimes", post(showtimes::create_showtime))
        .route(
            "/api/showtimes/:id",
            patch(showtimes::update_showtime).delete(showtimes::delete_showtime),
        )
        .route(
            "/api/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/api/reservations/:id",
            get(reservations::get_reservation).delete(reservations::cancel_reservation),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(response_interceptor))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(exception_filter))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
