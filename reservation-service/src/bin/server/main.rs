use std::sync::Arc;

use anyhow::Error;
use auth::JwtHandler;
use reservation_service::config::Config;
use reservation_service::domain::auth::service::AuthService;
use reservation_service::domain::genre::service::GenreService;
use reservation_service::domain::movie::service::MovieService;
use reservation_service::domain::reservation::service::ReservationService;
use reservation_service::domain::showtime::service::ShowtimeService;
use reservation_service::domain::theater::service::TheaterService;
use reservation_service::domain::user::service::UserService;
use reservation_service::inbound::http::create_router;
use reservation_service::inbound::http::AppState;
use reservation_service::outbound::database::Database;
use reservation_service::outbound::hashing::Argon2HashAdapter;
use reservation_service::repositories::PostgresGenreRepository;
use reservation_service::repositories::PostgresMovieRepository;
use reservation_service::repositories::PostgresReservationRepository;
use reservation_service::repositories::PostgresShowtimeRepository;
use reservation_service::repositories::PostgresTheaterRepository;
use reservation_service::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "reservation-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let database = Database::connect(&config.database).await?;
    database.migrate().await?;

    let pool = database.pool().clone();
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let genre_repository = Arc::new(PostgresGenreRepository::new(pool.clone()));
    let movie_repository = Arc::new(PostgresMovieRepository::new(pool.clone()));
    let theater_repository = Arc::new(PostgresTheaterRepository::new(pool.clone()));
    let showtime_repository = Arc::new(PostgresShowtimeRepository::new(pool));
    let reservation_repository = Arc::new(PostgresReservationRepository::new(database.clone()));

    let hasher = Arc::new(Argon2HashAdapter::new());
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&hasher),
            Arc::clone(&jwt_handler),
        )),
        user_service: Arc::new(UserService::new(user_repository, hasher)),
        genre_service: Arc::new(GenreService::new(genre_repository)),
        movie_service: Arc::new(MovieService::new(movie_repository)),
        theater_service: Arc::new(TheaterService::new(theater_repository)),
        showtime_service: Arc::new(ShowtimeService::new(showtime_repository)),
        reservation_service: Arc::new(ReservationService::new(reservation_repository)),
        jwt_handler,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        "Server Listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    tracing::info!("Service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
