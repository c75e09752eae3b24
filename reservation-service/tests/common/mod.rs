#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::JwtHandler;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use mockall::mock;
use reservation_service::domain::auth::service::AuthService;
use reservation_service::domain::genre::errors::GenreError;
use reservation_service::domain::genre::models::CreateGenreCommand;
use reservation_service::domain::genre::models::Genre;
use reservation_service::domain::genre::models::GenreId;
use reservation_service::domain::genre::models::UpdateGenreCommand;
use reservation_service::domain::genre::ports::GenreServicePort;
use reservation_service::domain::movie::errors::MovieError;
use reservation_service::domain::movie::models::CreateMovieCommand;
use reservation_service::domain::movie::models::Movie;
use reservation_service::domain::movie::models::MovieId;
use reservation_service::domain::movie::models::UpdateMovieCommand;
use reservation_service::domain::movie::ports::MovieServicePort;
use reservation_service::domain::reservation::errors::ReservationError;
use reservation_service::domain::reservation::models::CreateReservationCommand;
use reservation_service::domain::reservation::models::Reservation;
use reservation_service::domain::reservation::models::ReservationId;
use reservation_service::domain::reservation::ports::ReservationServicePort;
use reservation_service::domain::showtime::errors::ShowtimeError;
use reservation_service::domain::showtime::models::CreateShowtimeCommand;
use reservation_service::domain::showtime::models::SeatAvailability;
use reservation_service::domain::showtime::models::Showtime;
use reservation_service::domain::showtime::models::ShowtimeId;
use reservation_service::domain::showtime::models::UpdateShowtimeCommand;
use reservation_service::domain::showtime::ports::ShowtimeServicePort;
use reservation_service::domain::theater::errors::TheaterError;
use reservation_service::domain::theater::models::CreateTheaterCommand;
use reservation_service::domain::theater::models::Theater;
use reservation_service::domain::theater::models::TheaterId;
use reservation_service::domain::theater::models::UpdateTheaterCommand;
use reservation_service::domain::theater::ports::TheaterServicePort;
use reservation_service::domain::user::errors::UserError;
use reservation_service::domain::user::models::EmailAddress;
use reservation_service::domain::user::models::User;
use reservation_service::domain::user::models::UserId;
use reservation_service::domain::user::ports::UserRepository;
use reservation_service::domain::user::service::UserService;
use reservation_service::inbound::http::create_router;
use reservation_service::inbound::http::AppState;
use reservation_service::outbound::database::Database;
use reservation_service::outbound::hashing::Argon2HashAdapter;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

mock! {
    pub GenreService {}

    #[async_trait]
    impl GenreServicePort for GenreService {
        async fn create_genre(&self, command: CreateGenreCommand) -> Result<Genre, GenreError>;
        async fn get_genre(&self, id: &GenreId) -> Result<Genre, GenreError>;
        async fn list_genres(&self) -> Result<Vec<Genre>, GenreError>;
        async fn update_genre(&self, id: &GenreId, command: UpdateGenreCommand) -> Result<Genre, GenreError>;
        async fn delete_genre(&self, id: &GenreId) -> Result<(), GenreError>;
    }
}

mock! {
    pub MovieService {}

    #[async_trait]
    impl MovieServicePort for MovieService {
        async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError>;
        async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError>;
        async fn list_movies(&self, genre_id: Option<GenreId>) -> Result<Vec<Movie>, MovieError>;
        async fn update_movie(&self, id: &MovieId, command: UpdateMovieCommand) -> Result<Movie, MovieError>;
        async fn delete_movie(&self, id: &MovieId) -> Result<(), MovieError>;
    }
}

mock! {
    pub TheaterService {}

    #[async_trait]
    impl TheaterServicePort for TheaterService {
        async fn create_theater(&self, command: CreateTheaterCommand) -> Result<Theater, TheaterError>;
        async fn get_theater(&self, id: &TheaterId) -> Result<Theater, TheaterError>;
        async fn list_theaters(&self) -> Result<Vec<Theater>, TheaterError>;
        async fn update_theater(&self, id: &TheaterId, command: UpdateTheaterCommand) -> Result<Theater, TheaterError>;
        async fn delete_theater(&self, id: &TheaterId) -> Result<(), TheaterError>;
    }
}

mock! {
    pub ShowtimeService {}

    #[async_trait]
    impl ShowtimeServicePort for ShowtimeService {
        async fn create_showtime(&self, command: CreateShowtimeCommand) -> Result<Showtime, ShowtimeError>;
        async fn get_showtime(&self, id: &ShowtimeId) -> Result<Showtime, ShowtimeError>;
        async fn list_showtimes(&self, movie_id: Option<MovieId>) -> Result<Vec<Showtime>, ShowtimeError>;
        async fn update_showtime(&self, id: &ShowtimeId, command: UpdateShowtimeCommand) -> Result<Showtime, ShowtimeError>;
        async fn delete_showtime(&self, id: &ShowtimeId) -> Result<(), ShowtimeError>;
        async fn get_availability(&self, id: &ShowtimeId) -> Result<SeatAvailability, ShowtimeError>;
    }
}

mock! {
    pub ReservationService {}

    #[async_trait]
    impl ReservationServicePort for ReservationService {
        async fn create_reservation(&self, command: CreateReservationCommand) -> Result<Reservation, ReservationError>;
        async fn list_reservations(&self, user_id: &UserId) -> Result<Vec<Reservation>, ReservationError>;
        async fn get_reservation(&self, user_id: &UserId, id: &ReservationId) -> Result<Reservation, ReservationError>;
        async fn cancel_reservation(&self, user_id: &UserId, id: &ReservationId) -> Result<(), ReservationError>;
    }
}

/// User store kept in memory, enforcing the unique email constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|user| user.email == *email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|user| user.id != *id);
        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Catalog and booking ports the test wants to script.
#[derive(Default)]
pub struct Ports {
    pub genres: MockGenreService,
    pub movies: MockMovieService,
    pub theaters: MockTheaterService,
    pub showtimes: MockShowtimeService,
    pub reservations: MockReservationService,
}

/// The full router over real auth and account services.
pub struct TestApp {
    pub router: Router,
    pub jwt_handler: Arc<JwtHandler>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_ports(Ports::default())
    }

    pub fn with_ports(ports: Ports) -> Self {
        let repository = Arc::new(InMemoryUserRepository::default());
        let hasher = Arc::new(Argon2HashAdapter::new());
        let jwt_handler = Arc::new(JwtHandler::new(JWT_SECRET));

        let state = AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&repository),
                Arc::clone(&hasher),
                Arc::clone(&jwt_handler),
            )),
            user_service: Arc::new(UserService::new(repository, hasher)),
            genre_service: Arc::new(ports.genres),
            movie_service: Arc::new(ports.movies),
            theater_service: Arc::new(ports.theaters),
            showtime_service: Arc::new(ports.showtimes),
            reservation_service: Arc::new(ports.reservations),
            jwt_handler: Arc::clone(&jwt_handler),
        };

        Self {
            router: create_router(state),
            jwt_handler,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).expect("Response is not JSON");

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, None, token).await
    }

    pub async fn post(&self, path: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, path, Some(body), token).await
    }

    /// Register an account and log in, returning the access token.
    pub async fn signed_in(&self, name: &str, email: &str) -> String {
        let password = "pass_word!";

        let response = self
            .post(
                "/api/auth/register",
                serde_json::json!({ "name": name, "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        let response = self
            .post(
                "/api/auth/login",
                serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        response.body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }
}

/// Throwaway Postgres database with migrations applied.
///
/// Connects with `DATABASE_URL` (any database on the target server), creates
/// a uniquely named database next to it and drops it again on drop.
pub struct TestDb {
    pub database: Database,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// `None` when `DATABASE_URL` is not set, so Postgres-backed tests are
    /// skipped on machines without a server.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_reservation_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        let database = Database::from_pool(pool);
        database.migrate().await.expect("Failed to run migrations");

        Some(Self {
            database,
            db_name,
            server_url,
        })
    }

    pub fn pool(&self) -> &PgPool {
        self.database.pool()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        runtime.spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
