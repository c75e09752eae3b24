pub mod genre;
pub mod movie;
pub mod reservation;
pub mod showtime;
pub mod theater;
pub mod user;

pub use genre::PostgresGenreRepository;
pub use movie::PostgresMovieRepository;
pub use reservation::PostgresReservationRepository;
pub use showtime::PostgresShowtimeRepository;
pub use theater::PostgresTheaterRepository;
pub use user::PostgresUserRepository;
