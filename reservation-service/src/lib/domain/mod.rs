pub mod auth;
pub mod genre;
pub mod movie;
pub mod reservation;
pub mod showtime;
pub mod theater;
pub mod user;
