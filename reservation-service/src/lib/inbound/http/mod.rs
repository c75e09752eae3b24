pub mod exception;
pub mod filters;
pub mod handlers;
pub mod interceptors;
pub mod middleware;
pub mod router;

pub use exception::HttpException;
pub use router::create_router;
pub use router::AppState;
