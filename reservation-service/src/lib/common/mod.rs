pub mod envelope;
pub mod try_catch;

pub use envelope::Envelope;
pub use try_catch::try_catch;
pub use try_catch::TryCatchOptions;
