//! Database repositories.

pub mod photo;
pub mod user;

pub use photo::PhotoRepository;
pub use user::UserRepository;
