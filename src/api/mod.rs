pub mod admin;
pub mod auth;
pub mod listing;
pub mod market;
pub mod profile;

mod router;
pub use router::get_router;
