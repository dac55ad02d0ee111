pub mod errors;
pub mod handler;
pub mod models;
pub mod pinata;
pub mod publisher;
