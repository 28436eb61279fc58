pub mod auth;
pub mod common;
pub mod exercises;
pub mod submissions;
pub mod users;

pub use common::{ApiResponse, ErrorCode};
