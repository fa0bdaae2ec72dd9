pub mod common;
pub mod user;
