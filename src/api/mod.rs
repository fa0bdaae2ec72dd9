pub mod users;
pub mod validation;
