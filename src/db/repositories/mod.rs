pub mod account;
pub mod recipe;
pub mod status;
