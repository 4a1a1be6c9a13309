pub mod handlers;
pub mod letter;
pub mod repository;
