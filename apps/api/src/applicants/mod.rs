pub mod form;
pub mod handlers;
pub mod repository;
