pub mod error;
pub mod repository;
pub mod request;
pub mod response;
