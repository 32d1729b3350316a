pub mod entry_service;
pub mod label_service;
pub mod share_service;
pub mod user_service;
