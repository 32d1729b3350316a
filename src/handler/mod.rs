pub mod api_handler;
pub mod entry_handler;
