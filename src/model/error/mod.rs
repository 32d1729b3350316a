pub mod entry_errors;
pub mod page_errors;
pub mod share_errors;
pub mod user_errors;
