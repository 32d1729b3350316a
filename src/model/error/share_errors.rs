#[derive(Debug, PartialEq)]
pub enum ShareEntryError {
    /// an error with the database
    DbError,
    /// the entry was not found
    EntryNotFound,
    /// no user with the passed id exists
    UserNotFound,
    /// the entry is already shared with that user (or they own it)
    AlreadyShared,
}

#[derive(Debug, PartialEq)]
pub enum UnshareEntryError {
    /// an error with the database
    DbError,
    /// the entry was not found
    EntryNotFound,
    /// you cannot remove the owner from their own entry
    CannotRemoveOwner,
}

#[derive(Debug, PartialEq)]
pub enum CreateLinkError {
    /// an error with the database
    DbError,
    /// the entry was not found
    EntryNotFound,
    /// the entry already has a shareable link
    AlreadyExists,
}

#[derive(Debug, PartialEq)]
pub enum GetLinkError {
    /// an error with the database
    DbError,
    /// the entry was not found
    EntryNotFound,
    /// the entry has no shareable link
    NoLink,
}

#[derive(Debug, PartialEq)]
pub enum DeleteLinkError {
    /// an error with the database
    DbError,
    /// the entry was not found
    EntryNotFound,
}
