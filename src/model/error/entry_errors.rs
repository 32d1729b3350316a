#[derive(Debug, PartialEq)]
pub enum CreateEntryError {
    /// an error with the database
    DbError,
    /// no entry with the passed parent id exists
    ParentNotFound,
    /// the passed parent id points at a file, not a folder
    ParentNotFolder,
}

#[derive(Debug, PartialEq)]
pub enum GetEntryError {
    /// an error with the database
    DbError,
    /// the entry was not found
    NotFound,
}

#[derive(Debug, PartialEq)]
pub enum UpdateEntryError {
    /// an error with the database
    DbError,
    /// the entry was not found
    NotFound,
    /// no entry with the passed parent id exists
    ParentNotFound,
    /// the passed parent id points at a file, not a folder
    ParentNotFolder,
    /// the new parent is the entry itself or one of its descendants
    ParentIsOwnChild,
}

#[derive(Debug, PartialEq)]
pub enum DeleteEntryError {
    /// an error with the database
    DbError,
    /// the entry was not found
    NotFound,
}

#[derive(Debug, PartialEq)]
pub enum ListEntriesError {
    /// an error with the database
    DbError,
}

#[derive(Debug, PartialEq)]
pub enum StarEntryError {
    /// an error with the database
    DbError,
    /// the entry was not found
    EntryNotFound,
}
