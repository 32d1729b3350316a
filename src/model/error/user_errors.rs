#[derive(Debug, PartialEq)]
pub enum CreateUserError {
    /// an error with the database
    DbError,
    /// a user with that username already exists, or bootstrap was attempted twice
    AlreadyExists,
}
