pub mod entry_requests;

use rocket::serde::Deserialize;

/// Because `HeaderAuth` is used as a request guard, we can't use it for creating login
/// credentials. This allows us to accept one in a post body.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct NewAuth {
    pub username: String,
    pub password: String,
}

/// an admin-created account. Unlike [`NewAuth`] this may flag the new user as an admin
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct NewUserRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}
