use rocket::serde::json::Json;
use rocket::serde::Serialize;

use crate::guard::{HeaderAuth, ValidateResult};
use crate::model::error::user_errors::CreateUserError;
use crate::model::request::{NewAuth, NewUserRequest};
use crate::model::response::user_responses::{CreateUserResponse, SetPasswordResponse};
use crate::model::response::BasicMessage;
use crate::service::user_service;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    version: &'static str,
}

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion {
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// bootstraps the server by creating the first account, which is always an admin.
/// Once any account exists this always 400s; admins create further accounts
/// through [`create_user`]
#[post("/password", data = "<auth>")]
pub fn set_password(auth: Json<NewAuth>) -> SetPasswordResponse {
    match user_service::create_first_admin(auth.into_inner()) {
        Ok(_) => SetPasswordResponse::Created(()),
        Err(CreateUserError::AlreadyExists) => SetPasswordResponse::AlreadyExists(
            BasicMessage::new("An account already exists, and this route can only create the first one"),
        ),
        Err(CreateUserError::DbError) => SetPasswordResponse::Failure(BasicMessage::new(
            "Failed to create account. Check the server logs for details",
        )),
    }
}

#[post("/users", data = "<request>")]
pub fn create_user(request: Json<NewUserRequest>, auth: Option<HeaderAuth>) -> CreateUserResponse {
    let user = match auth.map(HeaderAuth::validate) {
        Some(ValidateResult::Valid(user)) => user,
        Some(ValidateResult::NoUsersExist) => {
            return CreateUserResponse::Unauthorized(
                "No account has been created. You can create one by making a POST to `/api/password`".to_string(),
            )
        }
        _ => return CreateUserResponse::Unauthorized("Bad Credentials".to_string()),
    };
    if !user.is_admin {
        return CreateUserResponse::Forbidden("Only admins can create accounts".to_string());
    }
    match user_service::create_user(request.into_inner()) {
        Ok(created) => CreateUserResponse::Success(Json(created)),
        Err(CreateUserError::AlreadyExists) => CreateUserResponse::AlreadyExists(
            BasicMessage::new("A user with that name already exists"),
        ),
        Err(CreateUserError::DbError) => CreateUserResponse::UserDbError(BasicMessage::new(
            "Failed to create account. Check the server logs for details",
        )),
    }
}
