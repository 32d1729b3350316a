use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, UserApi};

type NoContent = ();

#[derive(Responder)]
pub enum SetPasswordResponse {
    #[response(status = 201)]
    Created(NoContent),
    #[response(status = 400, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum CreateUserResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<UserApi>),
    #[response(status = 400, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    UserDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403)]
    Forbidden(String),
}
