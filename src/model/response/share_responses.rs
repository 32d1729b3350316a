use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, LinkApi};

type NoContent = ();

#[derive(Responder)]
pub enum ShareEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    AlreadyShared(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ShareDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum UnshareEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    CannotRemoveOwner(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ShareDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum CreateLinkResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<LinkApi>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    AlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    LinkDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GetLinkResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<LinkApi>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    LinkDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteLinkResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    LinkDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}
