use rocket::serde::json::Json;

use crate::model::response::{BasicMessage, EntryApi};

type NoContent = ();

#[derive(Responder)]
pub enum CreateEntryResponse {
    #[response(status = 201, content_type = "json")]
    Success(Json<EntryApi>),
    #[response(status = 404, content_type = "json")]
    ParentNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    EntryDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GetEntryResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<EntryApi>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    EntryDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum UpdateEntryResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<EntryApi>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    EntryDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    EntryDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum ListEntriesResponse {
    #[response(status = 200, content_type = "json")]
    Success(Json<Vec<EntryApi>>),
    #[response(status = 500, content_type = "json")]
    EntryDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum StarEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    EntryDbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}
