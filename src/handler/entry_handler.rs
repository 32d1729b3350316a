use rocket::serde::json::Json;

use crate::guard::{HeaderAuth, ValidateResult};
use crate::model::error::entry_errors::{
    CreateEntryError, DeleteEntryError, GetEntryError, ListEntriesError, StarEntryError,
    UpdateEntryError,
};
use crate::model::error::share_errors::{
    CreateLinkError, DeleteLinkError, GetLinkError, ShareEntryError, UnshareEntryError,
};
use crate::model::request::entry_requests::{
    CreateEntryRequest, ShareEntryRequest, UpdateEntryRequest,
};
use crate::model::response::entry_responses::{
    CreateEntryResponse, DeleteEntryResponse, GetEntryResponse, ListEntriesResponse,
    StarEntryResponse, UpdateEntryResponse,
};
use crate::model::response::share_responses::{
    CreateLinkResponse, DeleteLinkResponse, GetLinkResponse, ShareEntryResponse,
    UnshareEntryResponse,
};
use crate::model::response::BasicMessage;
use crate::service::{entry_service, label_service, share_service};

static NO_ACCOUNT_MESSAGE: &str =
    "No account has been created. You can create one by making a POST to `/api/password`";
static BAD_CREDENTIALS_MESSAGE: &str = "Bad Credentials";

/// resolves the auth guard down to a user, or the message for the 401 body
fn authenticate(auth: Option<HeaderAuth>) -> Result<crate::model::repository::User, String> {
    match auth.map(HeaderAuth::validate) {
        Some(ValidateResult::Valid(user)) => Ok(user),
        Some(ValidateResult::NoUsersExist) => Err(NO_ACCOUNT_MESSAGE.to_string()),
        _ => Err(BAD_CREDENTIALS_MESSAGE.to_string()),
    }
}

#[post("/", data = "<request>")]
pub fn create_entry(request: Json<CreateEntryRequest>, auth: Option<HeaderAuth>) -> CreateEntryResponse {
    let user = match authenticate(auth) {
        Ok(user) => user,
        Err(message) => return CreateEntryResponse::Unauthorized(message),
    };
    match entry_service::create_entry(request.into_inner(), &user) {
        Ok(entry) => CreateEntryResponse::Success(Json(entry)),
        Err(CreateEntryError::ParentNotFound) => CreateEntryResponse::ParentNotFound(
            BasicMessage::new("No entry with the passed parentId was found"),
        ),
        Err(CreateEntryError::ParentNotFolder) => CreateEntryResponse::BadRequest(
            BasicMessage::new("The passed parentId points at a file, not a folder"),
        ),
        Err(CreateEntryError::DbError) => CreateEntryResponse::EntryDbError(BasicMessage::new(
            "Failed to create entry. Check the server logs for details",
        )),
    }
}

#[get("/<id>")]
pub fn get_entry(id: u32, auth: Option<HeaderAuth>) -> GetEntryResponse {
    if let Err(message) = authenticate(auth) {
        return GetEntryResponse::Unauthorized(message);
    }
    match entry_service::get_entry(id) {
        Ok(entry) => GetEntryResponse::Success(Json(entry)),
        Err(GetEntryError::NotFound) => GetEntryResponse::EntryNotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(GetEntryError::DbError) => GetEntryResponse::EntryDbError(BasicMessage::new(
            "Failed to pull entry info. Check the server logs for details",
        )),
    }
}

#[put("/<id>", data = "<request>")]
pub fn update_entry(
    id: u32,
    request: Json<UpdateEntryRequest>,
    auth: Option<HeaderAuth>,
) -> UpdateEntryResponse {
    if let Err(message) = authenticate(auth) {
        return UpdateEntryResponse::Unauthorized(message);
    }
    match entry_service::update_entry(id, request.into_inner()) {
        Ok(entry) => UpdateEntryResponse::Success(Json(entry)),
        Err(UpdateEntryError::NotFound) => UpdateEntryResponse::NotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(UpdateEntryError::ParentNotFound) => UpdateEntryResponse::NotFound(BasicMessage::new(
            "No entry with the passed parentId was found",
        )),
        Err(UpdateEntryError::ParentNotFolder) => UpdateEntryResponse::BadRequest(
            BasicMessage::new("The passed parentId points at a file, not a folder"),
        ),
        Err(UpdateEntryError::ParentIsOwnChild) => UpdateEntryResponse::BadRequest(
            BasicMessage::new("An entry cannot be moved into itself or its own subtree"),
        ),
        Err(UpdateEntryError::DbError) => UpdateEntryResponse::EntryDbError(BasicMessage::new(
            "Failed to update entry. Check the server logs for details",
        )),
    }
}

#[delete("/<id>")]
pub fn delete_entry(id: u32, auth: Option<HeaderAuth>) -> DeleteEntryResponse {
    if let Err(message) = authenticate(auth) {
        return DeleteEntryResponse::Unauthorized(message);
    }
    match entry_service::delete_entry(id) {
        Ok(_) => DeleteEntryResponse::Success(()),
        Err(DeleteEntryError::NotFound) => DeleteEntryResponse::EntryNotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(DeleteEntryError::DbError) => DeleteEntryResponse::EntryDbError(BasicMessage::new(
            "Failed to delete entry. Check the server logs for details",
        )),
    }
}

fn list_response(result: Result<Vec<crate::model::response::EntryApi>, ListEntriesError>) -> ListEntriesResponse {
    match result {
        Ok(entries) => ListEntriesResponse::Success(Json(entries)),
        Err(ListEntriesError::DbError) => ListEntriesResponse::EntryDbError(BasicMessage::new(
            "Failed to query entries. Check the server logs for details",
        )),
    }
}

#[get("/root")]
pub fn root_entries(auth: Option<HeaderAuth>) -> ListEntriesResponse {
    if let Err(message) = authenticate(auth) {
        return ListEntriesResponse::Unauthorized(message);
    }
    list_response(entry_service::root_entries())
}

#[get("/starred")]
pub fn starred_entries(auth: Option<HeaderAuth>) -> ListEntriesResponse {
    if let Err(message) = authenticate(auth) {
        return ListEntriesResponse::Unauthorized(message);
    }
    list_response(entry_service::starred_entries())
}

#[get("/shared-by/<user_id>")]
pub fn entries_shared_by(user_id: u32, auth: Option<HeaderAuth>) -> ListEntriesResponse {
    if let Err(message) = authenticate(auth) {
        return ListEntriesResponse::Unauthorized(message);
    }
    list_response(entry_service::entries_shared_by(user_id))
}

#[get("/shared-with/<user_id>")]
pub fn entries_shared_with(user_id: u32, auth: Option<HeaderAuth>) -> ListEntriesResponse {
    if let Err(message) = authenticate(auth) {
        return ListEntriesResponse::Unauthorized(message);
    }
    list_response(entry_service::entries_shared_with_only(user_id))
}

#[post("/<id>/star")]
pub fn star_entry(id: u32, auth: Option<HeaderAuth>) -> StarEntryResponse {
    if let Err(message) = authenticate(auth) {
        return StarEntryResponse::Unauthorized(message);
    }
    match label_service::star_entry(id) {
        Ok(_) => StarEntryResponse::Success(()),
        Err(StarEntryError::EntryNotFound) => StarEntryResponse::EntryNotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(StarEntryError::DbError) => StarEntryResponse::EntryDbError(BasicMessage::new(
            "Failed to star entry. Check the server logs for details",
        )),
    }
}

#[delete("/<id>/star")]
pub fn unstar_entry(id: u32, auth: Option<HeaderAuth>) -> StarEntryResponse {
    if let Err(message) = authenticate(auth) {
        return StarEntryResponse::Unauthorized(message);
    }
    match label_service::unstar_entry(id) {
        Ok(_) => StarEntryResponse::Success(()),
        Err(StarEntryError::EntryNotFound) => StarEntryResponse::EntryNotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(StarEntryError::DbError) => StarEntryResponse::EntryDbError(BasicMessage::new(
            "Failed to unstar entry. Check the server logs for details",
        )),
    }
}

#[post("/<id>/share", data = "<request>")]
pub fn share_entry(
    id: u32,
    request: Json<ShareEntryRequest>,
    auth: Option<HeaderAuth>,
) -> ShareEntryResponse {
    if let Err(message) = authenticate(auth) {
        return ShareEntryResponse::Unauthorized(message);
    }
    match share_service::share_entry(id, request.user_id) {
        Ok(_) => ShareEntryResponse::Success(()),
        Err(ShareEntryError::EntryNotFound) => ShareEntryResponse::NotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(ShareEntryError::UserNotFound) => ShareEntryResponse::NotFound(BasicMessage::new(
            "No user with the passed userId was found",
        )),
        Err(ShareEntryError::AlreadyShared) => ShareEntryResponse::AlreadyShared(
            BasicMessage::new("That user already has access to this entry"),
        ),
        Err(ShareEntryError::DbError) => ShareEntryResponse::ShareDbError(BasicMessage::new(
            "Failed to share entry. Check the server logs for details",
        )),
    }
}

#[delete("/<id>/share/<user_id>")]
pub fn unshare_entry(id: u32, user_id: u32, auth: Option<HeaderAuth>) -> UnshareEntryResponse {
    if let Err(message) = authenticate(auth) {
        return UnshareEntryResponse::Unauthorized(message);
    }
    match share_service::unshare_entry(id, user_id) {
        Ok(_) => UnshareEntryResponse::Success(()),
        Err(UnshareEntryError::EntryNotFound) => UnshareEntryResponse::EntryNotFound(
            BasicMessage::new("The entry with the passed id could not be found"),
        ),
        Err(UnshareEntryError::CannotRemoveOwner) => UnshareEntryResponse::CannotRemoveOwner(
            BasicMessage::new("The owner of an entry cannot be removed from it"),
        ),
        Err(UnshareEntryError::DbError) => UnshareEntryResponse::ShareDbError(BasicMessage::new(
            "Failed to unshare entry. Check the server logs for details",
        )),
    }
}

#[post("/<id>/link")]
pub fn create_link(id: u32, auth: Option<HeaderAuth>) -> CreateLinkResponse {
    if let Err(message) = authenticate(auth) {
        return CreateLinkResponse::Unauthorized(message);
    }
    match share_service::create_shareable_link(id) {
        Ok(link) => CreateLinkResponse::Success(Json(link)),
        Err(CreateLinkError::EntryNotFound) => CreateLinkResponse::EntryNotFound(
            BasicMessage::new("The entry with the passed id could not be found"),
        ),
        Err(CreateLinkError::AlreadyExists) => CreateLinkResponse::AlreadyExists(
            BasicMessage::new("That entry already has a shareable link"),
        ),
        Err(CreateLinkError::DbError) => CreateLinkResponse::LinkDbError(BasicMessage::new(
            "Failed to create link. Check the server logs for details",
        )),
    }
}

// explicit rank so this doesn't collide with /shared-by/<user_id> and
// /shared-with/<user_id>; the u32 params mean no request matches both
#[get("/<id>/link", rank = 2)]
pub fn get_link(id: u32, auth: Option<HeaderAuth>) -> GetLinkResponse {
    if let Err(message) = authenticate(auth) {
        return GetLinkResponse::Unauthorized(message);
    }
    match share_service::get_link(id) {
        Ok(link) => GetLinkResponse::Success(Json(link)),
        Err(GetLinkError::EntryNotFound) => GetLinkResponse::NotFound(BasicMessage::new(
            "The entry with the passed id could not be found",
        )),
        Err(GetLinkError::NoLink) => GetLinkResponse::NotFound(BasicMessage::new(
            "That entry has no shareable link",
        )),
        Err(GetLinkError::DbError) => GetLinkResponse::LinkDbError(BasicMessage::new(
            "Failed to pull link info. Check the server logs for details",
        )),
    }
}

#[delete("/<id>/link")]
pub fn delete_link(id: u32, auth: Option<HeaderAuth>) -> DeleteLinkResponse {
    if let Err(message) = authenticate(auth) {
        return DeleteLinkResponse::Unauthorized(message);
    }
    match share_service::delete_link(id) {
        Ok(_) => DeleteLinkResponse::Success(()),
        Err(DeleteLinkError::EntryNotFound) => DeleteLinkResponse::EntryNotFound(
            BasicMessage::new("The entry with the passed id could not be found"),
        ),
        Err(DeleteLinkError::DbError) => DeleteLinkResponse::LinkDbError(BasicMessage::new(
            "Failed to delete link. Check the server logs for details",
        )),
    }
}
