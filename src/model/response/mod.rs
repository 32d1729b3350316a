use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository;

pub mod entry_responses;
pub mod page_responses;
pub mod share_responses;
pub mod user_responses;

/// represents a basic json message
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

/// a tag on an entry. The starred state shows up here as a tag with
/// `tagType` of "label" and name "starred"
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagApi {
    pub id: Option<u32>,
    pub name: String,
    #[serde(rename = "tagType")]
    pub tag_type: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct LinkApi {
    pub id: u32,
    #[serde(rename = "entryId")]
    pub entry_id: u32,
    pub hash: String,
    #[serde(rename = "allowEdit")]
    pub allow_edit: bool,
    #[serde(rename = "allowDownload")]
    pub allow_download: bool,
}

/// the api shape of a [`repository::FileEntry`], along with its tags, the ids of
/// every user it's shared with (the owner included), and its shareable link if any
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct EntryApi {
    pub id: u32,
    pub name: String,
    #[serde(rename = "entryType")]
    pub entry_type: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<u32>,
    #[serde(rename = "ownerId")]
    pub owner_id: u32,
    pub tags: Vec<TagApi>,
    /// ids of every member on the entry_users pivot, owner included
    pub users: Vec<u32>,
    pub link: Option<LinkApi>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct UserApi {
    pub id: u32,
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

// ----------------------------------

impl From<repository::Tag> for TagApi {
    fn from(value: repository::Tag) -> Self {
        TagApi {
            id: Some(value.id),
            name: value.name,
            tag_type: value.tag_type,
        }
    }
}

impl From<repository::ShareableLink> for LinkApi {
    fn from(value: repository::ShareableLink) -> Self {
        LinkApi {
            id: value.id,
            entry_id: value.entry_id,
            hash: value.hash,
            allow_edit: value.allow_edit,
            allow_download: value.allow_download,
        }
    }
}

impl From<repository::User> for UserApi {
    fn from(value: repository::User) -> Self {
        UserApi {
            id: value.id,
            username: value.username,
            is_admin: value.is_admin,
        }
    }
}
