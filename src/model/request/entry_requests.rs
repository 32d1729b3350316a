use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateEntryRequest {
    pub name: String,
    /// "file" or "folder"; anything else is treated as "file"
    #[serde(rename = "entryType", default)]
    pub entry_type: Option<String>,
    /// `None` creates the entry at the root of the tree
    #[serde(rename = "parentId")]
    pub parent_id: Option<u32>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateEntryRequest {
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<u32>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ShareEntryRequest {
    #[serde(rename = "userId")]
    pub user_id: u32,
}
