//! helpers shared by tests. Every test thread gets its own database file and
//! pages directory keyed off the thread name, so tests can run in parallel

use chrono::Local;

use crate::guard::HeaderAuth;
use crate::model::repository::{EntryType, FileEntry, User, LABEL_TAG_TYPE, STARRED_TAG_NAME};
use crate::repository::{
    self, entry_repository, share_repository, tag_repository, user_repository,
};

/// basic auth header for `username:password`, the account [`test_user`] creates
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().replace("::", "_")
}

/// removes any db file left over from a previous run and builds a fresh schema
pub fn refresh_db() {
    cleanup();
    repository::initialize_db().unwrap();
}

pub fn cleanup() {
    let _ = std::fs::remove_file(format!("{}.sqlite", current_thread_name()));
}

/// creates an admin account matching [`AUTH`] and returns it
pub fn test_user() -> User {
    let hash = HeaderAuth {
        username: "username".to_string(),
        password: "password".to_string(),
    }
    .to_hash_string();
    let id = create_user_db_entry("username", hash.as_str(), true);
    User {
        id,
        username: "username".to_string(),
        password_hash: hash,
        is_admin: true,
    }
}

pub fn create_user_db_entry(username: &str, password_hash: &str, is_admin: bool) -> u32 {
    let con = repository::open_connection();
    let id = user_repository::create_user(username, password_hash, is_admin, &con).unwrap();
    con.close().unwrap();
    id
}

fn create_typed_entry(name: &str, entry_type: EntryType, parent_id: Option<u32>, owner_id: u32) -> u32 {
    let con = repository::open_connection();
    let entry = FileEntry {
        id: None,
        name: name.to_string(),
        entry_type,
        parent_id,
        owner_id,
        created_date: Local::now().naive_local(),
    };
    let id = entry_repository::create_entry(&entry, &con).unwrap();
    share_repository::add_user_to_entry(id, owner_id, &con).unwrap();
    con.close().unwrap();
    id
}

pub fn create_entry_db_entry(name: &str, parent_id: Option<u32>, owner_id: u32) -> u32 {
    create_typed_entry(name, EntryType::File, parent_id, owner_id)
}

pub fn create_folder_db_entry(name: &str, parent_id: Option<u32>, owner_id: u32) -> u32 {
    create_typed_entry(name, EntryType::Folder, parent_id, owner_id)
}

pub fn star_entry_db(entry_id: u32) {
    let con = repository::open_connection();
    let tag_id = match tag_repository::get_tag_by_name(STARRED_TAG_NAME, LABEL_TAG_TYPE, &con).unwrap() {
        Some(tag) => tag.id,
        None => tag_repository::create_tag(STARRED_TAG_NAME, LABEL_TAG_TYPE, &con).unwrap(),
    };
    tag_repository::add_tag_to_entry(entry_id, tag_id, &con).unwrap();
    con.close().unwrap();
}

pub fn share_entry_db(entry_id: u32, user_id: u32) {
    let con = repository::open_connection();
    share_repository::add_user_to_entry(entry_id, user_id, &con).unwrap();
    con.close().unwrap();
}

/// writes a page directory with a content.html under the test pages root
pub fn create_page_disk(name: &str, content: &str) {
    let dir = format!("{}/{name}", crate::pages::pages_root());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(format!("{dir}/content.html"), content).unwrap();
}

pub fn remove_pages() {
    let _ = std::fs::remove_dir_all(crate::pages::pages_root());
}
