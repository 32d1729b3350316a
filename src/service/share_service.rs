use std::backtrace::Backtrace;
use std::io::Write;

use chrono::Local;
use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::model::error::share_errors::{
    CreateLinkError, DeleteLinkError, GetLinkError, ShareEntryError, UnshareEntryError,
};
use crate::model::repository::{FileEntry, ShareableLink};
use crate::model::response::LinkApi;
use crate::repository::{self, entry_repository, share_repository, user_repository};

fn get_entry_for_share(con: &Connection, id: u32) -> Result<FileEntry, Option<rusqlite::Error>> {
    match entry_repository::get_entry_by_id(id, con) {
        Ok(entry) => Ok(entry),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(None),
        Err(e) => Err(Some(e)),
    }
}

/// gives the passed user access to the entry
pub fn share_entry(entry_id: u32, user_id: u32) -> Result<(), ShareEntryError> {
    let con = repository::open_connection();
    let result = share_entry_with_con(entry_id, user_id, &con);
    con.close().unwrap();
    result
}

fn share_entry_with_con(entry_id: u32, user_id: u32, con: &Connection) -> Result<(), ShareEntryError> {
    let db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to share entry! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        ShareEntryError::DbError
    };
    match get_entry_for_share(con, entry_id) {
        Ok(_) => { /* entry exists */ }
        Err(None) => return Err(ShareEntryError::EntryNotFound),
        Err(Some(e)) => return Err(db_error(e)),
    };
    match user_repository::get_user_by_id(user_id, con) {
        Ok(_) => { /* user exists */ }
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(ShareEntryError::UserNotFound),
        Err(e) => return Err(db_error(e)),
    };
    let members = share_repository::get_users_for_entry(entry_id, con).map_err(db_error)?;
    // the owner's own membership row counts here too
    if members.contains(&user_id) {
        return Err(ShareEntryError::AlreadyShared);
    }
    share_repository::add_user_to_entry(entry_id, user_id, con).map_err(db_error)
}

/// revokes the passed user's access. The owner can never be removed
pub fn unshare_entry(entry_id: u32, user_id: u32) -> Result<(), UnshareEntryError> {
    let con = repository::open_connection();
    let result = unshare_entry_with_con(entry_id, user_id, &con);
    con.close().unwrap();
    result
}

fn unshare_entry_with_con(
    entry_id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<(), UnshareEntryError> {
    let db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to unshare entry! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        UnshareEntryError::DbError
    };
    let entry = match get_entry_for_share(con, entry_id) {
        Ok(entry) => entry,
        Err(None) => return Err(UnshareEntryError::EntryNotFound),
        Err(Some(e)) => return Err(db_error(e)),
    };
    if entry.owner_id == user_id {
        return Err(UnshareEntryError::CannotRemoveOwner);
    }
    share_repository::remove_user_from_entry(entry_id, user_id, con).map_err(db_error)
}

/// creates the shareable link for the entry. Each entry can only have one
pub fn create_shareable_link(entry_id: u32) -> Result<LinkApi, CreateLinkError> {
    let con = repository::open_connection();
    let result = create_shareable_link_with_con(entry_id, &con);
    con.close().unwrap();
    result
}

fn create_shareable_link_with_con(
    entry_id: u32,
    con: &Connection,
) -> Result<LinkApi, CreateLinkError> {
    let db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to create shareable link! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        CreateLinkError::DbError
    };
    match get_entry_for_share(con, entry_id) {
        Ok(_) => { /* entry exists */ }
        Err(None) => return Err(CreateLinkError::EntryNotFound),
        Err(Some(e)) => return Err(db_error(e)),
    };
    match share_repository::get_link_for_entry(entry_id, con) {
        Ok(Some(_)) => return Err(CreateLinkError::AlreadyExists),
        Ok(None) => { /* free to create one */ }
        Err(e) => return Err(db_error(e)),
    };
    let link = ShareableLink {
        id: 0,
        entry_id,
        hash: link_hash(entry_id),
        allow_edit: false,
        allow_download: true,
    };
    share_repository::create_link(&link, con)
        .map(|id| LinkApi {
            id,
            entry_id,
            hash: link.hash,
            allow_edit: link.allow_edit,
            allow_download: link.allow_download,
        })
        .map_err(db_error)
}

pub fn get_link(entry_id: u32) -> Result<LinkApi, GetLinkError> {
    let con = repository::open_connection();
    let db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to pull shareable link! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        GetLinkError::DbError
    };
    let result = match get_entry_for_share(&con, entry_id) {
        Ok(_) => match share_repository::get_link_for_entry(entry_id, &con) {
            Ok(Some(link)) => Ok(link.into()),
            Ok(None) => Err(GetLinkError::NoLink),
            Err(e) => Err(db_error(e)),
        },
        Err(None) => Err(GetLinkError::EntryNotFound),
        Err(Some(e)) => Err(db_error(e)),
    };
    con.close().unwrap();
    result
}

/// removes the entry's link if it has one
pub fn delete_link(entry_id: u32) -> Result<(), DeleteLinkError> {
    let con = repository::open_connection();
    let db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to delete shareable link! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        DeleteLinkError::DbError
    };
    let result = match get_entry_for_share(&con, entry_id) {
        Ok(_) => share_repository::delete_link_for_entry(entry_id, &con).map_err(db_error),
        Err(None) => Err(DeleteLinkError::EntryNotFound),
        Err(Some(e)) => Err(db_error(e)),
    };
    con.close().unwrap();
    result
}

/// hashing the id with the creation instant keeps links unguessable enough
/// without tracking any extra state
fn link_hash(entry_id: u32) -> String {
    let mut hasher = Sha256::new();
    let seed = format!("{entry_id}:{}", Local::now());
    hasher.write_all(seed.as_bytes()).unwrap();
    format!("{:x}", hasher.finalize())
}


#[cfg(test)]
mod link_tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn creates_and_fetches_a_link() {
        refresh_db();
        let owner = test_user();
        let entry_id = create_entry_db_entry("a.txt", None, owner.id);
        let created = create_shareable_link(entry_id).unwrap();
        assert_eq!(entry_id, created.entry_id);
        assert!(!created.allow_edit);
        assert!(created.allow_download);
        assert_eq!(created, get_link(entry_id).unwrap());
        cleanup();
    }

    #[test]
    fn only_one_link_per_entry() {
        refresh_db();
        let owner = test_user();
        let entry_id = create_entry_db_entry("a.txt", None, owner.id);
        create_shareable_link(entry_id).unwrap();
        assert_eq!(
            Err(CreateLinkError::AlreadyExists),
            create_shareable_link(entry_id)
        );
        cleanup();
    }

    #[test]
    fn missing_link_is_reported() {
        refresh_db();
        let owner = test_user();
        let entry_id = create_entry_db_entry("a.txt", None, owner.id);
        assert_eq!(Err(GetLinkError::NoLink), get_link(entry_id));
        cleanup();
    }

    #[test]
    fn delete_link_then_get_is_no_link() {
        refresh_db();
        let owner = test_user();
        let entry_id = create_entry_db_entry("a.txt", None, owner.id);
        create_shareable_link(entry_id).unwrap();
        delete_link(entry_id).unwrap();
        assert_eq!(Err(GetLinkError::NoLink), get_link(entry_id));
        cleanup();
    }

    #[test]
    fn link_operations_require_the_entry() {
        refresh_db();
        assert_eq!(Err(CreateLinkError::EntryNotFound), create_shareable_link(42));
        assert_eq!(Err(GetLinkError::EntryNotFound), get_link(42));
        assert_eq!(Err(DeleteLinkError::EntryNotFound), delete_link(42));
        cleanup();
    }
}
