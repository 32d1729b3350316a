use std::backtrace::Backtrace;

use chrono::Local;
use rusqlite::Connection;

use crate::model::error::entry_errors::{
    CreateEntryError, DeleteEntryError, GetEntryError, ListEntriesError, UpdateEntryError,
};
use crate::model::repository::{EntryType, FileEntry, User};
use crate::model::request::entry_requests::{CreateEntryRequest, UpdateEntryRequest};
use crate::model::response::{EntryApi, TagApi};
use crate::query::EntryQuery;
use crate::repository::{self, entry_repository, share_repository, tag_repository};

/// attaches tags, members, and the shareable link to a db entry
fn to_api(entry: FileEntry, con: &Connection) -> Result<EntryApi, rusqlite::Error> {
    // entries always come out of the db with an id
    let id = entry.id.unwrap();
    let tags = tag_repository::get_tags_for_entry(id, con)?
        .into_iter()
        .map(TagApi::from)
        .collect();
    let users = share_repository::get_users_for_entry(id, con)?;
    let link = share_repository::get_link_for_entry(id, con)?.map(Into::into);
    Ok(EntryApi {
        id,
        name: entry.name,
        entry_type: entry.entry_type.as_str().to_string(),
        parent_id: entry.parent_id,
        owner_id: entry.owner_id,
        tags,
        users,
        link,
    })
}

fn to_api_list(entries: Vec<FileEntry>, con: &Connection) -> Result<Vec<EntryApi>, rusqlite::Error> {
    let mut converted: Vec<EntryApi> = Vec::new();
    for entry in entries {
        converted.push(to_api(entry, con)?);
    }
    Ok(converted)
}

/// creates a new file or folder under the passed user, at root if no parent was requested.
/// The owner always gets a row on the member pivot
pub fn create_entry(request: CreateEntryRequest, user: &User) -> Result<EntryApi, CreateEntryError> {
    let con = repository::open_connection();
    let result = create_entry_with_con(request, user, &con);
    con.close().unwrap();
    result
}

fn create_entry_with_con(
    request: CreateEntryRequest,
    user: &User,
    con: &Connection,
) -> Result<EntryApi, CreateEntryError> {
    if let Some(parent_id) = request.parent_id {
        match entry_repository::get_entry_by_id(parent_id, con) {
            Ok(parent) if parent.entry_type != EntryType::Folder => {
                return Err(CreateEntryError::ParentNotFolder)
            }
            Ok(_) => { /* parent is a folder, good to go */ }
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(CreateEntryError::ParentNotFound)
            }
            Err(e) => {
                log::error!(
                    "Failed to look up parent entry! Nested exception is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(CreateEntryError::DbError);
            }
        };
    }
    let entry_type = match request.entry_type.as_deref() {
        Some(raw) => EntryType::from_db(raw),
        None => EntryType::File,
    };
    let entry = FileEntry {
        id: None,
        name: request.name,
        entry_type,
        parent_id: request.parent_id,
        owner_id: user.id,
        created_date: Local::now().naive_local(),
    };
    let created = entry_repository::create_entry(&entry, con)
        .and_then(|id| share_repository::add_user_to_entry(id, user.id, con).map(|_| id))
        .and_then(|id| entry_repository::get_entry_by_id(id, con))
        .and_then(|saved| to_api(saved, con));
    match created {
        Ok(api) => Ok(api),
        Err(e) => {
            log::error!(
                "Failed to save entry to the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateEntryError::DbError)
        }
    }
}

pub fn get_entry(id: u32) -> Result<EntryApi, GetEntryError> {
    let con = repository::open_connection();
    let result = match entry_repository::get_entry_by_id(id, &con) {
        Ok(entry) => to_api(entry, &con).map_err(|e| {
            log::error!(
                "Failed to load entry details! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            GetEntryError::DbError
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(GetEntryError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to pull entry from the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetEntryError::DbError)
        }
    };
    con.close().unwrap();
    result
}

/// renames or moves the entry. Moving a folder into its own subtree is refused,
/// since that would orphan the whole branch
pub fn update_entry(id: u32, request: UpdateEntryRequest) -> Result<EntryApi, UpdateEntryError> {
    let con = repository::open_connection();
    let result = update_entry_with_con(id, request, &con);
    con.close().unwrap();
    result
}

fn update_entry_with_con(
    id: u32,
    request: UpdateEntryRequest,
    con: &Connection,
) -> Result<EntryApi, UpdateEntryError> {
    let db_error = |e: rusqlite::Error| {
        log::error!(
            "Failed to update entry! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        UpdateEntryError::DbError
    };
    let mut entry = match entry_repository::get_entry_by_id(id, con) {
        Ok(entry) => entry,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(UpdateEntryError::NotFound),
        Err(e) => return Err(db_error(e)),
    };
    if let Some(parent_id) = request.parent_id {
        let parent = match entry_repository::get_entry_by_id(parent_id, con) {
            Ok(parent) => parent,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(UpdateEntryError::ParentNotFound)
            }
            Err(e) => return Err(db_error(e)),
        };
        if parent.entry_type != EntryType::Folder {
            return Err(UpdateEntryError::ParentNotFolder);
        }
        // walk up from the requested parent; hitting ourselves means a cycle
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current.id == Some(id) {
                return Err(UpdateEntryError::ParentIsOwnChild);
            }
            ancestor = match current.parent_id {
                Some(ancestor_id) => match entry_repository::get_entry_by_id(ancestor_id, con) {
                    Ok(found) => Some(found),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(db_error(e)),
                },
                None => None,
            };
        }
    }
    entry.name = request.name;
    entry.parent_id = request.parent_id;
    entry_repository::update_entry(&entry, con)
        .and_then(|_| entry_repository::get_entry_by_id(id, con))
        .and_then(|updated| to_api(updated, con))
        .map_err(db_error)
}

/// deletes the entry along with all of its descendants, their tag and member
/// rows, and any shareable links
pub fn delete_entry(id: u32) -> Result<(), DeleteEntryError> {
    let con = repository::open_connection();
    let result = match entry_repository::get_entry_by_id(id, &con) {
        Ok(_) => delete_subtree(id, &con).map_err(|e| {
            log::error!(
                "Failed to delete entry! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            DeleteEntryError::DbError
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(DeleteEntryError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to pull entry from the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DeleteEntryError::DbError)
        }
    };
    con.close().unwrap();
    result
}

fn delete_subtree(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    for child in entry_repository::get_child_entries(id, con)? {
        delete_subtree(child.id.unwrap(), con)?;
    }
    entry_repository::delete_entry_tags(id, con)?;
    entry_repository::delete_entry_users(id, con)?;
    share_repository::delete_link_for_entry(id, con)?;
    entry_repository::delete_entry(id, con)
}

fn list_entries(query: EntryQuery) -> Result<Vec<EntryApi>, ListEntriesError> {
    let con = repository::open_connection();
    let result = entry_repository::find_entries(&query, &con)
        .and_then(|entries| to_api_list(entries, &con))
        .map_err(|e| {
            log::error!(
                "Failed to query entries! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            ListEntriesError::DbError
        });
    con.close().unwrap();
    result
}

/// every entry at the top of the tree
pub fn root_entries() -> Result<Vec<EntryApi>, ListEntriesError> {
    list_entries(EntryQuery::new().root_only())
}

/// every starred entry whose parent isn't itself starred
pub fn starred_entries() -> Result<Vec<EntryApi>, ListEntriesError> {
    list_entries(EntryQuery::new().only_starred())
}

/// entries the user owns and has shared with somebody else
pub fn entries_shared_by(user_id: u32) -> Result<Vec<EntryApi>, ListEntriesError> {
    list_entries(EntryQuery::new().shared_by_user(user_id))
}

/// entries shared with the user where they don't also have access through a parent
pub fn entries_shared_with_only(user_id: u32) -> Result<Vec<EntryApi>, ListEntriesError> {
    list_entries(EntryQuery::new().shared_with_user_only(user_id))
}

#[cfg(test)]
mod create_entry_tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn creates_at_root_without_parent() {
        refresh_db();
        let user = test_user();
        let created = create_entry(
            CreateEntryRequest {
                name: "notes.txt".to_string(),
                entry_type: None,
                parent_id: None,
            },
            &user,
        )
        .unwrap();
        assert_eq!("notes.txt", created.name);
        assert_eq!("file", created.entry_type);
        assert_eq!(None, created.parent_id);
        assert_eq!(user.id, created.owner_id);
        // the owner is always a member of their own entry
        assert_eq!(vec![user.id], created.users);
        cleanup();
    }

    #[test]
    fn parent_must_exist() {
        refresh_db();
        let user = test_user();
        let result = create_entry(
            CreateEntryRequest {
                name: "notes.txt".to_string(),
                entry_type: None,
                parent_id: Some(999),
            },
            &user,
        );
        assert_eq!(Err(CreateEntryError::ParentNotFound), result);
        cleanup();
    }

    #[test]
    fn parent_must_be_folder() {
        refresh_db();
        let user = test_user();
        let file_id = create_entry_db_entry("a.txt", None, user.id);
        let result = create_entry(
            CreateEntryRequest {
                name: "b.txt".to_string(),
                entry_type: None,
                parent_id: Some(file_id),
            },
            &user,
        );
        assert_eq!(Err(CreateEntryError::ParentNotFolder), result);
        cleanup();
    }
}


#[cfg(test)]
mod delete_entry_tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn removes_whole_subtree() {
        refresh_db();
        let user = test_user();
        let folder_id = create_folder_db_entry("docs", None, user.id);
        let file_id = create_entry_db_entry("a.txt", Some(folder_id), user.id);
        star_entry_db(file_id);
        delete_entry(folder_id).unwrap();
        assert_eq!(Err(GetEntryError::NotFound), get_entry(folder_id));
        assert_eq!(Err(GetEntryError::NotFound), get_entry(file_id));
        cleanup();
    }

    #[test]
    fn missing_entry_is_not_found() {
        refresh_db();
        assert_eq!(Err(DeleteEntryError::NotFound), delete_entry(42));
        cleanup();
    }
}
