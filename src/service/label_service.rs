use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::model::error::entry_errors::StarEntryError;
use crate::model::repository::{Tag, LABEL_TAG_TYPE, STARRED_TAG_NAME};
use crate::repository::{self, entry_repository, tag_repository};

/// pulls the starred label tag, creating it the first time anything gets starred
fn get_or_create_starred_tag(con: &Connection) -> Result<Tag, rusqlite::Error> {
    if let Some(tag) = tag_repository::get_tag_by_name(STARRED_TAG_NAME, LABEL_TAG_TYPE, con)? {
        return Ok(tag);
    }
    let id = tag_repository::create_tag(STARRED_TAG_NAME, LABEL_TAG_TYPE, con)?;
    Ok(Tag {
        id,
        name: STARRED_TAG_NAME.to_string(),
        tag_type: LABEL_TAG_TYPE.to_string(),
    })
}

fn entry_has_tag(entry_id: u32, tag_id: u32, con: &Connection) -> Result<bool, rusqlite::Error> {
    let tags = tag_repository::get_tags_for_entry(entry_id, con)?;
    Ok(tags.iter().any(|tag| tag.id == tag_id))
}

/// marks the entry as starred. Starring an already-starred entry is a no-op
pub fn star_entry(id: u32) -> Result<(), StarEntryError> {
    let con = repository::open_connection();
    let result = star_entry_with_con(id, &con);
    con.close().unwrap();
    result
}

fn star_entry_with_con(id: u32, con: &Connection) -> Result<(), StarEntryError> {
    match entry_repository::get_entry_by_id(id, con) {
        Ok(_) => { /* entry exists */ }
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StarEntryError::EntryNotFound),
        Err(e) => {
            log::error!(
                "Failed to pull entry from the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(StarEntryError::DbError);
        }
    };
    let starred = get_or_create_starred_tag(con)
        .and_then(|tag| {
            entry_has_tag(id, tag.id, con).map(|already| (tag, already))
        })
        .and_then(|(tag, already)| {
            if already {
                Ok(())
            } else {
                tag_repository::add_tag_to_entry(id, tag.id, con)
            }
        });
    starred.map_err(|e| {
        log::error!(
            "Failed to star entry! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        StarEntryError::DbError
    })
}

/// removes the starred mark. Unstarring an entry that wasn't starred is a no-op
pub fn unstar_entry(id: u32) -> Result<(), StarEntryError> {
    let con = repository::open_connection();
    let result = unstar_entry_with_con(id, &con);
    con.close().unwrap();
    result
}

fn unstar_entry_with_con(id: u32, con: &Connection) -> Result<(), StarEntryError> {
    match entry_repository::get_entry_by_id(id, con) {
        Ok(_) => { /* entry exists */ }
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StarEntryError::EntryNotFound),
        Err(e) => {
            log::error!(
                "Failed to pull entry from the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(StarEntryError::DbError);
        }
    };
    let removed = match tag_repository::get_tag_by_name(STARRED_TAG_NAME, LABEL_TAG_TYPE, con) {
        Ok(Some(tag)) => tag_repository::remove_tag_from_entry(id, tag.id, con),
        // nothing has ever been starred, so there's nothing to remove
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    };
    removed.map_err(|e| {
        log::error!(
            "Failed to unstar entry! Nested exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        StarEntryError::DbError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::entry_service;
    use crate::test::*;

    #[test]
    fn star_shows_up_as_label_tag() {
        refresh_db();
        let user = test_user();
        let id = create_entry_db_entry("a.txt", None, user.id);
        star_entry(id).unwrap();
        let entry = entry_service::get_entry(id).unwrap();
        assert_eq!(1, entry.tags.len());
        assert_eq!("starred", entry.tags[0].name);
        assert_eq!("label", entry.tags[0].tag_type);
        cleanup();
    }

    #[test]
    fn star_is_idempotent() {
        refresh_db();
        let user = test_user();
        let id = create_entry_db_entry("a.txt", None, user.id);
        star_entry(id).unwrap();
        star_entry(id).unwrap();
        let entry = entry_service::get_entry(id).unwrap();
        assert_eq!(1, entry.tags.len());
        cleanup();
    }

    #[test]
    fn unstar_removes_the_label() {
        refresh_db();
        let user = test_user();
        let id = create_entry_db_entry("a.txt", None, user.id);
        star_entry(id).unwrap();
        unstar_entry(id).unwrap();
        let entry = entry_service::get_entry(id).unwrap();
        assert!(entry.tags.is_empty());
        cleanup();
    }

    #[test]
    fn unstar_without_star_is_fine() {
        refresh_db();
        let user = test_user();
        let id = create_entry_db_entry("a.txt", None, user.id);
        assert_eq!(Ok(()), unstar_entry(id));
        cleanup();
    }

    #[test]
    fn missing_entry_is_not_found() {
        refresh_db();
        assert_eq!(Err(StarEntryError::EntryNotFound), star_entry(42));
        assert_eq!(Err(StarEntryError::EntryNotFound), unstar_entry(42));
        cleanup();
    }
}
