use rusqlite::{params, Connection, Row};

use crate::model::repository::Tag;

fn map_tag(row: &Row) -> Result<Tag, rusqlite::Error> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        tag_type: row.get(2)?,
    })
}

/// creates the tag and returns its id
pub fn create_tag(name: &str, tag_type: &str, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tag/create_tag.sql"))?;
    pst.execute(params![name, tag_type])?;
    Ok(con.last_insert_rowid() as u32)
}

pub fn get_tag_by_name(
    name: &str,
    tag_type: &str,
    con: &Connection,
) -> Result<Option<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tag/get_tag_by_name.sql"))?;
    match pst.query_row(params![name, tag_type], map_tag) {
        Ok(tag) => Ok(Some(tag)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn add_tag_to_entry(entry_id: u32, tag_id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tag/add_tag_to_entry.sql"))?;
    pst.execute(params![entry_id, tag_id])?;
    Ok(())
}

pub fn remove_tag_from_entry(
    entry_id: u32,
    tag_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tag/remove_tag_from_entry.sql"))?;
    pst.execute(params![entry_id, tag_id])?;
    Ok(())
}

pub fn get_tags_for_entry(entry_id: u32, con: &Connection) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tag/get_tags_for_entry.sql"))?;
    let mapped = pst.query_map([entry_id], map_tag)?;
    let mut tags: Vec<Tag> = Vec::new();
    for tag in mapped {
        tags.push(tag?);
    }
    Ok(tags)
}
