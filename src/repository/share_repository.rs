use rusqlite::{params, Connection, Row};

use crate::model::repository::ShareableLink;

fn map_link(row: &Row) -> Result<ShareableLink, rusqlite::Error> {
    Ok(ShareableLink {
        id: row.get(0)?,
        entry_id: row.get(1)?,
        hash: row.get(2)?,
        allow_edit: row.get(3)?,
        allow_download: row.get(4)?,
    })
}

pub fn add_user_to_entry(
    entry_id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/share/add_user_to_entry.sql"))?;
    pst.execute(params![entry_id, user_id])?;
    Ok(())
}

pub fn remove_user_from_entry(
    entry_id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/remove_user_from_entry.sql"
    ))?;
    pst.execute(params![entry_id, user_id])?;
    Ok(())
}

/// returns the ids of every user with access to the entry, owner included
pub fn get_users_for_entry(entry_id: u32, con: &Connection) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/share/get_users_for_entry.sql"))?;
    let mapped = pst.query_map([entry_id], |row| row.get(0))?;
    let mut ids: Vec<u32> = Vec::new();
    for id in mapped {
        ids.push(id?);
    }
    Ok(ids)
}

pub fn create_link(link: &ShareableLink, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/share/create_link.sql"))?;
    pst.execute(params![
        link.entry_id,
        link.hash,
        link.allow_edit,
        link.allow_download
    ])?;
    Ok(con.last_insert_rowid() as u32)
}

pub fn get_link_for_entry(
    entry_id: u32,
    con: &Connection,
) -> Result<Option<ShareableLink>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/share/get_link_for_entry.sql"))?;
    match pst.query_row([entry_id], map_link) {
        Ok(link) => Ok(Some(link)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn delete_link_for_entry(entry_id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/share/delete_link_for_entry.sql"
    ))?;
    pst.execute([entry_id])?;
    Ok(())
}
