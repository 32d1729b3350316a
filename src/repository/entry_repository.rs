use chrono::NaiveDateTime;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::model::repository::{EntryType, FileEntry};
use crate::query::{EntryQuery, Param};

/// format created_date is stored in. Sqlite has no date type, so it's text
pub static DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn map_entry(row: &Row) -> Result<FileEntry, rusqlite::Error> {
    let raw_type: String = row.get(2)?;
    let raw_date: String = row.get(5)?;
    let created_date = NaiveDateTime::parse_from_str(raw_date.as_str(), DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    Ok(FileEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        entry_type: EntryType::from_db(raw_type.as_str()),
        parent_id: row.get(3)?,
        owner_id: row.get(4)?,
        created_date,
    })
}

/// saves the passed entry and returns the id it was created with
pub fn create_entry(entry: &FileEntry, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/create_entry.sql"))?;
    pst.execute(params![
        entry.name,
        entry.entry_type.as_str(),
        entry.parent_id,
        entry.owner_id,
        entry.created_date.format(DATE_FORMAT).to_string(),
    ])?;
    Ok(con.last_insert_rowid() as u32)
}

pub fn get_entry_by_id(id: u32, con: &Connection) -> Result<FileEntry, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/get_entry_by_id.sql"))?;
    pst.query_row([id], map_entry)
}

/// updates the name and parent of the passed entry
pub fn update_entry(entry: &FileEntry, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/update_entry.sql"))?;
    pst.execute(params![entry.name, entry.parent_id, entry.id])?;
    Ok(())
}

/// removes the entry row itself. Tag and member rows are cleaned up separately
pub fn delete_entry(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/delete_entry.sql"))?;
    pst.execute([id])?;
    Ok(())
}

pub fn get_child_entries(id: u32, con: &Connection) -> Result<Vec<FileEntry>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/get_child_entries.sql"))?;
    let mapped = pst.query_map([id], map_entry)?;
    let mut entries: Vec<FileEntry> = Vec::new();
    for entry in mapped {
        entries.push(entry?);
    }
    Ok(entries)
}

pub fn delete_entry_tags(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/delete_entry_tags.sql"))?;
    pst.execute([id])?;
    Ok(())
}

pub fn delete_entry_users(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/entry/delete_entry_users.sql"))?;
    pst.execute([id])?;
    Ok(())
}

/// runs the passed query against the file_entries table.
/// This is the only place scope params get turned into driver values
pub fn find_entries(query: &EntryQuery, con: &Connection) -> Result<Vec<FileEntry>, rusqlite::Error> {
    let (clause, params) = query.to_sql();
    let sql = format!(
        "select id, name, entry_type, parent_id, owner_id, created_date from file_entries where {clause} order by id"
    );
    let values: Vec<Value> = params
        .into_iter()
        .map(|param| match param {
            Param::U32(n) => Value::Integer(n as i64),
            Param::Str(s) => Value::Text(s),
        })
        .collect();
    let mut pst = con.prepare(sql.as_str())?;
    let mapped = pst.query_map(params_from_iter(values), map_entry)?;
    let mut entries: Vec<FileEntry> = Vec::new();
    for entry in mapped {
        entries.push(entry?);
    }
    Ok(entries)
}
