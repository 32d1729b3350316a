use rusqlite::Connection;

/// reads the schema version out of the metadata table.
/// Errors if the table doesn't exist yet
pub fn get_database_version(con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/metadata/get_database_version.sql"))?;
    pst.query_row([], |row| {
        let raw: String = row.get(0)?;
        Ok(raw.parse::<u32>().unwrap_or(1))
    })
}
