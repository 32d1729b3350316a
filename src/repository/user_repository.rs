use rusqlite::{params, Connection, Row};

use crate::model::repository::User;

fn map_user(row: &Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        is_admin: row.get(3)?,
    })
}

/// creates the user and returns the id it was created with
pub fn create_user(
    username: &str,
    password_hash: &str,
    is_admin: bool,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/create_user.sql"))?;
    pst.execute(params![username, password_hash, is_admin])?;
    Ok(con.last_insert_rowid() as u32)
}

pub fn get_user_by_id(id: u32, con: &Connection) -> Result<User, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/get_user_by_id.sql"))?;
    pst.query_row([id], map_user)
}

pub fn get_user_by_username(
    username: &str,
    con: &Connection,
) -> Result<Option<User>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/get_user_by_username.sql"))?;
    match pst.query_row([username], map_user) {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn count_users(con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/user/count_users.sql"))?;
    pst.query_row([], |row| row.get(0))
}
