use rusqlite::Connection;

use crate::db_migrations::migrate_db;

pub mod entry_repository;
pub mod metadata_repository;
pub mod share_repository;
pub mod tag_repository;
pub mod user_repository;

/// opens a connection to the database whose location is set in the server config
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    let config = &crate::config::DRIVE_SERVER_CONFIG;
    Connection::open(config.database.location.as_str())
        .expect("Failed to open database connection")
}

/// opens a connection to a database file unique to the current test thread,
/// so that tests can run in parallel without stepping on each other
#[cfg(test)]
pub fn open_connection() -> Connection {
    Connection::open(format!("{}.sqlite", crate::test::current_thread_name()))
        .expect("Failed to open test database connection")
}

/// runs all the sql in the init script against the database
fn create_db(con: &Connection) -> Result<(), rusqlite::Error> {
    let init_script = include_str!("../assets/init.sql");
    con.execute_batch(init_script)
}

/// creates the database if it doesn't exist, and brings an existing one up to
/// the current schema version
pub fn initialize_db() -> Result<(), String> {
    let con = open_connection();
    let version = match metadata_repository::get_database_version(&con) {
        Ok(version) => version,
        // no metadata table means a brand new database
        Err(_) => {
            if let Err(e) = create_db(&con) {
                con.close().unwrap();
                return Err(format!("Failed to initialize database: {e:?}"));
            }
            1
        }
    };
    let migration_result = migrate_db(&con, version);
    con.close().unwrap();
    migration_result
}
