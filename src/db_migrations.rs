use rusqlite::Connection;

/// checks the database version and applies every migration newer than it, in order
pub fn migrate_db(con: &Connection, table_version: u32) -> Result<(), String> {
    if table_version < 2 {
        migrate_to_v2(con)?;
    }
    Ok(())
}

/// adds the allow_download flag to shareable links
fn migrate_to_v2(con: &Connection) -> Result<(), String> {
    log_migration_version(2);
    let script = include_str!("./assets/migration/v2.sql");
    match con.execute_batch(script) {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("Failed to migrate database to version 2: {e:?}")),
    }
}

#[cfg(not(test))]
fn log_migration_version(version: u32) {
    log::info!("Migrating database to version {version}...");
}

// keeps migration spam out of test output
#[cfg(test)]
fn log_migration_version(_version: u32) {}
