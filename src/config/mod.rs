use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// where unauthenticated / non-admin visitors of the admin panel get sent
    #[serde(rename = "baseurl")]
    pub base_url: String,
}

#[derive(Deserialize, Clone)]
pub struct PagesConfig {
    /// directory holding one folder per admin page, each with a content.html
    pub root: String,
}

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct DriveServerConfig {
    pub app: AppConfig,
    pub pages: PagesConfig,
    pub database: DbConfig,
}

/// Parses the config file located at ./DriveServer.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> DriveServerConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./DriveServer.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static DRIVE_SERVER_CONFIG: Lazy<DriveServerConfig> = Lazy::new(parse_config);
static CONFIG_DEFAULT: Lazy<DriveServerConfig> = Lazy::new(|| DriveServerConfig {
    app: AppConfig {
        base_url: "/".to_string(),
    },
    pages: PagesConfig {
        root: "./admin-panel/pages".to_string(),
    },
    database: DbConfig {
        location: "./db.sqlite".to_string(),
    },
});
