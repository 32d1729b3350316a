use chrono::NaiveDateTime;

/// tag type marking a tag as a user-assigned label; the "starred" label lives under this type
pub static LABEL_TAG_TYPE: &str = "label";
/// name of the label tag that marks an entry as starred
pub static STARRED_TAG_NAME: &str = "starred";

/// whether a [`FileEntry`] is a file or a folder
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EntryType {
    File,
    Folder,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Folder => "folder",
        }
    }

    /// anything that isn't exactly "folder" is treated as a plain file
    pub fn from_db(value: &str) -> EntryType {
        if value == "folder" {
            EntryType::Folder
        } else {
            EntryType::File
        }
    }
}

/// represents a row in the file_entries table - a single node in the entry tree
#[derive(Debug, PartialEq, Clone)]
pub struct FileEntry {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    pub name: String,
    pub entry_type: EntryType,
    /// will be None for entries in the root of the tree
    pub parent_id: Option<u32>,
    /// the user that uploaded/created the entry
    pub owner_id: u32,
    pub created_date: NaiveDateTime,
}

/// represents a tag in the tags table. "label" type tags are user-assigned markers;
/// the starred state is the label tag named "starred"
#[derive(Debug, PartialEq, Clone)]
pub struct Tag {
    pub id: u32,
    pub name: String,
    pub tag_type: String,
}

/// a public/semi-public access token for a single entry. At most one exists per entry
#[derive(Debug, PartialEq, Clone)]
pub struct ShareableLink {
    pub id: u32,
    pub entry_id: u32,
    pub hash: String,
    pub allow_edit: bool,
    pub allow_download: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub struct User {
    pub id: u32,
    pub username: String,
    /// sha256 of `username:password`, never the raw password
    pub password_hash: String,
    pub is_admin: bool,
}
