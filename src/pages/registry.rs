use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::model::error::page_errors::LoadPageError;
use crate::pages::DEFAULT_PAGE;

/// the set of admin pages that existed at startup.
///
/// A page is a directory under the pages root containing a content.html. The
/// registry is scanned once and then handed to rocket as managed state, so
/// request handling never touches the filesystem to decide what's servable
pub struct PageRegistry {
    pages: HashSet<String>,
    root: PathBuf,
}

impl PageRegistry {
    /// walks the pages root and records every directory holding a content.html
    pub fn scan(root: &str) -> PageRegistry {
        let root = PathBuf::from(root);
        let mut pages: HashSet<String> = HashSet::new();
        let entries = match fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to read the pages root at {root:?}: {e}. The admin panel will only serve the default page.");
                return PageRegistry { pages, root };
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && path.join("content.html").is_file() {
                if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                    pages.insert(name.to_string());
                }
            }
        }
        PageRegistry { pages, root }
    }

    /// maps a requested page name onto a known one, falling back to the default.
    /// Only names recorded at scan time ever come back out, so the result is
    /// safe to join onto the pages root
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(page) if self.pages.contains(page) => page,
            _ => DEFAULT_PAGE,
        }
    }

    /// reads a resolved page's content from disk
    pub fn read_content(&self, page: &str) -> Result<String, LoadPageError> {
        let path = self.root.join(page).join("content.html");
        fs::read_to_string(&path).map_err(|e| {
            log::error!("Failed to read page content at {path:?}: {e}");
            LoadPageError::ContentUnreadable
        })
    }
}
