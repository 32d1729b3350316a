#[derive(Debug, PartialEq)]
pub enum LoadPageError {
    /// the resolved page's content.html could not be read from disk.
    /// This can only happen if the pages root changed underneath the registry
    /// after startup, or if the dashboard page itself is missing
    ContentUnreadable,
}
