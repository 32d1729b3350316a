use rocket::serde::json::serde_json;
use rocket::serde::Serialize;

use crate::model::error::page_errors::LoadPageError;
use crate::pages::registry::PageRegistry;

/// the payload handed to the admin frontend through the hidden json-data input
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct PageData<'a> {
    page: &'a str,
}

/// pulls the page name out of a request path like `reports/weekly/2024`.
/// Only the first non-empty segment matters; the rest is the page's own routing
pub fn page_from_path(path: &str) -> Option<&str> {
    path.split('/').find(|segment| !segment.is_empty())
}

/// resolves the requested page against the registry and renders it
pub fn load_admin_page(
    registry: &PageRegistry,
    requested_path: Option<&str>,
) -> Result<String, LoadPageError> {
    let requested_page = requested_path.and_then(page_from_path);
    let page = registry.resolve(requested_page);
    let content = registry.read_content(page)?;
    Ok(render_page(page, content.as_str()))
}

/// prepends the hidden json-data input the frontend scripts read on load.
/// The json is escaped so page data can never break out of the value attribute
fn render_page(page: &str, content: &str) -> String {
    let data = PageData { page };
    // serializing a two-field struct can't fail
    let json = serde_json::to_string(&data).unwrap();
    format!(
        "<input type=\"hidden\" id=\"json-data\" value='{}'>\n{}",
        html_escape(json.as_str()),
        content
    )
}

/// escapes the characters that matter inside html attributes and text
fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
