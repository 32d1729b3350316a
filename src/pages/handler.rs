use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;

use crate::config::DRIVE_SERVER_CONFIG;
use crate::guard::{HeaderAuth, ValidateResult};
use crate::model::response::page_responses::AdminLoadResponse;
use crate::model::response::BasicMessage;
use crate::pages::registry::PageRegistry;
use crate::pages::service;
use crate::sanitize::SanitizedQuery;

/// serves an admin page by name, taken from the sanitized `path` query param.
/// Anyone who isn't a logged-in admin gets bounced back to the main app
/// instead of seeing an error
#[get("/load")]
pub fn load_admin_page(
    auth: Option<HeaderAuth>,
    query: SanitizedQuery,
    registry: &State<PageRegistry>,
) -> AdminLoadResponse {
    let redirect = || Redirect::to(DRIVE_SERVER_CONFIG.app.base_url.clone());
    let user = match auth.map(HeaderAuth::validate) {
        Some(ValidateResult::Valid(user)) => user,
        _ => return AdminLoadResponse::LoginRedirect(redirect()),
    };
    if !user.is_admin {
        return AdminLoadResponse::LoginRedirect(redirect());
    }
    match service::load_admin_page(registry, query.get("path")) {
        Ok(html) => AdminLoadResponse::Success(RawHtml(html)),
        Err(e) => {
            log::error!("Failed to load admin page! Nested exception is {e:?}");
            AdminLoadResponse::PageError(BasicMessage::new(
                "Failed to load the requested page. Check the server logs for details",
            ))
        }
    }
}
