use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;

use crate::model::response::BasicMessage;

/// the admin loader never 401s - anyone without an admin session is
/// silently sent back to the configured base url instead
#[derive(Responder)]
pub enum AdminLoadResponse {
    Success(RawHtml<String>),
    LoginRedirect(Redirect),
    #[response(status = 500, content_type = "json")]
    PageError(Json<BasicMessage>),
}
