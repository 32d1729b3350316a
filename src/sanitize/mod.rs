//! request parameter sanitization.
//!
//! The admin surface historically accepted free-form query parameters, so before
//! anything looks at them every value gets inline event handlers (`onClick=...`)
//! removed and then all html tags stripped. This is best-effort input hygiene,
//! not an output-encoding layer - templates still escape what they render.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

/// matches inline event handler assignments like `onClick=alert(1)`.
/// The value ends at the first `<` or `>` so surrounding tags survive for the strip pass
static EVENT_HANDLER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("on[^<>=]+=[^<>]*").unwrap());

/// a request parameter value: a scalar, or one level of array nesting
#[derive(Debug, PartialEq, Clone)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

pub type ParamMap = HashMap<String, ParamValue>;

/// removes event-handler assignments first, then strips tags from what remains.
/// The ordering matters: the handler pattern refuses to cross `<`/`>`, so it has
/// to run while the tags are still present
pub fn sanitize_value(value: &str) -> String {
    let without_handlers = EVENT_HANDLER_PATTERN.replace_all(value, "");
    strip_tags(&without_handlers)
}

/// returns a sanitized copy of the passed params. The input map is never mutated
pub fn sanitize_params(params: &ParamMap) -> ParamMap {
    params
        .iter()
        .map(|(key, value)| {
            let clean = match value {
                ParamValue::Single(v) => ParamValue::Single(sanitize_value(v)),
                ParamValue::Many(vs) => {
                    ParamValue::Many(vs.iter().map(|v| sanitize_value(v)).collect())
                }
            };
            (key.clone(), clean)
        })
        .collect()
}

/// drops every `<`...`>` run. An unterminated `<` swallows the rest of the string
fn strip_tags(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => { /* inside a tag - dropped */ }
            _ => result.push(c),
        }
    }
    result
}

/// request guard collecting a request's query pairs into a sanitized [`ParamMap`].
/// Repeated keys (and `key[]` style names) collapse into a [`ParamValue::Many`]
pub struct SanitizedQuery(pub ParamMap);

impl SanitizedQuery {
    /// convenience accessor for a scalar param
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ParamValue::Single(v)) => Some(v.as_str()),
            Some(ParamValue::Many(vs)) => vs.first().map(|v| v.as_str()),
            None => None,
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SanitizedQuery {
    type Error = std::convert::Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let mut raw: ParamMap = HashMap::new();
        for field in request.query_fields() {
            let name = field.name.source().as_str();
            let is_array = name.ends_with("[]");
            let key = name.trim_end_matches("[]").to_string();
            let value = field.value.to_string();
            match raw.remove(&key) {
                None if is_array => {
                    raw.insert(key, ParamValue::Many(vec![value]));
                }
                None => {
                    raw.insert(key, ParamValue::Single(value));
                }
                Some(ParamValue::Single(first)) => {
                    raw.insert(key, ParamValue::Many(vec![first, value]));
                }
                Some(ParamValue::Many(mut values)) => {
                    values.push(value);
                    raw.insert(key, ParamValue::Many(values));
                }
            }
        }
        Outcome::Success(SanitizedQuery(sanitize_params(&raw)))
    }
}
