use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use sha2::{Digest, Sha256};

use crate::model::repository::User;
use crate::service::user_service::{self, CheckAuthResult};

/// used to represent the result of calling `HeaderAuth::validate`
pub enum ValidateResult {
    /// credentials matched; carries the matching account
    Valid(User),
    /// nobody has been created yet, so nothing can authenticate
    NoUsersExist,
    Invalid,
}

#[derive(Debug)]
pub struct HeaderAuth {
    pub username: String,
    pub password: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.to_string().replace("Basic ", "");
        match BASE64.decode(stripped_header.as_str()) {
            Ok(value) => {
                let combined = String::from_utf8(value).unwrap_or_default();
                let split = combined.split(':').collect::<Vec<&str>>();
                // if there aren't exactly 2 parts, then something is wrong here
                if split.len() != 2 || split.contains(&"") {
                    return Err("Invalid basic auth format: missing username or password");
                }
                Ok(HeaderAuth {
                    username: String::from(split[0].trim()),
                    password: String::from(split[1].trim()),
                })
            }
            Err(_) => Err("Invalid basic auth format: not base64"),
        }
    }

    /// compares our value against the users table.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(self) -> ValidateResult {
        match user_service::check_auth(&self) {
            CheckAuthResult::Valid(user) => ValidateResult::Valid(user),
            CheckAuthResult::Missing => ValidateResult::NoUsersExist,
            CheckAuthResult::Invalid => ValidateResult::Invalid,
        }
    }

    /// sha256 over `username:password`, the shape stored in the users table
    pub fn to_hash_string(&self) -> String {
        let mut hasher = Sha256::new();
        let combined = format!("{}:{}", self.username.trim(), self.password.trim());
        hasher.write_all(combined.as_bytes()).unwrap();
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for HeaderAuth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        // just check if it's basic auth
        fn check_basic_auth(value: &str) -> bool {
            value.starts_with("Basic")
        }
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if check_basic_auth(value) => match HeaderAuth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::BadRequest, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_valid_input() {
        // test:test
        let input = "Basic dGVzdDp0ZXN0";
        let output = HeaderAuth::from(input).unwrap();
        assert_eq!("test", output.username);
        assert_eq!("test", output.password);
    }

    #[test]
    fn test_from_unencoded_input() {
        let input = "test:test";
        let output = HeaderAuth::from(input).unwrap_err();
        assert_eq!("Invalid basic auth format: not base64", output);
    }

    #[test]
    fn test_from_bad_input() {
        // :test
        assert_eq!(
            "Invalid basic auth format: missing username or password",
            HeaderAuth::from("OnRlc3Q=").unwrap_err()
        );
        // test:
        assert_eq!(
            "Invalid basic auth format: missing username or password",
            HeaderAuth::from("dGVzdDo=").unwrap_err()
        );
        // testtest
        assert_eq!(
            "Invalid basic auth format: missing username or password",
            HeaderAuth::from("dGVzdHRlc3Q=").unwrap_err()
        )
    }

    #[test]
    fn test_to_hash_string() {
        let auth = HeaderAuth {
            username: "test".to_string(),
            password: "test".to_string(),
        };
        assert_eq!(
            "13d249f2cb4127b40cfa757866850278793f814ded3c587fe5889e889a7a9f6c",
            auth.to_hash_string()
        );
    }
}
