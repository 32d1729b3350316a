use std::backtrace::Backtrace;

use crate::guard::HeaderAuth;
use crate::model::error::user_errors::CreateUserError;
use crate::model::repository::User;
use crate::model::request::{NewAuth, NewUserRequest};
use crate::model::response::UserApi;
use crate::repository::{self, user_repository};

/// result of checking a set of credentials against the users table
pub enum CheckAuthResult {
    Valid(User),
    /// no accounts exist at all yet
    Missing,
    Invalid,
}

/// creates the very first account on the server, which is always an admin.
/// Refused once any account exists; further accounts go through [`create_user`]
pub fn create_first_admin(auth: NewAuth) -> Result<(), CreateUserError> {
    let con = repository::open_connection();
    let result = match user_repository::count_users(&con) {
        Ok(0) => {
            let hash = HeaderAuth {
                username: auth.username.clone(),
                password: auth.password,
            }
            .to_hash_string();
            match user_repository::create_user(auth.username.as_str(), hash.as_str(), true, &con) {
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!(
                        "Failed to save user to the database! Nested exception is {e:?}\n{}",
                        Backtrace::force_capture()
                    );
                    Err(CreateUserError::DbError)
                }
            }
        }
        Ok(_) => Err(CreateUserError::AlreadyExists),
        Err(e) => {
            log::error!(
                "Failed to count users in the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateUserError::DbError)
        }
    };
    con.close().unwrap();
    result
}

/// creates a regular account. Only reachable by admins via the handler layer
pub fn create_user(request: NewUserRequest) -> Result<UserApi, CreateUserError> {
    let con = repository::open_connection();
    let result = match user_repository::get_user_by_username(request.username.as_str(), &con) {
        Ok(Some(_)) => Err(CreateUserError::AlreadyExists),
        Ok(None) => {
            let hash = HeaderAuth {
                username: request.username.clone(),
                password: request.password,
            }
            .to_hash_string();
            match user_repository::create_user(
                request.username.as_str(),
                hash.as_str(),
                request.is_admin,
                &con,
            ) {
                Ok(id) => Ok(UserApi {
                    id,
                    username: request.username,
                    is_admin: request.is_admin,
                }),
                Err(e) => {
                    log::error!(
                        "Failed to save user to the database! Nested exception is {e:?}\n{}",
                        Backtrace::force_capture()
                    );
                    Err(CreateUserError::DbError)
                }
            }
        }
        Err(e) => {
            log::error!(
                "Failed to look up user by name! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateUserError::DbError)
        }
    };
    con.close().unwrap();
    result
}

/// checks the passed credentials against the users table
pub fn check_auth(auth: &HeaderAuth) -> CheckAuthResult {
    let con = repository::open_connection();
    let result = match user_repository::count_users(&con) {
        Ok(0) => CheckAuthResult::Missing,
        Ok(_) => match user_repository::get_user_by_username(auth.username.as_str(), &con) {
            Ok(Some(user)) if user.password_hash == auth.to_hash_string() => {
                CheckAuthResult::Valid(user)
            }
            Ok(_) => CheckAuthResult::Invalid,
            Err(e) => {
                log::error!(
                    "Failed to look up user by name! Nested exception is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                CheckAuthResult::Invalid
            }
        },
        Err(e) => {
            log::error!(
                "Failed to count users in the database! Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            CheckAuthResult::Invalid
        }
    };
    con.close().unwrap();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn create_first_admin_only_works_once() {
        refresh_db();
        let result = create_first_admin(NewAuth {
            username: "admin".to_string(),
            password: "secret".to_string(),
        });
        assert_eq!(Ok(()), result);
        let second = create_first_admin(NewAuth {
            username: "other".to_string(),
            password: "secret".to_string(),
        });
        assert_eq!(Err(CreateUserError::AlreadyExists), second);
        cleanup();
    }

    #[test]
    fn first_account_is_admin() {
        refresh_db();
        create_first_admin(NewAuth {
            username: "admin".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
        let auth = HeaderAuth {
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        match check_auth(&auth) {
            CheckAuthResult::Valid(user) => assert!(user.is_admin),
            _ => panic!("expected valid credentials"),
        };
        cleanup();
    }

    #[test]
    fn create_user_rejects_duplicate_names() {
        refresh_db();
        create_user_db_entry("bob", "hash", false);
        let result = create_user(NewUserRequest {
            username: "bob".to_string(),
            password: "whatever".to_string(),
            is_admin: false,
        });
        assert_eq!(Err(CreateUserError::AlreadyExists), result);
        cleanup();
    }

    #[test]
    fn check_auth_with_no_users() {
        refresh_db();
        let auth = HeaderAuth {
            username: "nobody".to_string(),
            password: "nothing".to_string(),
        };
        assert!(matches!(check_auth(&auth), CheckAuthResult::Missing));
        cleanup();
    }

    #[test]
    fn check_auth_with_bad_password() {
        refresh_db();
        create_first_admin(NewAuth {
            username: "admin".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
        let auth = HeaderAuth {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        };
        assert!(matches!(check_auth(&auth), CheckAuthResult::Invalid));
        cleanup();
    }
}
