#[macro_use]
extern crate rocket;

use crate::handler::{api_handler, entry_handler};
use crate::pages::registry::PageRegistry;
use crate::repository::initialize_db;

mod config;
mod db_migrations;
mod guard;
mod handler;
mod model;
mod pages;
mod query;
mod repository;
mod sanitize;
mod service;
#[cfg(test)]
mod test;

fn init_logger() {
    // a second apply can only happen in tests, where the first one won
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply();
}

#[launch]
fn rocket() -> _ {
    init_logger();
    initialize_db().unwrap();
    // the allowlist of admin pages is built exactly once, here
    let registry = PageRegistry::scan(pages::pages_root().as_str());
    rocket::build()
        .manage(registry)
        .mount(
            "/api",
            routes![
                api_handler::api_version,
                api_handler::set_password,
                api_handler::create_user
            ],
        )
        .mount("/admin", routes![pages::handler::load_admin_page])
        .mount(
            "/entries",
            routes![
                entry_handler::create_entry,
                entry_handler::get_entry,
                entry_handler::update_entry,
                entry_handler::delete_entry,
                entry_handler::root_entries,
                entry_handler::starred_entries,
                entry_handler::entries_shared_by,
                entry_handler::entries_shared_with,
                entry_handler::star_entry,
                entry_handler::unstar_entry,
                entry_handler::share_entry,
                entry_handler::unshare_entry,
                entry_handler::create_link,
                entry_handler::get_link,
                entry_handler::delete_link
            ],
        )
}


#[cfg(test)]
mod admin_tests {
    use rocket::http::{Header, Status};
    use rocket::local::blocking::Client;

    use crate::test::*;

    fn client_with_pages() -> Client {
        create_page_disk("dashboard", "<h1>dash</h1>");
        create_page_disk("reports", "<h1>reports</h1>");
        Client::tracked(crate::rocket()).expect("valid rocket instance")
    }

    fn teardown() {
        remove_pages();
        cleanup();
    }

    #[test]
    fn load_redirects_without_credentials() {
        refresh_db();
        test_user();
        let client = client_with_pages();
        let res = client.get("/admin/load").dispatch();
        assert_eq!(Status::SeeOther, res.status());
        teardown();
    }

    #[test]
    fn load_redirects_non_admins() {
        refresh_db();
        let hash = crate::guard::HeaderAuth {
            username: "other".to_string(),
            password: "pass".to_string(),
        }
        .to_hash_string();
        create_user_db_entry("other", hash.as_str(), false);
        let client = client_with_pages();
        let res = client
            .get("/admin/load")
            // other:pass
            .header(Header::new("Authorization", "Basic b3RoZXI6cGFzcw=="))
            .dispatch();
        assert_eq!(Status::SeeOther, res.status());
        teardown();
    }

    #[test]
    fn load_serves_the_default_page() {
        refresh_db();
        test_user();
        let client = client_with_pages();
        let res = client
            .get("/admin/load")
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        let body = res.into_string().unwrap();
        assert!(body.contains("id=\"json-data\""));
        assert!(body.contains("&quot;dashboard&quot;"));
        assert!(body.ends_with("<h1>dash</h1>"));
        teardown();
    }

    #[test]
    fn load_serves_a_named_page() {
        refresh_db();
        test_user();
        let client = client_with_pages();
        let res = client
            .get("/admin/load?path=reports/weekly")
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        let body = res.into_string().unwrap();
        assert!(body.ends_with("<h1>reports</h1>"));
        teardown();
    }

    #[test]
    fn unknown_page_falls_back_to_the_default() {
        refresh_db();
        test_user();
        let client = client_with_pages();
        let res = client
            .get("/admin/load?path=..%2Fsecrets")
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        assert!(res.into_string().unwrap().ends_with("<h1>dash</h1>"));
        teardown();
    }

    #[test]
    fn markup_in_the_path_param_is_sanitized_away() {
        refresh_db();
        test_user();
        let client = client_with_pages();
        // "<script>x</script>reports" sanitizes down to "xreports", which isn't a page
        let res = client
            .get("/admin/load?path=%3Cscript%3Ex%3C%2Fscript%3Ereports")
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::Ok, res.status());
        assert!(res.into_string().unwrap().ends_with("<h1>dash</h1>"));
        teardown();
    }
}

#[cfg(test)]
mod entry_tests {
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::blocking::Client;

    use crate::model::response::EntryApi;
    use crate::test::*;

    fn client() -> Client {
        Client::tracked(crate::rocket()).expect("valid rocket instance")
    }

    #[test]
    fn requests_without_credentials_are_rejected() {
        refresh_db();
        test_user();
        let client = client();
        let res = client.get("/entries/root").dispatch();
        assert_eq!(Status::Unauthorized, res.status());
        cleanup();
    }

    #[test]
    fn create_then_get_round_trip() {
        refresh_db();
        test_user();
        let client = client();
        let created = client
            .post("/entries")
            .header(ContentType::JSON)
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"name": "docs", "entryType": "folder"}"#)
            .dispatch();
        assert_eq!(Status::Created, created.status());
        let created: EntryApi = created.into_json().unwrap();
        assert_eq!("folder", created.entry_type);
        let fetched = client
            .get(format!("/entries/{}", created.id))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::Ok, fetched.status());
        let fetched: EntryApi = fetched.into_json().unwrap();
        assert_eq!(created, fetched);
        cleanup();
    }

    #[test]
    fn starred_entries_show_the_label() {
        refresh_db();
        let user = test_user();
        let id = create_entry_db_entry("a.txt", None, user.id);
        let client = client();
        let starred = client
            .post(format!("/entries/{id}/star"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::NoContent, starred.status());
        let listing = client
            .get("/entries/starred")
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        let entries: Vec<EntryApi> = listing.into_json().unwrap();
        assert_eq!(1, entries.len());
        assert_eq!(id, entries[0].id);
        assert_eq!("starred", entries[0].tags[0].name);
        cleanup();
    }

    #[test]
    fn share_and_link_round_trip() {
        refresh_db();
        let user = test_user();
        let other_id = create_user_db_entry("other", "hash2", false);
        let id = create_entry_db_entry("a.txt", None, user.id);
        let client = client();
        let shared = client
            .post(format!("/entries/{id}/share"))
            .header(ContentType::JSON)
            .header(Header::new("Authorization", AUTH))
            .body(format!(r#"{{"userId": {other_id}}}"#))
            .dispatch();
        assert_eq!(Status::NoContent, shared.status());
        let link = client
            .post(format!("/entries/{id}/link"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::Created, link.status());
        let entry: EntryApi = client
            .get(format!("/entries/{id}"))
            .header(Header::new("Authorization", AUTH))
            .dispatch()
            .into_json()
            .unwrap();
        assert_eq!(vec![user.id, other_id], entry.users);
        assert!(entry.link.is_some());
        cleanup();
    }

    #[test]
    fn deleting_a_missing_entry_is_404() {
        refresh_db();
        test_user();
        let client = client();
        let res = client
            .delete("/entries/42")
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        assert_eq!(Status::NotFound, res.status());
        cleanup();
    }
}
