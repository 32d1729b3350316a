//! composable filter predicates over the file_entries table.
//!
//! Each scope is a pure transformation of the query builder; nothing in here
//! touches a database driver. [`EntryQuery::to_sql`] renders a where clause and
//! positional parameters, and the repository layer converts [`Param`] values
//! into whatever the driver wants at the very edge.

use crate::model::repository::{LABEL_TAG_TYPE, STARRED_TAG_NAME};

/// a positional query parameter, kept driver-agnostic on purpose
#[derive(Debug, PartialEq, Clone)]
pub enum Param {
    U32(u32),
    Str(String),
}

#[derive(Debug, PartialEq, Clone)]
enum Predicate {
    RootOnly,
    SharedByUser(u32),
    OnlyStarred,
    SharedWithUserOnly(u32),
}

/// subquery selecting the ids of every entry carrying the starred label
fn starred_ids_sql() -> String {
    format!(
        "select et.entry_id from entry_tags et join tags t on t.id = et.tag_id \
         where t.tag_type = '{LABEL_TAG_TYPE}' and t.name = '{STARRED_TAG_NAME}'"
    )
}

impl Predicate {
    fn render(&self, params: &mut Vec<Param>) -> String {
        match self {
            // only entries that are not children of another entry
            Predicate::RootOnly => String::from("file_entries.parent_id is null"),
            // entries the user owns that have more than one member, i.e. shared with at least one other person
            Predicate::SharedByUser(user_id) => {
                params.push(Param::U32(*user_id));
                String::from(
                    "file_entries.owner_id = ? and \
                     (select count(*) from entry_users eu where eu.entry_id = file_entries.id) > 1",
                )
            }
            // starred entries from root, or starred entries whose parent is not itself starred.
            // Keeps a starred file from showing up twice when its folder is starred too
            Predicate::OnlyStarred => {
                let starred = starred_ids_sql();
                format!(
                    "file_entries.id in ({starred}) and \
                     (file_entries.parent_id is null or file_entries.parent_id not in ({starred}))"
                )
            }
            // entries the user does not own, whose parent (if any) is also not owned by the user
            Predicate::SharedWithUserOnly(user_id) => {
                params.push(Param::U32(*user_id));
                params.push(Param::U32(*user_id));
                String::from(
                    "file_entries.owner_id <> ? and \
                     (file_entries.parent_id is null or file_entries.parent_id not in \
                     (select p.id from file_entries p where p.owner_id = ?))",
                )
            }
        }
    }
}

/// builder collecting entry scopes. Scopes and-compose; an empty query matches every row
#[derive(Debug, Default, PartialEq, Clone)]
pub struct EntryQuery {
    predicates: Vec<Predicate>,
}

impl EntryQuery {
    pub fn new() -> EntryQuery {
        EntryQuery::default()
    }

    pub fn root_only(mut self) -> EntryQuery {
        self.predicates.push(Predicate::RootOnly);
        self
    }

    pub fn shared_by_user(mut self, user_id: u32) -> EntryQuery {
        self.predicates.push(Predicate::SharedByUser(user_id));
        self
    }

    pub fn only_starred(mut self) -> EntryQuery {
        self.predicates.push(Predicate::OnlyStarred);
        self
    }

    pub fn shared_with_user_only(mut self, user_id: u32) -> EntryQuery {
        self.predicates.push(Predicate::SharedWithUserOnly(user_id));
        self
    }

    /// renders the where clause (without the `where` keyword) and its positional params
    pub fn to_sql(&self) -> (String, Vec<Param>) {
        if self.predicates.is_empty() {
            return (String::from("1 = 1"), Vec::new());
        }
        let mut params: Vec<Param> = Vec::new();
        let clause = self
            .predicates
            .iter()
            .map(|predicate| format!("({})", predicate.render(&mut params)))
            .collect::<Vec<String>>()
            .join(" and ");
        (clause, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        let (clause, params) = EntryQuery::new().to_sql();
        assert_eq!("1 = 1", clause);
        assert!(params.is_empty());
    }

    #[test]
    fn root_only_renders_null_parent_check() {
        let (clause, params) = EntryQuery::new().root_only().to_sql();
        assert_eq!("(file_entries.parent_id is null)", clause);
        assert!(params.is_empty());
    }

    #[test]
    fn shared_by_user_binds_owner_and_counts_members() {
        let (clause, params) = EntryQuery::new().shared_by_user(5).to_sql();
        assert!(clause.contains("file_entries.owner_id = ?"));
        assert!(clause.contains("count(*)"));
        assert!(clause.contains("> 1"));
        assert_eq!(vec![Param::U32(5)], params);
    }

    #[test]
    fn only_starred_checks_parent_not_starred() {
        let (clause, params) = EntryQuery::new().only_starred().to_sql();
        assert!(clause.contains("t.name = 'starred'"));
        assert!(clause.contains("t.tag_type = 'label'"));
        assert!(clause.contains("file_entries.parent_id is null or file_entries.parent_id not in"));
        assert!(params.is_empty());
    }

    #[test]
    fn shared_with_user_only_binds_user_twice() {
        let (clause, params) = EntryQuery::new().shared_with_user_only(5).to_sql();
        assert!(clause.contains("file_entries.owner_id <> ?"));
        assert!(clause.contains("p.owner_id = ?"));
        assert_eq!(vec![Param::U32(5), Param::U32(5)], params);
    }

    #[test]
    fn scopes_and_compose() {
        let (clause, params) = EntryQuery::new().root_only().shared_by_user(2).to_sql();
        assert!(clause.starts_with("(file_entries.parent_id is null) and ("));
        assert_eq!(vec![Param::U32(2)], params);
    }
}
