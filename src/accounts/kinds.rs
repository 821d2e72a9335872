//! The two account kinds served by the generic repository and handlers.

use crate::accounts::{
    dto::{CreateTutor, CreateUser, TutorResponse, UpdateTutor, UpdateUser, UserResponse},
    repo_types::{AccountKind, Tutor, User},
    services::hash_password,
};
use crate::validation::Patch;

/// Marker for the `users` table.
pub enum Users {}

/// Marker for the `tutors` table.
pub enum Tutors {}

fn hashed(password: Patch<String>) -> anyhow::Result<Option<String>> {
    password
        .into_option()
        .map(|plain| hash_password(&plain))
        .transpose()
}

impl AccountKind for Users {
    const TABLE: &'static str = "users";
    const RESOURCE: &'static str = "user";
    const LABEL: &'static str = "User";
    const COLUMNS: &'static [&'static str] = &["email", "password_hash", "full_name"];

    type Record = User;
    type Create = CreateUser;
    type Update = UpdateUser;
    type Response = UserResponse;

    fn new_row(input: CreateUser) -> anyhow::Result<Vec<String>> {
        let password_hash = hash_password(&input.password)?;
        Ok(vec![input.email, password_hash, input.full_name])
    }

    fn changes(patch: UpdateUser) -> anyhow::Result<Vec<Option<String>>> {
        Ok(vec![
            patch.email.into_option(),
            hashed(patch.password)?,
            patch.full_name.into_option(),
        ])
    }

    fn id(u: &User) -> i64 {
        u.id
    }

    fn password_hash(u: &User) -> &str {
        &u.password_hash
    }
}

impl AccountKind for Tutors {
    const TABLE: &'static str = "tutors";
    const RESOURCE: &'static str = "tutor";
    const LABEL: &'static str = "Tutor";
    const COLUMNS: &'static [&'static str] = &["email", "password_hash", "full_name", "subject"];

    type Record = Tutor;
    type Create = CreateTutor;
    type Update = UpdateTutor;
    type Response = TutorResponse;

    fn new_row(input: CreateTutor) -> anyhow::Result<Vec<String>> {
        let password_hash = hash_password(&input.password)?;
        Ok(vec![input.email, password_hash, input.full_name, input.subject])
    }

    fn changes(patch: UpdateTutor) -> anyhow::Result<Vec<Option<String>>> {
        Ok(vec![
            patch.email.into_option(),
            hashed(patch.password)?,
            patch.full_name.into_option(),
            patch.subject.into_option(),
        ])
    }

    fn id(t: &Tutor) -> i64 {
        t.id
    }

    fn password_hash(t: &Tutor) -> &str {
        &t.password_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::services::verify_password;

    #[test]
    fn select_lists_follow_columns() {
        assert_eq!(
            Tutors::select_list(),
            "id, email, password_hash, full_name, subject, created_at"
        );
        assert_eq!(Users::select_list(), "id, email, password_hash, full_name, created_at");
    }

    #[test]
    fn changes_keep_absent_fields() {
        let changes = Tutors::changes(UpdateTutor {
            subject: Patch::Set("Chemistry".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.len(), Tutors::COLUMNS.len());
        assert_eq!(changes, [None, None, None, Some("Chemistry".to_string())]);
    }

    #[test]
    fn changes_write_empty_strings_and_hash_password() {
        let changes = Tutors::changes(UpdateTutor {
            full_name: Patch::Set(String::new()),
            password: Patch::Set("new".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes[2].as_deref(), Some(""));
        let hash = changes[1].as_deref().expect("password column set");
        assert!(verify_password("new", hash).unwrap());
        assert!(!verify_password("old", hash).unwrap());
    }

    #[test]
    fn new_row_hashes_password() {
        let row = Users::new_row(CreateUser {
            email: "a@x.com".into(),
            full_name: "A".into(),
            password: "p".into(),
        })
        .unwrap();
        assert_eq!(row.len(), Users::COLUMNS.len());
        assert_eq!(row[0], "a@x.com");
        assert_eq!(row[2], "A");
        assert!(verify_password("p", &row[1]).unwrap());
    }
}
