//! Database credentials handed to the probe and the initialization script.
//!
//! The password only ever leaves this type through [`Credentials::password`],
//! which callers place into a child-process environment. `Debug` is
//! hand-written so the secret cannot reach a log line by accident.

use std::fmt;

/// Environment variable the PostgreSQL client tools read the password from.
pub const PASSWORD_ENV_VAR: &str = "PGPASSWORD";

/// Replacement text for the password when it shows up in captured output.
const REDACTED: &str = "********";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Build credentials, returning `None` if either half is empty.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Option<Self> {
        let user = user.into();
        let password = password.into();
        if user.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self { user, password })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Environment entries that carry the secret into a child process.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        vec![(PASSWORD_ENV_VAR.to_string(), self.password.clone())]
    }

    /// Replace every occurrence of the password in `text`.
    ///
    /// Matching is literal, so a password that also appears as ordinary text
    /// (for example a user named the same) is masked there too.
    pub fn redact(&self, text: &str) -> String {
        if text.contains(&self.password) {
            text.replace(&self.password, REDACTED)
        } else {
            text.to_string()
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &REDACTED)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_parts_are_rejected() {
        assert!(Credentials::new("", "secret").is_none());
        assert!(Credentials::new("postgres", "").is_none());
        assert!(Credentials::new("postgres", "secret").is_some());
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("postgres", "hunter2").expect("valid");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("postgres"));
        assert!(!dbg.contains("hunter2"));
    }

    #[test]
    fn redact_replaces_every_occurrence() {
        let creds = Credentials::new("postgres", "hunter2").expect("valid");
        assert_eq!(
            creds.redact("pw=hunter2 again hunter2"),
            "pw=******** again ********"
        );
        assert_eq!(creds.redact("nothing here"), "nothing here");
    }

    #[test]
    fn redact_masks_user_name_equal_to_password() {
        let creds = Credentials::new("postgres", "postgres").expect("valid");
        assert_eq!(
            creds.redact("CREATE ROLE postgres LOGIN"),
            "CREATE ROLE ******** LOGIN"
        );
    }

    #[test]
    fn password_travels_as_pgpassword() {
        let creds = Credentials::new("postgres", "hunter2").expect("valid");
        assert_eq!(
            creds.env_vars(),
            vec![("PGPASSWORD".to_string(), "hunter2".to_string())]
        );
    }
}
