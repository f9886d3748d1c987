//! # Gatehouse
//!
//! `gatehouse` is a small HTTP service that puts a sign-in gate in front of a
//! dashboard. Visitors register or sign in with an email address and a
//! password; a signed session cookie then lets them reach the dashboard.
//!
//! ## Request flow
//!
//! Every request except `/health` passes through one authorization step that
//! classifies the path, checks the session, and consults an ordered rule table:
//!
//! - Signed-in visitors on `/login` or `/register` are sent to `/`.
//! - Anonymous visitors on `/` or under `/dashboard` are sent to `/login`.
//! - Other paths are allowed for signed-in visitors and denied otherwise.
//!
//! ## Storage
//!
//! Accounts live in `PostgreSQL` (see `sql/schema.sql`). Passwords are stored
//! as Argon2id PHC strings. Sessions are not stored at all: the cookie carries
//! an HMAC-SHA256 signed token holding the account id, email, and expiry.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};
    use std::{fs, path::PathBuf};

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(GIT_COMMIT_HASH.len() >= 7);
    }

    // Normalize SQL so the check survives formatting changes.
    fn canonicalize_sql(sql: &str) -> String {
        sql.lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .flat_map(str::chars)
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| ch.to_ascii_lowercase())
            .collect()
    }

    #[test]
    fn schema_sql_matches_store_queries() -> Result<()> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sql/schema.sql");
        let sql = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read SQL file at {}", path.display()))?;
        let canonical = canonicalize_sql(&sql);

        assert!(canonical.contains("createtableifnotexistsusers("));
        assert!(canonical.contains("iduuidprimarykey"));
        assert!(canonical.contains("emailtextnotnullunique"));
        assert!(canonical.contains("password_hashtextnotnull"));
        Ok(())
    }
}
