//! Commit records as served by the upstream REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SHORT_SHA_LEN;

/// One entry of the upstream commit list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash.
    pub sha: String,
    /// Nested commit detail (the upstream wraps message and author one
    /// level down).
    pub commit: CommitDetail,
}

/// The nested `commit` object of a commit list entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Full commit message, subject and body.
    pub message: String,
    /// Author block; the upstream omits it for some commits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
}

/// Author identity recorded on a commit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Display name.
    pub name: String,
    /// Author timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Commit {
    /// Returns the abbreviated commit identifier.
    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(SHORT_SHA_LEN);
        &self.sha[..end]
    }

    /// Returns the first line of the commit message.
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }

    /// Returns the author display name, or a placeholder when the upstream
    /// omitted the author block.
    pub fn author_name(&self) -> &str {
        self.commit
            .author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commit(sha: &str, message: &str, author: Option<&str>) -> Commit {
        Commit {
            sha: sha.into(),
            commit: CommitDetail {
                message: message.into(),
                author: author.map(|name| CommitAuthor {
                    name: name.into(),
                    date: None,
                }),
            },
        }
    }

    #[test]
    fn test_short_sha() {
        let commit = make_commit("0123456789abcdef", "msg", Some("alice"));
        assert_eq!(commit.short_sha(), "0123456");
    }

    #[test]
    fn test_short_sha_short_input() {
        let commit = make_commit("abc", "msg", Some("alice"));
        assert_eq!(commit.short_sha(), "abc");
    }

    #[test]
    fn test_summary_first_line_only() {
        let commit = make_commit("abc", "Fix the thing\n\nLonger body here.", Some("alice"));
        assert_eq!(commit.summary(), "Fix the thing");
    }

    #[test]
    fn test_summary_empty_message() {
        let commit = make_commit("abc", "", Some("alice"));
        assert_eq!(commit.summary(), "");
    }

    #[test]
    fn test_author_name_fallback() {
        let commit = make_commit("abc", "msg", None);
        assert_eq!(commit.author_name(), "unknown");
    }

    #[test]
    fn test_commit_from_upstream_json() {
        let json = r#"{
            "sha": "f00dfacef00dfacef00dfacef00dfacef00dface",
            "commit": {
                "message": "Add installer\n\nDetails.",
                "author": {
                    "name": "Sam",
                    "email": "sam@example.test",
                    "date": "2024-05-30T09:30:00Z"
                }
            },
            "html_url": "https://example.test/commit/f00dface"
        }"#;

        let commit: Commit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.short_sha(), "f00dfac");
        assert_eq!(commit.summary(), "Add installer");
        assert_eq!(commit.author_name(), "Sam");
        assert!(commit.commit.author.as_ref().unwrap().date.is_some());
    }
}
