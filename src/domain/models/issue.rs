use std::fmt;

use chrono::{DateTime, Utc};

/// A repository as returned by the upstream search, identified by its
/// `owner/name` slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub full_name: String,
}

/// A single issue as returned by the upstream search. Read-only; never
/// persisted locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub title: String,
    pub url: String,
    /// Creation time as reported upstream. The search API has been observed
    /// to omit this field, so callers must tolerate its absence.
    pub created_at: Option<DateTime<Utc>>,
    /// Login of the user who opened the issue.
    pub author: String,
}

/// Outcome of an organization-membership lookup.
///
/// A lookup that errors (private membership, network failure) is a distinct
/// outcome from a clean "not a member" answer, but both collapse to
/// [`AuthorOrigin::External`] for notification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Member,
    NotMember,
    CheckError,
}

/// Whether an issue was raised from inside or outside the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorOrigin {
    Internal,
    External,
}

impl From<Membership> for AuthorOrigin {
    fn from(membership: Membership) -> Self {
        match membership {
            Membership::Member => Self::Internal,
            Membership::NotMember | Membership::CheckError => Self::External,
        }
    }
}

impl fmt::Display for AuthorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("internal"),
            Self::External => f.write_str("external"),
        }
    }
}

/// Maximum creation time across a batch of issues, or `None` when the batch
/// is empty. Issues without a creation time are skipped; they never overwrite
/// a previously found maximum.
pub fn latest_creation_time(issues: &[Issue]) -> Option<DateTime<Utc>> {
    let mut latest = None;
    for issue in issues {
        let Some(created_at) = issue.created_at else {
            continue;
        };
        match latest {
            None => latest = Some(created_at),
            Some(current) if created_at > current => latest = Some(created_at),
            Some(_) => {}
        }
    }
    latest
}
