//! Wire types for the GitHub Search API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::Issue;

/// Envelope shared by `/search/repositories` and `/search/issues`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct RepoItem {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct IssueItem {
    pub title: String,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub user: Option<UserItem>,
}

#[derive(Debug, Deserialize)]
pub struct UserItem {
    pub login: String,
}

impl From<IssueItem> for Issue {
    fn from(item: IssueItem) -> Self {
        Self {
            title: item.title,
            url: item.html_url,
            created_at: item.created_at,
            author: item.user.map(|user| user.login).unwrap_or_default(),
        }
    }
}
