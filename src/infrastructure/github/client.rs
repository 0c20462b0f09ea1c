use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::models::{Issue, Membership, Repository};
use crate::domain::ports::{IssueSource, SourceError};

use super::pacer::RequestPacer;
use super::types::{IssueItem, RepoItem, SearchResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// Configuration for the GitHub client
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    /// API token used as a bearer credential
    pub token: String,
    /// Base URL of the REST API (overridden in tests)
    pub api_base: String,
    /// Append `is:public` to the repository search query
    pub public_only: bool,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Delay before every search request, in milliseconds
    pub search_delay_ms: u64,
}

/// GitHub Search API client implementing [`IssueSource`]
///
/// An injected handle, constructed once at startup and passed to the sweep;
/// there is no process-wide session. Every search request goes through the
/// [`RequestPacer`] first.
pub struct GithubClient {
    http: ReqwestClient,
    token: String,
    api_base: String,
    public_only: bool,
    pacer: RequestPacer,
}

impl GithubClient {
    pub fn new(config: GithubClientConfig) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            token: config.token,
            api_base: config.api_base,
            public_only: config.public_only,
            pacer: RequestPacer::new(Duration::from_millis(config.search_delay_ms)),
        })
    }

    /// Run a search query, iterating every page the upstream returns.
    async fn search<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<T>, SourceError> {
        let url = format!("{}/{}", self.api_base, endpoint);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            self.pacer.wait().await;
            debug!(endpoint, query, page, "issuing search request");

            let per_page = PER_PAGE.to_string();
            let page_number = page.to_string();
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("q", query),
                    ("per_page", per_page.as_str()),
                    ("page", page_number.as_str()),
                ])
                .bearer_auth(&self.token)
                .header(header::USER_AGENT, USER_AGENT)
                .header(header::ACCEPT, "application/vnd.github+json")
                .send()
                .await
                .map_err(|source| SourceError::UpstreamQuery {
                    query: query.to_string(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::UpstreamStatus {
                    query: query.to_string(),
                    status,
                });
            }

            let body: SearchResponse<T> =
                response
                    .json()
                    .await
                    .map_err(|source| SourceError::Decode {
                        query: query.to_string(),
                        source,
                    })?;

            let page_len = body.items.len();
            items.extend(body.items);

            if page_len < PER_PAGE || items.len() as i64 >= body.total_count {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl IssueSource for GithubClient {
    async fn list_public_repositories(&self, org: &str) -> Result<Vec<Repository>, SourceError> {
        let mut query = format!("org:{org}");
        if self.public_only {
            query.push_str(" is:public");
        }

        let items: Vec<RepoItem> = self.search("search/repositories", &query).await?;
        Ok(items
            .into_iter()
            .map(|item| Repository {
                full_name: item.full_name,
            })
            .collect())
    }

    async fn list_new_issues(
        &self,
        repo_full_name: &str,
        since: Option<&str>,
    ) -> Result<Vec<Issue>, SourceError> {
        let mut query = format!("repo:{repo_full_name}");
        match since {
            Some(lower_bound) if !lower_bound.is_empty() => {
                query.push_str(&format!(" created:>{lower_bound}"));
            }
            _ => {}
        }

        let items: Vec<IssueItem> = self.search("search/issues", &query).await?;
        Ok(items.into_iter().map(Issue::from).collect())
    }

    async fn check_membership(&self, login: &str, org: &str) -> Membership {
        if login.is_empty() {
            return Membership::CheckError;
        }

        let url = format!("{}/orgs/{}/members/{}", self.api_base, org, login);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == StatusCode::NO_CONTENT => Membership::Member,
            Ok(resp) if resp.status() == StatusCode::NOT_FOUND => Membership::NotMember,
            Ok(resp) => {
                warn!(login, org, status = %resp.status(), "membership check returned unexpected status");
                Membership::CheckError
            }
            Err(err) => {
                warn!(login, org, error = %err, "membership check failed");
                Membership::CheckError
            }
        }
    }
}
