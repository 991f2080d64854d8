//! HTTP collaborators: the instructor directory plus the config and profile
//! endpoints the context is bootstrapped from.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{ApplicationConfig, CurrentUser, Instructor},
    error::{ApiError, ApiException},
    protocol::InstructorSearchRequest,
};
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid api base url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("api base url '{base_url}' cannot carry a path"));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Returns `None` when the instructor could not be added.
    pub async fn add_instructor(&self, instructor: &Instructor) -> Option<Instructor> {
        let result: Result<Instructor> = async {
            let res = self
                .http
                .post(self.endpoint(&["api", "instructor"]))
                .json(instructor)
                .send()
                .await?;
            Ok::<_, anyhow::Error>(ensure_success(res).await?.json().await?)
        }
        .await;

        result
            .map_err(|err| warn!(uid = %instructor.uid, error = %err, "add instructor failed"))
            .ok()
    }

    pub async fn delete_instructor(&self, uid: &str) -> Result<Response> {
        let res = self
            .http
            .delete(self.endpoint(&["api", "instructor", uid]))
            .send()
            .await
            .with_context(|| format!("failed to delete instructor {uid}"))?;
        ensure_success(res).await
    }

    pub async fn get_instructors(&self) -> Result<Vec<Instructor>> {
        let res = self
            .http
            .get(self.endpoint(&["api", "instructors"]))
            .send()
            .await
            .context("failed to list instructors")?;
        Ok(ensure_success(res).await?.json().await?)
    }

    /// Returns `None` when the search could not be run.
    pub async fn search_instructors(
        &self,
        snippet: &str,
        exclude_uids: &[String],
    ) -> Option<Vec<Instructor>> {
        let body = InstructorSearchRequest {
            snippet: snippet.to_string(),
            exclude_uids: exclude_uids.to_vec(),
        };
        let result: Result<Vec<Instructor>> = async {
            let res = self
                .http
                .post(self.endpoint(&["api", "instructor", "search"]))
                .json(&body)
                .send()
                .await?;
            Ok::<_, anyhow::Error>(ensure_success(res).await?.json().await?)
        }
        .await;

        result
            .map_err(|err| warn!(snippet, error = %err, "instructor search failed"))
            .ok()
    }

    pub async fn fetch_config(&self) -> Result<ApplicationConfig> {
        let res = self
            .http
            .get(self.endpoint(&["api", "config"]))
            .send()
            .await
            .context("failed to fetch config")?;
        Ok(ensure_success(res).await?.json().await?)
    }

    pub async fn fetch_my_profile(&self) -> Result<CurrentUser> {
        let res = self
            .http
            .get(self.endpoint(&["api", "user", "my_profile"]))
            .send()
            .await
            .context("failed to fetch profile")?;
        Ok(ensure_success(res).await?.json().await?)
    }
}

/// Turns a non-2xx response into an [`ApiException`], using the server's
/// `{"message": ...}` body when there is one.
async fn ensure_success(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|err| err.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    debug!(status = status.as_u16(), %message, "api request rejected");
    Err(ApiException::new(status.as_u16(), message).into())
}

/// Where the session's config and user come from at startup.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn load_config(&self) -> Result<ApplicationConfig>;
    async fn load_current_user(&self) -> Result<CurrentUser>;
}

#[async_trait]
impl ContextSource for ApiClient {
    async fn load_config(&self) -> Result<ApplicationConfig> {
        self.fetch_config().await
    }

    async fn load_current_user(&self) -> Result<CurrentUser> {
        self.fetch_my_profile().await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
