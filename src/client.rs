//! Typed accessors over the vendor course API.

use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::DownloadError;
use crate::models::{Chapter, CourseMeta, LectureDetail};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Thin client for the three read-only course endpoints.
///
/// The course id is extracted from the course URL up front; an empty id marks
/// the reference as invalid and every network operation fails fast on it
/// instead of issuing a request with an empty identifier.
#[derive(Clone)]
pub struct CourseClient {
    http: Client,
    base_url: String,
    authorization: String,
    course_id: String,
    course_url: String,
}

impl CourseClient {
    pub fn new(
        base_url: &str,
        course_url: &str,
        authorization: &str,
        timeout: Duration,
    ) -> Result<Self, DownloadError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: authorization.to_string(),
            course_id: extract_course_id(course_url),
            course_url: course_url.to_string(),
        })
    }

    /// The id segment following `courses/` in the course URL, or an
    /// `InvalidReference` error when the URL carries none.
    pub fn course_id(&self) -> Result<&str, DownloadError> {
        if self.course_id.is_empty() {
            return Err(DownloadError::InvalidReference(self.course_url.clone()));
        }
        Ok(&self.course_id)
    }

    pub async fn fetch_course_title(&self) -> Result<String, DownloadError> {
        let course_id = self.course_id()?;
        let url = format!("{}/courses/{}?requestBackup=false", self.base_url, course_id);
        let meta: CourseMeta = self.get_json(&url).await?;
        Ok(meta.title)
    }

    pub async fn fetch_course_items(&self) -> Result<Vec<Chapter>, DownloadError> {
        let course_id = self.course_id()?;
        let url = format!("{}/courses/{}/modules/items", self.base_url, course_id);
        self.get_json(&url).await
    }

    pub async fn fetch_lecture_detail(&self, item_id: &str) -> Result<LectureDetail, DownloadError> {
        self.course_id()?;
        let url = format!("{}/lectures/{}?requestBackup=false", self.base_url, item_id);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DownloadError> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header("authorization", &self.authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DownloadError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Extract the path segment following `courses/`, ending at the next `/` or
/// the end of the string. Returns an empty string when no segment is found.
pub fn extract_course_id(course_url: &str) -> String {
    let pattern = Regex::new(r"courses/([^/]+)").unwrap();
    pattern
        .captures(course_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
