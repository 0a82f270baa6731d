use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{USER_AGENT, config::Config, record::PublicationRecord};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for author {author_id} failed: {error}")]
    Request {
        error: reqwest::Error,
        author_id: String,
    },
    #[error("API answered {status} for author {author_id}")]
    Status {
        status: StatusCode,
        author_id: String,
    },
    #[error("Failed to decode papers of author {author_id}: {error}")]
    Decode {
        error: serde_json::Error,
        author_id: String,
    },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
    #[error("API base {0} cannot carry a path")]
    BaseUrl(Url),
}

/// Anything that can list the papers of an author.
pub trait PaperSource {
    fn fetch(
        &self,
        author_id: &str,
    ) -> impl Future<Output = Result<Vec<PublicationRecord>, FetchError>> + Send;
}

impl<T> PaperSource for &T
where
    T: PaperSource + ?Sized,
{
    fn fetch(
        &self,
        author_id: &str,
    ) -> impl Future<Output = Result<Vec<PublicationRecord>, FetchError>> + Send {
        (**self).fetch(author_id)
    }
}

/// Client for the Semantic Scholar Graph API.
#[derive(Debug, Clone)]
pub struct SemanticScholar {
    client: Client,
    api_base: Url,
    fields: String,
    limit: u32,
}

impl SemanticScholar {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        if config.api_base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(config.api_base.clone()));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            fields: config.fields.clone(),
            limit: config.limit,
        })
    }

    /// `{api_base}/author/{author_id}/papers?fields=..&limit=..`
    pub fn endpoint(&self, author_id: &str) -> Url {
        let mut url = self.api_base.clone();
        // cannot-be-a-base URLs are rejected in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["author", author_id, "papers"]);
        }
        url.query_pairs_mut()
            .append_pair("fields", &self.fields)
            .append_pair("limit", &self.limit.to_string());
        url
    }
}

impl PaperSource for SemanticScholar {
    async fn fetch(&self, author_id: &str) -> Result<Vec<PublicationRecord>, FetchError> {
        let url = self.endpoint(author_id);
        debug!(%url, "fetch papers");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| FetchError::Request {
                error,
                author_id: author_id.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                author_id: author_id.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| FetchError::Request {
                error,
                author_id: author_id.to_string(),
            })?;

        let papers = parse_papers(&bytes).map_err(|error| FetchError::Decode {
            error,
            author_id: author_id.to_string(),
        })?;
        debug!(author_id, count = papers.len(), "papers received");
        Ok(papers)
    }
}

#[derive(Deserialize)]
struct PapersPage {
    #[serde(default)]
    data: Option<Vec<PublicationRecord>>,
}

/// Decodes one page of the papers endpoint. A missing `data` list is an empty result.
pub fn parse_papers(body: &[u8]) -> Result<Vec<PublicationRecord>, serde_json::Error> {
    let page: PapersPage = serde_json::from_slice(body)?;
    Ok(page.data.unwrap_or_default())
}
