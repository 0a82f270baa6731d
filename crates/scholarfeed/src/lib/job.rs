use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    author::Author,
    feed::{FeedDocument, Render, RenderError, build_feed},
    fetch::{FetchError, PaperSource},
    record::{PublicationRecord, sort_records},
};

/// Why one author produced no feed.
#[derive(Debug, Error)]
pub enum AuthorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write {}: {error}", path.display())]
    Write {
        error: std::io::Error,
        path: PathBuf,
    },
}

pub trait JobState {}

/// The processing of one author, moving `Pending -> Fetched -> Built` and
/// finally writing its feed file.
pub struct Job<'a, S>
where
    S: JobState,
{
    author: &'a Author,
    state: S,
}

pub struct Pending;
impl JobState for Pending {}
impl<'a> Job<'a, Pending> {
    pub fn new(author: &'a Author) -> Self {
        Job {
            author,
            state: Pending,
        }
    }

    pub async fn fetch<P>(self, source: &P) -> Result<Job<'a, Fetched>, AuthorError>
    where
        P: PaperSource,
    {
        let records = source.fetch(&self.author.author_id).await?;
        Ok(Job {
            author: self.author,
            state: Fetched { records },
        })
    }
}

pub struct Fetched {
    records: Vec<PublicationRecord>,
}
impl JobState for Fetched {}
impl<'a> Job<'a, Fetched> {
    pub fn records(&self) -> &[PublicationRecord] {
        &self.state.records
    }

    /// Sorts the records newest first and maps them to feed entries.
    pub fn build(self) -> Job<'a, Built> {
        let Job {
            author,
            state: Fetched { mut records },
        } = self;
        sort_records(&mut records);
        let feed = build_feed(author, &records);
        Job {
            author,
            state: Built { feed },
        }
    }
}

pub struct Built {
    feed: FeedDocument,
}
impl JobState for Built {}
impl Job<'_, Built> {
    pub fn feed(&self) -> &FeedDocument {
        &self.state.feed
    }

    /// Renders the feed and writes it to `output_dir`, replacing any earlier file.
    pub async fn write<R>(self, renderer: &R, output_dir: &Path) -> Result<Written, AuthorError>
    where
        R: Render,
    {
        let bytes = renderer.render(&self.state.feed)?;
        let path = output_dir.join(self.author.feed_filename());
        debug!(path = %path.display(), bytes = bytes.len(), "write feed");
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|error| AuthorError::Write {
                error,
                path: path.clone(),
            })?;
        Ok(Written {
            path,
            entries: self.state.feed.entries.len(),
        })
    }
}

/// A feed file that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub path: PathBuf,
    pub entries: usize,
}
