//! Runs every author of the registry through fetch, build and write.
//!
//! Authors are handled one at a time. A failing author is logged, recorded in
//! the [`BatchReport`] and skipped; it never stops the batch. The only fatal
//! error is failing to create the output directory.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::{
    author::Author,
    feed::{Render, RssRenderer},
    fetch::PaperSource,
    job::{AuthorError, Job, Written},
    pacing::{Outcome, Pacer},
};

#[derive(Debug)]
pub enum AuthorOutcome {
    Written { author: Author, written: Written },
    Failed { author: Author, error: AuthorError },
}

impl AuthorOutcome {
    pub fn author(&self) -> &Author {
        match self {
            Self::Written { author, .. } | Self::Failed { author, .. } => author,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Written { .. } => Outcome::Success,
            Self::Failed { .. } => Outcome::Failure,
        }
    }
}

/// Per-author results, in registry order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<AuthorOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome() == Outcome::Success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Author, &AuthorError)> {
        self.outcomes.iter().filter_map(|o| match o {
            AuthorOutcome::Failed { author, error } => Some((author, error)),
            AuthorOutcome::Written { .. } => None,
        })
    }
}

pub struct Batch<S, P, R = RssRenderer> {
    authors: Vec<Author>,
    output_dir: PathBuf,
    source: S,
    pacer: P,
    renderer: R,
}

impl<S, P> Batch<S, P>
where
    S: PaperSource,
    P: Pacer,
{
    pub fn new(authors: Vec<Author>, output_dir: impl Into<PathBuf>, source: S, pacer: P) -> Self {
        Self::with_renderer(authors, output_dir, source, pacer, RssRenderer)
    }
}

impl<S, P, R> Batch<S, P, R>
where
    S: PaperSource,
    P: Pacer,
    R: Render,
{
    pub fn with_renderer(
        authors: Vec<Author>,
        output_dir: impl Into<PathBuf>,
        source: S,
        pacer: P,
        renderer: R,
    ) -> Self {
        Self {
            authors,
            output_dir: output_dir.into(),
            source,
            pacer,
            renderer,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn run(&self) -> std::io::Result<BatchReport> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let mut report = BatchReport::default();
        for author in &self.authors {
            info!(author = %author.name, author_id = %author.author_id, "Generating RSS for {}", author.name);

            let outcome = match self.process(author).await {
                Ok(written) => {
                    info!(
                        author = %author.name,
                        entries = written.entries,
                        path = %written.path.display(),
                        "Generated feed"
                    );
                    AuthorOutcome::Written {
                        author: author.clone(),
                        written,
                    }
                }
                Err(error) => {
                    error!(author = %author.name, %error, "Error generating feed for {}", author.name);
                    AuthorOutcome::Failed {
                        author: author.clone(),
                        error,
                    }
                }
            };

            self.pacer.pause(outcome.outcome()).await;
            report.outcomes.push(outcome);
        }

        info!(
            written = report.written(),
            failed = report.failed(),
            "Done! RSS feeds generated."
        );
        Ok(report)
    }

    async fn process(&self, author: &Author) -> Result<Written, AuthorError> {
        Job::new(author)
            .fetch(&self.source)
            .await?
            .build()
            .write(&self.renderer, &self.output_dir)
            .await
    }
}
