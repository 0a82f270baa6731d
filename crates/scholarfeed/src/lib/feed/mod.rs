//! In-memory feed documents.
//!
//! [`build_feed`] turns an author's sorted records into a [`FeedDocument`];
//! turning that into bytes is left to a [`Render`] implementation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::{author::Author, record::PublicationRecord};

mod render;

pub use render::{Render, RenderError, RssRenderer};

pub const UNTITLED: &str = "Untitled";
pub const NO_ABSTRACT: &str = "No abstract available.";
pub const LANGUAGE: &str = "en";

type Time = DateTime<Utc>;

#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    /// Same order as the records the document was built from.
    pub entries: Vec<FeedEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    /// The paper URL. Empty when the API had none; not deduplicated.
    pub id: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: Option<Time>,
}

impl FeedEntry {
    pub fn from_record(record: &PublicationRecord) -> Self {
        let url = record.url.clone().unwrap_or_default();
        let summary = record
            .r#abstract
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_ABSTRACT.to_string());

        let published = record.publication_date.as_deref().and_then(|date| {
            let parsed = parse_time(date);
            if parsed.is_none() {
                debug!(date, title = ?record.title, "Unparseable publication date, leaving entry undated");
            }
            parsed
        });

        Self {
            id: url.clone(),
            title: record.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            link: url,
            summary,
            published,
        }
    }
}

/// Builds the feed of one author. `records` are expected to be sorted already.
pub fn build_feed(author: &Author, records: &[PublicationRecord]) -> FeedDocument {
    let profile = author.profile_url();
    FeedDocument {
        id: profile.clone(),
        title: author.name.clone(),
        link: profile,
        description: format!("Semantic Scholar publications for {}", author.name),
        language: LANGUAGE.to_string(),
        entries: records.iter().map(FeedEntry::from_record).collect(),
    }
}

/// Accepts RFC 3339 and the usual ISO date / date-time spellings. Naive values are UTC.
pub fn parse_time(s: &str) -> Option<Time> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let fmts = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for f in fmts {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, f) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::record::sort_records;

    fn author() -> Author {
        Author::new("Jay Werber", "35255441")
    }

    #[test]
    fn parse_time_variants() {
        let midnight = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_time("2023-05-01"), Some(midnight));
        assert_eq!(parse_time(" 2023-05-01 "), Some(midnight));
        assert_eq!(
            parse_time("2023-05-01T10:30:00"),
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_time("2023-05-01 10:30"),
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_time("2023-05-01T12:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(parse_time("not-a-date"), None);
        assert_eq!(parse_time("2023-02-30"), None);
        assert_eq!(parse_time(""), None);
    }

    #[test]
    fn feed_level_fields() {
        let feed = build_feed(&author(), &[]);
        assert_eq!(feed.id, "https://www.semanticscholar.org/author/35255441");
        assert_eq!(feed.link, feed.id);
        assert_eq!(feed.title, "Jay Werber");
        assert_eq!(
            feed.description,
            "Semantic Scholar publications for Jay Werber"
        );
        assert_eq!(feed.language, "en");
        assert!(feed.entries.is_empty());
    }

    #[test]
    fn dated_and_undated_records() {
        let mut records = vec![
            PublicationRecord {
                title: Some("B".into()),
                ..Default::default()
            },
            PublicationRecord {
                title: Some("A".into()),
                r#abstract: Some("About A.".into()),
                url: Some("https://www.semanticscholar.org/paper/a".into()),
                publication_date: Some("2023-05-01".into()),
                ..Default::default()
            },
        ];
        sort_records(&mut records);
        let feed = build_feed(&author(), &records);

        let a = &feed.entries[0];
        assert_eq!(a.title, "A");
        assert_eq!(a.id, "https://www.semanticscholar.org/paper/a");
        assert_eq!(a.link, a.id);
        assert_eq!(a.summary, "About A.");
        assert_eq!(
            a.published,
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap())
        );

        let b = &feed.entries[1];
        assert_eq!(b.title, "B");
        assert_eq!(b.id, "");
        assert_eq!(b.link, "");
        assert_eq!(b.summary, NO_ABSTRACT);
        assert_eq!(b.published, None);
    }

    #[test]
    fn placeholders_and_bad_dates() {
        let record = PublicationRecord {
            r#abstract: Some(String::new()),
            publication_date: Some("not-a-date".into()),
            ..Default::default()
        };
        let entry = FeedEntry::from_record(&record);
        assert_eq!(entry.title, UNTITLED);
        assert_eq!(entry.summary, NO_ABSTRACT);
        assert_eq!(entry.published, None);
    }
}
