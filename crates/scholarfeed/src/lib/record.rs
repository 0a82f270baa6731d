use serde::{Deserialize, Serialize};

/// Sort key for records without a publication date; sorts before every real date.
pub const SENTINEL_DATE: &str = "0000-00-00";

/// One paper as returned by the author papers endpoint.
///
/// Every field is optional, an explicit `null` is treated like a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub r#abstract: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub venue: Option<String>,

    /// `YYYY-MM-DD` when known.
    #[serde(default)]
    pub publication_date: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

impl PublicationRecord {
    pub fn sort_key(&self) -> &str {
        self.publication_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(SENTINEL_DATE)
    }
}

/// Orders records newest first by comparing the ISO date strings.
///
/// The sort is stable: records sharing a date keep their API order.
pub fn sort_records(records: &mut [PublicationRecord]) {
    records.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn record(title: &str, date: Option<&str>) -> PublicationRecord {
        PublicationRecord {
            title: Some(title.to_string()),
            publication_date: date.map(str::to_string),
            ..Default::default()
        }
    }

    fn titles(records: &[PublicationRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.title.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn dated_before_undated() {
        let mut records = vec![record("B", None), record("A", Some("2023-05-01"))];
        sort_records(&mut records);
        assert_eq!(titles(&records), ["A", "B"]);
    }

    #[test]
    fn newest_first_and_ties_keep_order() {
        let mut records = vec![
            record("old", Some("2019-01-02")),
            record("new-1", Some("2024-03-01")),
            record("mid", Some("2021-12-31")),
            record("new-2", Some("2024-03-01")),
        ];
        sort_records(&mut records);
        assert_eq!(titles(&records), ["new-1", "new-2", "mid", "old"]);
    }

    #[test]
    fn empty_date_counts_as_missing() {
        let mut records = vec![
            record("empty", Some("")),
            record("none", None),
            record("dated", Some("0001-01-01")),
        ];
        sort_records(&mut records);
        assert_eq!(titles(&records), ["dated", "empty", "none"]);
        assert_eq!(records[1].sort_key(), SENTINEL_DATE);
    }

    #[test]
    fn deserializes_nulls_and_extra_fields() {
        let json = r#"{
            "paperId": "abc",
            "title": null,
            "abstract": "Membranes.",
            "year": 2020,
            "publicationDate": "2020-06-01"
        }"#;
        let record: PublicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, None);
        assert_eq!(record.r#abstract.as_deref(), Some("Membranes."));
        assert_eq!(record.year, Some(2020));
        assert_eq!(record.url, None);
        assert_eq!(record.sort_key(), "2020-06-01");
    }

    fn arb_records() -> impl Strategy<Value = Vec<PublicationRecord>> {
        prop::collection::vec(
            (
                "[a-z]{1,8}",
                prop::option::of("(19|20)[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9])"),
            ),
            1..40,
        )
        .prop_map(|items| {
            items
                .into_iter()
                .map(|(title, date)| PublicationRecord {
                    title: Some(title),
                    publication_date: date,
                    ..Default::default()
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sorting_is_idempotent(mut records in arb_records()) {
            sort_records(&mut records);
            let once = records.clone();
            sort_records(&mut records);
            prop_assert_eq!(once, records);
        }

        #[test]
        fn undated_records_come_last(mut records in arb_records()) {
            sort_records(&mut records);
            let first_undated = records
                .iter()
                .position(|r| r.publication_date.is_none())
                .unwrap_or(records.len());
            prop_assert!(records[first_undated..].iter().all(|r| r.publication_date.is_none()));
        }

        #[test]
        fn dates_are_non_increasing(mut records in arb_records()) {
            sort_records(&mut records);
            prop_assert!(records.windows(2).all(|w| w[0].sort_key() >= w[1].sort_key()));
        }
    }
}
