use serde::{Deserialize, Serialize};

/// A person whose publications are turned into a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    /// Display name, used as the feed title and to derive the file name.
    pub name: String,
    /// Opaque identifier assigned by Semantic Scholar.
    pub author_id: String,
}

impl Author {
    pub fn new(name: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author_id: author_id.into(),
        }
    }

    /// Canonical Semantic Scholar profile page for this author.
    pub fn profile_url(&self) -> String {
        format!("https://www.semanticscholar.org/author/{}", self.author_id)
    }

    /// Output file name: lowercased, spaces replaced by underscores, `.xml` suffix.
    ///
    /// No other characters are escaped, so names containing path separators
    /// end up in subdirectories of the output directory (or fail to write).
    pub fn feed_filename(&self) -> String {
        format!("{}.xml", sanitize(&self.name))
    }
}

pub fn sanitize(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

const DEFAULT_AUTHORS: [(&str, &str); 13] = [
    ("Jay Werber", "35255441"),
    ("Viatcheslav Freger", "7937200"),
    ("Menachem Elimalech", "2896168"),
    ("Orlando Coronell", "12649015"),
    ("Ryan Lively", "2832408"),
    ("Jovan Kamcev", "7646506"),
    ("Benny Freeman", "38087797"),
    ("Geoffrey Geise", "1867417"),
    ("Chuyang Tang", "2237102582"),
    ("Jeff McCutcheon", "39812318"),
    ("Ryan Kingsbury", "40390912"),
    ("Manish Kumar", "2109944022"),
    ("Andrew Livingston", "144456055"),
];

/// Registry used when the configuration does not list any authors.
pub fn default_registry() -> Vec<Author> {
    DEFAULT_AUTHORS
        .iter()
        .map(|(name, id)| Author::new(*name, *id))
        .collect()
}
