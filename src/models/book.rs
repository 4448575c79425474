use serde::{Deserialize, Deserializer, Serialize};

/// A book record as served by the catalog and recommendation endpoints
///
/// The service does not expose a stable numeric ID, so the title doubles as the
/// identity key for liking, selecting and keying cards. Two distinct books sharing
/// a title are indistinguishable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    #[serde(rename = "Title", default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_empty")]
    pub image_url: String,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Identity key used for like and selection comparisons
    pub fn key(&self) -> &str {
        &self.title
    }

    /// Compares by identity key rather than by value
    pub fn same_book(&self, other: &Book) -> bool {
        self.key() == other.key()
    }

    /// Image URL with a plain `http://` scheme upgraded to `https://`
    pub fn secure_image_url(&self) -> String {
        match self.image_url.strip_prefix("http://") {
            Some(rest) => format!("https://{}", rest),
            None => self.image_url.clone(),
        }
    }
}

// Missing metadata arrives as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Body of a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub liked_books: Vec<String>,
}
