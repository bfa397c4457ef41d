//! Wire types for the upstream movie catalog.
//!
//! One call to `GET /api/movies/search?page={n}` returns a `MoviesPage`:
//!
//! ```json
//! { "page": 1, "per_page": 10, "total": 26, "total_pages": 3,
//!   "data": [ { "Title": "...", "Director": "...", ... } ] }
//! ```
//!
//! Decoding is lenient: unknown fields are ignored, a missing or `null`
//! `data` becomes an empty list, and every movie field is optional.
//! Pagination counts that are `null`, negative or not numbers decode to 0,
//! and scalar movie fields are carried as text whatever their JSON type.

use serde::{Deserialize, Deserializer, Serialize};

/// 1-based page index into the catalog
pub type PageNumber = u32;

// =============================================================================
// Movie
// =============================================================================

/// One catalog record.
///
/// Only `director` matters for aggregation; the rest is carried as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<u16>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rated: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub released: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub runtime: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub writer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub actors: Option<String>,
}

impl Movie {
    /// A record with nothing but a director attribution.
    pub fn with_director(director: impl Into<String>) -> Self {
        Self {
            director: Some(director.into()),
            ..Self::default()
        }
    }

    /// True when the director is present and not blank.
    pub fn has_valid_director(&self) -> bool {
        self.director_name().is_some()
    }

    /// The raw director string, if it is not blank after trimming.
    pub fn director_name(&self) -> Option<&str> {
        self.director
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

// =============================================================================
// MoviesPage
// =============================================================================

/// One fetched page of the catalog plus pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviesPage {
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: PageNumber,
    #[serde(default, deserialize_with = "lenient_count")]
    pub per_page: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Movie>,
}

impl MoviesPage {
    /// Build a page whose metadata is consistent with `data`.
    pub fn new(page: PageNumber, total_pages: u32, data: Vec<Movie>) -> Self {
        let per_page = data.len() as u32;
        Self {
            page,
            per_page,
            total: u64::from(per_page) * u64::from(total_pages),
            total_pages,
            data,
        }
    }

    /// Number of pages the catalog claims to have, never less than one.
    pub fn declared_pages(&self) -> PageNumber {
        self.total_pages.max(1)
    }
}

// =============================================================================
// Lenient decoders
// =============================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Non-negative integer, or `"12"` as text. Negative, `null` and any other
/// value decode to 0 so bad metadata cannot fail the page.
fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Unsigned(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let count = match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Unsigned(n)) => Some(n),
        Some(RawCount::Text(text)) => text.trim().parse().ok(),
        Some(RawCount::Other(_)) | None => None,
    };
    Ok(count.and_then(|n| T::try_from(n).ok()).unwrap_or_default())
}

/// Strings pass through; numbers and booleans are kept as their text.
/// Arrays and objects decode to `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
        Other(serde::de::IgnoredAny),
    }

    let text = match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Text(text)) => Some(text),
        Some(RawText::Unsigned(n)) => Some(n.to_string()),
        Some(RawText::Signed(n)) => Some(n.to_string()),
        Some(RawText::Float(n)) => Some(n.to_string()),
        Some(RawText::Bool(b)) => Some(b.to_string()),
        Some(RawText::Other(_)) | None => None,
    };
    Ok(text)
}

/// Accepts `2010`, `"2010"` and series ranges like `"2010–2014"`.
/// Anything else decodes to `None` instead of failing the whole page.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let year = match Option::<RawYear>::deserialize(deserializer)? {
        Some(RawYear::Number(n)) => u16::try_from(n).ok(),
        Some(RawYear::Text(text)) => text.trim().get(..4).and_then(|y| y.parse().ok()),
        Some(RawYear::Other(_)) | None => None,
    };
    Ok(year)
}
