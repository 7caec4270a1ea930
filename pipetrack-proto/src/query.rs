//! List query parameters shared by the task and candidate list endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other} (expected asc or desc)")),
        }
    }
}

/// A single query parameter. `None` values are dropped when the URL is built.
pub type QueryParam = (String, Option<String>);

/// Pagination, search and sort parameters for list endpoints.
///
/// All fields are optional; the backend applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Column to sort by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl PaginationParams {
    /// Converts into ordered query parameters, keeping absent values as `None`.
    #[must_use]
    pub fn to_query(&self) -> Vec<QueryParam> {
        vec![
            ("page".to_string(), self.page.map(|v| v.to_string())),
            ("limit".to_string(), self.limit.map(|v| v.to_string())),
            ("search".to_string(), self.search.clone()),
            ("sort_by".to_string(), self.sort_by.clone()),
            ("order".to_string(), self.order.map(|v| v.to_string())),
        ]
    }
}
