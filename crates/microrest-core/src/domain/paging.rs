use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PaginationParts")]
pub struct Pagination {
    page: u64,
    per_page: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationParts {
    page: u64,
    per_page: u64,
}

impl TryFrom<PaginationParts> for Pagination {
    type Error = ValidationError;

    fn try_from(parts: PaginationParts) -> Result<Self, Self::Error> {
        Self::new(parts.page, parts.per_page)
    }
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::InvalidPage);
        }
        if per_page == 0 {
            return Err(ValidationError::InvalidPerPage);
        }
        // `range()` relies on `page * per_page` fitting in a u64.
        if page.checked_mul(per_page).is_none() {
            return Err(ValidationError::PageOutOfRange { page, per_page });
        }
        Ok(Self { page, per_page })
    }

    pub const fn page(self) -> u64 {
        self.page
    }

    pub const fn per_page(self) -> u64 {
        self.per_page
    }

    /// Zero-based inclusive index bounds `[start, end]` of this page.
    pub const fn range(self) -> (u64, u64) {
        let start = (self.page - 1) * self.per_page;
        (start, start + self.per_page - 1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(ValidationError::InvalidSortOrder {
                value: value.to_owned(),
            }),
        }
    }
}

/// Sort field and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SortParts")]
pub struct Sort {
    field: String,
    order: SortOrder,
}

#[derive(Deserialize)]
struct SortParts {
    field: String,
    order: SortOrder,
}

impl TryFrom<SortParts> for Sort {
    type Error = ValidationError;

    fn try_from(parts: SortParts) -> Result<Self, Self::Error> {
        Self::new(parts.field, parts.order)
    }
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Result<Self, ValidationError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ValidationError::EmptySortField);
        }
        Ok(Self { field, order })
    }

    pub fn asc(field: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(field, SortOrder::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub const fn order(&self) -> SortOrder {
        self.order
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: String::from("id"),
            order: SortOrder::Asc,
        }
    }
}
