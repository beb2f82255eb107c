//! # Domain Types
//!
//! Value types shared by every provider operation.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Pagination`] | One-based page and page size |
//! | [`Sort`] | Sort field and [`SortOrder`] |
//! | [`Filter`] | Free-form JSON filter object |
//! | [`Record`] | Opaque JSON record |
//! | [`RecordId`] | Numeric or string record identifier |

mod paging;
mod record;

pub use paging::{Pagination, Sort, SortOrder};
pub use record::{Filter, Record, RecordId};
