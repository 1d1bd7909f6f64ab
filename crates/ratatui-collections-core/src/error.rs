use std::result::Result as StdResult;

use thiserror::Error;

/// Errors surfaced by the strict sort entry points (`try_sort`).
///
/// The lenient paths never produce these: they degrade to a defined no-op or default instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No column or item field is named by the key.
    #[error("unknown sort field: {0:?}")]
    UnknownField(String),
    /// The column exists but does not allow sorting.
    #[error("column {0:?} is not sortable")]
    NotSortable(String),
}

pub type Result<T> = StdResult<T, Error>;
