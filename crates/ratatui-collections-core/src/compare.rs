use crate::field::Value;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Result of comparing two resolved values.
///
/// `Mixed` marks the cross-type fallback, which compares display strings. It is a best-effort
/// order and is not guaranteed to be transitive across a column holding several types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Ordered(Ordering),
    Mixed(Ordering),
}

impl Comparison {
    pub fn ordering(self) -> Ordering {
        match self {
            Comparison::Ordered(o) | Comparison::Mixed(o) => o,
        }
    }

    pub fn is_mixed(self) -> bool {
        matches!(self, Comparison::Mixed(_))
    }
}

/// Compares two values by runtime type, then applies `direction`.
///
/// Dispatch order: nothing (absent/empty, sorts first), bool, integer, float, string. Any
/// other pairing falls back to comparing `Display` output and is tagged [`Comparison::Mixed`].
pub fn compare(a: &Value, b: &Value, direction: SortDirection) -> Comparison {
    let asc = compare_ascending(a, b);
    match asc {
        Comparison::Ordered(o) => Comparison::Ordered(direction.apply(o)),
        Comparison::Mixed(o) => Comparison::Mixed(direction.apply(o)),
    }
}

fn compare_ascending(a: &Value, b: &Value) -> Comparison {
    match (a, b) {
        (x, y) if x.is_nothing() && y.is_nothing() => Comparison::Ordered(Ordering::Equal),
        (x, _) if x.is_nothing() => Comparison::Ordered(Ordering::Less),
        (_, y) if y.is_nothing() => Comparison::Ordered(Ordering::Greater),
        (Value::Bool(x), Value::Bool(y)) => Comparison::Ordered(x.cmp(y)),
        (Value::Int(x), Value::Int(y)) => Comparison::Ordered(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => Comparison::Ordered(x.total_cmp(y)),
        (Value::Str(x), Value::Str(y)) => Comparison::Ordered(x.cmp(y)),
        _ => Comparison::Mixed(a.to_string().cmp(&b.to_string())),
    }
}
