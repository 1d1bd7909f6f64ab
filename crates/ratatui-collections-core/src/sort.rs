//! Sort state and the sort controller.
//!
//! Sorting is split in two steps. [`SortController::sort_by`] updates the [`SortState`] and
//! computes a [`Permutation`] without touching the items. The caller then applies it (usually
//! through [`crate::observable::Observable::update`] so observers are notified) and can use
//! [`Permutation::new_index_of`] to remap any indices it was holding.

use crate::compare::Comparison;
use crate::compare::SortDirection;
use crate::compare::compare;
use crate::field::KeySource;
use crate::field::Record;
use crate::field::Value;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub active_field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn is_active(&self, field_key: &str) -> bool {
        self.active_field.as_deref() == Some(field_key)
    }

    /// Header glyph for `field_key`: `▲`/`▼` when it is the active field.
    pub fn indicator(&self, field_key: &str) -> Option<&'static str> {
        if !self.is_active(field_key) {
            return None;
        }
        Some(match self.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        })
    }

    /// Advances the state for a sort request on `field_key` and returns the new direction.
    fn advance(&mut self, field_key: &str) -> SortDirection {
        if self.is_active(field_key) {
            self.direction = self.direction.toggled();
        } else {
            self.active_field = Some(field_key.to_string());
            self.direction = SortDirection::Ascending;
        }
        self.direction
    }
}

/// A reordering of a collection: `order[new_position] == old_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(i, &o)| i == o)
    }

    /// `old_index` for each new position.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn new_index_of(&self, old_index: usize) -> Option<usize> {
        self.order.iter().position(|&o| o == old_index)
    }

    /// Reorders `items` in place. A length mismatch leaves `items` untouched and returns `false`.
    pub fn apply<T>(&self, items: &mut Vec<T>) -> bool {
        if items.len() != self.order.len() {
            return false;
        }
        let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
        items.extend(self.order.iter().filter_map(|&old| slots[old].take()));
        true
    }
}

/// What a sort pass observed, for logging and diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortReport {
    /// Items whose key resolved to an unknown field.
    pub empty_keys: usize,
    /// Comparisons that fell back to the mixed-type string order.
    pub mixed_comparisons: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SortController {
    state: SortState,
}

impl SortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = SortState::default();
    }

    /// Sorts by `field_key` resolved through [`Record`].
    ///
    /// Returns `None` (and leaves the state alone) when `items` is empty or `sortable` is false.
    pub fn sort_by<T: Record>(
        &mut self,
        items: &[T],
        field_key: &str,
        sortable: bool,
    ) -> Option<(Permutation, SortReport)> {
        self.sort_with(items, field_key, sortable, KeySource::Named(field_key))
    }

    /// Like [`Self::sort_by`], but extracts keys with `source` while recording `field_key` as
    /// the active field.
    pub fn sort_with<T: Record>(
        &mut self,
        items: &[T],
        field_key: &str,
        sortable: bool,
        source: KeySource<'_, T>,
    ) -> Option<(Permutation, SortReport)> {
        if items.is_empty() || !sortable {
            tracing::trace!(field = field_key, sortable, "sort skipped");
            return None;
        }
        let direction = self.state.advance(field_key);
        let keys: Vec<Value> = items.iter().map(|item| source.extract(item)).collect();
        let (perm, report) = permutation_for(&keys, direction);
        tracing::debug!(
            field = field_key,
            ?direction,
            len = items.len(),
            mixed = report.mixed_comparisons,
            "sorted collection"
        );
        Some((perm, report))
    }

    /// Sorts `items` in place by `field_key`. Returns `true` if a sort happened.
    pub fn apply_sort<T: Record>(&mut self, items: &mut Vec<T>, field_key: &str) -> bool {
        match self.sort_by(items.as_slice(), field_key, true) {
            Some((perm, _)) => perm.apply(items),
            None => false,
        }
    }
}

/// Stable ordering of `keys` under `direction`.
pub fn permutation_for(keys: &[Value], direction: SortDirection) -> (Permutation, SortReport) {
    let mut report = SortReport {
        empty_keys: keys.iter().filter(|k| matches!(k, Value::Empty)).count(),
        mixed_comparisons: 0,
    };
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| match compare(&keys[a], &keys[b], direction) {
        Comparison::Ordered(o) => o,
        Comparison::Mixed(o) => {
            report.mixed_comparisons += 1;
            o
        }
    });
    if report.mixed_comparisons > 0 {
        tracing::debug!(
            mixed = report.mixed_comparisons,
            "sort key mixes value types; order is best-effort"
        );
    }
    (Permutation { order }, report)
}
