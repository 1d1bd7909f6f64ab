//! State shared by [`crate::list::ListView`] and [`crate::table::TableView`]: the backing
//! collection, selection, viewport and sort state, plus the navigation command handler.

use crate::events::CollectionAction;
use crate::events::Command;
use crate::observable::Observable;
use crate::selection::SelectMode;
use crate::selection::SelectionState;
use crate::sort::Permutation;
use crate::sort::SortController;
use crate::sort::SortReport;
use crate::sort::SortState;
use crate::viewport::Viewport;
use std::fmt;
use std::ops::Range;

/// Callback invoked with the selected item and its index.
pub type OnSelect<T> = Box<dyn FnMut(&T, usize)>;

pub(crate) struct CollectionCore<T> {
    items: Observable<Vec<T>>,
    selection: SelectionState,
    viewport: Viewport,
    sort: SortController,
    select_mode: SelectMode,
    on_select: Option<OnSelect<T>>,
}

impl<T> fmt::Debug for CollectionCore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionCore")
            .field("len", &self.len())
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .field("sort", self.sort.state())
            .field("select_mode", &self.select_mode)
            .finish_non_exhaustive()
    }
}

impl<T> CollectionCore<T> {
    pub(crate) fn new(items: Observable<Vec<T>>, height: usize, select_mode: SelectMode) -> Self {
        let mut core = Self {
            items,
            selection: SelectionState::new(),
            viewport: Viewport::new(height),
            sort: SortController::new(),
            select_mode,
            on_select: None,
        };
        core.sync();
        core
    }

    pub(crate) fn items(&self) -> &Observable<Vec<T>> {
        &self.items
    }

    pub(crate) fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    /// Selection clamped to the collection as it is now, which may have changed since the
    /// last command.
    pub(crate) fn selection(&self) -> SelectionState {
        let mut selection = self.selection;
        selection.clamp(self.len());
        selection
    }

    /// Viewport re-synced to the current collection, without mutating.
    pub(crate) fn viewport(&self) -> Viewport {
        self.effective_viewport(self.len())
    }

    pub(crate) fn sort_state(&self) -> &SortState {
        self.sort.state()
    }

    pub(crate) fn sort_controller(&mut self) -> &mut SortController {
        &mut self.sort
    }

    pub(crate) fn select_mode(&self) -> SelectMode {
        self.select_mode
    }

    pub(crate) fn set_select_mode(&mut self, mode: SelectMode) {
        self.select_mode = mode;
    }

    pub(crate) fn set_on_select(&mut self, f: Option<OnSelect<T>>) {
        self.on_select = f;
    }

    pub(crate) fn set_items(&mut self, items: Vec<T>) {
        self.items.set(items);
        self.sync();
    }

    pub(crate) fn set_height(&mut self, height: usize) {
        let len = self.len();
        self.selection.clamp(len);
        self.viewport
            .set_height(height, self.selection.selected(), len);
    }

    pub(crate) fn set_selected(&mut self, selected: Option<usize>) -> bool {
        let len = self.len();
        let changed = self.selection.set_selected(selected, len);
        self.viewport.sync(self.selection.selected(), len);
        changed
    }

    /// Re-validates selection and viewport against the current collection length.
    pub(crate) fn sync(&mut self) {
        let len = self.len();
        self.selection.clamp(len);
        self.viewport.sync(self.selection.selected(), len);
    }

    /// Selection as it would be after [`Self::sync`], without mutating.
    pub(crate) fn effective_selected(&self, len: usize) -> Option<usize> {
        match self.selection.selected() {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        }
    }

    fn effective_viewport(&self, len: usize) -> Viewport {
        let mut viewport = self.viewport;
        viewport.sync(self.effective_selected(len), len);
        viewport
    }

    pub(crate) fn visible_window(&self, len: usize) -> Range<usize> {
        self.effective_viewport(len).visible_window(len)
    }

    /// Handles every command except [`Command::Sort`], which needs widget-specific key lookup.
    pub(crate) fn navigate(&mut self, command: &Command) -> CollectionAction {
        self.sync();
        let len = self.len();
        if len == 0 {
            return CollectionAction::None;
        }
        let page = self.viewport.height().saturating_sub(1).max(1);
        let changed = match command {
            Command::Down => self.selection.move_down(len),
            Command::Up => self.selection.move_up(len),
            Command::PageDown => self.selection.page_down(len, page),
            Command::PageUp => self.selection.page_up(len, page),
            Command::First => self.selection.move_to_first(len),
            Command::Last => self.selection.move_to_last(len),
            Command::Confirm => return self.confirm(),
            Command::Sort(_) => return CollectionAction::None,
        };
        if !changed {
            return CollectionAction::None;
        }
        let Some(index) = self.selection.selected() else {
            return CollectionAction::None;
        };
        self.viewport.sync(Some(index), len);
        tracing::trace!(index, offset = self.viewport.offset(), "selection moved");
        if self.select_mode == SelectMode::Eager {
            self.emit(index);
        }
        CollectionAction::SelectionChanged(index)
    }

    pub(crate) fn confirm(&mut self) -> CollectionAction {
        self.sync();
        match self.selection.selected() {
            Some(index) => {
                self.emit(index);
                CollectionAction::Activated(index)
            }
            None => CollectionAction::None,
        }
    }

    /// Applies a computed sort order to the backing collection and notifies its observers.
    ///
    /// The selected index is kept as-is (it now points at whichever item moved there).
    pub(crate) fn apply_sort(
        &mut self,
        field_key: &str,
        sorted: Option<(Permutation, SortReport)>,
    ) -> CollectionAction {
        let Some((perm, report)) = sorted else {
            return CollectionAction::None;
        };
        if report.empty_keys > 0 && report.empty_keys == perm.len() {
            tracing::warn!(
                field = field_key,
                "sort field not found on any item; order left unchanged"
            );
        }
        let applied = self.items.try_update(|items| perm.apply(items));
        if applied != Some(true) {
            tracing::debug!(
                field = field_key,
                "collection busy or changed during sort; skipped"
            );
            return CollectionAction::None;
        }
        self.sync();
        CollectionAction::Sorted
    }

    /// Calls `on_select` while the collection is borrowed for reading. Writes the callback
    /// makes to the collection are queued and applied right after it returns.
    fn emit(&mut self, index: usize) {
        let Some(cb) = self.on_select.as_mut() else {
            return;
        };
        self.items.with(|items| {
            if let Some(item) = items.get(index) {
                cb(item, index);
            }
        });
    }
}
