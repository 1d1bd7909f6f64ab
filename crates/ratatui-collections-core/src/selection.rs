/// When a widget reports the selected item to its `on_select` callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectMode {
    /// Every index change reports the newly highlighted item, and so does confirm.
    #[default]
    Eager,
    /// Only an explicit confirm reports the item.
    Confirmed,
}

/// The highlighted index into a collection. `None` means no selection.
///
/// Every method takes the current collection length and keeps the index inside
/// `0..len`. Methods return `true` when the index changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn move_down(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let next = match self.selected {
            None => 0,
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
        };
        self.replace(next)
    }

    pub fn move_up(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let next = match self.selected {
            None => len - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.replace(next)
    }

    pub fn move_to_first(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.replace(0)
    }

    pub fn move_to_last(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.replace(len - 1)
    }

    /// Moves down by `page` rows, clamped at the last index.
    pub fn page_down(&mut self, len: usize, page: usize) -> bool {
        if len == 0 {
            return false;
        }
        let page = page.max(1);
        let next = match self.selected {
            None => (page - 1).min(len - 1),
            Some(i) => i.saturating_add(page).min(len - 1),
        };
        self.replace(next)
    }

    /// Moves up by `page` rows, clamped at the first index.
    pub fn page_up(&mut self, len: usize, page: usize) -> bool {
        if len == 0 {
            return false;
        }
        let page = page.max(1);
        let next = match self.selected {
            None => (len - 1).saturating_sub(page - 1),
            Some(i) => i.saturating_sub(page),
        };
        self.replace(next)
    }

    pub fn set_selected(&mut self, selected: Option<usize>, len: usize) -> bool {
        let next = match selected {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    /// Re-validates the index after the collection changed length.
    pub fn clamp(&mut self, len: usize) -> bool {
        self.set_selected(self.selected, len)
    }

    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    fn replace(&mut self, next: usize) -> bool {
        if self.selected == Some(next) {
            return false;
        }
        self.selected = Some(next);
        true
    }
}
