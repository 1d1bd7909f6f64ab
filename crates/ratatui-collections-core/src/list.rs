use crate::collection::CollectionCore;
use crate::collection::OnSelect;
use crate::error::Error;
use crate::error::Result;
use crate::events::CollectionAction;
use crate::events::Command;
use crate::events::CommandBindings;
use crate::field::Record;
use crate::field::has_field;
use crate::input::InputEvent;
use crate::observable::Observable;
use crate::render;
use crate::render::Indicators;
use crate::render::RenderStyles;
use crate::render::RenderedLine;
use crate::selection::SelectMode;
use crate::selection::SelectionState;
use crate::sort::SortState;
use crate::viewport::Viewport;
use ratatui::text::Line;
use std::fmt;
use std::ops::Range;

#[derive(Clone, Debug)]
pub struct ListViewOptions {
    /// Visible rows.
    pub height: usize,
    pub select_mode: SelectMode,
    pub indicators: Indicators,
    pub styles: RenderStyles,
    pub bindings: CommandBindings,
}

impl Default for ListViewOptions {
    fn default() -> Self {
        Self {
            height: 10,
            select_mode: SelectMode::Eager,
            indicators: Indicators::default(),
            styles: RenderStyles::default(),
            bindings: CommandBindings::default(),
        }
    }
}

/// A virtualized, sortable list.
///
/// The list renders only the rows inside its viewport and keeps the selected row visible.
/// By default it reports selection eagerly: `on_select` fires on every move.
pub struct ListView<T> {
    core: CollectionCore<T>,
    options: ListViewOptions,
}

impl<T> fmt::Debug for ListView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("core", &self.core)
            .field("options", &self.options)
            .finish()
    }
}

impl<T> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_observable(Observable::new(items), ListViewOptions::default())
    }

    pub fn with_options(items: Vec<T>, options: ListViewOptions) -> Self {
        Self::with_observable(Observable::new(items), options)
    }

    /// Builds a list over a collection that other widgets may also observe.
    pub fn with_observable(items: Observable<Vec<T>>, options: ListViewOptions) -> Self {
        let core = CollectionCore::new(items, options.height, options.select_mode);
        Self { core, options }
    }

    pub fn options(&self) -> &ListViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ListViewOptions) {
        self.core.set_select_mode(options.select_mode);
        self.core.set_height(options.height);
        self.options = options;
    }

    pub fn on_select(&mut self, f: impl FnMut(&T, usize) + 'static) {
        let cb: OnSelect<T> = Box::new(f);
        self.core.set_on_select(Some(cb));
    }

    pub fn items(&self) -> &Observable<Vec<T>> {
        self.core.items()
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.core.set_items(items);
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selected(&self) -> Option<usize> {
        self.core.selection().selected()
    }

    pub fn selection(&self) -> SelectionState {
        self.core.selection()
    }

    pub fn set_selected(&mut self, selected: Option<usize>) -> bool {
        self.core.set_selected(selected)
    }

    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    pub fn set_height(&mut self, height: usize) {
        self.options.height = height.max(1);
        self.core.set_height(height);
    }

    pub fn select_mode(&self) -> SelectMode {
        self.core.select_mode()
    }

    pub fn sort_state(&self) -> &SortState {
        self.core.sort_state()
    }

    pub fn move_down(&mut self) -> CollectionAction {
        self.core.navigate(&Command::Down)
    }

    pub fn move_up(&mut self) -> CollectionAction {
        self.core.navigate(&Command::Up)
    }

    pub fn move_to_first(&mut self) -> CollectionAction {
        self.core.navigate(&Command::First)
    }

    pub fn move_to_last(&mut self) -> CollectionAction {
        self.core.navigate(&Command::Last)
    }

    pub fn confirm(&mut self) -> CollectionAction {
        self.core.confirm()
    }

    /// Half-open index range currently on screen.
    pub fn visible_window(&self) -> Range<usize> {
        self.core.visible_window(self.len())
    }

    /// Renders the visible rows with `format_item`. Does not change any state.
    pub fn render<F>(&self, format_item: F) -> Vec<RenderedLine>
    where
        F: FnMut(&T, usize) -> String,
    {
        self.core.items().with(|items| {
            let len = items.len();
            render::render(
                items,
                self.core.visible_window(len),
                self.core.effective_selected(len),
                &self.options.indicators,
                format_item,
            )
        })
    }

    pub fn render_plain<F>(&self, format_item: F) -> Vec<String>
    where
        F: FnMut(&T, usize) -> String,
    {
        render::to_plain_lines(&self.render(format_item), &self.options.indicators)
    }

    pub fn render_styled<F>(&self, format_item: F) -> Vec<Line<'static>>
    where
        F: FnMut(&T, usize) -> String,
    {
        render::to_styled_lines(
            &self.render(format_item),
            &self.options.indicators,
            &self.options.styles,
        )
    }
}

impl<T: fmt::Display> ListView<T> {
    pub fn render_display(&self) -> Vec<String> {
        self.render_plain(|item, _| item.to_string())
    }
}

impl<T: Record> ListView<T> {
    /// Sorts by `field_key`, toggling direction when it is already the active field.
    ///
    /// Unknown fields are tolerated: every item resolves to an empty key and the order is
    /// left as it was. Use [`Self::try_sort`] to reject them instead.
    pub fn sort(&mut self, field_key: &str) -> CollectionAction {
        self.core.sync();
        let sorted = {
            let items = self.core.items().clone();
            items.with(|items| self.core.sort_controller().sort_by(items, field_key, true))
        };
        self.core.apply_sort(field_key, sorted)
    }

    /// Like [`Self::sort`], but fails if the first item has no field named `field_key`.
    pub fn try_sort(&mut self, field_key: &str) -> Result<CollectionAction> {
        let known = self
            .core
            .items()
            .with(|items| items.first().is_none_or(|first| has_field(first, field_key)));
        if !known {
            return Err(Error::UnknownField(field_key.to_string()));
        }
        Ok(self.sort(field_key))
    }

    pub fn handle_command(&mut self, command: Command) -> CollectionAction {
        match command {
            Command::Sort(field) => self.sort(&field),
            other => self.core.navigate(&other),
        }
    }

    /// Dispatches a named event such as `"keyDown"` or `"sort"` (with the field as payload).
    pub fn dispatch(&mut self, name: &str, payload: Option<&str>) -> CollectionAction {
        match Command::from_event(name, payload) {
            Some(command) => self.handle_command(command),
            None => {
                tracing::trace!(event = name, "unhandled event");
                CollectionAction::None
            }
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> CollectionAction {
        match self.options.bindings.command_for_event(event) {
            Some(command) => self.handle_command(command),
            None => CollectionAction::None,
        }
    }
}
