use crate::collection::CollectionCore;
use crate::collection::OnSelect;
use crate::error::Error;
use crate::error::Result;
use crate::events::CollectionAction;
use crate::events::Command;
use crate::events::CommandBindings;
use crate::field::Accessor;
use crate::field::KeySource;
use crate::field::Record;
use crate::field::Value;
use crate::field::resolve;
use crate::input::InputEvent;
use crate::observable::Observable;
use crate::render;
use crate::render::Indicators;
use crate::render::RenderStyles;
use crate::render::RenderedLine;
use crate::selection::SelectMode;
use crate::selection::SelectionState;
use crate::sort::SortState;
use crate::text;
use crate::viewport::Viewport;
use ratatui::text::Line;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// Column configuration for [`TableView`].
///
/// Cell text comes from `custom_render` if set, otherwise from `accessor`, otherwise from a
/// lookup of `field_key` on the row. Sorting uses `accessor` when present and `field_key`
/// otherwise.
pub struct ColumnSpec<T> {
    pub header: String,
    pub field_key: String,
    pub width: u16,
    pub sortable: bool,
    pub custom_render: Option<Rc<dyn Fn(&T) -> String>>,
    pub accessor: Option<Accessor<T>>,
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            field_key: self.field_key.clone(),
            width: self.width,
            sortable: self.sortable,
            custom_render: self.custom_render.clone(),
            accessor: self.accessor.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("header", &self.header)
            .field("field_key", &self.field_key)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("custom_render", &self.custom_render.is_some())
            .field("accessor", &self.accessor.is_some())
            .finish()
    }
}

impl<T> ColumnSpec<T> {
    /// A sortable column with no custom rendering.
    pub fn new(header: impl Into<String>, field_key: impl Into<String>, width: u16) -> Self {
        Self {
            header: header.into(),
            field_key: field_key.into(),
            width,
            sortable: true,
            custom_render: None,
            accessor: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn render_with(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.custom_render = Some(Rc::new(f));
        self
    }

    pub fn accessor(mut self, f: impl Fn(&T) -> Value + 'static) -> Self {
        self.accessor = Some(Rc::new(f));
        self
    }
}

impl<T: Record> ColumnSpec<T> {
    pub fn value_of(&self, item: &T) -> Value {
        match &self.accessor {
            Some(f) => f(item),
            None => resolve(item, &self.field_key),
        }
    }

    pub fn cell_text(&self, item: &T) -> String {
        match &self.custom_render {
            Some(f) => f(item),
            None => self.value_of(item).to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableViewOptions {
    /// Visible body rows, not counting the header.
    pub height: usize,
    pub select_mode: SelectMode,
    pub show_header: bool,
    pub column_separator: String,
    pub indicators: Indicators,
    pub styles: RenderStyles,
    pub bindings: CommandBindings,
}

impl Default for TableViewOptions {
    fn default() -> Self {
        Self {
            height: 10,
            select_mode: SelectMode::Confirmed,
            show_header: true,
            column_separator: " ".to_string(),
            indicators: Indicators::default(),
            styles: RenderStyles::default(),
            bindings: CommandBindings::default(),
        }
    }
}

/// A virtualized, sortable table.
///
/// By default the table reports selection only on confirm (`Enter` / `"keyEnter"`), unlike
/// [`crate::list::ListView`]. Switch with [`TableViewOptions::select_mode`].
pub struct TableView<T> {
    core: CollectionCore<T>,
    columns: Vec<ColumnSpec<T>>,
    options: TableViewOptions,
}

impl<T> fmt::Debug for TableView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("core", &self.core)
            .field("columns", &self.columns)
            .field("options", &self.options)
            .finish()
    }
}

impl<T> TableView<T> {
    pub fn new(columns: Vec<ColumnSpec<T>>, items: Vec<T>) -> Self {
        Self::with_observable(columns, Observable::new(items), TableViewOptions::default())
    }

    pub fn with_options(
        columns: Vec<ColumnSpec<T>>,
        items: Vec<T>,
        options: TableViewOptions,
    ) -> Self {
        Self::with_observable(columns, Observable::new(items), options)
    }

    pub fn with_observable(
        columns: Vec<ColumnSpec<T>>,
        items: Observable<Vec<T>>,
        options: TableViewOptions,
    ) -> Self {
        let core = CollectionCore::new(items, options.height, options.select_mode);
        Self {
            core,
            columns,
            options,
        }
    }

    pub fn options(&self) -> &TableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableViewOptions) {
        self.core.set_select_mode(options.select_mode);
        self.core.set_height(options.height);
        self.options = options;
    }

    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    /// Replaces the columns. The sort state is reset if its field no longer has a column.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec<T>>) {
        self.columns = columns;
        let stale = self
            .core
            .sort_state()
            .active_field
            .as_deref()
            .is_some_and(|f| self.column(f).is_none());
        if stale {
            self.core.sort_controller().reset();
        }
    }

    pub fn column(&self, field_key: &str) -> Option<&ColumnSpec<T>> {
        self.columns.iter().find(|c| c.field_key == field_key)
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

    pub fn visible_window(&self) -> Range<usize> {
        self.core.visible_window(self.len())
    }

    /// Header text: each title padded to its column width, with `▲`/`▼` on the sorted column.
    pub fn header_line(&self) -> String {
        let sort = self.core.sort_state();
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let title = match sort.indicator(&c.field_key) {
                    Some(glyph) => format!("{} {glyph}", c.header),
                    None => c.header.clone(),
                };
                text::fit_to_width(&title, c.width as usize)
            })
            .collect();
        cells.join(&self.options.column_separator)
    }
}

impl<T: Record> TableView<T> {
    pub fn row_line(&self, item: &T) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .map(|c| text::fit_to_width(&c.cell_text(item), c.width as usize))
            .collect();
        cells.join(&self.options.column_separator)
    }

    /// Header (if enabled), boundary markers and one line per visible row.
    pub fn render(&self) -> Vec<RenderedLine> {
        let mut out = Vec::new();
        if self.options.show_header {
            out.push(RenderedLine::Header(self.header_line()));
        }
        let body = self.core.items().with(|items| {
            let len = items.len();
            render::render(
                items,
                self.core.visible_window(len),
                self.core.effective_selected(len),
                &self.options.indicators,
                |item, _| self.row_line(item),
            )
        });
        out.extend(body);
        out
    }

    pub fn render_plain(&self) -> Vec<String> {
        render::to_plain_lines(&self.render(), &self.options.indicators)
    }

    pub fn render_styled(&self) -> Vec<Line<'static>> {
        render::to_styled_lines(
            &self.render(),
            &self.options.indicators,
            &self.options.styles,
        )
    }

    /// Sorts by the column whose `field_key` matches, toggling direction on repeat.
    ///
    /// A non-sortable column is a no-op. A key with no column falls back to a field lookup on
    /// each row, so a mistyped key degrades to an unchanged order instead of failing.
    pub fn sort(&mut self, field_key: &str) -> CollectionAction {
        self.core.sync();
        let column = self.columns.iter().find(|c| c.field_key == field_key);
        let sortable = column.is_none_or(|c| c.sortable);
        let accessor = column.and_then(|c| c.accessor.clone());
        if column.is_none() {
            tracing::debug!(field = field_key, "no column for sort field; using field lookup");
        }
        let items = self.core.items().clone();
        let sorted = items.with(|items| {
            let source = match &accessor {
                Some(f) => KeySource::Accessor(f.as_ref()),
                None => KeySource::Named(field_key),
            };
            self.core
                .sort_controller()
                .sort_with(items, field_key, sortable, source)
        });
        self.core.apply_sort(field_key, sorted)
    }

    /// Like [`Self::sort`], but rejects keys without a column and non-sortable columns.
    pub fn try_sort(&mut self, field_key: &str) -> Result<CollectionAction> {
        match self.column(field_key) {
            None => Err(Error::UnknownField(field_key.to_string())),
            Some(c) if !c.sortable => Err(Error::NotSortable(field_key.to_string())),
            Some(_) => Ok(self.sort(field_key)),
        }
    }

    pub fn handle_command(&mut self, command: Command) -> CollectionAction {
        match command {
            Command::Sort(field) => self.sort(&field),
            other => self.core.navigate(&other),
        }
    }

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
