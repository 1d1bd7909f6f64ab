//! `ratatui-collections-core` provides the state machines behind virtualized, sortable list and
//! table widgets for terminal UIs.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: every command runs to completion on the calling thread.
//! - Rendering is a pure query that produces lines. Painting them is up to the app (for example
//!   through a ratatui `Paragraph`).
//! - Lenient by default: out-of-range navigation clamps, unknown sort fields degrade to an
//!   unchanged order, empty collections make every command a no-op.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-collections`.
//!
//! Useful entry points:
//! - [`list::ListView`]: a virtualized list with eager selection reporting.
//! - [`table::TableView`]: a virtualized table with sortable [`table::ColumnSpec`] columns.
//! - [`field::Record`]: implement it on your row type to enable sorting by field name.
//! - [`sort::SortController`], [`selection::SelectionState`], [`viewport::Viewport`]: the
//!   building blocks, usable on their own.
//!
//! ## Selection reporting
//!
//! Widgets accept an `on_select(item, index)` callback. [`selection::SelectMode::Eager`] fires it
//! on every move and on confirm; [`selection::SelectMode::Confirmed`] fires it only on confirm.
//! Lists default to eager, tables to confirmed.
pub mod error;

pub mod compare;
pub mod field;
pub mod sort;

pub mod selection;
pub mod viewport;

pub mod render;
pub mod text;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod events;
pub mod input;
pub mod keymap;
pub mod observable;

mod collection;
pub mod list;
pub mod table;

pub use collection::OnSelect;
