//! `ratatui-collections` provides virtualized, sortable list and table components for ratatui
//! apps.
//!
//! This is the facade crate. It re-exports `ratatui-collections-core`; enable the `crossterm`
//! feature for `crossterm_input` conversions.
//!
//! ```
//! use ratatui_collections::field::Record;
//! use ratatui_collections::field::Value;
//! use ratatui_collections::table::ColumnSpec;
//! use ratatui_collections::table::TableView;
//!
//! struct Host {
//!     name: &'static str,
//!     load: f64,
//! }
//!
//! impl Record for Host {
//!     fn field(&self, key: &str) -> Option<Value> {
//!         match key {
//!             "name" => Some(self.name.into()),
//!             "load" => Some(self.load.into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut table = TableView::new(
//!     vec![ColumnSpec::new("Host", "name", 6), ColumnSpec::new("Load", "load", 4)],
//!     vec![Host { name: "web", load: 0.7 }, Host { name: "db", load: 0.2 }],
//! );
//! table.dispatch("sort", Some("load"));
//! table.dispatch("keyDown", None);
//! assert_eq!(table.render_plain()[1], "db     0.2 ");
//! ```
pub use ratatui_collections_core::*;
