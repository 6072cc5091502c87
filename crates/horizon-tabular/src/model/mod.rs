//! The tabular view model.
//!
//! A table is described by a [`TableSchema`] (columns plus the field that
//! identifies rows) and fed any row type implementing [`Row`]. The pipeline
//! stages are plain functions and can be used on their own:
//!
//! - [`filter`]: free-text search across filterable columns
//! - [`sort`]: single-column, type-aware, stable ordering with nulls last
//! - [`paginate`]: page slicing and the page-number window
//! - [`SelectionTracker`]: a set of selected row keys
//!
//! [`TableView`] composes them, memoizes the result and emits signals when
//! its state changes. The [`render`](mod@render) module turns a computed page
//! into desktop table or mobile card models.
//!
//! # Example
//!
//! ```
//! use horizon_tabular::model::{ColumnSchema, ColumnType, Row, TableSchema, TableView};
//! use serde_json::json;
//!
//! let schema = TableSchema::new(
//!     vec![
//!         ColumnSchema::new("name"),
//!         ColumnSchema::new("stock").with_type(ColumnType::Number),
//!     ],
//!     "id",
//! )
//! .unwrap();
//! let rows = vec![
//!     json!({ "id": "a", "name": "Blue Widget", "stock": 5 }),
//!     json!({ "id": "b", "name": "Red Gadget", "stock": null }),
//!     json!({ "id": "c", "name": "Green Widget", "stock": 0 }),
//! ];
//!
//! let view = TableView::new(schema, rows);
//! view.set_query("widget");
//! view.activate_header("stock");
//!
//! let ids: Vec<String> = view.view().visible_rows().map(|row| row.key("id")).collect();
//! assert_eq!(ids, ["c", "a"]);
//! ```

pub mod collate;
pub mod filter;
pub mod format;
pub mod pagination;
pub mod render;
pub mod row;
pub mod schema;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;

pub use collate::locale_compare;
pub use filter::{filter, filter_indices, row_matches};
pub use format::{FormatOptions, format_cell, format_value, render_cell};
pub use pagination::{PAGE_WINDOW_SIZE, Page, PageInfo, page_window, paginate};
pub use render::{
    CardField, HeaderCell, Layout, Rendered, RenderedCard, RenderedCell, RenderedRow,
    RenderedTable, SortIndicator, render_cards, render_table,
};
pub use row::{Record, Row};
pub use schema::{ColumnSchema, ColumnType, FilterFn, FormatFn, RenderFn, SortFn, TableSchema};
pub use selection::SelectionTracker;
pub use sort::{
    SortDirection, SortState, compare_rows, default_compare, merge_sort_by, sort, sort_indices,
};
pub use value::{Alignment, CellValue, CheckState};
pub use view::{TableView, ViewModel};
