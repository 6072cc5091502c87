//! Horizon Tabular - a schema-driven tabular view engine.
//!
//! Give it a dataset and a declarative column schema; it produces a
//! searched, sorted, paginated and optionally selectable view, plus render
//! models for a desktop table or a mobile card list.
//!
//! # Example
//!
//! ```
//! use horizon_tabular::prelude::*;
//!
//! let schema = TableSchema::new(
//!     vec![
//!         ColumnSchema::new("name").with_header("Product"),
//!         ColumnSchema::new("price").with_type(ColumnType::Currency),
//!     ],
//!     "id",
//! )?;
//! let rows = vec![
//!     Record::new().with("id", 1).with("name", "Blue Widget").with("price", 19.99),
//!     Record::new().with("id", 2).with("name", "Red Gadget").with("price", 1250),
//! ];
//!
//! let view = TableView::with_config(schema, rows, TableConfig::default().with_page_size(25))?;
//! view.set_query("gadget");
//!
//! let table = render_table(&view, &view.view());
//! assert_eq!(table.rows[0].cells[1].text, "$1,250.00");
//! # Ok::<(), horizon_tabular::Error>(())
//! ```
//!
//! # Crate Layout
//!
//! - [`model`]: values, rows, schemas, the pipeline stages, [`TableView`]
//!   and render models
//! - [`config`]: [`TableConfig`] and TOML loading
//! - [`error`]: the [`Error`] type
//!
//! The reactive building blocks (signals, properties, memo cells, logging
//! targets) come from the re-exported [`horizon_tabular_core`].
//!
//! [`TableView`]: model::TableView

pub mod config;
pub mod error;
pub mod model;

pub use config::TableConfig;
pub use error::{Error, Result};
pub use horizon_tabular_core;

/// Commonly used types.
pub mod prelude {
    pub use crate::config::TableConfig;
    pub use crate::error::{Error, Result};
    pub use crate::model::{
        Alignment, CellValue, CheckState, ColumnSchema, ColumnType, Layout, Record, Row,
        SortDirection, SortState, TableSchema, TableView, ViewModel, render_cards, render_table,
    };
    pub use horizon_tabular_core::Signal;
}
