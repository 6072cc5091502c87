//! Declarative column and table schemas.
//!
//! A [`ColumnSchema`] is a plain data record: a field key, a type that drives
//! the default formatting and comparison, a few flags, and optional caller
//! supplied functions. When a function is present it wins over the
//! type-driven default; there is no other dispatch.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::value::{Alignment, CellValue};
use crate::error::{Error, Result};

/// Caller-supplied comparator. Must return how `a` orders relative to `b`
/// for an ascending sort.
pub type SortFn<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Caller-supplied predicate deciding whether a row matches the search query.
pub type FilterFn<R> = Arc<dyn Fn(&R, &str) -> bool + Send + Sync>;

/// Caller-supplied plain-text formatter: `(value, row) -> text`.
pub type FormatFn<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// Caller-supplied cell renderer: `(value, row) -> cell content`.
pub type RenderFn<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// The kind of data a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text. Compared with a locale-aware string comparison.
    #[default]
    Text,
    /// Numeric values.
    Number,
    /// Dates and timestamps.
    Date,
    /// Booleans. `true` sorts first in ascending order.
    Boolean,
    /// Monetary amounts. Compared like numbers.
    Currency,
    /// Caller-defined content; compared and formatted like text unless
    /// overridden.
    Custom,
}

impl ColumnType {
    /// Returns `true` for types compared by numeric subtraction.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Currency)
    }

    /// The alignment cells of this type get when none is set explicitly.
    pub fn default_alignment(&self) -> Alignment {
        if self.is_numeric() {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

/// Describes one displayed column.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::{ColumnSchema, ColumnType, Record};
///
/// let stock = ColumnSchema::<Record>::new("stock")
///     .with_header("In stock")
///     .with_type(ColumnType::Number)
///     .hide_on_mobile(true);
/// assert!(stock.is_sortable());
/// assert_eq!(stock.header(), "In stock");
/// ```
pub struct ColumnSchema<R> {
    key: String,
    header: Option<String>,
    column_type: ColumnType,
    sortable: bool,
    filterable: bool,
    hide_on_mobile: bool,
    align: Option<Alignment>,
    sort_fn: Option<SortFn<R>>,
    filter_fn: Option<FilterFn<R>>,
    format: Option<FormatFn<R>>,
    render: Option<RenderFn<R>>,
}

impl<R> ColumnSchema<R> {
    /// Creates a sortable, filterable text column reading field `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            column_type: ColumnType::Text,
            sortable: true,
            filterable: true,
            hide_on_mobile: false,
            align: None,
            sort_fn: None,
            filter_fn: None,
            format: None,
            render: None,
        }
    }

    /// Sets the header label.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Sets the column type.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Enables or disables sorting on this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Includes or excludes this column from the search.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Hides this column in the card layout.
    pub fn hide_on_mobile(mut self, hide: bool) -> Self {
        self.hide_on_mobile = hide;
        self
    }

    /// Overrides the cell alignment.
    pub fn with_alignment(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Sets a custom comparator.
    ///
    /// For descending sorts the engine calls the comparator with its
    /// arguments swapped rather than reversing its result.
    pub fn with_sort_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    {
        self.sort_fn = Some(Arc::new(f));
        self
    }

    /// Sets a custom search predicate. Its answer is authoritative for this
    /// column.
    pub fn with_filter_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&R, &str) -> bool + Send + Sync + 'static,
    {
        self.filter_fn = Some(Arc::new(f));
        self
    }

    /// Sets a custom plain-text formatter.
    pub fn with_format<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(f));
        self
    }

    /// Sets a custom cell renderer.
    pub fn with_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// The field key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header label, falling back to the key.
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }

    /// The column type.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether the column takes part in search.
    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Whether the card layout skips this column.
    pub fn is_hidden_on_mobile(&self) -> bool {
        self.hide_on_mobile
    }

    /// Effective alignment.
    pub fn alignment(&self) -> Alignment {
        self.align.unwrap_or_else(|| self.column_type.default_alignment())
    }

    /// The custom comparator, if any.
    pub fn sort_fn(&self) -> Option<&SortFn<R>> {
        self.sort_fn.as_ref()
    }

    /// The custom search predicate, if any.
    pub fn filter_fn(&self) -> Option<&FilterFn<R>> {
        self.filter_fn.as_ref()
    }

    /// The custom formatter, if any.
    pub fn format_fn(&self) -> Option<&FormatFn<R>> {
        self.format.as_ref()
    }

    /// The custom renderer, if any.
    pub fn render_fn(&self) -> Option<&RenderFn<R>> {
        self.render.as_ref()
    }
}

impl<R> Clone for ColumnSchema<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            column_type: self.column_type,
            sortable: self.sortable,
            filterable: self.filterable,
            hide_on_mobile: self.hide_on_mobile,
            align: self.align,
            sort_fn: self.sort_fn.clone(),
            filter_fn: self.filter_fn.clone(),
            format: self.format.clone(),
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("key", &self.key)
            .field("header", &self.header())
            .field("column_type", &self.column_type)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hide_on_mobile", &self.hide_on_mobile)
            .field("sort_fn", &self.sort_fn.is_some())
            .field("filter_fn", &self.filter_fn.is_some())
            .field("format", &self.format.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// The full set of columns plus the field that identifies rows.
///
/// Every row must expose a value at `key_field` whose string coercion is
/// unique across the dataset. The engine does not check this; duplicate keys
/// make selection ambiguous.
pub struct TableSchema<R> {
    columns: Vec<ColumnSchema<R>>,
    key_field: String,
}

impl<R> TableSchema<R> {
    /// Creates a schema, validating that the key field is named and that
    /// column keys are non-empty and unique.
    pub fn new(columns: Vec<ColumnSchema<R>>, key_field: impl Into<String>) -> Result<Self> {
        let key_field = key_field.into();
        if key_field.is_empty() {
            return Err(Error::EmptyKeyField);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(Error::EmptyColumnKey { index });
            }
            if !seen.insert(column.key.as_str()) {
                return Err(Error::duplicate_column(&column.key));
            }
        }

        Ok(Self { columns, key_field })
    }

    /// All columns, in display order.
    pub fn columns(&self) -> &[ColumnSchema<R>] {
        &self.columns
    }

    /// The field that identifies rows.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Finds a column by key.
    pub fn column(&self, key: &str) -> Option<&ColumnSchema<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Columns shown in the card layout.
    pub fn mobile_columns(&self) -> impl Iterator<Item = &ColumnSchema<R>> {
        self.columns.iter().filter(|c| !c.hide_on_mobile)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R> Clone for TableSchema<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            key_field: self.key_field.clone(),
        }
    }
}

impl<R> fmt::Debug for TableSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSchema")
            .field("columns", &self.columns)
            .field("key_field", &self.key_field)
            .finish()
    }
}
