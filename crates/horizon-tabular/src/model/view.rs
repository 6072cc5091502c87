//! The table view engine.
//!
//! [`TableView`] owns a dataset, its schema and the interactive state (search
//! query, sort, page, selection) and composes the pipeline stages into a
//! [`ViewModel`]:
//!
//! ```text
//! rows ─► filter ─► sort ─► paginate ─► ViewModel
//!                                 ▲
//!            selection ───────────┘ (reconciled by row key)
//! ```
//!
//! # Memoization
//!
//! The filtered and sorted mapping is cached on `(rows generation, query,
//! sort)`, and the page view on `(mapping, current page, page size)`.
//! Calling [`TableView::view`] repeatedly without changing any input returns
//! the same `Arc<ViewModel>` without re-running filter or sort. Replacing the
//! rows or the schema starts a new generation.
//!
//! # Page reset
//!
//! Whenever the number of filtered results differs from the previous
//! computation, the current page goes back to 1 and `page_changed` fires.
//!
//! # Signals
//!
//! - `query_changed`: the search query changed
//! - `sort_changed`: the sort state changed
//! - `page_changed`: the current page changed
//! - `selection_changed`: the selection set changed, with the selected rows
//!   resolved against the full dataset
//!
//! Signals are emitted with no internal lock held, so slots may call back
//! into the view.
//!
//! # Example
//!
//! ```
//! use horizon_tabular::model::{ColumnSchema, ColumnType, Record, Row, TableSchema, TableView};
//!
//! let schema = TableSchema::new(
//!     vec![
//!         ColumnSchema::new("name"),
//!         ColumnSchema::new("stock").with_type(ColumnType::Number),
//!     ],
//!     "id",
//! )
//! .unwrap();
//! let rows: Vec<Record> = (1..=25)
//!     .map(|i| Record::new().with("id", i).with("name", format!("Item {i}")).with("stock", i * 10))
//!     .collect();
//!
//! let view = TableView::new(schema, rows);
//! view.activate_header("stock"); // ascending
//! view.activate_header("stock"); // descending
//!
//! let model = view.view();
//! assert_eq!(model.total_pages(), 3);
//! assert_eq!(model.visible_rows().next().unwrap().key("id"), "25");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_tabular_core::logging::targets;
use horizon_tabular_core::{Memo, PerfSpan, Property, Signal};
use parking_lot::{Mutex, RwLock};

use crate::config::TableConfig;
use crate::error::{Error, Result};

use super::filter::filter_indices;
use super::format::FormatOptions;
use super::pagination::PageInfo;
use super::row::Row;
use super::schema::TableSchema;
use super::selection::SelectionTracker;
use super::sort::{SortState, sort_indices};
use super::value::CheckState;

/// Inputs of the filtered and sorted mapping.
#[derive(Debug, Clone, PartialEq)]
struct MappingKey {
    generation: u64,
    query: String,
    sort: SortState,
}

/// Inputs of one page view.
#[derive(Debug, Clone, PartialEq)]
struct ViewKey {
    mapping: MappingKey,
    page: usize,
    page_size: usize,
}

/// One computed page of a [`TableView`].
///
/// A view model is an immutable snapshot; later changes to the table view
/// produce a new one.
#[derive(Debug, Clone)]
pub struct ViewModel<R> {
    rows: Arc<Vec<R>>,
    page: Vec<usize>,
    info: PageInfo,
    page_window: Vec<usize>,
}

impl<R> ViewModel<R> {
    /// The rows on the current page, in display order.
    pub fn visible_rows(&self) -> impl ExactSizeIterator<Item = &R> + '_ {
        self.page.iter().map(move |&index| &self.rows[index])
    }

    /// Positions of the visible rows in the full dataset.
    pub fn visible_indices(&self) -> &[usize] {
        &self.page
    }

    /// The visible row at `position` on the page.
    pub fn row(&self, position: usize) -> Option<&R> {
        self.page.get(position).map(|&index| &self.rows[index])
    }

    /// Number of rows on the current page.
    pub fn len(&self) -> usize {
        self.page.len()
    }

    /// Returns `true` if no row matched the query. Callers show the empty
    /// state in that case.
    pub fn is_empty(&self) -> bool {
        self.info.total_items() == 0
    }

    /// Number of rows matching the query across all pages.
    pub fn total_result_count(&self) -> usize {
        self.info.total_items()
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.info.total_pages()
    }

    /// Page numbers to show in pagination controls.
    pub fn page_window(&self) -> &[usize] {
        &self.page_window
    }

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.info.current_page()
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.info.page_size()
    }

    /// Navigation details for this page.
    pub fn page_info(&self) -> PageInfo {
        self.info
    }
}

/// A searchable, sortable, paginated and selectable view over a dataset.
///
/// All methods take `&self`; state lives behind locks so a view can be
/// shared across threads in an `Arc`.
pub struct TableView<R: Row + Clone + Send + Sync + 'static> {
    schema: RwLock<Arc<TableSchema<R>>>,
    config: TableConfig,
    rows: RwLock<Arc<Vec<R>>>,
    generation: AtomicU64,

    query: Property<String>,
    sort: Property<SortState>,
    current_page: Property<usize>,
    page_size: Property<usize>,
    last_result_len: Mutex<Option<usize>>,

    mapping_cache: Memo<MappingKey, Arc<Vec<usize>>>,
    view_cache: Memo<ViewKey, Arc<ViewModel<R>>>,

    selection: RwLock<SelectionTracker>,

    /// Emitted when the search query changes, with the new query.
    pub query_changed: Signal<String>,
    /// Emitted when the sort state changes, with the new state.
    pub sort_changed: Signal<SortState>,
    /// Emitted when the current page changes, with the new page number.
    pub page_changed: Signal<usize>,
    /// Emitted when the selection set changes, with every selected row of the
    /// full dataset in dataset order.
    pub selection_changed: Signal<Vec<R>>,
}

impl<R: Row + Clone + Send + Sync + 'static> TableView<R> {
    /// Creates a view with the default [`TableConfig`].
    pub fn new(schema: TableSchema<R>, rows: impl Into<Arc<Vec<R>>>) -> Self {
        Self::build(schema, rows.into(), TableConfig::default())
    }

    /// Creates a view with an explicit configuration.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(
        schema: TableSchema<R>,
        rows: impl Into<Arc<Vec<R>>>,
        config: TableConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(schema, rows.into(), config))
    }

    fn build(schema: TableSchema<R>, rows: Arc<Vec<R>>, config: TableConfig) -> Self {
        let mut selection = SelectionTracker::new(schema.key_field());
        selection.set_enabled(config.selectable);

        tracing::debug!(
            target: targets::VIEW,
            rows = rows.len(),
            columns = schema.len(),
            page_size = config.page_size,
            "creating table view"
        );

        let view = Self {
            schema: RwLock::new(Arc::new(schema)),
            rows: RwLock::new(rows),
            generation: AtomicU64::new(0),
            query: Property::new(String::new()),
            sort: Property::new(SortState::unsorted()),
            current_page: Property::new(1),
            page_size: Property::new(config.page_size),
            last_result_len: Mutex::new(None),
            mapping_cache: Memo::new(),
            view_cache: Memo::new(),
            selection: RwLock::new(selection),
            config,
            query_changed: Signal::new(),
            sort_changed: Signal::new(),
            page_changed: Signal::new(),
            selection_changed: Signal::new(),
        };
        view.sync_page();
        view
    }

    // =========================================================================
    // Data and Schema
    // =========================================================================

    /// The configuration the view was created with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Formatting options derived from the configuration.
    pub fn format_options(&self) -> FormatOptions {
        self.config.format_options()
    }

    /// The current schema.
    pub fn schema(&self) -> Arc<TableSchema<R>> {
        self.schema.read().clone()
    }

    /// The full, unfiltered dataset.
    pub fn rows(&self) -> Arc<Vec<R>> {
        self.rows.read().clone()
    }

    /// Replaces the dataset. Selection keys are kept.
    pub fn set_rows(&self, rows: impl Into<Arc<Vec<R>>>) {
        let rows = rows.into();
        let count = rows.len();
        {
            let mut current = self.rows.write();
            *current = rows;
            self.generation.fetch_add(1, Ordering::AcqRel);
        }
        tracing::debug!(target: targets::VIEW, rows = count, "dataset replaced");
        self.sync_page();
    }

    /// Replaces the schema and drops every memoized result.
    ///
    /// If the key field changes, the selection is cleared since the old keys
    /// no longer identify rows.
    pub fn set_schema(&self, schema: TableSchema<R>) {
        let key_field = schema.key_field().to_owned();
        {
            let _rows = self.rows.write();
            *self.schema.write() = Arc::new(schema);
            self.generation.fetch_add(1, Ordering::AcqRel);
        }
        self.mapping_cache.invalidate();
        self.view_cache.invalidate();
        tracing::debug!(target: targets::VIEW, key_field = %key_field, "schema replaced");

        let selection_cleared = {
            let mut selection = self.selection.write();
            if selection.key_field() == key_field {
                false
            } else {
                let had_keys = !selection.is_empty();
                let mut replacement = SelectionTracker::new(key_field);
                replacement.set_enabled(selection.is_enabled());
                *selection = replacement;
                had_keys
            }
        };
        if selection_cleared {
            self.selection_changed.emit(Vec::new());
        }
        self.sync_page();
    }

    // =========================================================================
    // Query
    // =========================================================================

    /// The current search query.
    pub fn query(&self) -> String {
        self.query.get()
    }

    /// Sets the search query.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        if self.query.set(query.clone()) {
            tracing::debug!(target: targets::VIEW, query = %query, "query changed");
            self.query_changed.emit(query);
            self.sync_page();
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// The current sort state.
    pub fn sort_state(&self) -> SortState {
        self.sort.get()
    }

    /// Sets the sort state directly.
    ///
    /// Sorting by an unknown or non-sortable column leaves rows in their
    /// filtered order.
    pub fn set_sort(&self, state: SortState) {
        if self.sort.set(state.clone()) {
            tracing::debug!(target: targets::VIEW, column = ?state.column, direction = ?state.direction, "sort changed");
            self.sort_changed.emit(state);
            self.sync_page();
        }
    }

    /// Handles a click on the header of `column`: cycles asc → desc → none,
    /// or starts at asc when switching columns. Returns the new state.
    ///
    /// Headers of unknown or non-sortable columns do nothing.
    pub fn activate_header(&self, column: &str) -> SortState {
        let sortable = self
            .schema
            .read()
            .column(column)
            .is_some_and(|c| c.is_sortable());
        if !sortable {
            tracing::warn!(target: targets::VIEW, column, "ignoring header activation on a non-sortable column");
            return self.sort_state();
        }

        let next = self.sort.with(|state| state.next_for(column));
        tracing::debug!(target: targets::VIEW, column, direction = ?next.direction, "header activated");
        self.set_sort(next.clone());
        next
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page.get()
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Goes to `page` (1-based, 0 is treated as 1). Pages past the end are
    /// allowed and show no rows.
    pub fn set_page(&self, page: usize) {
        let page = page.max(1);
        if self.current_page.set(page) {
            tracing::debug!(target: targets::VIEW, page, "page changed");
            self.page_changed.emit(page);
        }
    }

    /// Goes to the next page. Returns `false` on the last page.
    pub fn next_page(&self) -> bool {
        let info = self.view().page_info();
        if info.has_next() {
            self.set_page(info.current_page() + 1);
            true
        } else {
            false
        }
    }

    /// Goes to the previous page. Returns `false` on the first page.
    pub fn previous_page(&self) -> bool {
        let page = self.current_page();
        if page > 1 {
            self.set_page(page - 1);
            true
        } else {
            false
        }
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize { size: page_size });
        }
        if self.page_size.set(page_size) {
            tracing::debug!(target: targets::VIEW, page_size, "page size changed");
            self.set_page(1);
        }
        Ok(())
    }

    // =========================================================================
    // View Computation
    // =========================================================================

    /// The current page of filtered, sorted rows.
    ///
    /// Returns the cached view model when no input changed since the last
    /// call.
    pub fn view(&self) -> Arc<ViewModel<R>> {
        let (mapping_key, rows, mapping) = self.mapping();
        let key = ViewKey {
            mapping: mapping_key,
            page: self.current_page.get(),
            page_size: self.page_size.get(),
        };

        if let Some(model) = self.view_cache.peek(&key) {
            tracing::trace!(target: targets::VIEW, page = key.page, "view cache hit");
            return model;
        }

        let info = PageInfo::new(mapping.len(), key.page, key.page_size);
        let model = Arc::new(ViewModel {
            page: mapping[info.range()].to_vec(),
            page_window: info.page_window(),
            rows,
            info,
        });
        tracing::debug!(
            target: targets::VIEW,
            page = info.current_page(),
            total_pages = info.total_pages(),
            visible = model.len(),
            "view recomputed"
        );
        self.view_cache.get_or_compute(&key, || model)
    }

    /// Number of rows matching the current query.
    pub fn result_count(&self) -> usize {
        self.mapping().2.len()
    }

    fn mapping(&self) -> (MappingKey, Arc<Vec<R>>, Arc<Vec<usize>>) {
        let (rows, generation) = {
            let rows = self.rows.read();
            (rows.clone(), self.generation.load(Ordering::Acquire))
        };
        let key = MappingKey {
            generation,
            query: self.query.get(),
            sort: self.sort.get(),
        };

        if let Some(mapping) = self.mapping_cache.peek(&key) {
            tracing::trace!(target: targets::VIEW, generation, "result mapping cache hit");
            return (key, rows, mapping);
        }

        let schema = self.schema();
        let mapping = {
            let _span = PerfSpan::new("filter_and_sort");
            let mut indices = filter_indices(&rows, schema.columns(), &key.query);
            sort_indices(&rows, &mut indices, schema.columns(), &key.sort);
            Arc::new(indices)
        };
        tracing::debug!(
            target: targets::VIEW,
            generation,
            total = rows.len(),
            results = mapping.len(),
            "result mapping recomputed"
        );
        let mapping = self.mapping_cache.get_or_compute(&key, || mapping);
        (key, rows, mapping)
    }

    /// Recomputes the result count and resets to the first page when it
    /// changed.
    fn sync_page(&self) {
        let count = self.mapping().2.len();
        let previous = self.last_result_len.lock().replace(count);

        if previous.is_some_and(|previous| previous != count) && self.current_page.set(1) {
            tracing::debug!(
                target: targets::VIEW,
                previous = ?previous,
                count,
                "result count changed, back to the first page"
            );
            self.page_changed.emit(1);
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn update_selection(&self, mutate: impl FnOnce(&mut SelectionTracker) -> bool) -> bool {
        let changed = mutate(&mut *self.selection.write());
        if changed {
            let selected = self.selected_rows();
            self.selection_changed.emit(selected);
        }
        changed
    }

    /// Selects or deselects the row with `key`. Returns `true` if the
    /// selection changed.
    pub fn select_row(&self, key: &str, included: bool) -> bool {
        self.update_selection(|selection| selection.select_row(key, included))
    }

    /// Flips the selection of the row with `key`.
    pub fn toggle_row(&self, key: &str) -> bool {
        self.update_selection(|selection| selection.toggle_row(key))
    }

    /// With `included == true`, adds `rows` to the selection. With
    /// `included == false`, clears the whole selection.
    pub fn select_all<'a, I>(&self, rows: I, included: bool) -> bool
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        self.update_selection(|selection| selection.select_all(rows, included))
    }

    /// [`select_all`](Self::select_all) over the rows of the current page.
    pub fn select_visible(&self, included: bool) -> bool {
        let model = self.view();
        self.select_all(model.visible_rows(), included)
    }

    /// Clears the selection.
    pub fn clear_selection(&self) -> bool {
        self.update_selection(|selection| selection.clear())
    }

    /// Returns `true` if the row with `key` is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.read().is_selected(key)
    }

    /// Returns `true` if `row` is selected.
    pub fn is_row_selected(&self, row: &R) -> bool {
        self.selection.read().is_row_selected(row)
    }

    /// Returns `true` if selection operations take effect.
    pub fn is_selectable(&self) -> bool {
        self.selection.read().is_enabled()
    }

    /// The selected keys, sorted.
    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.read().selected_keys()
    }

    /// Number of selected keys.
    pub fn selected_count(&self) -> usize {
        self.selection.read().selected_count()
    }

    /// Every selected row in the full dataset, in dataset order.
    pub fn selected_rows(&self) -> Vec<R> {
        let rows = self.rows();
        self.selection.read().resolve(&rows)
    }

    /// State of a "select all" checkbox over `rows`.
    pub fn check_state<'a, I>(&self, rows: I) -> CheckState
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        self.selection.read().check_state(rows)
    }

    /// State of the "select all" checkbox for the current page.
    pub fn select_all_state(&self) -> CheckState {
        let model = self.view();
        self.check_state(model.visible_rows())
    }
}

impl<R: Row + Clone + Send + Sync + 'static> fmt::Debug for TableView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("rows", &self.rows.read().len())
            .field("query", &self.query.get())
            .field("sort", &self.sort.get())
            .field("current_page", &self.current_page.get())
            .field("page_size", &self.page_size.get())
            .field("selected", &self.selection.read().selected_count())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(TableView<super::row::Record>: Send, Sync);
static_assertions::assert_impl_all!(ViewModel<super::row::Record>: Send, Sync);
