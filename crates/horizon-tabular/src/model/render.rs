//! Render models for the desktop table and the mobile card list.
//!
//! These are plain data: everything a presentation layer needs to draw a
//! page of a [`TableView`], with cell text already resolved
//! (`render` → `format` → type default).

use super::format::{FormatOptions, format_cell, render_cell};
use super::pagination::PageInfo;
use super::row::Row;
use super::schema::ColumnSchema;
use super::sort::{SortDirection, SortState};
use super::value::{Alignment, CheckState};
use super::view::{TableView, ViewModel};

/// Which presentation fits the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// A full table with headers.
    Desktop,
    /// One card per row.
    Cards,
}

impl Layout {
    /// `Desktop` at or above `breakpoint` pixels, `Cards` below.
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width >= breakpoint {
            Layout::Desktop
        } else {
            Layout::Cards
        }
    }
}

/// Sort marker shown on a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortIndicator {
    /// Not the sorted column.
    #[default]
    None,
    /// Sorted ascending.
    Ascending,
    /// Sorted descending.
    Descending,
}

impl SortIndicator {
    /// The indicator for `column` under `state`.
    pub fn for_column(column: &str, state: &SortState) -> Self {
        match state.direction_for(column) {
            Some(SortDirection::Asc) => SortIndicator::Ascending,
            Some(SortDirection::Desc) => SortIndicator::Descending,
            None => SortIndicator::None,
        }
    }

    /// The matching `aria-sort` attribute value.
    pub fn aria_sort(self) -> &'static str {
        match self {
            SortIndicator::None => "none",
            SortIndicator::Ascending => "ascending",
            SortIndicator::Descending => "descending",
        }
    }
}

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Alignment shared with the column's cells.
    pub align: Alignment,
    /// Whether activating the header changes the sort.
    pub sortable: bool,
    /// Sort arrow to draw.
    pub sort: SortIndicator,
}

/// One cell of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    /// Column key.
    pub key: String,
    /// Plain-text content (`format` or the type default).
    pub text: String,
    /// Display content (`render` if the column has one, else `text`).
    pub content: String,
    /// Horizontal alignment.
    pub align: Alignment,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Row key.
    pub key: String,
    /// Whether the row's checkbox is checked.
    pub selected: bool,
    /// Cells in column order.
    pub cells: Vec<RenderedCell>,
}

/// The desktop table for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// One header per column.
    pub headers: Vec<HeaderCell>,
    /// Rows on the current page.
    pub rows: Vec<RenderedRow>,
    /// Set when no row matched the query.
    pub empty_message: Option<String>,
    /// State of the "select all" checkbox, `None` when selection is disabled.
    pub select_all_state: Option<CheckState>,
    /// Position of this page in the result.
    pub page: PageInfo,
    /// Page numbers for the pagination buttons.
    pub page_window: Vec<usize>,
}

/// A labelled value on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    /// Column key.
    pub key: String,
    /// Column header, shown as the field label.
    pub label: String,
    /// Plain-text content.
    pub text: String,
    /// Display content.
    pub content: String,
}

/// One row rendered as a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    /// Row key.
    pub key: String,
    /// Whether the card is selected.
    pub selected: bool,
    /// Fields for the mobile columns, in column order.
    pub fields: Vec<CardField>,
}

/// A page rendered for a particular [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Desktop layout.
    Table(RenderedTable),
    /// Mobile layout.
    Cards {
        /// One card per row on the page.
        cards: Vec<RenderedCard>,
        /// Set when no row matched the query.
        empty_message: Option<String>,
    },
}

fn cell<R: Row>(column: &ColumnSchema<R>, row: &R, opts: &FormatOptions) -> RenderedCell {
    RenderedCell {
        key: column.key().to_owned(),
        text: format_cell(column, row, opts),
        content: render_cell(column, row, opts),
        align: column.alignment(),
    }
}

fn empty_message<R>(view: &TableView<R>, model: &ViewModel<R>) -> Option<String>
where
    R: Row + Clone + Send + Sync + 'static,
{
    model.is_empty().then(|| view.config().empty_message.clone())
}

/// Builds the desktop table for `model`, a page produced by `view`.
pub fn render_table<R>(view: &TableView<R>, model: &ViewModel<R>) -> RenderedTable
where
    R: Row + Clone + Send + Sync + 'static,
{
    let schema = view.schema();
    let sort = view.sort_state();
    let opts = view.format_options();
    let key_field = schema.key_field();

    let headers = schema
        .columns()
        .iter()
        .map(|column| HeaderCell {
            key: column.key().to_owned(),
            label: column.header().to_owned(),
            align: column.alignment(),
            sortable: column.is_sortable(),
            sort: if column.is_sortable() {
                SortIndicator::for_column(column.key(), &sort)
            } else {
                SortIndicator::None
            },
        })
        .collect();

    let rows = model
        .visible_rows()
        .map(|row| RenderedRow {
            key: row.key(key_field),
            selected: view.is_row_selected(row),
            cells: schema
                .columns()
                .iter()
                .map(|column| cell(column, row, &opts))
                .collect(),
        })
        .collect();

    let select_all_state = view
        .is_selectable()
        .then(|| view.check_state(model.visible_rows()));

    RenderedTable {
        headers,
        rows,
        empty_message: empty_message(view, model),
        select_all_state,
        page: model.page_info(),
        page_window: model.page_window().to_vec(),
    }
}

/// Builds one card per visible row, leaving out columns hidden on mobile.
pub fn render_cards<R>(view: &TableView<R>, model: &ViewModel<R>) -> Vec<RenderedCard>
where
    R: Row + Clone + Send + Sync + 'static,
{
    let schema = view.schema();
    let opts = view.format_options();
    let key_field = schema.key_field();

    model
        .visible_rows()
        .map(|row| RenderedCard {
            key: row.key(key_field),
            selected: view.is_row_selected(row),
            fields: schema
                .mobile_columns()
                .map(|column| {
                    let RenderedCell { key, text, content, .. } = cell(column, row, &opts);
                    CardField {
                        key,
                        label: column.header().to_owned(),
                        text,
                        content,
                    }
                })
                .collect(),
        })
        .collect()
}

/// Renders the current page of `view` for a viewport `width` pixels wide,
/// using the configured mobile breakpoint.
pub fn render<R>(view: &TableView<R>, width: u32) -> Rendered
where
    R: Row + Clone + Send + Sync + 'static,
{
    let model = view.view();
    match Layout::for_width(width, view.config().mobile_breakpoint) {
        Layout::Desktop => Rendered::Table(render_table(view, &model)),
        Layout::Cards => Rendered::Cards {
            cards: render_cards(view, &model),
            empty_message: empty_message(view, &model),
        },
    }
}
