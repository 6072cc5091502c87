//! Sort stage: single-column, type-aware, stable ordering.
//!
//! # Comparator resolution
//!
//! 1. A column's custom `sort_fn(a, b)` is used as-is for ascending order.
//!    For descending order it is called as `sort_fn(b, a)`; its result is
//!    never negated.
//! 2. Otherwise the column type picks a default comparator producing a signed
//!    difference, which is negated for descending order:
//!    - number / currency: `to_number(a) - to_number(b)`
//!    - date: difference of epoch milliseconds
//!    - boolean: `true` before `false`
//!    - text / custom: [`locale_compare`] of the string forms
//!
//! A difference of zero or `NaN` means "equal", so rows holding values that
//! cannot be coerced keep their relative input order.
//!
//! # Nulls
//!
//! Rows whose sort field is null always come after rows with a value, in both
//! directions and for custom comparators too.

use std::cmp::Ordering;

use horizon_tabular_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::collate::locale_compare;
use super::row::Row;
use super::schema::{ColumnSchema, ColumnType};
use super::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The active sort column and direction, or none.
///
/// Sorting is active only when both parts are set.
///
/// # Header activation cycle
///
/// ```
/// use horizon_tabular::model::{SortDirection, SortState};
///
/// let state = SortState::default();
/// let state = state.next_for("price");
/// assert_eq!(state, SortState::by("price", SortDirection::Asc));
/// let state = state.next_for("price");
/// assert_eq!(state, SortState::by("price", SortDirection::Desc));
/// let state = state.next_for("price");
/// assert!(!state.is_active());
///
/// // Switching columns always starts ascending.
/// let state = SortState::by("price", SortDirection::Desc).next_for("name");
/// assert_eq!(state, SortState::by("name", SortDirection::Asc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Key of the sorted column.
    pub column: Option<String>,
    /// Sort direction.
    pub direction: Option<SortDirection>,
}

impl SortState {
    /// No sorting: rows keep their (filtered) input order.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by `column` in `direction`.
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction: Some(direction),
        }
    }

    /// Returns `true` if both a column and a direction are set.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction.is_some()
    }

    /// The active column and direction, if sorting is active.
    pub fn active(&self) -> Option<(&str, SortDirection)> {
        match (&self.column, self.direction) {
            (Some(column), Some(direction)) => Some((column.as_str(), direction)),
            _ => None,
        }
    }

    /// The direction `column` is currently sorted in, if it is the active one.
    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        self.active()
            .filter(|(active, _)| *active == column)
            .map(|(_, direction)| direction)
    }

    /// The state after the header of `column` is activated: asc → desc → none
    /// on the same column, asc when switching columns.
    pub fn next_for(&self, column: &str) -> SortState {
        match self.direction_for(column) {
            None => SortState::by(column, SortDirection::Asc),
            Some(SortDirection::Asc) => SortState::by(column, SortDirection::Desc),
            Some(SortDirection::Desc) => SortState::unsorted(),
        }
    }
}

/// The type-driven default comparison of two non-null values, as a signed
/// difference (negative: `a` first).
pub fn default_compare(a: &CellValue, b: &CellValue, column_type: ColumnType) -> f64 {
    match column_type {
        ColumnType::Number | ColumnType::Currency => a.to_number() - b.to_number(),
        ColumnType::Date => a.to_timestamp_millis() - b.to_timestamp_millis(),
        ColumnType::Boolean => {
            let (a, b) = (a.is_truthy(), b.is_truthy());
            if a == b {
                0.0
            } else if a {
                -1.0
            } else {
                1.0
            }
        }
        ColumnType::Text | ColumnType::Custom => {
            let a = a.to_text().unwrap_or_default();
            let b = b.to_text().unwrap_or_default();
            match locale_compare(&a, &b) {
                Ordering::Less => -1.0,
                Ordering::Equal => 0.0,
                Ordering::Greater => 1.0,
            }
        }
    }
}

/// Maps a signed difference to an ordering. Zero and `NaN` are `Equal`.
pub fn ordering_from_difference(difference: f64) -> Ordering {
    if difference < 0.0 {
        Ordering::Less
    } else if difference > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Compares two rows on `column` in `direction`, applying the null-last rule
/// and the comparator resolution described in the module docs.
pub fn compare_rows<R: Row>(
    a: &R,
    b: &R,
    column: &ColumnSchema<R>,
    direction: SortDirection,
) -> Ordering {
    let value_a = a.field(column.key());
    let value_b = b.field(column.key());

    match (value_a.is_null(), value_b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    if let Some(sort_fn) = column.sort_fn() {
        return match direction {
            SortDirection::Asc => sort_fn(a, b),
            SortDirection::Desc => sort_fn(b, a),
        };
    }

    let difference = default_compare(&value_a, &value_b, column.column_type());
    match direction {
        SortDirection::Asc => ordering_from_difference(difference),
        SortDirection::Desc => ordering_from_difference(-difference),
    }
}

/// Resolves the column `state` sorts by. Returns `None` when sorting is
/// inactive, the column is unknown, or the column is not sortable.
pub fn resolve_sort_column<'c, R>(
    columns: &'c [ColumnSchema<R>],
    state: &SortState,
) -> Option<(&'c ColumnSchema<R>, SortDirection)> {
    let (key, direction) = state.active()?;
    let Some(column) = columns.iter().find(|c| c.key() == key) else {
        tracing::debug!(target: targets::SORT, column = key, "sort column not in schema, leaving order unchanged");
        return None;
    };
    if !column.is_sortable() {
        tracing::debug!(target: targets::SORT, column = key, "sort column is not sortable, leaving order unchanged");
        return None;
    }
    Some((column, direction))
}

/// Sorts source positions in place. `indices` index into `rows`.
pub fn sort_indices<R: Row>(
    rows: &[R],
    indices: &mut [usize],
    columns: &[ColumnSchema<R>],
    state: &SortState,
) {
    if let Some((column, direction)) = resolve_sort_column(columns, state) {
        tracing::debug!(target: targets::SORT, column = column.key(), ?direction, rows = indices.len(), "sorting rows");
        merge_sort_by(indices, |&a, &b| {
            compare_rows(&rows[a], &rows[b], column, direction)
        });
    }
}

/// Returns `rows` ordered by `state`. Inactive, unknown or non-sortable
/// columns return the input unchanged.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::{sort, ColumnSchema, ColumnType, Record, Row, SortDirection, SortState};
///
/// let rows = vec![
///     Record::new().with("id", "a").with("stock", 5),
///     Record::new().with("id", "b").with("stock", None::<i32>),
///     Record::new().with("id", "c").with("stock", 0),
/// ];
/// let columns = vec![ColumnSchema::new("stock").with_type(ColumnType::Number)];
///
/// let asc = sort(rows.iter().collect(), &columns, &SortState::by("stock", SortDirection::Asc));
/// let ids: Vec<_> = asc.iter().map(|r| r.key("id")).collect();
/// assert_eq!(ids, ["c", "a", "b"]);
/// ```
pub fn sort<'a, R: Row>(
    mut rows: Vec<&'a R>,
    columns: &[ColumnSchema<R>],
    state: &SortState,
) -> Vec<&'a R> {
    if let Some((column, direction)) = resolve_sort_column(columns, state) {
        merge_sort_by(&mut rows, |a, b| compare_rows(*a, *b, column, direction));
    }
    rows
}

/// Stable bottom-up merge sort.
///
/// Unlike `slice::sort_by`, this never panics when the comparator is not a
/// total order (NaN differences, inconsistent caller comparators); the result
/// is then some permutation of the input.
pub fn merge_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buffer = items.to_vec();
    let mut data_in_items = true;
    let mut width = 1;

    while width < len {
        {
            let (src, dst): (&[T], &mut [T]) = if data_in_items {
                (&*items, &mut buffer[..])
            } else {
                (&buffer[..], &mut *items)
            };

            let mut start = 0;
            while start < len {
                let mid = (start + width).min(len);
                let end = (start + 2 * width).min(len);
                merge(&src[start..mid], &src[mid..end], &mut dst[start..end], &mut compare);
                start = end;
            }
        }
        data_in_items = !data_in_items;
        width *= 2;
    }

    if !data_in_items {
        items.copy_from_slice(&buffer);
    }
}

fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Take from the right run only when strictly smaller, keeping ties in
        // input order.
        let take_right = i >= left.len()
            || (j < right.len() && compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}
