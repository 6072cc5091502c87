//! Filter stage: free-text search across filterable columns.
//!
//! A row matches when ANY filterable column matches the query. A column with
//! a custom predicate answers for itself; every other column matches when the
//! string form of its value contains the query, ignoring case. Null values
//! never match.

use horizon_tabular_core::logging::targets;

use super::row::Row;
use super::schema::ColumnSchema;

/// Returns `true` if `row` matches `query` on at least one filterable column.
///
/// An empty query matches every row.
pub fn row_matches<R: Row>(row: &R, columns: &[ColumnSchema<R>], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    matches_lowercased(row, columns, query, &needle)
}

fn matches_lowercased<R: Row>(
    row: &R,
    columns: &[ColumnSchema<R>],
    query: &str,
    needle: &str,
) -> bool {
    columns
        .iter()
        .filter(|column| column.is_filterable())
        .any(|column| match column.filter_fn() {
            Some(predicate) => predicate(row, query),
            None => row
                .field(column.key())
                .to_text()
                .is_some_and(|text| text.to_lowercase().contains(needle)),
        })
}

/// Returns the positions (into `rows`) of every row matching `query`, in
/// input order.
pub fn filter_indices<R: Row>(rows: &[R], columns: &[ColumnSchema<R>], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = query.to_lowercase();
    let matched: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_lowercased(*row, columns, query, &needle))
        .map(|(index, _)| index)
        .collect();

    tracing::debug!(
        target: targets::FILTER,
        query,
        total = rows.len(),
        matched = matched.len(),
        "filtered rows"
    );
    matched
}

/// Returns the rows matching `query`, in input order.
///
/// With an empty query every row is returned unchanged.
///
/// # Example
///
/// ```
/// use horizon_tabular::model::{filter, ColumnSchema, Record};
///
/// let rows = vec![
///     Record::new().with("name", "Blue Widget"),
///     Record::new().with("name", "Red Gadget"),
/// ];
/// let columns = vec![ColumnSchema::new("name")];
///
/// let hits = filter(&rows, &columns, "WIDGET");
/// assert_eq!(hits.len(), 1);
/// ```
pub fn filter<'a, R: Row>(rows: &'a [R], columns: &[ColumnSchema<R>], query: &str) -> Vec<&'a R> {
    filter_indices(rows, columns, query)
        .into_iter()
        .map(|index| &rows[index])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::Record;
    use crate::model::schema::ColumnType;

    fn rows() -> Vec<Record> {
        vec![
            Record::new().with("id", "a").with("name", "Blue Widget").with("stock", 5),
            Record::new().with("id", "b").with("name", "Red Gadget").with("stock", None::<i32>),
            Record::new().with("id", "c").with("name", "Green Widget").with("stock", 150),
        ]
    }

    fn columns() -> Vec<ColumnSchema<Record>> {
        vec![
            ColumnSchema::new("name"),
            ColumnSchema::new("stock").with_type(ColumnType::Number),
        ]
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.key("id")).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let data = rows();
        assert_eq!(ids(&filter(&data, &columns(), "")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let data = rows();
        assert_eq!(ids(&filter(&data, &columns(), "widget")), vec!["a", "c"]);
        assert_eq!(ids(&filter(&data, &columns(), "GREEN")), vec!["c"]);
    }

    #[test]
    fn test_or_across_columns() {
        let data = rows();
        // "5" hits stock 5 and stock 150, nothing in names.
        assert_eq!(ids(&filter(&data, &columns(), "5")), vec!["a", "c"]);
    }

    #[test]
    fn test_null_never_matches() {
        let data = rows();
        let columns = vec![ColumnSchema::<Record>::new("stock")];
        assert!(!row_matches(&data[1], &columns, "null"));
        assert!(!row_matches(&data[1], &columns, "—"));
    }

    #[test]
    fn test_nested_json_searched_as_json_text() {
        let row = serde_json::json!({
            "id": "a",
            "tags": ["red", "blue"],
            "dims": { "w": 2 }
        });
        let columns = vec![
            ColumnSchema::<serde_json::Value>::new("tags"),
            ColumnSchema::new("dims"),
        ];
        assert!(row_matches(&row, &columns, "[\"red\""));
        assert!(row_matches(&row, &columns, "\"w\":2"));
        assert!(!row_matches(&row, &columns, "red,blue"));
        assert!(!row_matches(&row, &columns, "object"));
    }

    #[test]
    fn test_non_filterable_columns_skipped() {
        let data = rows();
        let columns = vec![
            ColumnSchema::new("name").filterable(false),
            ColumnSchema::new("id"),
        ];
        assert!(filter(&data, &columns, "widget").is_empty());
        assert_eq!(ids(&filter(&data, &columns, "b")), vec!["b"]);
    }

    #[test]
    fn test_custom_filter_fn_is_authoritative() {
        let data = rows();
        // Matches rows whose stock is at least the query, ignoring the text.
        let columns = vec![ColumnSchema::<Record>::new("stock").with_filter_fn(|row, query| {
            let threshold: f64 = query.parse().unwrap_or(f64::INFINITY);
            row.field("stock").to_number() >= threshold
        })];
        assert_eq!(ids(&filter(&data, &columns, "100")), vec!["c"]);
        // The default substring rule would match "5" in "5" and "150".
        assert_eq!(ids(&filter(&data, &columns, "5")), vec!["a", "c"]);
        assert!(filter(&data, &columns, "151").is_empty());
    }

    #[test]
    fn test_custom_filter_receives_raw_query() {
        let data = rows();
        let columns = vec![ColumnSchema::<Record>::new("name")
            .with_filter_fn(|row, query| query == "Exact" && row.key("id") == "a")];
        assert_eq!(ids(&filter(&data, &columns, "Exact")), vec!["a"]);
        assert!(filter(&data, &columns, "exact").is_empty());
    }

    #[test]
    fn test_filter_indices_positions() {
        let data = rows();
        assert_eq!(filter_indices(&data, &columns(), "red"), vec![1]);
    }

    #[test]
    fn test_monotonic_as_query_grows() {
        let data = rows();
        let queries = ["", "w", "wi", "wid", "widg", "widget", "widgets"];
        let counts: Vec<usize> = queries
            .iter()
            .map(|q| filter(&data, &columns(), q).len())
            .collect();
        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{counts:?}");
    }
}
