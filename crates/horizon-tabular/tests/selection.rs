//! Selection behaviour across query, sort and page changes.

use std::sync::Arc;

use horizon_tabular::prelude::*;
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_tabular::selection=debug")
        .with_test_writer()
        .try_init();
}

fn orders() -> Vec<Record> {
    (1..=25)
        .map(|i| {
            Record::new()
                .with("order", i)
                .with("customer", if i % 2 == 0 { "Acme" } else { "Globex" })
                .with("total", (i * 13 % 40) as f64)
        })
        .collect()
}

fn view() -> TableView<Record> {
    let schema = TableSchema::new(
        vec![
            ColumnSchema::new("order").with_type(ColumnType::Number),
            ColumnSchema::new("customer"),
            ColumnSchema::new("total").with_type(ColumnType::Currency),
        ],
        "order",
    )
    .unwrap();
    TableView::new(schema, orders())
}

fn record_selection(view: &TableView<Record>) -> Arc<Mutex<Vec<Vec<String>>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    view.selection_changed.connect(move |rows: &Vec<Record>| {
        log_clone
            .lock()
            .push(rows.iter().map(|r| r.key("order")).collect());
    });
    log
}

#[test]
fn test_selected_row_survives_view_changes() {
    init_tracing();
    let view = view();
    view.select_row("8", true);

    view.set_query("globex");
    view.activate_header("total");
    view.set_page(2);
    view.set_query("acme");

    let mut found = false;
    for page in 1..=view.view().total_pages() {
        view.set_page(page);
        for row in view.view().visible_rows() {
            if row.key("order") == "8" {
                assert!(view.is_row_selected(row));
                found = true;
            } else {
                assert!(!view.is_row_selected(row));
            }
        }
    }
    assert!(found);
}

#[test]
fn test_select_visible_then_global_clear() {
    init_tracing();
    let view = view();
    let log = record_selection(&view);

    view.select_row("25", true);
    view.select_visible(true);
    assert_eq!(view.selected_count(), 11);
    assert_eq!(view.select_all_state(), CheckState::Checked);

    view.next_page();
    assert_eq!(view.select_all_state(), CheckState::Unchecked);

    // Deselect-all on page 2 still clears rows picked on page 1.
    view.select_visible(false);
    assert_eq!(view.selected_count(), 0);

    let log = log.lock();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], vec!["25"]);
    assert_eq!(log[1].len(), 11);
    assert_eq!(log[1][0], "1");
    assert_eq!(log[1][10], "25");
    assert!(log[2].is_empty());
}

#[test]
fn test_selection_reports_full_dataset_rows() {
    init_tracing();
    let view = view();
    let log = record_selection(&view);

    view.set_query("acme");
    let model = view.view();
    let first = model.row(0).unwrap().key("order");
    view.select_row(&first, true);

    // The selected row is reported even after it is filtered out.
    view.set_query("globex");
    assert_eq!(view.selected_rows().len(), 1);
    view.select_row("1", true);
    assert_eq!(log.lock().last().unwrap(), &vec!["1".to_string(), first]);
}

#[test]
fn test_selection_keeps_keys_missing_from_new_rows() {
    init_tracing();
    let view = view();
    view.select_row("3", true);
    view.select_row("20", true);

    view.set_rows(orders().into_iter().take(10).collect::<Vec<_>>());
    assert_eq!(view.selected_count(), 2);
    let keys: Vec<String> = view.selected_rows().iter().map(|r| r.key("order")).collect();
    assert_eq!(keys, vec!["3"]);

    view.set_rows(orders());
    assert_eq!(view.selected_rows().len(), 2);
}

#[test]
fn test_toggle_and_clear() {
    init_tracing();
    let view = view();
    let log = record_selection(&view);

    assert!(view.toggle_row("4"));
    assert!(view.is_selected("4"));
    assert!(view.toggle_row("4"));
    assert!(!view.is_selected("4"));
    assert!(!view.clear_selection());

    view.toggle_row("9");
    assert!(view.clear_selection());
    assert_eq!(log.lock().len(), 4);
}
