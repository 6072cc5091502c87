//! Integration tests combining properties, signals and memo cells the way a
//! view engine does.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_tabular_core::{Memo, PerfSpan, Property, Signal};
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_tabular_core=trace")
        .with_test_writer()
        .try_init();
}

/// A tiny searchable list: a query property, a memoized result and a signal.
struct SearchList {
    items: Vec<&'static str>,
    query: Property<String>,
    results: Memo<String, Arc<Vec<&'static str>>>,
    query_changed: Signal<String>,
    runs: AtomicUsize,
}

impl SearchList {
    fn new(items: Vec<&'static str>) -> Self {
        Self {
            items,
            query: Property::new(String::new()),
            results: Memo::new(),
            query_changed: Signal::new(),
            runs: AtomicUsize::new(0),
        }
    }

    fn set_query(&self, query: &str) {
        if self.query.set(query.to_owned()) {
            self.query_changed.emit(query.to_owned());
        }
    }

    fn results(&self) -> Arc<Vec<&'static str>> {
        let query = self.query.get();
        self.results.get_or_compute(&query, || {
            let _span = PerfSpan::new("search");
            self.runs.fetch_add(1, Ordering::SeqCst);
            Arc::new(
                self.items
                    .iter()
                    .copied()
                    .filter(|item| item.contains(query.as_str()))
                    .collect(),
            )
        })
    }
}

#[test]
fn test_memoized_search_recomputes_only_on_change() {
    init_tracing();
    let list = SearchList::new(vec!["apple", "banana", "cherry", "grape"]);

    let all = list.results();
    assert_eq!(all.len(), 4);
    assert!(Arc::ptr_eq(&all, &list.results()));
    assert_eq!(list.runs.load(Ordering::SeqCst), 1);

    list.set_query("ap");
    assert_eq!(*list.results(), vec!["apple", "grape"]);
    assert_eq!(list.runs.load(Ordering::SeqCst), 2);

    // Setting the same query is not a change.
    list.set_query("ap");
    list.results();
    assert_eq!(list.runs.load(Ordering::SeqCst), 2);
}

#[test]
fn test_query_signal_only_fires_on_change() {
    init_tracing();
    let list = SearchList::new(vec!["apple"]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    list.query_changed
        .connect(move |query| seen_clone.lock().push(query.clone()));

    list.set_query("a");
    list.set_query("a");
    list.set_query("");
    assert_eq!(*seen.lock(), vec!["a".to_string(), String::new()]);
}

#[test]
fn test_blocked_signal_still_updates_property() {
    init_tracing();
    let list = SearchList::new(vec!["apple"]);
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = fired.clone();
    list.query_changed.connect(move |_| {
        fired_clone.fetch_add(1, Ordering::SeqCst);
    });

    list.query_changed.set_blocked(true);
    list.set_query("x");
    list.query_changed.set_blocked(false);

    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(list.query.get(), "x");
    assert!(list.results().is_empty());
}

#[test]
fn test_shared_across_threads() {
    init_tracing();
    let list = Arc::new(SearchList::new(vec!["apple", "banana", "cherry"]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let list = list.clone();
            std::thread::spawn(move || list.results().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
    // Racing threads may each compute once before the cache fills.
    assert!(list.runs.load(Ordering::SeqCst) >= 1);
}
