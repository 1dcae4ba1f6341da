//! Behavioural suites for the dispatch adapter.
