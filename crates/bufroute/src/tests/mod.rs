//! Behavioural suites for the router.
