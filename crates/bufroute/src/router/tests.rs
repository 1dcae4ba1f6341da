//! Unit tests for the router lifecycle.

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};

use super::*;
use crate::error::HandlerError;
use crate::host::MockHost;
use crate::host::memory::MemoryHost;
use crate::opener::SplitStyle;

const SCHEME: &str = "gitui";

/// Records every resource a handler was loaded or saved with.
#[derive(Clone, Default)]
struct Calls {
    loads: Arc<Mutex<Vec<LiveResource>>>,
    saves: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Calls {
    fn loads(&self) -> Vec<LiveResource> {
        self.loads.lock().expect("loads lock").clone()
    }

    fn saves(&self) -> Vec<Vec<String>> {
        self.saves.lock().expect("saves lock").clone()
    }
}

fn reading_handler(calls: &Calls, content: &'static str) -> Handler {
    let loads = Arc::clone(&calls.loads);
    Handler::new(move |resource| {
        loads.lock().expect("loads lock").push(resource.clone());
        Ok(vec![content.to_owned()])
    })
}

fn writing_handler(calls: &Calls, content: &'static str) -> Handler {
    let saves = Arc::clone(&calls.saves);
    reading_handler(calls, content).with_save(move |_resource, lines| {
        saves.lock().expect("saves lock").push(lines.to_vec());
        Ok(())
    })
}

fn failing_load() -> Handler {
    Handler::new(|_| Err(HandlerError::new("repository not found")))
        .with_action("retry", |_, _| Ok(Value::from("retrying")))
}

fn failing_save() -> Handler {
    Handler::new(|_| Ok(vec!["draft".into()]))
        .with_save(|_, _| Err(HandlerError::new("remote rejected push")))
}

fn no_params() -> Params {
    Params::new()
}

#[fixture]
fn calls() -> Calls {
    Calls::default()
}

#[fixture]
fn router(calls: Calls) -> (Router, Calls) {
    let mut router = Router::new(SCHEME).expect("router");
    router.register("status", reading_handler(&calls, "clean"));
    router.register("commit", writing_handler(&calls, "message"));
    router.register("broken", failing_load());
    router.register("flaky", failing_save());
    (router, calls)
}

/// Opens `path` in a memory host and delivers the host's read signal.
fn open_and_read(router: &mut Router, host: &mut MemoryHost, path: &str) -> (ViewId, String) {
    let name = router
        .open(host, path, &no_params(), None, OpenerOptions::default())
        .expect("open");
    let view = host.find_view(&name).expect("attached view");
    router.on_resource_read(host, view, &name).expect("read");
    (view, name)
}

// ---------------------------------------------------------------------------
// Construction and naming
// ---------------------------------------------------------------------------

#[test]
fn empty_scheme_is_rejected() {
    assert!(matches!(Router::new(""), Err(RouterError::EmptyScheme)));
}

#[test]
fn illegal_scheme_is_rejected() {
    assert!(matches!(
        Router::new("git ui"),
        Err(RouterError::IllegalScheme { .. })
    ));
}

#[rstest]
fn create_name_round_trips_path_and_params(router: (Router, Calls)) {
    let (router, _) = router;
    let params: Params = [("id", "123")].into_iter().collect();
    let name = router
        .create_name("status", &params, None)
        .expect("create name");
    let parsed = ResourceName::parse(&name).expect("parse");
    assert_eq!(parsed.path(), "status");
    assert_eq!(parsed.params().get_str("id"), Some("123"));
}

#[rstest]
fn create_name_rejects_empty_parameter_keys(router: (Router, Calls)) {
    let (router, _) = router;
    let params: Params = [("id", "1"), ("", "x")].into_iter().collect();
    let err = router
        .create_name("status", &params, None)
        .expect_err("empty key");
    assert!(
        matches!(&err, RouterError::MalformedName { name, .. } if name == "gitui://status;id=1&=x"),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn open_with_empty_parameter_key_creates_no_view(router: (Router, Calls)) {
    let (router, _) = router;
    let mut host = MemoryHost::new();
    let params: Params = [("", "x")].into_iter().collect();
    let err = router
        .open(&mut host, "status", &params, None, OpenerOptions::default())
        .expect_err("empty key");
    assert!(matches!(err, RouterError::MalformedName { .. }));
    assert_eq!(host.view_count(), 0);
}

#[rstest]
fn create_name_requires_handler(router: (Router, Calls)) {
    let (router, _) = router;
    let err = router
        .create_name("blame", &no_params(), None)
        .expect_err("no handler");
    assert!(matches!(err, RouterError::NoHandler { .. }));
}

#[test]
fn prefix_qualifies_operations() {
    let router = Router::new(SCHEME).expect("router").with_prefix("git");
    assert_eq!(
        router.operations().qualified(Operation::Save),
        "git:internal:save"
    );
}

// ---------------------------------------------------------------------------
// Opening
// ---------------------------------------------------------------------------

#[test]
fn open_without_handler_never_touches_host() {
    let router = Router::new(SCHEME).expect("router");
    // A mock with no expectations panics on any call.
    let mut host = MockHost::new();
    let err = router
        .open(
            &mut host,
            "status",
            &no_params(),
            None,
            OpenerOptions::default(),
        )
        .expect_err("no handler");
    assert!(matches!(err, RouterError::NoHandler { .. }));
}

#[rstest]
fn open_splits_then_attaches(router: (Router, Calls)) {
    let (router, calls) = router;
    let mut host = MockHost::new();
    let mut sequence = mockall::Sequence::new();
    host.expect_find_view()
        .with(eq("gitui://status#top"))
        .return_const(None);
    host.expect_open_split()
        .with(eq(SplitStyle::Below))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_| Ok(()));
    host.expect_attach()
        .with(eq("gitui://status#top"))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_| Ok(1));

    let name = router
        .open(
            &mut host,
            "status",
            &no_params(),
            Some("top"),
            OpenerOptions::split(SplitStyle::Below),
        )
        .expect("open");
    assert_eq!(name, "gitui://status#top");
    assert!(calls.loads().is_empty(), "open must not load");
}

#[rstest]
fn open_with_reuse_focuses_existing_view(router: (Router, Calls)) {
    let (router, _) = router;
    let mut host = MockHost::new();
    host.expect_find_view().return_const(Some(9));
    host.expect_focus_view()
        .with(eq(9))
        .once()
        .returning(|_| Ok(()));

    router
        .open(
            &mut host,
            "status",
            &no_params(),
            None,
            OpenerOptions::reusing(),
        )
        .expect("open");
}

#[rstest]
fn open_surfaces_host_failures(router: (Router, Calls)) {
    let (router, _) = router;
    let mut host = MemoryHost::new();
    host.fail_on("open_tab");
    let err = router
        .open(
            &mut host,
            "status",
            &no_params(),
            None,
            OpenerOptions::split(SplitStyle::Tab),
        )
        .expect_err("tab fails");
    assert!(matches!(err, RouterError::Host(_)));
    assert_eq!(host.view_count(), 0);
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[rstest]
fn read_loads_once_with_params_and_fragment(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let name = "gitui://status;id=123&name=John#bar.baz";
    let view = host.attach(name).expect("attach");

    let state = router
        .on_resource_read(&mut host, view, name)
        .expect("read");

    assert_eq!(state, ResourceState::LoadedReadOnly);
    let loads = calls.loads();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].fragment(), Some("bar.baz"));
    assert_eq!(loads[0].params().get_str("id"), Some("123"));
    assert_eq!(loads[0].params().get_str("name"), Some("John"));
    assert_eq!(loads[0].params().len(), 2);
}

#[rstest]
fn read_only_handler_locks_view(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "status");

    let state = host.view(view).expect("view");
    assert_eq!(state.lines, vec![String::from("clean")]);
    assert!(!state.modifiable);
    assert!(!state.modified);
    assert_eq!(state.marker.as_deref(), Some("status"));
    assert_eq!(state.write_signal, None);
    assert_eq!(router.state(view), Some(ResourceState::LoadedReadOnly));
}

#[rstest]
fn writable_handler_wires_write_signal(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "commit");

    let state = host.view(view).expect("view");
    assert!(state.modifiable);
    assert_eq!(
        state.write_signal.as_deref(),
        Some("bufroute:internal:save")
    );
    assert_eq!(router.state(view), Some(ResourceState::LoadedWritable));
}

#[rstest]
fn reload_of_writable_view_registers_write_signal_once(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MockHost::new();
    host.expect_set_modifiable().returning(|_, _| Ok(()));
    host.expect_set_lines().returning(|_, _| Ok(()));
    host.expect_set_marker().returning(|_, _| Ok(()));
    host.expect_set_modified().returning(|_, _| Ok(()));
    host.expect_register_write_signal()
        .with(eq(5), eq("bufroute:internal:save"))
        .once()
        .returning(|_, _| Ok(()));

    for _ in 0..3 {
        let state = router
            .on_resource_read(&mut host, 5, "gitui://commit")
            .expect("read");
        assert_eq!(state, ResourceState::LoadedWritable);
    }
    assert_eq!(calls.loads().len(), 3);
}

#[rstest]
fn failing_load_renders_error_and_locks_view(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, name) = open_and_read(&mut router, &mut host, "broken");

    let state = host.view(view).expect("view");
    assert_eq!(state.lines[0], format!("Failed to load {name}"));
    assert!(
        state
            .lines
            .iter()
            .any(|line| line.contains("repository not found")),
        "error not rendered: {:?}",
        state.lines
    );
    assert!(!state.modifiable);
    assert!(!state.modified);
    assert_eq!(state.marker, None, "marker is written only on success");
    assert_eq!(router.state(view), Some(ResourceState::LoadFailed));
}

#[rstest]
fn failed_load_keeps_handler_resolvable(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "broken");

    let value = router
        .invoke_action(&host, view, "retry", &no_params())
        .expect("action after failed load");
    assert_eq!(value, Value::from("retrying"));
}

#[rstest]
#[case::foreign_scheme("other://status")]
#[case::malformed("status")]
#[case::unregistered("gitui://blame")]
fn resolution_failures_are_contained(router: (Router, Calls), #[case] name: &str) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let view = host.attach(name).expect("attach");

    let state = router
        .on_resource_read(&mut host, view, name)
        .expect("contained");
    assert_eq!(state, ResourceState::LoadFailed);
    assert!(!host.view(view).expect("view").modifiable);
}

#[rstest]
fn read_propagates_when_rendering_fails(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let view = host.attach("gitui://broken").expect("attach");
    host.fail_on("set_lines");

    let err = router
        .on_resource_read(&mut host, view, "gitui://broken")
        .expect_err("rendering fails");
    assert!(matches!(err, RouterError::Host(_)));
    assert_eq!(router.state(view), Some(ResourceState::LoadFailed));
}

#[rstest]
fn reload_replaces_content_of_locked_view(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let (view, name) = open_and_read(&mut router, &mut host, "status");

    router
        .on_resource_read(&mut host, view, &name)
        .expect("reload");
    assert_eq!(calls.loads().len(), 2);
    assert_eq!(
        host.view(view).expect("view").lines,
        vec![String::from("clean")]
    );
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

#[rstest]
fn write_saves_current_lines_and_clears_flag(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let (view, name) = open_and_read(&mut router, &mut host, "commit");
    host.user_edit(view, &["fix: typo"]).expect("edit");

    router
        .on_resource_write(&mut host, view, &name)
        .expect("write");

    assert_eq!(calls.saves(), vec![vec![String::from("fix: typo")]]);
    assert!(!host.view(view).expect("view").modified);
    assert_eq!(router.state(view), Some(ResourceState::LoadedWritable));
}

#[rstest]
fn failed_save_keeps_changes_and_writability(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, name) = open_and_read(&mut router, &mut host, "flaky");
    host.user_edit(view, &["edited"]).expect("edit");

    let err = router
        .on_resource_write(&mut host, view, &name)
        .expect_err("save fails");

    assert!(matches!(
        err,
        RouterError::Handler {
            phase: HandlerPhase::Save,
            ..
        }
    ));
    let state = host.view(view).expect("view");
    assert!(state.modified, "unsaved flag must stay set");
    assert_eq!(state.lines, vec![String::from("edited")]);
    assert_eq!(router.state(view), Some(ResourceState::LoadedWritable));
}

#[rstest]
fn write_to_read_only_resource_is_rejected(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, name) = open_and_read(&mut router, &mut host, "status");

    let err = router
        .on_resource_write(&mut host, view, &name)
        .expect_err("not writable");
    assert!(matches!(err, RouterError::NotWritable { .. }));
}

#[rstest]
fn write_after_failed_load_is_rejected(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let view = host.attach("gitui://commit").expect("attach");
    host.fail_on("set_marker");
    router
        .on_resource_read(&mut host, view, "gitui://commit")
        .expect("contained");
    assert_eq!(router.state(view), Some(ResourceState::LoadFailed));

    let err = router
        .on_resource_write(&mut host, view, "gitui://commit")
        .expect_err("not writable");
    assert!(matches!(err, RouterError::NotWritable { .. }));
    assert!(calls.saves().is_empty());
}

#[rstest]
fn write_for_untracked_view_checks_handler(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let view = host.attach("gitui://commit").expect("attach");

    router
        .on_resource_write(&mut host, view, "gitui://commit")
        .expect("handler can save");
    assert_eq!(calls.saves().len(), 1);
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[test]
fn action_resolves_from_current_view_name() {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let mut router = Router::new(SCHEME).expect("router");
    router.register(
        "log",
        Handler::new(|_| Ok(Vec::new())).with_action("count", move |resource, params| {
            seen.fetch_add(1, AtomicOrdering::SeqCst);
            Ok(Value::from(format!(
                "{}:{}",
                resource.params().get_str("limit").unwrap_or_default(),
                params.get_str("step").unwrap_or_default()
            )))
        }),
    );

    let mut host = MockHost::new();
    host.expect_view_name()
        .with(eq(4))
        .returning(|_| Ok(String::from("gitui://log;limit=5")));

    let params: Params = [("step", "2")].into_iter().collect();
    let value = router
        .invoke_action(&host, 4, "count", &params)
        .expect("action");
    assert_eq!(value, Value::from("5:2"));
    assert_eq!(counter.load(AtomicOrdering::SeqCst), 1);
}

#[rstest]
fn unknown_action_fails_without_side_effects(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "commit");
    let before = host.view(view).cloned();

    let err = router
        .invoke_action(&host, view, "squash", &no_params())
        .expect_err("no such action");

    assert!(matches!(
        err,
        RouterError::NoSuchAction { ref action, .. } if action == "squash"
    ));
    assert_eq!(host.view(view).cloned(), before);
    assert_eq!(router.state(view), Some(ResourceState::LoadedWritable));
    assert_eq!(calls.loads().len(), 1);
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

#[rstest]
fn fallback_keeps_requested_path(calls: Calls) {
    let mut router = Router::new(SCHEME).expect("router");
    router.set_fallback(reading_handler(&calls, "fallback"));
    let mut host = MemoryHost::new();

    let (view, name) = open_and_read(&mut router, &mut host, "blame/src/main.rs");

    assert_eq!(name, "gitui://blame/src/main.rs");
    let loads = calls.loads();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].path(), "blame/src/main.rs");
    assert_eq!(
        host.view(view).expect("view").marker.as_deref(),
        Some("blame/src/main.rs")
    );
}

// ---------------------------------------------------------------------------
// Preload
// ---------------------------------------------------------------------------

#[rstest]
fn preload_populates_hidden_view(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();

    let name = router
        .preload(&mut host, "status", &no_params(), Some("HEAD"))
        .expect("preload");

    let view = host.find_view(&name).expect("view");
    let state = host.view(view).expect("state");
    assert!(state.hidden);
    assert_eq!(state.lines, vec![String::from("clean")]);
    assert!(host.window_ops().is_empty(), "preload must not touch windows");
    assert_eq!(calls.loads().len(), 1);
}

#[rstest]
fn preload_leaves_loaded_view_alone(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "status");

    let name = router
        .preload(&mut host, "status", &no_params(), None)
        .expect("preload");
    assert_eq!(host.find_view(&name), Some(view));
    assert_eq!(host.view_count(), 1);
    assert_eq!(calls.loads().len(), 1);
}

#[rstest]
fn preload_after_edit_keeps_the_edits(router: (Router, Calls)) {
    let (mut router, calls) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "commit");
    host.user_edit(view, &["user edit"]).expect("edit");

    router
        .preload(&mut host, "commit", &no_params(), None)
        .expect("preload");

    let state = host.view(view).expect("view");
    assert_eq!(state.lines, vec![String::from("user edit")]);
    assert!(state.modified);
    assert_eq!(router.state(view), Some(ResourceState::LoadedWritable));
    assert_eq!(calls.loads().len(), 1);
}

#[rstest]
fn preload_retries_failed_view(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "broken");
    router.register("broken", Handler::new(|_| Ok(vec!["recovered".into()])));

    router
        .preload(&mut host, "broken", &no_params(), None)
        .expect("preload");
    assert_eq!(router.state(view), Some(ResourceState::LoadedReadOnly));
    assert_eq!(
        host.view(view).expect("view").lines,
        vec![String::from("recovered")]
    );
}

// ---------------------------------------------------------------------------
// Host wiring
// ---------------------------------------------------------------------------

#[test]
fn bind_signals_registers_once() {
    let mut router = Router::new(SCHEME).expect("router").with_prefix("git");
    let mut host = MockHost::new();
    host.expect_register_read_signal()
        .with(eq(SCHEME), eq("git:internal:load"))
        .once()
        .returning(|_, _| Ok(SignalHandle(11)));

    let first = router.bind_signals(&mut host).expect("bind");
    let second = router.bind_signals(&mut host).expect("bind again");
    assert_eq!(first, second);
    assert_eq!(first.handle, SignalHandle(11));
    assert_eq!(first.operation, "git:internal:load");
}

#[rstest]
#[case("log/graph", None, "GituiLogGraph")]
#[case("status", Some("Gst"), "Gst")]
#[case("pull-requests/open", None, "GituiPullRequestsOpen")]
fn setup_command_registers_named_command(
    #[case] path: &str,
    #[case] command: Option<&str>,
    #[case] expected: &str,
) {
    assert_eq!(define_command(SCHEME, path, command), expected);
}

#[rstest]
#[case("git-ui", "status", "GitUiStatus")]
#[case("git+ssh", "log/graph", "GitSshLogGraph")]
#[case("vcs.git", "blame", "VcsGitBlame")]
#[case("gitui", "café/log", "GituiCafLog")]
fn default_command_name_is_ascii_upper_camel(
    #[case] scheme: &str,
    #[case] path: &str,
    #[case] expected: &str,
) {
    let defined = define_command(scheme, path, None);
    assert_eq!(defined, expected);
    assert!(defined.starts_with(|c: char| c.is_ascii_uppercase()));
    assert!(defined.chars().all(|c| c.is_ascii_alphanumeric()));
}

fn define_command(scheme: &str, path: &str, command: Option<&str>) -> String {
    let mut router = Router::new(scheme).expect("router");
    router.set_fallback(Handler::new(|_| Ok(Vec::new())));
    let mut host = MockHost::new();
    let registered = Arc::new(Mutex::new(None));
    let recorder = Arc::clone(&registered);
    host.expect_register_command()
        .withf(|_, _, operation| operation == "bufroute:internal:command")
        .once()
        .returning(move |command, _, _| {
            *recorder.lock().expect("command lock") = Some(command.to_owned());
            Ok(())
        });

    let defined = router
        .setup_command(&mut host, path, command)
        .expect("setup");
    assert_eq!(
        registered.lock().expect("command lock").as_deref(),
        Some(defined.as_str())
    );
    defined
}

#[test]
fn setup_command_requires_handler() {
    let router = Router::new(SCHEME).expect("router");
    let mut host = MockHost::new();
    let err = router
        .setup_command(&mut host, "status", None)
        .expect_err("no handler");
    assert!(matches!(err, RouterError::NoHandler { .. }));
}

#[rstest]
fn closing_view_forgets_state(router: (Router, Calls)) {
    let (mut router, _) = router;
    let mut host = MemoryHost::new();
    let (view, _) = open_and_read(&mut router, &mut host, "status");

    host.close(view);
    assert_eq!(
        router.on_view_closed(view),
        Some(ResourceState::LoadedReadOnly)
    );
    assert_eq!(router.state(view), None);
}

#[test]
fn render_error_includes_nested_causes() {
    let error = RouterError::handler(
        "status",
        HandlerPhase::Load,
        HandlerError::with_source("git failed", std::io::Error::other("exit 128")),
    );
    let lines = render_error("gitui://status", &error);
    assert_eq!(lines[0], "Failed to load gitui://status");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "load failed for 'status': git failed");
    assert_eq!(lines[3], "caused by: exit 128");
    assert_eq!(lines.len(), 4);
}

#[test]
fn mock_host_receives_load_sequence() {
    let mut router = Router::new(SCHEME).expect("router");
    router.register("status", Handler::new(|_| Ok(vec!["clean".into()])));
    let mut host = MockHost::new();
    let mut sequence = mockall::Sequence::new();
    host.expect_set_modifiable()
        .with(eq(3), eq(true))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    host.expect_set_lines()
        .withf(|view, lines| *view == 3 && lines == [String::from("clean")])
        .once()
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    host.expect_set_marker()
        .with(eq(3), eq("status"))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    host.expect_set_modified()
        .with(eq(3), eq(false))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    host.expect_set_modifiable()
        .with(eq(3), eq(false))
        .once()
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok(()));
    host.expect_register_write_signal()
        .with(eq(3), always())
        .never();

    let state = router
        .on_resource_read(&mut host, 3, "gitui://status")
        .expect("read");
    assert_eq!(state, ResourceState::LoadedReadOnly);
}
