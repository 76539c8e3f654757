//! Contract tests for try-import resolution against fake name-spaces.

use std::cell::RefCell;
use std::sync::Arc;

use picotest_rs::{
    resolve_many, resolve_one, ImportFailure, InMemoryNamespace, Namespace, ObjectRef,
};
use rstest::rstest;

fn fake_modules() -> InMemoryNamespace {
    InMemoryNamespace::new()
        .with_module("os.path")
        .with_attr("os.path", "join")
}

/// A resolution to run through [`check_error_callback`].
enum Request<'a> {
    One(&'a str),
    Many(&'a [&'a str]),
}

/// Run `request` with a collecting callback and no fallback, checking both
/// the number of reported failures and whether a value was produced.
fn check_error_callback(
    ns: &InMemoryNamespace,
    request: Request<'_>,
    expected_errors: usize,
    expect_value: bool,
) {
    let mut failures: Vec<ImportFailure> = Vec::new();
    let mut callback = |failure: &ImportFailure| failures.push(failure.clone());
    let outcome = match request {
        Request::One(name) => resolve_one(ns, name, None, Some(&mut callback)),
        Request::Many(names) => resolve_many(ns, names, None, Some(&mut callback)),
    };
    assert_eq!(outcome.is_ok(), expect_value);
    assert_eq!(failures.len(), expected_errors);
}

/// Namespace wrapper that records every module import attempt, so tests can
/// assert which candidates were actually tried.
struct RecordingNamespace {
    inner: InMemoryNamespace,
    imports: RefCell<Vec<String>>,
}

impl RecordingNamespace {
    fn new(inner: InMemoryNamespace) -> Self {
        Self {
            inner,
            imports: RefCell::new(Vec::new()),
        }
    }

    fn attempted(&self, path: &str) -> bool {
        self.imports.borrow().iter().any(|p| p == path)
    }
}

impl Namespace for RecordingNamespace {
    type Value = ObjectRef;

    fn import_module(&self, path: &str) -> Option<ObjectRef> {
        self.imports.borrow_mut().push(path.to_string());
        self.inner.import_module(path)
    }

    fn get_attr(&self, base: &ObjectRef, attr: &str) -> Option<ObjectRef> {
        self.inner.get_attr(base, attr)
    }
}

#[rstest]
fn missing_name_returns_the_fallback() {
    let ns = fake_modules();
    let marker = ns.object("os").unwrap();

    let result = resolve_one(&ns, "doesntexist", Some(Arc::clone(&marker)), None).unwrap();

    // The fallback comes back as-is, not as a copy.
    assert!(Arc::ptr_eq(&result, &marker));
}

#[rstest]
fn missing_name_without_fallback_is_an_error() {
    let ns = fake_modules();
    assert!(resolve_one(&ns, "doesntexist", None, None).is_err());
}

#[rstest]
fn existing_module_wins_over_the_fallback() {
    let ns = fake_modules();
    let marker = ns.object("os.path").unwrap();

    let result = resolve_one(&ns, "os", Some(marker), None).unwrap();

    assert!(Arc::ptr_eq(&result, &ns.object("os").unwrap()));
}

#[rstest]
fn existing_submodule_resolves_to_the_submodule() {
    let ns = fake_modules();
    let result = resolve_one(&ns, "os.path", None, None).unwrap();
    assert!(Arc::ptr_eq(&result, &ns.object("os.path").unwrap()));
}

#[rstest]
fn nonexistent_submodule_returns_the_fallback() {
    let ns = fake_modules();
    let marker = ns.object("os").unwrap();

    let result = resolve_one(&ns, "os.doesntexist", Some(Arc::clone(&marker)), None).unwrap();

    assert!(Arc::ptr_eq(&result, &marker));
}

#[rstest]
fn object_from_module_resolves_as_an_attribute() {
    let ns = fake_modules();
    let result = resolve_one(&ns, "os.path.join", None, None).unwrap();
    assert!(Arc::ptr_eq(&result, &ns.object("os.path.join").unwrap()));
}

#[rstest]
fn callback_fires_once_for_a_missing_module() {
    check_error_callback(&fake_modules(), Request::One("doesntexist"), 1, false);
}

#[rstest]
fn callback_fires_once_for_a_missing_member() {
    check_error_callback(&fake_modules(), Request::One("os.nonexistent"), 1, false);
}

#[rstest]
fn callback_is_silent_on_success() {
    check_error_callback(&fake_modules(), Request::One("os.path"), 0, true);
}

#[rstest]
fn first_importable_candidate_wins() {
    let ns = fake_modules();
    let result = resolve_many(&ns, &["doesntexist", "os"], None, None).unwrap();
    assert!(Arc::ptr_eq(&result, &ns.object("os").unwrap()));
}

#[rstest]
fn submodule_candidates_fall_back_in_order() {
    let ns = fake_modules();
    let result = resolve_many(&ns, &["os.doesntexist", "os.path"], None, None).unwrap();
    assert!(Arc::ptr_eq(&result, &ns.object("os.path").unwrap()));
}

#[rstest]
fn exhausted_candidates_return_the_fallback() {
    let ns = fake_modules();
    let marker = ns.object("os").unwrap();
    let mut failures: Vec<ImportFailure> = Vec::new();
    let mut callback = |failure: &ImportFailure| failures.push(failure.clone());

    let result = resolve_many(
        &ns,
        &["bad1", "bad2"],
        Some(Arc::clone(&marker)),
        Some(&mut callback),
    )
    .unwrap();

    assert!(Arc::ptr_eq(&result, &marker));
    assert_eq!(failures.len(), 2);
}

#[rstest]
fn exhausted_candidates_without_fallback_list_every_name() {
    let ns = fake_modules();
    let failure = resolve_many(&ns, &["doesntexist", "noreally"], None, None).unwrap_err();
    assert_eq!(
        failure.to_string(),
        "Could not import any of: doesntexist, noreally"
    );
}

#[rstest]
fn callback_fires_once_per_failed_candidate() {
    let ns = fake_modules();
    check_error_callback(
        &ns,
        Request::Many(&["os.doesntexist", "os.notthiseither"]),
        2,
        false,
    );
    check_error_callback(
        &ns,
        Request::Many(&["os.doesntexist", "os.notthiseither", "os"]),
        2,
        true,
    );
    check_error_callback(&ns, Request::Many(&["os.path"]), 0, true);
}

#[rstest]
fn candidates_after_the_first_success_are_never_attempted() {
    let ns = RecordingNamespace::new(fake_modules());

    let result = resolve_many(&ns, &["doesntexist", "os", "os.path"], None, None).unwrap();

    assert_eq!(result.path, "os");
    assert!(ns.attempted("doesntexist"));
    assert!(ns.attempted("os"));
    assert!(!ns.attempted("os.path"));
}
