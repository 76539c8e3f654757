//! Best-effort resolution of dotted names ("try-import").
//!
//! [`resolve_one`] walks a single dotted path against a [`Namespace`],
//! growing the module prefix as far as the namespace allows and treating the
//! remaining segments as attribute lookups. [`resolve_many`] runs the same
//! walk over an ordered list of candidates, returning the first success.
//!
//! Both functions accept an optional fallback value, returned instead of an
//! error when resolution fails, and an optional error callback invoked once
//! per failed attempt. The callback is a pure observer: it never alters the
//! outcome, and a callback that panics propagates immediately, abandoning any
//! remaining candidates.

use log::trace;
use thiserror::Error;

use crate::namespace::Namespace;

/// Observer invoked with each resolution failure.
pub type ErrorCallback<'a> = &'a mut dyn FnMut(&ImportFailure);

/// Why a name (or list of names) could not be resolved.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ImportFailure {
    /// The leading segment of the dotted path is not an importable module.
    #[error("no module named '{0}'")]
    ModuleNotFound(String),
    /// An attribute segment was missing from the object it was looked up on.
    #[error("'{object}' has no attribute '{attribute}'")]
    AttributeNotFound {
        /// Dotted path of the object the lookup was performed on.
        object: String,
        /// The attribute that was not found.
        attribute: String,
    },
    /// Every candidate passed to [`resolve_many`] failed. The message format
    /// is a stable contract relied on by callers.
    #[error("Could not import any of: {}", comma_joined(.0))]
    NoCandidates(Vec<String>),
}

fn comma_joined(names: &[String]) -> String {
    names.join(", ")
}

/// Resolve a single dotted `name` against `namespace`.
///
/// On failure the callback (if any) is invoked once with the failure, then
/// `fallback` is returned if one was supplied; otherwise the failure is
/// returned to the caller. On success the callback is never invoked.
///
/// # Examples
///
/// ```rust
/// use picotest_rs::{resolve_one, ImportFailure, InMemoryNamespace};
///
/// let ns = InMemoryNamespace::new().with_module("os.path");
///
/// let found = resolve_one(&ns, "os.path", None, None).unwrap();
/// assert_eq!(found.path, "os.path");
///
/// let err = resolve_one(&ns, "doesntexist", None, None).unwrap_err();
/// assert_eq!(err, ImportFailure::ModuleNotFound("doesntexist".into()));
/// ```
pub fn resolve_one<N: Namespace>(
    namespace: &N,
    name: &str,
    fallback: Option<N::Value>,
    on_error: Option<ErrorCallback<'_>>,
) -> Result<N::Value, ImportFailure> {
    match import_dotted(namespace, name) {
        Ok(value) => Ok(value),
        Err(failure) => {
            if let Some(callback) = on_error {
                callback(&failure);
            }
            match fallback {
                Some(value) => Ok(value),
                None => Err(failure),
            }
        }
    }
}

/// Resolve the first importable candidate from `names`, tried in order.
///
/// Each failing candidate is reported to the callback (if any) before the
/// next is attempted; candidates after the first success are never attempted.
/// If every candidate fails, `fallback` is returned when supplied, otherwise
/// [`ImportFailure::NoCandidates`] listing the candidates in their original
/// order. `names` must be non-empty.
pub fn resolve_many<N: Namespace>(
    namespace: &N,
    names: &[&str],
    fallback: Option<N::Value>,
    mut on_error: Option<ErrorCallback<'_>>,
) -> Result<N::Value, ImportFailure> {
    for name in names {
        match import_dotted(namespace, name) {
            Ok(value) => return Ok(value),
            Err(failure) => {
                if let Some(callback) = on_error.as_mut() {
                    callback(&failure);
                }
            }
        }
    }
    match fallback {
        Some(value) => Ok(value),
        None => Err(ImportFailure::NoCandidates(
            names.iter().map(|name| (*name).to_string()).collect(),
        )),
    }
}

/// Walk one dotted path: grow the module prefix left to right while the
/// namespace keeps importing it, then resolve the remaining segments as
/// attribute lookups on the deepest module reached.
fn import_dotted<N: Namespace>(namespace: &N, name: &str) -> Result<N::Value, ImportFailure> {
    let segments: Vec<&str> = name.split('.').collect();

    let first = segments[0];
    let mut current = namespace
        .import_module(first)
        .ok_or_else(|| ImportFailure::ModuleNotFound(first.to_string()))?;

    let mut depth = 1;
    while depth < segments.len() {
        let prefix = segments[..=depth].join(".");
        match namespace.import_module(&prefix) {
            Some(module) => {
                current = module;
                depth += 1;
            }
            None => break,
        }
    }
    trace!(
        "resolved module prefix '{}' of '{name}'",
        segments[..depth].join(".")
    );

    for (offset, attr) in segments[depth..].iter().enumerate() {
        current = namespace.get_attr(&current, attr).ok_or_else(|| {
            ImportFailure::AttributeNotFound {
                object: segments[..depth + offset].join("."),
                attribute: (*attr).to_string(),
            }
        })?;
    }
    Ok(current)
}
