//! Process-wide visibility markers for picotest's own call frames.
//!
//! Failure reporters consult one boolean marker per internal subsystem to
//! decide whether frames attributable to that subsystem should be hidden
//! from tracebacks. The three targets form a fixed, closed set; all of them
//! are flipped together by [`set_hidden`] and are hidden by default.
//!
//! The markers are process-wide state mutated without coordination: the
//! contract assumes a single logical thread of control with strictly nested
//! guard scopes, as in sequential test setup/teardown.

use std::fmt;

use log::trace;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// The internal subsystems whose frames can be hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackTarget {
    /// The matcher subsystem.
    Matchers,
    /// The test-run subsystem.
    Runner,
    /// The test-case subsystem.
    Case,
}

impl StackTarget {
    /// Every target, in a fixed order.
    pub const ALL: [StackTarget; 3] = [Self::Matchers, Self::Runner, Self::Case];
}

impl fmt::Display for StackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StackTarget::Matchers => "matchers",
            StackTarget::Runner => "runner",
            StackTarget::Case => "case",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug)]
struct VisibilityState {
    matchers: bool,
    runner: bool,
    case: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        // Hidden until a caller asks otherwise.
        Self {
            matchers: true,
            runner: true,
            case: true,
        }
    }
}

static VISIBILITY: Lazy<RwLock<VisibilityState>> =
    Lazy::new(|| RwLock::new(VisibilityState::default()));

/// Write `hidden` onto all three targets.
///
/// Callers never observe a partially applied state: the markers are updated
/// under a single lock acquisition.
pub fn set_hidden(hidden: bool) {
    let mut state = VISIBILITY.write();
    state.matchers = hidden;
    state.runner = hidden;
    state.case = hidden;
    trace!("stack hiding set to {hidden} for all targets");
}

/// Read the marker for one target.
pub fn is_hidden(target: StackTarget) -> bool {
    let state = VISIBILITY.read();
    match target {
        StackTarget::Matchers => state.matchers,
        StackTarget::Runner => state.runner,
        StackTarget::Case => state.case,
    }
}

/// Scoped override of the visibility markers.
///
/// Construction saves the current value and installs the requested one; drop
/// restores the saved value, whether the scope exits normally or by panic.
/// Nested guards compose because each saves its own prior value.
///
/// ```rust
/// use picotest_rs::stack_hiding::{is_hidden, StackHidingGuard, StackTarget};
///
/// let before = is_hidden(StackTarget::Matchers);
/// {
///     let _guard = StackHidingGuard::new(!before);
///     assert_eq!(is_hidden(StackTarget::Matchers), !before);
/// }
/// assert_eq!(is_hidden(StackTarget::Matchers), before);
/// ```
#[derive(Debug)]
pub struct StackHidingGuard {
    previous: bool,
}

impl StackHidingGuard {
    /// Install `hidden` on all targets, remembering the value to restore.
    pub fn new(hidden: bool) -> Self {
        // The setter keeps the targets in sync, so any one is representative.
        let previous = is_hidden(StackTarget::Matchers);
        set_hidden(hidden);
        Self { previous }
    }
}

impl Drop for StackHidingGuard {
    fn drop(&mut self) {
        set_hidden(self.previous);
    }
}
