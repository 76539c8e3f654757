//! Core helper primitives for the picotest testing library.
//!
//! Two independent pieces of infrastructure live here:
//!
//! - [`resolver`] resolves dotted names ("try-import") against a pluggable
//!   [`Namespace`], with fallback values and an optional error callback.
//! - [`stack_hiding`] holds the process-wide visibility markers that tell
//!   failure reporters whether to hide picotest's own frames from tracebacks.
//!
//! Neither component depends on the other; they are composed only by the test
//! suites that consume them.

pub mod namespace;
pub mod resolver;
pub mod stack_hiding;

pub use namespace::{InMemoryNamespace, Namespace, ObjectRef};
pub use resolver::{resolve_many, resolve_one, ErrorCallback, ImportFailure};
pub use stack_hiding::{is_hidden, set_hidden, StackHidingGuard, StackTarget};
