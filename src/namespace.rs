//! The import capability consumed by the resolver.
//!
//! The resolver never talks to a real module system directly. It works
//! against the [`Namespace`] trait, which answers two questions: "is this
//! dotted path an importable module?" and "does this object have that
//! attribute?". Keeping the capability this small makes the traversal and
//! fallback logic testable against fake name-spaces.

use std::collections::HashMap;
use std::sync::Arc;

/// A resolvable universe of modules and attributes.
///
/// Implementations answer found / not-found only; classifying a miss into an
/// [`ImportFailure`](crate::resolver::ImportFailure) is the resolver's job.
pub trait Namespace {
    /// The object type produced by resolution.
    type Value: Clone;

    /// Import the module named by the dotted `path`, or `None` if no such
    /// module is importable.
    fn import_module(&self, path: &str) -> Option<Self::Value>;

    /// Look up `attr` on a previously resolved `base` object.
    fn get_attr(&self, base: &Self::Value, attr: &str) -> Option<Self::Value>;
}

/// An object held by an [`InMemoryNamespace`].
///
/// Handles are shared, so resolving the same path twice yields the same
/// allocation and tests can assert identity with [`Arc::ptr_eq`].
pub type ObjectRef = Arc<NamespaceObject>;

/// A module or attribute registered in an [`InMemoryNamespace`].
#[derive(Debug, PartialEq, Eq)]
pub struct NamespaceObject {
    /// Fully qualified dotted path of the object.
    pub path: String,
}

/// A fake namespace backed by hash maps.
///
/// Registering a module registers every dotted prefix of it as a module too,
/// mirroring how real import systems make `a` importable whenever `a.b` is.
///
/// # Examples
///
/// ```rust
/// use picotest_rs::namespace::{InMemoryNamespace, Namespace};
///
/// let ns = InMemoryNamespace::new()
///     .with_module("os.path")
///     .with_attr("os.path", "join");
///
/// assert!(ns.import_module("os").is_some());
/// let path = ns.import_module("os.path").unwrap();
/// assert_eq!(ns.get_attr(&path, "join").unwrap().path, "os.path.join");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryNamespace {
    modules: HashMap<String, ObjectRef>,
    // Attribute edges keyed by the owning object's dotted path.
    attrs: HashMap<String, HashMap<String, ObjectRef>>,
}

impl InMemoryNamespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` as an importable module, along with every dotted
    /// prefix of it.
    pub fn with_module(mut self, path: &str) -> Self {
        let mut prefix = String::new();
        for segment in path.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            self.modules
                .entry(prefix.clone())
                .or_insert_with(|| Arc::new(NamespaceObject { path: prefix.clone() }));
        }
        self
    }

    /// Register `attr` as an attribute of the object at `owner`.
    ///
    /// The owner may be a module or another attribute, so chains like
    /// `a.b.attr.nested` can be modelled. The owner must already be
    /// registered.
    pub fn with_attr(mut self, owner: &str, attr: &str) -> Self {
        let path = format!("{owner}.{attr}");
        self.attrs
            .entry(owner.to_string())
            .or_default()
            .entry(attr.to_string())
            .or_insert_with(|| Arc::new(NamespaceObject { path }));
        self
    }

    /// Fetch the canonical handle for `path`, whether it was registered as a
    /// module or as an attribute. Tests use this for identity assertions.
    pub fn object(&self, path: &str) -> Option<ObjectRef> {
        if let Some(module) = self.modules.get(path) {
            return Some(Arc::clone(module));
        }
        let (owner, attr) = path.rsplit_once('.')?;
        self.attrs.get(owner)?.get(attr).map(Arc::clone)
    }
}

impl Namespace for InMemoryNamespace {
    type Value = ObjectRef;

    fn import_module(&self, path: &str) -> Option<ObjectRef> {
        self.modules.get(path).map(Arc::clone)
    }

    fn get_attr(&self, base: &ObjectRef, attr: &str) -> Option<ObjectRef> {
        self.attrs.get(&base.path)?.get(attr).map(Arc::clone)
    }
}
