#![doc = include_str!("../README.md")]

pub mod cache;
pub mod resolve;
pub mod strategy;

#[cfg(test)]
mod fixtures;

pub use cache::AccessorCache;
pub use resolve::{Resolved, INACCESSIBLE};
pub use strategy::{find_accessor, Accessor};

use once_cell::sync::Lazy;
use sg_reflect::Value;

// The process-wide cache behind `resolve_value`. Created on first use,
// never torn down: entries stop retaining anything the moment a type's
// loader drops it, so the cache drains passively for the life of the
// process.
static SHARED: Lazy<AccessorCache> = Lazy::new(AccessorCache::new);

/// Returns the process-wide cache used by [`resolve_value`].
///
/// Exposed so embedders can inspect it ([`AccessorCache::len`],
/// [`AccessorCache::resolutions`]) or sweep it ([`AccessorCache::purge`]).
pub fn shared_cache() -> &'static AccessorCache {
    &SHARED
}

/// Resolves `path` against `root` using the process-wide cache.
///
/// This is the primary entry point; see
/// [`AccessorCache::resolve_value`] for the walk's exact semantics and the
/// crate docs for an example.
pub fn resolve_value<S: AsRef<str>>(root: &Value, path: &[S]) -> Resolved {
    SHARED.resolve_value(root, path)
}
