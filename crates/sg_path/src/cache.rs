//! The accessor cache: a two-level, weakly retained memo of accessor
//! resolution, shared by every resolver thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sg_reflect::schema::{FieldSpec, MethodSpec, TypeSchema};
use tracing::debug;

use crate::strategy::{self, Accessor};

// -----------------------------------------------------------------------------
// Keys and per-type tables

// Outer cache key: the schema's allocation address. Address equality alone
// cannot distinguish a reclaimed schema from a later one reusing its
// allocation; `TypeAccessors::is_for` performs that generation check on
// every hit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct SchemaKey(usize);

impl SchemaKey {
    fn of(schema: &Arc<TypeSchema>) -> Self {
        Self(Arc::as_ptr(schema) as usize)
    }
}

// Accessor table for one type generation.
struct TypeAccessors {
    // Weak: the cache must never be what keeps a type alive.
    schema: Weak<TypeSchema>,
    accessors: DashMap<String, CachedAccessor>,
}

impl TypeAccessors {
    fn new(schema: &Arc<TypeSchema>) -> Self {
        Self {
            schema: Arc::downgrade(schema),
            accessors: DashMap::new(),
        }
    }

    fn is_for(&self, schema: &Arc<TypeSchema>) -> bool {
        self.schema
            .upgrade()
            .is_some_and(|live| Arc::ptr_eq(&live, schema))
    }
}

// A memoized resolution outcome for one (type, name) pair.
//
// Member specs are held weakly: a spec strongly references code owned by
// the collaborator that registered the type, so a strong value here could
// outlive the type it belongs to. The `Absent` sentinel carries nothing
// and is safe to retain.
#[derive(Clone)]
enum CachedAccessor {
    Invoke(Weak<MethodSpec>),
    Read(Weak<FieldSpec>),
    /// The type has no such property — distinct from a cache miss.
    Absent,
}

impl CachedAccessor {
    fn of(resolved: Option<&Accessor>) -> Self {
        match resolved {
            Some(Accessor::Invoke(method)) => Self::Invoke(Arc::downgrade(method)),
            Some(Accessor::Read(field)) => Self::Read(Arc::downgrade(field)),
            None => Self::Absent,
        }
    }

    // Outer `None` means the cached member has been reclaimed and the entry
    // must be re-resolved; `Some(None)` is the no-accessor sentinel.
    fn upgrade(&self) -> Option<Option<Accessor>> {
        match self {
            Self::Invoke(weak) => weak.upgrade().map(|m| Some(Accessor::Invoke(m))),
            Self::Read(weak) => weak.upgrade().map(|f| Some(Accessor::Read(f))),
            Self::Absent => Some(None),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessorCache

/// Memoizes accessor resolution per `(type, name)` without retaining types.
///
/// Structure: an outer map from schema identity to a per-type accessor
/// table, and inner maps from property name to the resolved accessor (or
/// the no-accessor sentinel). Both levels are sharded concurrent maps; no
/// lock is held across the two-level lookup or across a resolution, so one
/// type's population never serializes unrelated callers.
///
/// Memory policy: outer keys are allocation addresses paired with a
/// [`Weak`] schema handle, and inner values hold member specs weakly. The
/// cache therefore never prevents a type dropped by its loader from being
/// reclaimed; dead slots are swept by [`purge`](AccessorCache::purge),
/// which also runs whenever a new type is first seen.
///
/// Races are tolerated by design: resolution is a pure function of
/// `(type, name)`, so concurrent writers can only ever store equal answers
/// and a lost update is recomputed identically.
pub struct AccessorCache {
    types: DashMap<SchemaKey, Arc<TypeAccessors>>,
    resolutions: AtomicU64,
}

impl AccessorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
            resolutions: AtomicU64::new(0),
        }
    }

    /// Returns the memoized accessor for `(schema, name)`, resolving and
    /// recording it on first use.
    ///
    /// `None` is the memoized "this type has no such property" outcome,
    /// not a failure.
    pub fn accessor(&self, schema: &Arc<TypeSchema>, name: &str) -> Option<Accessor> {
        let table = self.type_accessors(schema);
        if let Some(cached) = table.accessors.get(name) {
            if let Some(hit) = cached.upgrade() {
                return hit;
            }
            // The cached member was reclaimed out from under the entry;
            // fall through and re-resolve.
        }
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        let resolved = strategy::find_accessor(schema, name);
        table
            .accessors
            .insert(name.to_owned(), CachedAccessor::of(resolved.as_ref()));
        resolved
    }

    // Returns the accessor table for this schema's generation, creating it
    // on first sight.
    fn type_accessors(&self, schema: &Arc<TypeSchema>) -> Arc<TypeAccessors> {
        let key = SchemaKey::of(schema);
        if let Some(existing) = self.types.get(&key) {
            if existing.is_for(schema) {
                return Arc::clone(existing.value());
            }
        }
        // First sighting of this type, or of a new generation reusing a
        // reclaimed address. New types are rare; sweep dead slots now, the
        // way the weak maps this mirrors clean themselves on write.
        self.purge();
        let fresh = Arc::new(TypeAccessors::new(schema));
        match self.types.entry(key) {
            Entry::Occupied(mut slot) => {
                if slot.get().is_for(schema) {
                    // Another thread won the creation race.
                    Arc::clone(slot.get())
                } else {
                    slot.insert(Arc::clone(&fresh));
                    fresh
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&fresh));
                fresh
            }
        }
    }

    /// Sweeps cache slots whose type has been reclaimed.
    ///
    /// Reclamation itself never waits for this: the weak handles stop
    /// keeping anything alive the moment the loader drops its last `Arc`.
    /// Purging only returns the bookkeeping memory of dead slots.
    pub fn purge(&self) {
        let before = self.types.len();
        self.types
            .retain(|_, table| table.schema.strong_count() > 0);
        let swept = before.saturating_sub(self.types.len());
        if swept > 0 {
            debug!(swept, "purged accessor tables of reclaimed types");
        }
    }

    /// Number of type slots currently held (including not-yet-purged dead
    /// generations).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of times the resolution strategy has run. Diagnostic: a
    /// steady state resolves entirely from memoized entries.
    pub fn resolutions(&self) -> u64 {
        self.resolutions.load(Ordering::Relaxed)
    }
}

impl Default for AccessorCache {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
