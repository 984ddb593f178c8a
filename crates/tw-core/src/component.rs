use std::any::{Any, TypeId};
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a single component instance.
///
/// Two components with equal payloads still have different ids, which is what
/// makes removal identity-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocate the next id from the process-wide counter.
    pub fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c#{}", self.0)
    }
}

/// Anything that can be attached to an entity.
///
/// Implemented for every `'static` type; payloads are stored in per-type
/// tables and recovered with a checked downcast.
pub trait Component: Any {}

impl<T: Any> Component for T {}

/// A borrowed, typed view of one stored component.
pub struct ComponentRef<'a, T> {
    /// The component's identity.
    pub id: ComponentId,
    /// The component's human-readable name.
    pub name: &'a str,
    /// The payload.
    pub value: &'a T,
}

impl<T> Clone for ComponentRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ComponentRef<'_, T> {}

impl<T> Deref for ComponentRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for ComponentRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("value", self.value)
            .finish()
    }
}

/// A component lifted off an entity, keeping its id so it can be re-attached
/// elsewhere (or later) without losing identity.
pub struct DetachedComponent {
    pub(crate) id: ComponentId,
    pub(crate) name: String,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any>,
}

impl DetachedComponent {
    /// The component's identity.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The component's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the payload is of type `T`.
    pub fn is<T: Component>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrow the payload as `T`.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Consume the wrapper and recover the payload, or give it back unchanged.
    pub fn downcast<T: Component>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let Self {
            id,
            name,
            type_id,
            type_name,
            value,
        } = self;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|value| Self {
            id,
            name,
            type_id,
            type_name,
            value,
        })
    }
}

impl fmt::Debug for DetachedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetachedComponent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type", &self.type_name)
            .finish()
    }
}
