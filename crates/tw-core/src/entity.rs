use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::component::{Component, ComponentId, ComponentRef, DetachedComponent};

/// Identifier for an entity, allocated by its [`EntityManager`](crate::EntityManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id. Ids are normally allocated by the manager; this exists
    /// for callers that need to name an id that was never allocated.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw arena index.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e#{}", self.0)
    }
}

struct Slot {
    id: ComponentId,
    name: String,
    value: Box<dyn Any>,
}

struct Table {
    type_name: &'static str,
    slots: Vec<Slot>,
}

impl Table {
    fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            slots: Vec::new(),
        }
    }

    fn position(&self, id: ComponentId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }
}

/// A named, identified bag of heterogeneous components.
///
/// Components are kept in one table per concrete type. Within a table the
/// insertion order is preserved; across tables there is no order.
pub struct Entity {
    id: EntityId,
    name: String,
    tables: HashMap<TypeId, Table>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    /// This entity's id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// This entity's name. Not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // -----------------------------------------------------------------------
    // Adding
    // -----------------------------------------------------------------------

    /// Attach a component and return its freshly allocated id.
    pub fn add<T: Component>(&mut self, name: impl Into<String>, value: T) -> ComponentId {
        let id = ComponentId::next();
        self.table_mut::<T>().slots.push(Slot {
            id,
            name: name.into(),
            value: Box::new(value),
        });
        id
    }

    /// Re-attach a previously detached component, keeping its id.
    pub fn attach(&mut self, component: DetachedComponent) -> ComponentId {
        let DetachedComponent {
            id,
            name,
            type_id,
            type_name,
            value,
        } = component;
        self.tables
            .entry(type_id)
            .or_insert_with(|| Table::new(type_name))
            .slots
            .push(Slot { id, name, value });
        id
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// All components of type `T`, in insertion order.
    pub fn find_all<T: Component>(&self) -> Vec<ComponentRef<'_, T>> {
        self.iter::<T>().collect()
    }

    /// All components of type `T` whose payload satisfies `predicate`.
    pub fn find_all_where<T: Component>(
        &self,
        predicate: impl Fn(&T) -> bool,
    ) -> Vec<ComponentRef<'_, T>> {
        self.iter::<T>().filter(|c| predicate(c.value)).collect()
    }

    /// The first component of type `T`, if any.
    pub fn find_first<T: Component>(&self) -> Option<ComponentRef<'_, T>> {
        self.iter::<T>().next()
    }

    /// The first component of type `T` with the given name.
    pub fn find_first_by_name<T: Component>(&self, name: &str) -> Option<ComponentRef<'_, T>> {
        self.iter::<T>().find(|c| c.name == name)
    }

    /// The first component of type `T` whose payload satisfies `predicate`.
    pub fn find_first_where<T: Component>(
        &self,
        predicate: impl Fn(&T) -> bool,
    ) -> Option<ComponentRef<'_, T>> {
        self.iter::<T>().find(|c| predicate(c.value))
    }

    /// Borrow a component of type `T` by id.
    pub fn get<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.iter::<T>().find(|c| c.id == id).map(|c| c.value)
    }

    /// Mutably borrow a component of type `T` by id.
    pub fn get_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.tables
            .get_mut(&TypeId::of::<T>())?
            .slots
            .iter_mut()
            .find(|s| s.id == id)?
            .value
            .downcast_mut::<T>()
    }

    /// Mutably borrow the first component of type `T`.
    pub fn first_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.first_mut_where::<T>(|_| true)
    }

    /// Mutably borrow the first component of type `T` with the given name.
    pub fn first_mut_by_name<T: Component>(&mut self, name: &str) -> Option<&mut T> {
        self.tables
            .get_mut(&TypeId::of::<T>())?
            .slots
            .iter_mut()
            .find(|s| s.name == name)?
            .value
            .downcast_mut::<T>()
    }

    /// Mutably borrow the first component of type `T` matching `predicate`.
    pub fn first_mut_where<T: Component>(
        &mut self,
        predicate: impl Fn(&T) -> bool,
    ) -> Option<&mut T> {
        self.tables
            .get_mut(&TypeId::of::<T>())?
            .slots
            .iter_mut()
            .filter_map(|s| s.value.downcast_mut::<T>())
            .find(|v| predicate(v))
    }

    /// Whether at least one component of type `T` is attached.
    pub fn has<T: Component>(&self) -> bool {
        self.count::<T>() > 0
    }

    /// Number of components of type `T`.
    pub fn count<T: Component>(&self) -> usize {
        self.tables
            .get(&TypeId::of::<T>())
            .map_or(0, |t| t.slots.len())
    }

    /// Total number of components of every type.
    pub fn len(&self) -> usize {
        self.tables.values().map(|t| t.slots.len()).sum()
    }

    /// Whether the entity has no components at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Remove one component by identity. Returns `false` if it was not present.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        self.detach(id).is_some()
    }

    /// Remove every listed component; ids that are not present are skipped.
    /// Returns how many were removed.
    pub fn remove_all(&mut self, ids: &[ComponentId]) -> usize {
        ids.iter().filter(|id| self.remove(**id)).count()
    }

    /// Remove a component of type `T` by id and return its payload.
    pub fn take<T: Component>(&mut self, id: ComponentId) -> Option<T> {
        let table = self.tables.get_mut(&TypeId::of::<T>())?;
        let index = table.position(id)?;
        let slot = table.slots.remove(index);
        slot.value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Remove and return every component of type `T`, in insertion order.
    pub fn drain<T: Component>(&mut self) -> Vec<T> {
        self.drain_where::<T>(|_| true)
    }

    /// Remove and return every component of type `T` matching `predicate`.
    /// Non-matching components stay in place, in their original order.
    pub fn drain_where<T: Component>(&mut self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let Some(table) = self.tables.get_mut(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(table.slots.len());
        for slot in table.slots.drain(..) {
            let matches = slot.value.downcast_ref::<T>().is_some_and(&predicate);
            if !matches {
                kept.push(slot);
                continue;
            }
            if let Ok(value) = slot.value.downcast::<T>() {
                taken.push(*value);
            }
        }
        table.slots = kept;
        taken
    }

    /// Lift a component off this entity, keeping its id and payload.
    pub fn detach(&mut self, id: ComponentId) -> Option<DetachedComponent> {
        let (type_id, table) = self
            .tables
            .iter_mut()
            .find(|(_, t)| t.slots.iter().any(|s| s.id == id))?;
        let type_id = *type_id;
        let index = table.position(id)?;
        let slot = table.slots.remove(index);
        Some(DetachedComponent {
            id: slot.id,
            name: slot.name,
            type_id,
            type_name: table.type_name,
            value: slot.value,
        })
    }

    /// Lift every component of type `T` off this entity.
    pub fn detach_all<T: Component>(&mut self) -> Vec<DetachedComponent> {
        let type_id = TypeId::of::<T>();
        let Some(table) = self.tables.get_mut(&type_id) else {
            return Vec::new();
        };
        let type_name = table.type_name;
        table
            .slots
            .drain(..)
            .map(|slot| DetachedComponent {
                id: slot.id,
                name: slot.name,
                type_id,
                type_name,
                value: slot.value,
            })
            .collect()
    }

    /// Remove every component.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    fn iter<T: Component>(&self) -> impl Iterator<Item = ComponentRef<'_, T>> {
        self.tables
            .get(&TypeId::of::<T>())
            .into_iter()
            .flat_map(|t| t.slots.iter())
            .filter_map(|slot| {
                slot.value.downcast_ref::<T>().map(|value| ComponentRef {
                    id: slot.id,
                    name: &slot.name,
                    value,
                })
            })
    }

    fn table_mut<T: Component>(&mut self) -> &mut Table {
        self.tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Table::new(std::any::type_name::<T>()))
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<(&str, usize)> = self
            .tables
            .values()
            .filter(|t| !t.slots.is_empty())
            .map(|t| (t.type_name, t.slots.len()))
            .collect();
        types.sort_unstable();
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &types)
            .finish()
    }
}
