use std::collections::HashMap;
use std::fmt;

use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult};

/// Conventional group names used by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupName {
    /// Player entities.
    Players,
    /// Non-player characters.
    Npcs,
    /// Engine-owned entities such as the shared output sink.
    Core,
    /// Rooms.
    Rooms,
    /// Item definitions.
    Items,
    /// Hostile creatures.
    Mobs,
}

impl GroupName {
    /// The lowercase key this group is stored under.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Npcs => "npcs",
            Self::Core => "core",
            Self::Rooms => "rooms",
            Self::Items => "items",
            Self::Mobs => "mobs",
        }
    }
}

impl AsRef<str> for GroupName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, ordered partition of entities.
#[derive(Debug, Clone)]
pub struct EntityGroup {
    name: String,
    members: Vec<EntityId>,
}

impl EntityGroup {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// The group's key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member ids in insertion order.
    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    /// Whether `id` belongs to this group.
    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Owns every entity and the groups that classify them.
///
/// Entities live in an arena keyed by [`EntityId`]; groups hold ids, so one
/// entity may belong to several groups at once. An entity is dropped when it
/// is removed from the last group it belongs to. Group names are matched
/// exactly and case-sensitively.
#[derive(Default)]
pub struct EntityManager {
    entities: HashMap<EntityId, Entity>,
    groups: Vec<EntityGroup>,
    next_id: u64,
}

impl fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityManager")
            .field("entities", &self.entities.len())
            .field("groups", &self.group_names())
            .finish()
    }
}

impl EntityManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    /// Create a group if it does not already exist.
    pub fn create_group(&mut self, name: impl AsRef<str>) -> &EntityGroup {
        let index = self.group_index_or_insert(name.as_ref());
        &self.groups[index]
    }

    /// Look up a group by exact name.
    pub fn group(&self, name: impl AsRef<str>) -> Option<&EntityGroup> {
        let name = name.as_ref();
        self.groups.iter().find(|g| g.name == name)
    }

    /// Whether a group with this exact name exists.
    pub fn contains_group(&self, name: impl AsRef<str>) -> bool {
        self.group(name).is_some()
    }

    /// Names of all groups, in creation order.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Entities
    // -----------------------------------------------------------------------

    /// Create an entity and place it in `group`, creating the group if needed.
    pub fn create_entity(&mut self, group: impl AsRef<str>, name: impl Into<String>) -> EntityId {
        self.next_id += 1;
        let id = EntityId::from_raw(self.next_id);
        self.entities.insert(id, Entity::new(id, name));
        let index = self.group_index_or_insert(group.as_ref());
        self.groups[index].members.push(id);
        id
    }

    /// Add an existing entity to another group, creating the group if needed.
    ///
    /// Returns `false` if the entity does not exist. Adding an entity to a
    /// group it already belongs to is a no-op.
    pub fn add_entity_to_group(&mut self, group: impl AsRef<str>, id: EntityId) -> bool {
        if !self.entities.contains_key(&id) {
            return false;
        }
        let index = self.group_index_or_insert(group.as_ref());
        let members = &mut self.groups[index].members;
        if !members.contains(&id) {
            members.push(id);
        }
        true
    }

    /// Borrow an entity regardless of group membership.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Mutably borrow an entity regardless of group membership.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Borrow an entity only if it belongs to `group`.
    pub fn get_entity_by_id(&self, group: impl AsRef<str>, id: EntityId) -> Option<&Entity> {
        if self.group(group)?.contains(id) {
            self.entities.get(&id)
        } else {
            None
        }
    }

    /// Mutably borrow an entity only if it belongs to `group`.
    pub fn get_entity_by_id_mut(
        &mut self,
        group: impl AsRef<str>,
        id: EntityId,
    ) -> Option<&mut Entity> {
        if self.group(group)?.contains(id) {
            self.entities.get_mut(&id)
        } else {
            None
        }
    }

    /// The first entity in `group` with exactly this name.
    pub fn get_entity_by_name(&self, group: impl AsRef<str>, name: &str) -> Option<&Entity> {
        self.find_entity(group, |e| e.name() == name)
    }

    /// Mutably borrow the first entity in `group` with exactly this name.
    pub fn get_entity_by_name_mut(
        &mut self,
        group: impl AsRef<str>,
        name: &str,
    ) -> Option<&mut Entity> {
        let id = self.get_entity_by_name(group, name)?.id();
        self.entities.get_mut(&id)
    }

    /// All entities in `group` matching `predicate`, in group order.
    ///
    /// A missing group yields an empty list.
    pub fn find_entities(
        &self,
        group: impl AsRef<str>,
        predicate: impl Fn(&Entity) -> bool,
    ) -> Vec<&Entity> {
        self.members(group.as_ref())
            .into_iter()
            .filter(|e| predicate(e))
            .collect()
    }

    /// The first entity in `group` matching `predicate`.
    pub fn find_entity(
        &self,
        group: impl AsRef<str>,
        predicate: impl Fn(&Entity) -> bool,
    ) -> Option<&Entity> {
        self.members(group.as_ref())
            .into_iter()
            .find(|e| predicate(e))
    }

    /// Every entity in `group`, in group order.
    pub fn entities(&self, group: impl AsRef<str>) -> Vec<&Entity> {
        self.members(group.as_ref())
    }

    /// Ids of every entity in `group`, in group order.
    pub fn entity_ids(&self, group: impl AsRef<str>) -> Vec<EntityId> {
        self.group(group)
            .map(|g| g.members.clone())
            .unwrap_or_default()
    }

    /// Remove an entity from `group`. Returns whether a removal happened.
    ///
    /// Once the entity belongs to no group at all it is dropped.
    pub fn remove_entity(&mut self, group: impl AsRef<str>, id: EntityId) -> bool {
        let name = group.as_ref();
        let Some(group) = self.groups.iter_mut().find(|g| g.name == name) else {
            return false;
        };
        let Some(index) = group.members.iter().position(|m| *m == id) else {
            return false;
        };
        group.members.remove(index);

        if !self.groups.iter().any(|g| g.contains(id)) {
            self.entities.remove(&id);
        }
        true
    }

    /// Borrow an entity that world construction guarantees to exist.
    pub fn require_entity(&self, group: impl AsRef<str>, id: EntityId) -> CoreResult<&Entity> {
        let name = group.as_ref();
        if !self.contains_group(name) {
            return Err(CoreError::GroupNotFound(name.to_string()));
        }
        self.get_entity_by_id(name, id)
            .ok_or_else(|| CoreError::EntityNotFound {
                group: name.to_string(),
                id,
            })
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entities exist.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn members(&self, group: &str) -> Vec<&Entity> {
        self.group(group)
            .into_iter()
            .flat_map(|g| g.members.iter())
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    fn group_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.groups.iter().position(|g| g.name == name) {
            return index;
        }
        self.groups.push(EntityGroup::new(name));
        self.groups.len() - 1
    }
}
