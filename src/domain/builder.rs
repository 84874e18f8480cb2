//! Map builder: wires named rooms into a fixed binary tree.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{Room, RoomMap};
use crate::domain::entities::Direction;
use crate::domain::error::{DomainError, DomainResult};

/// Default number of room slots reserved up front.
pub const DEFAULT_CAPACITY: usize = 64;

/// Constructs a [`RoomMap`] one room and one link at a time.
///
/// Storage is reserved once; creating more rooms than the capacity allows
/// fails with [`DomainError::CapacityExhausted`] instead of growing.
pub struct MapBuilder {
    map: RoomMap,
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MapBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: RoomMap::with_capacity(capacity),
        }
    }

    /// Create a room with no paths out of it.
    #[instrument(level = "debug", skip(self))]
    pub fn create_room(&mut self, name: &str) -> DomainResult<Index> {
        self.map
            .try_insert(Room::new(name))
            .map_err(|room| DomainError::CapacityExhausted {
                name: room.name,
                capacity: self.map.capacity(),
            })
    }

    /// Wire the left and/or right path of `parent`.
    ///
    /// Nothing is changed unless every requested link is valid.
    #[instrument(level = "debug", skip(self))]
    pub fn link_children(
        &mut self,
        parent: Index,
        left: Option<Index>,
        right: Option<Index>,
    ) -> DomainResult<()> {
        if left.is_some() && left == right {
            let child = left.map(|idx| self.name_of(idx)).unwrap_or_default();
            return Err(DomainError::AlreadyLinked(child));
        }

        for (direction, child) in [(Direction::Left, left), (Direction::Right, right)] {
            if let Some(child) = child {
                self.check_link(parent, direction, child)?;
            }
        }

        for (direction, child) in [(Direction::Left, left), (Direction::Right, right)] {
            let Some(child) = child else { continue };
            if let Some(room) = self.map.get_mut(parent) {
                match direction {
                    Direction::Left => room.left = Some(child),
                    Direction::Right => room.right = Some(child),
                }
            }
            if let Some(room) = self.map.get_mut(child) {
                room.parent = Some(parent);
            }
        }
        Ok(())
    }

    fn check_link(&self, parent: Index, direction: Direction, child: Index) -> DomainResult<()> {
        let parent_room = self
            .map
            .room(parent)
            .ok_or_else(|| DomainError::UnknownRoom(format!("{parent:?}")))?;
        let child_room = self
            .map
            .room(child)
            .ok_or_else(|| DomainError::UnknownRoom(format!("{child:?}")))?;

        if parent == child {
            return Err(DomainError::SelfLink(child_room.name.clone()));
        }
        if parent_room.child(direction).is_some() {
            return Err(DomainError::SlotOccupied {
                parent: parent_room.name.clone(),
                direction,
            });
        }
        if child_room.parent.is_some() {
            return Err(DomainError::AlreadyLinked(child_room.name.clone()));
        }

        // The child must not be an ancestor of its new parent
        let mut ancestor = parent_room.parent;
        while let Some(idx) = ancestor {
            if idx == child {
                return Err(DomainError::CycleDetected(child_room.name.clone()));
            }
            ancestor = self.map.room(idx).and_then(|room| room.parent);
        }
        Ok(())
    }

    fn name_of(&self, idx: Index) -> String {
        self.map
            .room(idx)
            .map(|room| room.name.clone())
            .unwrap_or_else(|| format!("{idx:?}"))
    }

    /// Finish construction with `root` as the entrance.
    ///
    /// Every created room must hang below the root.
    #[instrument(level = "debug", skip(self))]
    pub fn build(mut self, root: Index) -> DomainResult<RoomMap> {
        let root_room = self
            .map
            .room(root)
            .ok_or_else(|| DomainError::UnknownRoom(format!("{root:?}")))?;
        if root_room.parent.is_some() {
            return Err(DomainError::RootHasParent(root_room.name.clone()));
        }

        self.map.set_root(root);
        let reachable: HashSet<Index> = self.map.iter().map(|(idx, _)| idx).collect();
        if let Some(detached) = self
            .map
            .indices()
            .into_iter()
            .find(|idx| !reachable.contains(idx))
        {
            return Err(DomainError::DetachedRoom(self.name_of(detached)));
        }

        debug!(rooms = self.map.len(), depth = self.map.depth(), "map built");
        Ok(self.map)
    }
}

/// Builds the Detective Quest mansion.
///
/// ```text
/// Hall de Entrada
/// ├── Sala de Estar
/// │   ├── Biblioteca
/// │   │   ├── Sala Secreta
/// │   │   └── Sala de Leitura
/// │   └── Escritorio
/// └── Cozinha
///     ├── Despensa
///     └── Jardim
///         ├── Estufa
///         └── Gazebo
/// ```
#[instrument(level = "info")]
pub fn mansion_map(capacity: usize) -> DomainResult<RoomMap> {
    let mut builder = MapBuilder::with_capacity(capacity);

    let hall = builder.create_room("Hall de Entrada")?;

    let living_room = builder.create_room("Sala de Estar")?;
    let kitchen = builder.create_room("Cozinha")?;
    builder.link_children(hall, Some(living_room), Some(kitchen))?;

    let library = builder.create_room("Biblioteca")?;
    let study = builder.create_room("Escritorio")?;
    builder.link_children(living_room, Some(library), Some(study))?;

    let pantry = builder.create_room("Despensa")?;
    let garden = builder.create_room("Jardim")?;
    builder.link_children(kitchen, Some(pantry), Some(garden))?;

    let secret_room = builder.create_room("Sala Secreta")?;
    let reading_room = builder.create_room("Sala de Leitura")?;
    builder.link_children(library, Some(secret_room), Some(reading_room))?;

    let greenhouse = builder.create_room("Estufa")?;
    let gazebo = builder.create_room("Gazebo")?;
    builder.link_children(garden, Some(greenhouse), Some(gazebo))?;

    builder.build(hall)
}
