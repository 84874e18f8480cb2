use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::RoomMap;
use crate::domain::entities::Direction;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for RoomMap {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(map: &RoomMap, idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(room) = map.room(idx) {
                for direction in room.exits() {
                    if let Some(child_idx) = room.child(direction) {
                        if let Some(child) = map.room(child_idx) {
                            let label = format!("[{}] {}", direction.key(), child.name);
                            let mut child_tree = Tree::new(label);
                            build_tree(map, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }
        }

        match self.root().and_then(|idx| self.room(idx).map(|room| (idx, room))) {
            Some((root_idx, root)) => {
                let mut tree = Tree::new(root.name.clone());
                build_tree(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("Empty map".to_string()),
        }
    }
}

/// Label shown next to a movement option.
pub fn option_label(direction: Direction) -> String {
    format!("[{}] Go {}", direction.key(), direction)
}
