//! Arena of parent-linked transform nodes.
//!
//! Every widget owns exactly one node. A node stores a local offset and an
//! optional parent handle; the world position is the sum of local offsets up
//! to the root and is recomputed on every query, so moving a container
//! immediately moves everything below it.
//!
//! Handles are [`slotmap`] keys: releasing a node invalidates its key, so a
//! handle kept past its widget's destruction is detected instead of silently
//! aliasing whatever node reuses the slot.

use slotmap::{SlotMap, new_key_type};

use crate::error::{TransformError, TransformResult};
use crate::geometry::Vec2;
use embedded_graphics::prelude::*;

new_key_type! {
    /// Handle to a node in a [`TransformArena`].
    pub struct XfrmId;
}

#[derive(Debug, Clone, Copy)]
struct Node {
    local: Vec2,
    parent: Option<XfrmId>,
}

/// Owner of all transform nodes on a screen.
#[derive(Debug, Default)]
pub struct TransformArena {
    nodes: SlotMap<XfrmId, Node>,
}

impl TransformArena {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Arena holding a single parentless node at `local`.
    pub fn with_root(local: Vec2) -> (Self, XfrmId) {
        let mut arena = Self::new();
        let root = arena.nodes.insert(Node {
            local,
            parent: None,
        });
        (arena, root)
    }

    /// Allocate a node at the origin of `parent` (or of the screen when
    /// `parent` is `None`).
    pub fn alloc(&mut self, parent: Option<XfrmId>) -> TransformResult<XfrmId> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        Ok(self.nodes.insert(Node {
            local: Point::zero(),
            parent,
        }))
    }

    /// Release a node. Returns `false` if the handle was already stale.
    ///
    /// Children are not released; their owners destroy them first.
    pub fn release(&mut self, id: XfrmId) -> bool {
        self.nodes.remove(id).is_some()
    }

    pub fn contains(&self, id: XfrmId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn local(&self, id: XfrmId) -> TransformResult<Vec2> {
        Ok(self.node(id)?.local)
    }

    pub fn set_local(&mut self, id: XfrmId, local: Vec2) -> TransformResult<()> {
        let node = self.nodes.get_mut(id).ok_or(TransformError::Stale(id))?;
        node.local = local;
        Ok(())
    }

    pub fn parent(&self, id: XfrmId) -> TransformResult<Option<XfrmId>> {
        Ok(self.node(id)?.parent)
    }

    /// Re-parent a node, refusing any change that would create a cycle.
    pub fn set_parent(&mut self, id: XfrmId, parent: Option<XfrmId>) -> TransformResult<()> {
        self.node(id)?;
        let mut cursor = parent;
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(TransformError::Cycle(id));
            }
            cursor = self.node(ancestor)?.parent;
        }
        let node = self.nodes.get_mut(id).ok_or(TransformError::Stale(id))?;
        node.parent = parent;
        Ok(())
    }

    /// World position: the sum of local offsets from `id` up to the root.
    pub fn world_pos(&self, id: XfrmId) -> TransformResult<Vec2> {
        let mut pos = Point::zero();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            pos += node.local;
            cursor = node.parent;
        }
        Ok(pos)
    }

    fn node(&self, id: XfrmId) -> TransformResult<&Node> {
        self.nodes.get(id).ok_or(TransformError::Stale(id))
    }
}
