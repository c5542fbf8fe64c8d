// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item index: the authoritative store of flattened items.
//!
//! Items live in a dense vector addressed by [`Slot`]. An id → slot map serves host
//! lookups, and parent/child references are resolved to slots once at build time so
//! that ancestor walks cost O(1) per step.
//!
//! ## Unresolved references
//!
//! - A `parent_id` that is not in the index makes the item a root for walking purposes.
//!   This is how a subtree cut out of a larger tree behaves.
//! - A child id that is not in the index is skipped; the branch stops there.
//! - A duplicated id maps to its first occurrence; later copies stay in the sequence
//!   but cannot be reached by id.
//!
//! None of these are errors at runtime; [`ItemIndex::validate`] reports them.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::TreeError;
use crate::types::{Item, ItemId, Slot};

const TARGET: &str = "understory_tree_select::index";

/// Slot-addressed store of flattened items with an id lookup.
#[derive(Clone, Debug, Default)]
pub struct ItemIndex {
    items: Vec<Item>,
    by_id: BTreeMap<ItemId, Slot>,
}

impl ItemIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a flattened sequence, resolving references and levels.
    pub fn build(items: Vec<Item>) -> Self {
        let mut by_id = BTreeMap::new();
        for (i, item) in items.iter().enumerate() {
            if by_id.contains_key(&item.id) {
                tracing::warn!(target: TARGET, id = %item.id, "duplicate item id; keeping first");
                continue;
            }
            by_id.insert(item.id.clone(), Slot::from_idx(i));
        }

        let mut index = Self { items, by_id };
        for i in 0..index.items.len() {
            let parent = index.items[i]
                .parent_id
                .as_ref()
                .and_then(|p| index.by_id.get(p).copied());
            let mut children = Vec::with_capacity(index.items[i].children_ids.len());
            for child in &index.items[i].children_ids {
                match index.by_id.get(child) {
                    Some(&slot) => children.push(slot),
                    None => tracing::warn!(
                        target: TARGET,
                        parent = %index.items[i].id,
                        child = %child,
                        "child id not found; skipping branch"
                    ),
                }
            }
            let item = &mut index.items[i];
            item.parent = parent;
            item.children = children;
        }
        for i in 0..index.items.len() {
            let level = index.ancestors(Slot::from_idx(i)).count();
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Depth is bounded by the slot count, which fits in 32 bits."
            )]
            let level = level as u32;
            index.items[i].level = level;
        }
        tracing::debug!(target: TARGET, items = index.items.len(), "index rebuilt");
        index
    }

    /// Number of items, duplicates included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve an id to its slot.
    pub fn slot(&self, id: &str) -> Option<Slot> {
        self.by_id.get(id).copied()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.slot(id).map(|slot| self.item(slot))
    }

    /// Access an item by slot.
    ///
    /// Panics if `slot` did not come from this index.
    pub fn item(&self, slot: Slot) -> &Item {
        &self.items[slot.idx()]
    }

    pub(crate) fn item_mut(&mut self, slot: Slot) -> &mut Item {
        &mut self.items[slot.idx()]
    }

    /// Iterate items in flattened order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }

    /// Iterate slots in flattened order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + use<> {
        (0..self.items.len()).map(Slot::from_idx)
    }

    /// Resolved parent of `slot`, if the parent id is known.
    pub fn parent(&self, slot: Slot) -> Option<Slot> {
        self.item(slot).parent
    }

    /// Resolved children of `slot`; dangling ids are absent.
    pub fn children(&self, slot: Slot) -> &[Slot] {
        &self.item(slot).children
    }

    /// Walk from the parent of `slot` up to the outermost known ancestor.
    ///
    /// The walk is bounded by the item count so a parent cycle cannot hang it.
    pub fn ancestors(&self, slot: Slot) -> Ancestors<'_> {
        Ancestors {
            index: self,
            next: self.parent(slot),
            budget: self.items.len(),
        }
    }

    /// Leaf descendants of `slot` in pre-order.
    ///
    /// Intermediate parents are passed through, never returned. A leaf is an item with
    /// no `children_ids`; an item whose children all dangle yields nothing.
    pub fn leaves(&self, slot: Slot) -> Vec<Slot> {
        let mut out = Vec::new();
        self.walk_descendants(slot, |index, s| {
            if index.item(s).is_leaf() {
                out.push(s);
            }
        });
        out
    }

    /// All descendants of `slot` in pre-order, excluding `slot` itself.
    pub fn descendants(&self, slot: Slot) -> Vec<Slot> {
        let mut out = Vec::new();
        self.walk_descendants(slot, |_, s| out.push(s));
        out
    }

    fn walk_descendants(&self, slot: Slot, mut visit: impl FnMut(&Self, Slot)) {
        let mut seen = vec![false; self.items.len()];
        seen[slot.idx()] = true;
        let mut stack: Vec<Slot> = self.children(slot).iter().rev().copied().collect();
        while let Some(s) = stack.pop() {
            if core::mem::replace(&mut seen[s.idx()], true) {
                continue;
            }
            visit(self, s);
            stack.extend(self.children(s).iter().rev().copied());
        }
    }

    /// Report the first structural problem, if any.
    ///
    /// Checks, in order: duplicate ids, dangling child references, parent cycles.
    pub fn validate(&self) -> Result<(), TreeError> {
        for (i, item) in self.items.iter().enumerate() {
            if self.by_id.get(&item.id).is_some_and(|s| s.idx() != i) {
                return Err(TreeError::DuplicateId(item.id.clone()));
            }
        }
        for item in &self.items {
            let dangling = item
                .children_ids
                .iter()
                .find(|c| self.slot(c.as_str()).is_none());
            if let Some(child) = dangling {
                return Err(TreeError::DanglingChild {
                    parent: item.id.clone(),
                    child: child.clone(),
                });
            }
        }
        for slot in self.slots() {
            if self.ancestors(slot).any(|a| a == slot) {
                return Err(TreeError::ParentCycle(self.item(slot).id.clone()));
            }
        }
        Ok(())
    }
}

/// Iterator over the known ancestors of an item, innermost first.
///
/// Returned by [`ItemIndex::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    index: &'a ItemIndex,
    next: Option<Slot>,
    budget: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let current = self.next?;
        if self.budget == 0 {
            self.next = None;
            return None;
        }
        self.budget -= 1;
        self.next = self.index.parent(current);
        Some(current)
    }
}
