// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection engine: toggle items and keep ancestor counters in step.
//!
//! ## State
//!
//! Each item carries a `SELECTED` flag and a count of selected items strictly below it.
//! Together they give the three visual states (unchecked, checked, partial) without
//! rescanning the tree. The [`Selection`] keeps the selected slots in insertion order
//! for reporting.
//!
//! ## Counters
//!
//! Selecting or deselecting an item walks from its parent towards the root, adjusting
//! every ancestor's count by one. The walk stops at the first parent id the index does
//! not know. For every ancestor, the count equals the number of selected items in its
//! subtree after every operation.
//!
//! ## Policy
//!
//! [`SelectionPolicy`] combines single vs multi select with whether parents may be
//! selected directly. When parents may not be selected, selecting a parent in multi-select
//! mode selects its leaves instead; in single-select mode it selects nothing.

use alloc::vec::Vec;

use crate::index::ItemIndex;
use crate::types::{ItemFlags, ItemId, Slot};

const TARGET: &str = "understory_tree_select::selection";

/// How a toggle may change the selection.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SelectionPolicy {
    /// Allow more than one selected item.
    pub multi_select: bool,
    /// Allow items with children to be selected directly.
    pub select_parents: bool,
}

/// What a toggle decided to do.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ToggleAction {
    /// The target (or its leaves) was selected.
    Select,
    /// The target (or its selected leaves) was deselected.
    Deselect,
}

/// The set of selected items, in the order they were selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    order: Vec<Slot>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected slots in selection order.
    pub fn slots(&self) -> &[Slot] {
        &self.order
    }

    /// Selected ids in selection order.
    pub fn ids(&self, index: &ItemIndex) -> Vec<ItemId> {
        self.order
            .iter()
            .map(|s| index.item(*s).id().clone())
            .collect()
    }

    /// Decide whether toggling `slot` selects or deselects.
    ///
    /// An item deselects when it is selected itself, or when something below it is selected
    /// and either only one item may be selected or parents cannot be selected directly.
    pub fn classify(index: &ItemIndex, policy: SelectionPolicy, slot: Slot) -> ToggleAction {
        let item = index.item(slot);
        let via_descendants =
            item.has_selected_child() && (!policy.multi_select || !policy.select_parents);
        if item.is_selected() || via_descendants {
            ToggleAction::Deselect
        } else {
            ToggleAction::Select
        }
    }

    /// Toggle `slot` under `policy` and report which way it went.
    pub fn toggle(
        &mut self,
        index: &mut ItemIndex,
        policy: SelectionPolicy,
        slot: Slot,
    ) -> ToggleAction {
        let action = Self::classify(index, policy, slot);
        tracing::trace!(
            target: TARGET,
            id = %index.item(slot).id(),
            ?action,
            "toggle"
        );
        match action {
            ToggleAction::Select => self.select(index, policy, slot),
            ToggleAction::Deselect => self.deselect(index, slot),
        }
        action
    }

    /// Select `slot` under `policy`.
    ///
    /// Does nothing if the item is already selected. In single-select mode the existing
    /// selection is cleared first, even when the target turns out not to be selectable.
    pub fn select(&mut self, index: &mut ItemIndex, policy: SelectionPolicy, slot: Slot) {
        if index.item(slot).is_selected() {
            return;
        }
        if !policy.multi_select {
            self.clear(index);
        }
        if policy.select_parents || index.item(slot).is_leaf() {
            self.mark(index, slot);
        } else if policy.multi_select {
            for leaf in index.leaves(slot) {
                if !index.item(leaf).is_selected() {
                    self.mark(index, leaf);
                }
            }
        }
    }

    /// Deselect `slot`.
    ///
    /// A directly selected item is deselected on its own. Otherwise every selected leaf
    /// below it is deselected; intermediate parents are left alone. A directly selected
    /// intermediate parent below `slot` therefore stays selected, and `slot` stays partial.
    pub fn deselect(&mut self, index: &mut ItemIndex, slot: Slot) {
        let item = index.item(slot);
        if item.is_selected() {
            self.unmark(index, slot);
        } else if !item.is_leaf() {
            for leaf in index.leaves(slot) {
                if index.item(leaf).is_selected() {
                    self.unmark(index, leaf);
                }
            }
        }
    }

    /// Deselect everything, unwinding every ancestor counter.
    pub fn clear(&mut self, index: &mut ItemIndex) {
        for slot in core::mem::take(&mut self.order) {
            index.item_mut(slot).flags.remove(ItemFlags::SELECTED);
            adjust_ancestors(index, slot, false);
        }
    }

    /// Replace the selection with the items named by `ids`.
    ///
    /// Unknown ids and repeats are skipped. The selection policy is not consulted: an
    /// externally supplied selection is taken as given.
    pub fn replace<I>(&mut self, index: &mut ItemIndex, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.clear(index);
        for id in ids {
            let Some(slot) = index.slot(id.as_ref()) else {
                tracing::debug!(target: TARGET, id = id.as_ref(), "selected id not in tree");
                continue;
            };
            if !index.item(slot).is_selected() {
                self.mark(index, slot);
            }
        }
    }

    fn mark(&mut self, index: &mut ItemIndex, slot: Slot) {
        index.item_mut(slot).flags.insert(ItemFlags::SELECTED);
        self.order.push(slot);
        adjust_ancestors(index, slot, true);
    }

    fn unmark(&mut self, index: &mut ItemIndex, slot: Slot) {
        index.item_mut(slot).flags.remove(ItemFlags::SELECTED);
        self.order.retain(|s| *s != slot);
        adjust_ancestors(index, slot, false);
    }
}

/// Ancestor-counter walk shared by select and deselect.
///
/// Decrements saturate at zero. Underflow cannot happen by construction because a counter
/// is only decremented for an item whose selection incremented it.
fn adjust_ancestors(index: &mut ItemIndex, slot: Slot, selected: bool) {
    let mut next = index.parent(slot);
    let mut budget = index.len();
    while let Some(parent) = next {
        if budget == 0 {
            break;
        }
        budget -= 1;
        let item = index.item_mut(parent);
        if selected {
            item.selected_descendants += 1;
        } else {
            debug_assert!(
                item.selected_descendants > 0,
                "selected descendant count underflow at `{}`",
                item.id
            );
            item.selected_descendants = item.selected_descendants.saturating_sub(1);
        }
        next = item.parent;
    }
}
