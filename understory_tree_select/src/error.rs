// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for malformed trees.
//!
//! The engine never fails on malformed input; it stops walks at unknown ids and skips
//! dangling children. [`ItemIndex::validate`](crate::index::ItemIndex::validate) reports
//! what it had to work around.

use crate::types::ItemId;

/// A structural problem found in a flattened tree.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// Two items share an identifier; only the first is reachable by id.
    #[error("duplicate item id `{0}`")]
    DuplicateId(ItemId),
    /// A parent lists a child id that is not in the tree.
    #[error("item `{parent}` lists unknown child `{child}`")]
    DanglingChild {
        /// The item whose `children_ids` holds the reference.
        parent: ItemId,
        /// The unresolved child id.
        child: ItemId,
    },
    /// Following parent ids from an item leads back to the item itself.
    #[error("item `{0}` is its own ancestor")]
    ParentCycle(ItemId),
}
