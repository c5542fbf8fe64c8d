// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search filter: narrow the flattened sequence to subtrees matching a query.
//!
//! Matching is a case-insensitive substring test on item names.
//! Only roots (items without a `parent_id`) and items with children are tested. An item is
//! kept when its own name matches or when the name of one of its direct children does;
//! a kept item brings its whole subtree along. Leaves are therefore never tested on their
//! own, but a matching leaf still shows up because its parent tests it as a child.
//!
//! The result preserves flattened order of first appearance and holds no duplicates.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::index::ItemIndex;
use crate::types::{Item, Slot};

/// Normalize a query for matching; `None` means "no filter".
pub fn fold_query(query: Option<&str>) -> Option<String> {
    query.filter(|q| !q.is_empty()).map(str::to_lowercase)
}

/// Compute the filtered slot sequence for `query`.
///
/// An absent or empty query yields every slot in flattened order.
pub fn filter(index: &ItemIndex, query: Option<&str>) -> Vec<Slot> {
    let Some(folded) = fold_query(query) else {
        return index.slots().collect();
    };

    let mut included = vec![false; index.len()];
    let mut out = Vec::new();
    let include = |slot: Slot, included: &mut [bool], out: &mut Vec<Slot>| {
        if !core::mem::replace(&mut included[slot.idx()], true) {
            out.push(slot);
        }
    };

    for slot in index.slots() {
        let item = index.item(slot);
        if item.parent_id().is_some() && item.is_leaf() {
            continue;
        }
        let hit = name_matches(item, &folded)
            || index
                .children(slot)
                .iter()
                .any(|c| name_matches(index.item(*c), &folded));
        if !hit {
            continue;
        }
        if included[slot.idx()] {
            // Already pulled in with an ancestor's subtree.
            continue;
        }
        include(slot, &mut included, &mut out);
        for d in index.descendants(slot) {
            include(d, &mut included, &mut out);
        }
    }
    out
}

fn name_matches(item: &Item, folded_query: &str) -> bool {
    item.folded_name.contains(folded_query)
}
