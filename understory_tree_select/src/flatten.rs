// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattener: turn a nested or flat forest into a pre-order sequence of [`Item`]s.
//!
//! ## Input forms
//!
//! - **Nested**: at least one top-level item holds a non-empty `children` list.
//!   The forest is walked recursively; each parent's `children_ids` is replaced by the ids
//!   of its nested children, and each nested child inherits the parent as its `parent_id`.
//! - **Flat**: no top-level item holds nested children.
//!   Items are copied through in the order given, untouched.
//!
//! ## Ordering
//!
//! Nested input always produces pre-order output: a parent appears before all of its
//! descendants. Flat input keeps the host's order.

use alloc::vec::Vec;
use core::mem;

use crate::types::{Item, TreeItem};

const TARGET: &str = "understory_tree_select::flatten";

/// Returns true if the input uses the nested form.
pub fn is_nested(items: &[TreeItem]) -> bool {
    items.iter().any(|item| !item.children.is_empty())
}

/// Flatten `items` into the internal record sequence.
pub fn flatten(items: Vec<TreeItem>) -> Vec<Item> {
    if !is_nested(&items) {
        return items.into_iter().map(Item::from_input).collect();
    }
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        flatten_into(item, &mut out);
    }
    tracing::debug!(target: TARGET, items = out.len(), "flattened nested forest");
    out
}

fn flatten_into(mut item: TreeItem, out: &mut Vec<Item>) {
    let children = mem::take(&mut item.children);
    if !children.is_empty() {
        item.children_ids.clear();
        item.children_ids
            .extend(children.iter().map(|child| child.id.clone()));
    }
    let parent = item.id.clone();
    out.push(Item::from_input(item));
    for mut child in children {
        if child.parent_id.as_ref().is_some_and(|p| *p != parent) {
            tracing::debug!(
                target: TARGET,
                child = %child.id,
                parent = %parent,
                "nested child carried a different parent id; nesting wins"
            );
        }
        child.parent_id = Some(parent.clone());
        flatten_into(child, out);
    }
}
