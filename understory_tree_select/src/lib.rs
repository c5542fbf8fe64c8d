// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_select --heading-base-level=0

//! Understory Tree Select: selection state for hierarchical item views.
//!
//! ## Overview
//!
//! This crate owns the state behind a tree selector widget: which items are selected, how
//! selection propagates to ancestors, and which items survive a search. It does not render,
//! virtualize, or handle input events; a hosting view feeds it items and interactions and
//! reads back flat sequences and per-item state.
//!
//! - [`flatten`](crate::flatten) turns a nested or flat forest into a pre-order sequence.
//! - [`ItemIndex`](crate::index::ItemIndex) stores that sequence and resolves ids, parents,
//!   and children to slots.
//! - [`Selection`](crate::selection::Selection) toggles items under a
//!   [`SelectionPolicy`](crate::selection::SelectionPolicy) and keeps per-ancestor counts of
//!   selected descendants, giving each item a checked, unchecked, or partial state.
//! - [`search`](crate::search) narrows the sequence to subtrees matching a query.
//! - [`TreeSelector`](crate::selector::TreeSelector) ties these together behind
//!   generation-gated inputs and reports each toggle as a
//!   [`SelectionChange`](crate::notify::SelectionChange).
//!
//! ## Policies
//!
//! - Single select: selecting anything first clears the selection.
//! - Multi select with parents disallowed: selecting a parent selects its leaves.
//! - Parents allowed: a parent is selected directly and its descendants are untouched.
//! - Single select with parents disallowed: parents are not selectable at all.
//!
//! ## Example
//!
//! ```rust
//! use understory_tree_select::{CheckState, SelectorConfig, TreeItem, TreeSelector};
//!
//! let mut selector = TreeSelector::new(SelectorConfig::default().with_multi_select(true));
//! selector.set_items(
//!     1,
//!     vec![TreeItem::new("fruit", "Fruit").with_children(vec![
//!         TreeItem::new("apple", "Apple"),
//!         TreeItem::new("pear", "Pear"),
//!     ])],
//! );
//!
//! // Parents cannot be selected directly, so their leaves are selected instead.
//! let change = selector.toggle("fruit").unwrap();
//! assert_eq!(change.selected.len(), 2);
//! assert_eq!(selector.check_state("fruit"), Some(CheckState::Partial));
//!
//! // Searching keeps whole subtrees whose parent or direct children match.
//! selector.set_search_query(Some("app"));
//! let names: Vec<_> = selector.filtered_items().map(|i| i.name()).collect();
//! assert_eq!(names, ["Fruit", "Apple", "Pear"]);
//! ```
//!
//! ## Logging
//!
//! Rebuilds are reported at `debug`, toggles at `trace`, and malformed input (dangling
//! children, duplicate ids) at `warn`, all through [`tracing`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod flatten;
pub mod index;
pub mod notify;
pub mod search;
pub mod selection;
pub mod selector;
pub mod types;

pub use config::SelectorConfig;
pub use error::TreeError;
pub use index::ItemIndex;
pub use notify::{SelectionChange, SelectionEvent, SelectionObserver};
pub use selection::{Selection, SelectionPolicy, ToggleAction};
pub use selector::{Activation, ActivationTarget, TreeSelector};
pub use types::{CheckState, Item, ItemFlags, ItemId, Slot, TreeItem};
