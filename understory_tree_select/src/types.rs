// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for tree selection: identifiers, flags, input items, and flattened records.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

/// Canonical identity of an item.
///
/// Hosts frequently key their data by integers while others use strings.
/// Every entry point takes `impl Into<ItemId>` and integers are rendered in decimal,
/// so `ItemId::from(7)` and `ItemId::from("7")` name the same item.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for ItemId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&Self> for ItemId {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

macro_rules! item_id_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ItemId {
                fn from(value: $t) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

item_id_from_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

bitflags::bitflags! {
    /// Per-item state bits owned by the index.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// The item's children are shown.
        const EXPANDED = 0b0000_0001;
        /// The item itself is selected (as opposed to one of its descendants).
        const SELECTED = 0b0000_0010;
    }
}

/// Input record supplied by the host.
///
/// Trees can be described two ways:
/// - flat, with every item carrying its `parent_id` and `children_ids`, or
/// - nested, with parents holding their `children` directly.
///
/// See [`flatten`](crate::flatten::flatten) for how the two are told apart.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeItem {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name, also the text searched by the filter.
    pub name: String,
    /// Parent identifier; `None` for roots.
    pub parent_id: Option<ItemId>,
    /// Ordered child identifiers (flat form).
    pub children_ids: Vec<ItemId>,
    /// Nested children (nested form).
    pub children: Vec<TreeItem>,
    /// Whether the item starts out expanded.
    pub expanded: bool,
}

impl TreeItem {
    /// Create a root item with no children.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the parent identifier.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Set explicit child identifiers (flat form).
    #[must_use]
    pub fn with_children_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        self.children_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set nested children (nested form).
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Set the initial expansion state.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }
}

/// Slot of an item inside an [`ItemIndex`](crate::index::ItemIndex).
///
/// Slots are dense and only valid for the index that produced them;
/// every rebuild hands out a fresh set.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Slot(pub(crate) u32);

impl Slot {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_idx(idx: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Slot uses 32-bit indices by design."
        )]
        Self(idx as u32)
    }
}

/// Flattened item record owned by the index.
///
/// Identity fields are copied from the [`TreeItem`] it came from.
/// Selection state is mutated only by the selection engine.
#[derive(Clone, Debug)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) folded_name: String,
    pub(crate) parent_id: Option<ItemId>,
    pub(crate) children_ids: Vec<ItemId>,
    pub(crate) level: u32,
    pub(crate) flags: ItemFlags,
    pub(crate) selected_descendants: u32,
    // Resolved at index build.
    pub(crate) parent: Option<Slot>,
    pub(crate) children: Vec<Slot>,
}

impl Item {
    pub(crate) fn from_input(item: TreeItem) -> Self {
        let mut flags = ItemFlags::empty();
        flags.set(ItemFlags::EXPANDED, item.expanded);
        Self {
            folded_name: item.name.to_lowercase(),
            id: item.id,
            name: item.name,
            parent_id: item.parent_id,
            children_ids: item.children_ids,
            level: 0,
            flags,
            selected_descendants: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent identifier as supplied (or inherited from nesting).
    pub fn parent_id(&self) -> Option<&ItemId> {
        self.parent_id.as_ref()
    }

    /// Ordered child identifiers.
    pub fn children_ids(&self) -> &[ItemId] {
        &self.children_ids
    }

    /// Nesting depth; roots are level 0.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns true if the item has no children.
    pub fn is_leaf(&self) -> bool {
        self.children_ids.is_empty()
    }

    /// Returns true if the item's children are shown.
    pub fn is_expanded(&self) -> bool {
        self.flags.contains(ItemFlags::EXPANDED)
    }

    /// Returns true if the item itself is selected.
    pub fn is_selected(&self) -> bool {
        self.flags.contains(ItemFlags::SELECTED)
    }

    /// Returns true if any descendant is selected.
    pub fn has_selected_child(&self) -> bool {
        self.selected_descendants > 0
    }

    /// Number of selected items strictly below this one.
    pub fn selected_descendant_count(&self) -> u32 {
        self.selected_descendants
    }

    /// Raw state bits.
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// Visual selection state.
    pub fn check_state(&self) -> CheckState {
        if self.is_selected() {
            CheckState::Checked
        } else if self.has_selected_child() {
            CheckState::Partial
        } else {
            CheckState::Unchecked
        }
    }
}

/// Equality covers `(id, name, expanded)` only.
///
/// Selection state is deliberately excluded so that a host comparing item lists
/// is not fooled by selection changes made inside the engine.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.is_expanded() == other.is_expanded()
    }
}

impl Eq for Item {}

/// Three-way visual state of an item.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CheckState {
    /// Neither the item nor any descendant is selected.
    #[default]
    Unchecked,
    /// The item itself is selected.
    Checked,
    /// The item is not selected but at least one descendant is.
    Partial,
}
