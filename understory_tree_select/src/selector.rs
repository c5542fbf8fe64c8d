// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree selector: the state object a hosting view drives.
//!
//! ## Inputs
//!
//! - [`TreeSelector::set_items`] supplies the tree (flat or nested) with a generation.
//! - [`TreeSelector::set_selected_items`] supplies an external selection with a generation.
//! - [`TreeSelector::set_search_query`] narrows the filtered sequence.
//!
//! Generations are opaque counters owned by the host. Supplying the same generation twice
//! is a no-op, so a host can forward its inputs on every render without rebuilding. A new
//! item generation rebuilds the index, re-applies the last requested selection, and
//! recomputes the filter.
//!
//! ## Interactions
//!
//! [`TreeSelector::toggle`] flips the selection of one item and returns a
//! [`SelectionChange`]. [`TreeSelector::activate`] models clicks on a row or its expander
//! icon and decides between expanding and toggling.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::SelectorConfig;
use crate::error::TreeError;
use crate::flatten::flatten;
use crate::index::ItemIndex;
use crate::notify::{SelectionChange, SelectionObserver};
use crate::search;
use crate::selection::Selection;
use crate::types::{CheckState, Item, ItemFlags, ItemId, Slot, TreeItem};

const TARGET: &str = "understory_tree_select::selector";

/// Which part of a row was activated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ActivationTarget {
    /// The row body.
    Row,
    /// The expander icon.
    Icon,
}

/// What an activation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The item's expansion changed to the given state.
    Expanded(bool),
    /// The item's selection was toggled.
    Toggled(SelectionChange),
    /// Nothing applies (for example the icon of a leaf).
    Ignored,
}

/// Selection, expansion, and filter state over one tree.
#[derive(Clone, Debug, Default)]
pub struct TreeSelector {
    config: SelectorConfig,
    index: ItemIndex,
    selection: Selection,
    requested: Vec<ItemId>,
    items_generation: Option<u64>,
    selection_generation: Option<u64>,
    query: Option<String>,
    filtered: Vec<Slot>,
}

impl TreeSelector {
    /// Create an empty selector.
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> SelectorConfig {
        self.config
    }

    /// Replace the configuration. Existing selection is kept as is.
    pub fn set_config(&mut self, config: SelectorConfig) {
        self.config = config;
    }

    /// Supply the tree. Returns true if it was rebuilt.
    ///
    /// Skipped when `generation` matches the previous call.
    pub fn set_items(&mut self, generation: u64, items: Vec<TreeItem>) -> bool {
        if self.items_generation == Some(generation) {
            return false;
        }
        self.items_generation = Some(generation);
        self.index = ItemIndex::build(flatten(items));
        self.selection = Selection::new();
        self.selection.replace(&mut self.index, &self.requested);
        self.filtered = search::filter(&self.index, self.query.as_deref());
        tracing::debug!(
            target: TARGET,
            generation,
            items = self.index.len(),
            selected = self.selection.len(),
            "items updated"
        );
        true
    }

    /// Supply an external selection. Returns true if it was applied.
    ///
    /// Skipped when `generation` matches the previous call. Ids not in the tree are ignored
    /// now but remembered, so they take effect if a later tree contains them.
    pub fn set_selected_items<I>(&mut self, generation: u64, ids: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        if self.selection_generation == Some(generation) {
            return false;
        }
        self.selection_generation = Some(generation);
        self.requested = ids.into_iter().map(Into::into).collect();
        self.selection.replace(&mut self.index, &self.requested);
        tracing::debug!(
            target: TARGET,
            generation,
            requested = self.requested.len(),
            selected = self.selection.len(),
            "selection replaced"
        );
        true
    }

    /// Set or clear the search query. Returns true if the filter was recomputed.
    pub fn set_search_query(&mut self, query: Option<&str>) -> bool {
        let query = query.filter(|q| !q.is_empty());
        if self.query.as_deref() == query {
            return false;
        }
        self.query = query.map(String::from);
        self.filtered = search::filter(&self.index, query);
        tracing::trace!(target: TARGET, ?query, matches = self.filtered.len(), "filter updated");
        true
    }

    /// Current search query, if any.
    pub fn search_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Toggle the selection of `id`.
    ///
    /// Returns `None` if `id` is not in the tree.
    pub fn toggle(&mut self, id: &str) -> Option<SelectionChange> {
        let slot = self.index.slot(id)?;
        self.toggle_slot(slot);
        Some(SelectionChange {
            selected: self.selection.ids(&self.index),
            toggled: self.index.item(slot).id().clone(),
        })
    }

    /// Toggle `id` and deliver the change to `observer`.
    ///
    /// Returns false (and notifies nobody) if `id` is not in the tree.
    pub fn toggle_and_notify<O: SelectionObserver + ?Sized>(
        &mut self,
        id: &str,
        observer: &mut O,
    ) -> bool {
        match self.toggle(id) {
            Some(change) => {
                change.notify(observer);
                true
            }
            None => false,
        }
    }

    fn toggle_slot(&mut self, slot: Slot) {
        self.selection
            .toggle(&mut self.index, self.config.policy(), slot);
        // A later rebuild re-applies what the user ended up with, plus any requested ids
        // that are still waiting for their items.
        let pending: Vec<ItemId> = self
            .requested
            .iter()
            .filter(|id| self.index.slot(id.as_str()).is_none())
            .cloned()
            .collect();
        self.requested = self.selection.ids(&self.index);
        self.requested.extend(pending);
    }

    /// Handle a click on the row or expander icon of `id`.
    ///
    /// - The icon of a parent toggles its expansion; the icon of a leaf does nothing.
    /// - The row of a leaf toggles its selection.
    /// - The row of a parent toggles its selection when
    ///   [`expand_on_icon_only`](SelectorConfig::expand_on_icon_only) is set, and
    ///   toggles its expansion otherwise.
    ///
    /// Returns `None` if `id` is not in the tree.
    pub fn activate(&mut self, id: &str, target: ActivationTarget) -> Option<Activation> {
        let slot = self.index.slot(id)?;
        let is_leaf = self.index.item(slot).is_leaf();
        let activation = match (target, is_leaf) {
            (ActivationTarget::Icon, true) => Activation::Ignored,
            (ActivationTarget::Row, false) if !self.config.expand_on_icon_only => {
                Activation::Expanded(self.flip_expanded(slot))
            }
            (ActivationTarget::Icon, false) => Activation::Expanded(self.flip_expanded(slot)),
            (ActivationTarget::Row, _) => Activation::Toggled(self.toggle(id)?),
        };
        Some(activation)
    }

    /// Set the expansion of `id`. Returns false if `id` is not in the tree.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
        let Some(slot) = self.index.slot(id) else {
            return false;
        };
        self.index
            .item_mut(slot)
            .flags
            .set(ItemFlags::EXPANDED, expanded);
        true
    }

    /// Flip the expansion of `id` and return the new state.
    pub fn toggle_expanded(&mut self, id: &str) -> Option<bool> {
        let slot = self.index.slot(id)?;
        Some(self.flip_expanded(slot))
    }

    /// Expand or collapse every item.
    pub fn set_all_expanded(&mut self, expanded: bool) {
        for slot in self.index.slots() {
            self.index
                .item_mut(slot)
                .flags
                .set(ItemFlags::EXPANDED, expanded);
        }
    }

    fn flip_expanded(&mut self, slot: Slot) -> bool {
        let flags = &mut self.index.item_mut(slot).flags;
        flags.toggle(ItemFlags::EXPANDED);
        flags.contains(ItemFlags::EXPANDED)
    }

    /// The underlying index.
    pub fn index(&self) -> &ItemIndex {
        &self.index
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.index.get(id)
    }

    /// Visual state of `id`.
    pub fn check_state(&self, id: &str) -> Option<CheckState> {
        self.item(id).map(Item::check_state)
    }

    /// All items in flattened order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.index.iter()
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selection.ids(&self.index)
    }

    /// Selected items in selection order.
    pub fn selected_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.selection.slots().iter().map(|s| self.index.item(*s))
    }

    /// Items passing the current search filter, in flattened order.
    pub fn filtered_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.filtered.iter().map(|s| self.index.item(*s))
    }

    /// Filtered items whose known ancestors are all expanded.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.filtered
            .iter()
            .filter(|s| {
                self.index
                    .ancestors(**s)
                    .all(|a| self.index.item(a).is_expanded())
            })
            .map(|s| self.index.item(*s))
    }

    /// Report structural problems in the current tree.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.index.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::SelectionEvent;
    use alloc::vec;

    // a -> [b, c]
    fn abc() -> Vec<TreeItem> {
        vec![TreeItem::new("a", "A").with_children(vec![
            TreeItem::new("b", "B"),
            TreeItem::new("c", "C"),
        ])]
    }

    fn selector(config: SelectorConfig) -> TreeSelector {
        let mut s = TreeSelector::new(config);
        assert!(s.set_items(1, abc()));
        s
    }

    fn sorted(mut ids: Vec<ItemId>) -> Vec<ItemId> {
        ids.sort();
        ids
    }

    fn ids(list: &[&str]) -> Vec<ItemId> {
        list.iter().map(|s| ItemId::from(*s)).collect()
    }

    fn names<'a>(items: impl Iterator<Item = &'a Item>) -> Vec<&'a str> {
        items.map(Item::name).collect()
    }

    #[test]
    fn single_select_leaves_only() {
        let mut s = selector(SelectorConfig::default());
        let change = s.toggle("b").unwrap();
        assert_eq!(change.selected, ids(&["b"]));
        assert_eq!(change.toggled, ItemId::from("b"));
        let change = s.toggle("c").unwrap();
        assert_eq!(change.selected, ids(&["c"]));
        assert_eq!(s.check_state("b"), Some(CheckState::Unchecked));
        assert_eq!(s.check_state("a"), Some(CheckState::Partial));
    }

    #[test]
    fn multi_select_parent_selects_leaves() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        let change = s.toggle("a").unwrap();
        assert_eq!(sorted(change.selected), ids(&["b", "c"]));
        assert_eq!(change.toggled, ItemId::from("a"));
        assert_eq!(s.check_state("a"), Some(CheckState::Partial));
    }

    #[test]
    fn parent_selected_directly() {
        let mut s = selector(
            SelectorConfig::default()
                .with_multi_select(true)
                .with_select_parents(true),
        );
        assert_eq!(s.toggle("a").unwrap().selected, ids(&["a"]));
        let a = s.item("a").unwrap();
        assert!(a.is_selected());
        assert!(!a.has_selected_child());
    }

    #[test]
    fn search_scenarios() {
        let mut s = selector(SelectorConfig::default());
        assert_eq!(names(s.filtered_items()), ["A", "B", "C"]);
        assert!(s.set_search_query(Some("B")));
        assert_eq!(names(s.filtered_items()), ["A", "B", "C"]);
        assert!(!s.set_search_query(Some("B")), "unchanged query is cached");
        assert!(s.set_search_query(Some("")));
        assert_eq!(s.search_query(), None);
        assert_eq!(names(s.filtered_items()), ["A", "B", "C"]);
    }

    #[test]
    fn unknown_id_toggle_is_none() {
        let mut s = selector(SelectorConfig::default());
        assert!(s.toggle("zzz").is_none());
        let mut log: Vec<SelectionEvent> = Vec::new();
        assert!(!s.toggle_and_notify("zzz", &mut log));
        assert!(log.is_empty());
    }

    #[test]
    fn observer_receives_selection_then_item() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        let mut log: Vec<SelectionEvent> = Vec::new();
        assert!(s.toggle_and_notify("b", &mut log));
        assert_eq!(
            log,
            [
                SelectionEvent::SelectionChanged(ids(&["b"])),
                SelectionEvent::ItemToggled(ItemId::from("b")),
            ]
        );
    }

    #[test]
    fn generations_gate_rebuilds() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        assert!(!s.set_items(1, Vec::new()), "same generation skipped");
        assert_eq!(s.index().len(), 3);

        assert!(s.set_selected_items(10, ["b"]));
        assert!(!s.set_selected_items(10, ["c"]));
        assert_eq!(s.selected_ids(), ids(&["b"]));
    }

    #[test]
    fn rebuild_reapplies_current_selection() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        s.toggle("c");
        let mut items = abc();
        items.push(TreeItem::new("d", "D"));
        assert!(s.set_items(2, items));
        assert_eq!(s.selected_ids(), ids(&["c"]));
        assert_eq!(s.item("a").unwrap().selected_descendant_count(), 1);
    }

    #[test]
    fn requested_ids_apply_once_present() {
        let mut s = TreeSelector::new(SelectorConfig::default());
        assert!(s.set_selected_items(1, [7_u32]));
        assert!(s.selected_ids().is_empty());
        s.set_items(1, vec![TreeItem::new(7, "seven")]);
        assert_eq!(s.selected_ids(), ids(&["7"]));
    }

    #[test]
    fn toggle_keeps_requested_ids_not_yet_in_tree() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        assert!(s.set_selected_items(1, ["b", "late"]));
        let change = s.toggle("c").unwrap();
        assert_eq!(change.selected, ids(&["b", "c"]));

        let mut items = abc();
        items.push(TreeItem::new("late", "Late"));
        assert!(s.set_items(2, items));
        assert_eq!(sorted(s.selected_ids()), ids(&["b", "c", "late"]));
    }

    #[test]
    fn external_selection_replaces_and_counts() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        s.toggle("b");
        assert!(s.set_selected_items(1, ["c", "a"]));
        assert_eq!(s.selected_ids(), ids(&["c", "a"]));
        assert_eq!(s.check_state("a"), Some(CheckState::Checked));
        assert_eq!(s.item("a").unwrap().selected_descendant_count(), 1);
        assert_eq!(names(s.selected_items()), ["C", "A"]);
    }

    #[test]
    fn row_on_parent_expands_unless_icon_only() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        assert_eq!(
            s.activate("a", ActivationTarget::Row),
            Some(Activation::Expanded(true))
        );
        assert!(s.selected_ids().is_empty());
        assert_eq!(
            s.activate("a", ActivationTarget::Icon),
            Some(Activation::Expanded(false))
        );

        s.set_config(s.config().with_expand_on_icon_only(true));
        let Some(Activation::Toggled(change)) = s.activate("a", ActivationTarget::Row) else {
            panic!("row should toggle when only the icon expands");
        };
        assert_eq!(sorted(change.selected), ids(&["b", "c"]));
    }

    #[test]
    fn row_on_leaf_toggles_and_icon_ignored() {
        let mut s = selector(SelectorConfig::default());
        assert_eq!(
            s.activate("b", ActivationTarget::Icon),
            Some(Activation::Ignored)
        );
        assert!(matches!(
            s.activate("b", ActivationTarget::Row),
            Some(Activation::Toggled(_))
        ));
        assert_eq!(s.selected_ids(), ids(&["b"]));
        assert_eq!(s.activate("nope", ActivationTarget::Row), None);
    }

    #[test]
    fn visible_items_follow_expansion() {
        let mut s = TreeSelector::new(SelectorConfig::default());
        s.set_items(
            1,
            vec![
                TreeItem::new("r", "R").with_expanded(true).with_children(vec![
                    TreeItem::new("p", "P")
                        .with_children(vec![TreeItem::new("x", "X")]),
                    TreeItem::new("q", "Q"),
                ]),
            ],
        );
        assert_eq!(names(s.visible_items()), ["R", "P", "Q"]);
        assert_eq!(s.toggle_expanded("p"), Some(true));
        assert_eq!(names(s.visible_items()), ["R", "P", "X", "Q"]);
        s.set_all_expanded(false);
        assert_eq!(names(s.visible_items()), ["R"]);
        assert!(s.set_expanded("r", true));
        assert!(!s.set_expanded("missing", true));
        assert_eq!(s.item("x").unwrap().level(), 2);
    }

    #[test]
    fn expansion_does_not_disturb_selection() {
        let mut s = selector(SelectorConfig::default().with_multi_select(true));
        s.toggle("b");
        s.toggle_expanded("a");
        assert_eq!(s.selected_ids(), ids(&["b"]));
        assert_eq!(s.check_state("a"), Some(CheckState::Partial));
    }

    #[test]
    fn validate_surfaces_dangling_children() {
        let mut s = TreeSelector::new(SelectorConfig::default().with_multi_select(true));
        s.set_items(1, vec![TreeItem::new("p", "P").with_children_ids(["ghost"])]);
        assert!(matches!(s.validate(), Err(TreeError::DanglingChild { .. })));
        // Selecting a parent whose children all dangle selects nothing.
        let change = s.toggle("p").unwrap();
        assert!(change.selected.is_empty());
    }
}
