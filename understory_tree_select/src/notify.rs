// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification: report the outcome of a toggle to the host.
//!
//! ## Usage
//!
//! Every toggle returns a [`SelectionChange`]. Hosts either read it directly or forward it
//! to a [`SelectionObserver`] with [`SelectionChange::notify`]. Internal state is already
//! committed by the time a change is produced, so observers are free to query the selector.
//!
//! ```
//! use understory_tree_select::notify::{SelectionChange, SelectionEvent};
//! use understory_tree_select::types::ItemId;
//!
//! let change = SelectionChange {
//!     selected: vec![ItemId::from("b")],
//!     toggled: ItemId::from("b"),
//! };
//! let mut log: Vec<SelectionEvent> = Vec::new();
//! change.notify(&mut log);
//! assert_eq!(
//!     log,
//!     vec![
//!         SelectionEvent::SelectionChanged(vec![ItemId::from("b")]),
//!         SelectionEvent::ItemToggled(ItemId::from("b")),
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use crate::types::ItemId;

/// Result of a single toggle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// Every selected item after the toggle, in selection order.
    pub selected: Vec<ItemId>,
    /// The item the toggle was aimed at.
    pub toggled: ItemId,
}

impl SelectionChange {
    /// Deliver this change: first the selection, then the toggled item.
    pub fn notify<O: SelectionObserver + ?Sized>(&self, observer: &mut O) {
        observer.selection_changed(&self.selected);
        observer.item_toggled(&self.toggled);
    }
}

/// Receiver for selection changes.
pub trait SelectionObserver {
    /// The selection now consists of `selected`.
    fn selection_changed(&mut self, selected: &[ItemId]);

    /// `item` was the direct target of the last interaction.
    fn item_toggled(&mut self, item: &ItemId) {
        let _ = item;
    }
}

/// A recorded notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    /// See [`SelectionObserver::selection_changed`].
    SelectionChanged(Vec<ItemId>),
    /// See [`SelectionObserver::item_toggled`].
    ItemToggled(ItemId),
}

impl SelectionObserver for Vec<SelectionEvent> {
    fn selection_changed(&mut self, selected: &[ItemId]) {
        self.push(SelectionEvent::SelectionChanged(selected.to_vec()));
    }

    fn item_toggled(&mut self, item: &ItemId) {
        self.push(SelectionEvent::ItemToggled(item.clone()));
    }
}
