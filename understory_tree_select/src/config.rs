// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing configuration.

use crate::selection::SelectionPolicy;

/// Switches supplied by the hosting view.
///
/// All switches default to `false`: single select, leaves only, rows expand parents.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// Allow more than one selected item.
    pub allow_multi_select: bool,
    /// Only the expander icon expands a parent.
    ///
    /// When `false`, activating a parent's row expands it instead, so parents cannot be
    /// selected through their row. See
    /// [`TreeSelector::activate`](crate::selector::TreeSelector::activate).
    pub expand_on_icon_only: bool,
    /// Allow items with children to be selected directly.
    ///
    /// When `false`, selecting a parent in multi-select mode selects its leaves instead.
    pub allow_select_parents: bool,
}

impl SelectorConfig {
    /// Set [`allow_multi_select`](Self::allow_multi_select).
    #[must_use]
    pub fn with_multi_select(mut self, allow: bool) -> Self {
        self.allow_multi_select = allow;
        self
    }

    /// Set [`expand_on_icon_only`](Self::expand_on_icon_only).
    #[must_use]
    pub fn with_expand_on_icon_only(mut self, icon_only: bool) -> Self {
        self.expand_on_icon_only = icon_only;
        self
    }

    /// Set [`allow_select_parents`](Self::allow_select_parents).
    #[must_use]
    pub fn with_select_parents(mut self, allow: bool) -> Self {
        self.allow_select_parents = allow;
        self
    }

    /// The selection policy these switches imply.
    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            multi_select: self.allow_multi_select,
            select_parents: self.allow_select_parents,
        }
    }
}
