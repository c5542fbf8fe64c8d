// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter a flat tree by name and list the visible rows.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_select_search`

use tracing_subscriber::EnvFilter;
use understory_tree_select::{ActivationTarget, SelectorConfig, TreeItem, TreeSelector};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Flat form: every item names its parent and children explicitly.
    let items = vec![
        TreeItem::new("eu", "Europe").with_children_ids(["se", "no"]),
        TreeItem::new("se", "Sweden")
            .with_parent("eu")
            .with_children_ids(["sto", "got"]),
        TreeItem::new("sto", "Stockholm").with_parent("se"),
        TreeItem::new("got", "Gothenburg").with_parent("se"),
        TreeItem::new("no", "Norway").with_parent("eu"),
        TreeItem::new("as", "Asia").with_children_ids(["jp"]),
        TreeItem::new("jp", "Japan").with_parent("as"),
    ];

    let mut selector = TreeSelector::new(SelectorConfig::default().with_multi_select(true));
    selector.set_items(1, items);
    selector.set_all_expanded(true);

    for query in [None, Some("sweden"), Some("STOCK"), Some("japan"), Some("mars")] {
        selector.set_search_query(query);
        let names: Vec<_> = selector.filtered_items().map(|i| i.name()).collect();
        println!("{query:?} -> {names:?}");
    }

    selector.set_search_query(None);
    selector.activate("se", ActivationTarget::Icon);
    let visible: Vec<_> = selector.visible_items().map(|i| i.name()).collect();
    println!("after collapsing Sweden: {visible:?}");
}
