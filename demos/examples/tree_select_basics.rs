// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toggle items under each selection policy and print the resulting state.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_select_basics`
//! - `RUST_LOG=understory_tree_select=trace cargo run -p understory_demos --example tree_select_basics`

use tracing_subscriber::EnvFilter;
use understory_tree_select::{
    CheckState, SelectionEvent, SelectorConfig, TreeItem, TreeSelector,
};

fn catalog() -> Vec<TreeItem> {
    vec![
        TreeItem::new(1, "Hardware")
            .with_expanded(true)
            .with_children(vec![
                TreeItem::new(2, "Keyboards").with_children(vec![
                    TreeItem::new(3, "Mechanical"),
                    TreeItem::new(4, "Membrane"),
                ]),
                TreeItem::new(5, "Mice"),
            ]),
        TreeItem::new(6, "Software").with_children(vec![TreeItem::new(7, "Editors")]),
    ]
}

fn mark(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Partial => "[-]",
    }
}

fn print_tree(selector: &TreeSelector) {
    for item in selector.items() {
        println!(
            "  {:indent$}{} {}",
            "",
            mark(item.check_state()),
            item.name(),
            indent = item.level() as usize * 2
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let policies = [
        ("single, leaves only", SelectorConfig::default()),
        (
            "multi, leaves only",
            SelectorConfig::default().with_multi_select(true),
        ),
        (
            "multi, parents allowed",
            SelectorConfig::default()
                .with_multi_select(true)
                .with_select_parents(true),
        ),
    ];

    for (label, config) in policies {
        println!("== {label}");
        let mut selector = TreeSelector::new(config);
        selector.set_items(1, catalog());

        let mut log: Vec<SelectionEvent> = Vec::new();
        for id in ["3", "2", "5"] {
            selector.toggle_and_notify(id, &mut log);
        }
        for event in &log {
            println!("  {event:?}");
        }
        print_tree(&selector);
    }
}
