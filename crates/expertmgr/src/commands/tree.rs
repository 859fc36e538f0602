//! Tree command

use anyhow::Result;
use camino::Utf8Path;
use console::style;
use expertmgr_core::types::{HealthStatus, InstallationNode, NodeLevel};
use expertmgr_experts::aggregator::{highest_severity, tree_severity};
use serde::Serialize;
use std::collections::BTreeSet;

use super::Session;
use crate::cli::TreeArgs;
use crate::output;

/// Node as shown by `tree --json`
#[derive(Serialize)]
struct NodeView {
    label: String,
    path: String,
    level: NodeLevel,
    health: HealthStatus,
    severity: HealthStatus,
    expanded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeView>,
}

impl NodeView {
    fn build(node: &InstallationNode, expanded: &BTreeSet<String>) -> Self {
        Self {
            label: node.label.clone(),
            path: node.logical_path.clone(),
            level: node.level,
            health: node.health,
            severity: highest_severity(node),
            expanded: expanded.contains(&node.logical_path),
            children: node
                .children
                .iter()
                .map(|c| Self::build(c, expanded))
                .collect(),
        }
    }
}

pub fn run(args: TreeArgs, store: Option<&Utf8Path>) -> Result<()> {
    let session = Session::open(store)?;
    let tree = &session.tree;
    let expanded = session.manager.view_state().restore(tree);

    if args.json {
        let nodes: Vec<NodeView> = tree
            .vendors
            .iter()
            .map(|v| NodeView::build(v, &expanded))
            .collect();
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    if tree.installations().next().is_none() {
        output::info(&format!(
            "No installations found under {} ({})",
            session.config.root,
            session.config.vendors.join(", ")
        ));
        return Ok(());
    }

    let selected = session.manager.view_state().selection();
    for vendor in &tree.vendors {
        print_node(vendor, 0, &expanded, selected, args.all);
    }
    println!();
    output::kv("Overall", &output::health(tree_severity(tree)));
    Ok(())
}

fn print_node(
    node: &InstallationNode,
    depth: usize,
    expanded: &BTreeSet<String>,
    selected: Option<&str>,
    all: bool,
) {
    let open = all || expanded.contains(&node.logical_path);
    let marker = if node.children.is_empty() {
        " "
    } else if open {
        "▾"
    } else {
        "▸"
    };
    let label = if selected == Some(node.logical_path.as_str()) {
        style(&node.label).bold().underlined().to_string()
    } else {
        node.label.clone()
    };
    println!(
        "{}{} {}  {}",
        "  ".repeat(depth),
        marker,
        label,
        output::health(highest_severity(node))
    );

    if open {
        for child in &node.children {
            print_node(child, depth + 1, expanded, selected, all);
        }
    }
}
