//! Integration tests for view state across rescans

mod common;

use common::*;
use expertmgr_core::types::{HealthStatus, InstallationNode, InstallationTree, NodeLevel};
use expertmgr_experts::aggregator::highest_severity;
use expertmgr_experts::{ExpertManager, ListKind, SettingsManager, ViewStateTracker};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use tempfile::TempDir;

#[test]
fn test_expansion_survives_rescan() {
    let store = sample_store();
    let probe = MockFileProbe::with_files(sample_files());
    let first = scanner().scan(&store, &probe);

    let mut tracker = ViewStateTracker::new();
    tracker.capture(&first, |node| {
        matches!(node.logical_path.as_str(), "Embarcadero" | "Embarcadero/BDS")
    });

    let second = scanner().scan(&store, &probe);
    let expanded = tracker.restore(&second);
    assert_eq!(
        expanded,
        BTreeSet::from(["Embarcadero".to_string(), "Embarcadero/BDS".to_string()])
    );
}

#[test]
fn test_new_nodes_collapsed_and_vanished_nodes_ignored() {
    let mut tracker = ViewStateTracker::new();
    tracker.set_expanded("CodeGear", true);
    tracker.set_expanded("CodeGear/BDS", true);

    let store = StoreBuilder::new()
        .installation("CodeGear/RAD Studio/5.0", r"C:\RAD5")
        .build();
    let tree = scanner().scan(&store, &MockFileProbe::new());

    let expanded = tracker.restore(&tree);
    assert_eq!(expanded, BTreeSet::from(["CodeGear".to_string()]));
    assert!(!expanded.contains("CodeGear/RAD Studio"));
    assert!(tracker.is_expanded("CodeGear/BDS"));
}

#[test]
fn test_selection_resolves_after_rescan() {
    let mut manager = ExpertManager::new(
        sample_store(),
        MockFileProbe::with_files(sample_files()),
        scanner(),
    );
    manager.rescan();
    assert!(manager.select(RAD_22).is_some());
    assert!(manager.select("Embarcadero/BDS/99.0").is_none());

    manager.rescan();
    let selected = manager.selected().unwrap();
    assert_eq!(selected.logical_path, RAD_22);
    assert_eq!(selected.health, HealthStatus::Okay);
}

#[test]
fn test_list_position_preserved_for_same_installation() {
    let mut manager = ExpertManager::new(
        sample_store(),
        MockFileProbe::with_files(sample_files()),
        scanner(),
    );
    manager.rescan();
    manager.select(RAD_22).unwrap();

    let first = manager.render_selected(&HashMap::new()).unwrap();
    assert!(first.rows.is_empty());

    let current = HashMap::from([(ListKind::Experts, 5), (ListKind::KnownPackages, 0)]);
    let second = manager.render_selected(&current).unwrap();
    assert_eq!(second.rows.get(&ListKind::Experts), Some(&1));
    assert_eq!(second.rows.get(&ListKind::KnownPackages), Some(&0));
    assert_eq!(second.rows.get(&ListKind::KnownIdePackages), None);
}

#[test]
fn test_list_position_reset_for_new_installation() {
    let mut manager = ExpertManager::new(
        sample_store(),
        MockFileProbe::with_files(sample_files()),
        scanner(),
    );
    manager.rescan();
    manager.select(RAD_22).unwrap();
    manager.render_selected(&HashMap::new()).unwrap();

    manager.select("Borland/Delphi/7.0").unwrap();
    let rendered = manager
        .render_selected(&HashMap::from([(ListKind::Experts, 0)]))
        .unwrap();
    assert!(rendered.rows.is_empty());
    assert_eq!(rendered.installation.family, "Delphi");
}

#[test]
fn test_non_installation_is_not_rendered() {
    let mut manager = ExpertManager::new(
        sample_store(),
        MockFileProbe::with_files(sample_files()),
        scanner(),
    );
    manager.rescan();
    manager.select("Embarcadero/BDS").unwrap();
    assert!(manager.render_selected(&HashMap::new()).is_none());
    assert!(!manager.suppression().is_active());
}

#[test]
fn test_view_state_persists_across_sessions() {
    let temp = TempDir::new().unwrap();
    let path = camino::Utf8PathBuf::from_path_buf(temp.path().join("settings.yaml")).unwrap();

    let mut manager = ExpertManager::new(
        sample_store(),
        MockFileProbe::with_files(sample_files()),
        scanner(),
    );
    let tree = manager.rescan();
    manager
        .view_state_mut()
        .capture(&tree, |node| node.level == NodeLevel::Vendor);
    manager.select(RAD_22).unwrap();

    let mut settings = SettingsManager::new(path.clone()).unwrap();
    settings.save_tracker(manager.view_state()).unwrap();

    let reloaded = SettingsManager::new(path).unwrap();
    let mut next = ExpertManager::new(
        sample_store(),
        MockFileProbe::with_files(sample_files()),
        scanner(),
    )
    .with_view_state(reloaded.tracker());
    let tree = next.rescan();
    assert_eq!(next.view_state().restore(&tree).len(), 3);
    assert_eq!(next.selected().unwrap().logical_path, RAD_22);
}

fn health_strategy() -> impl Strategy<Value = HealthStatus> {
    prop_oneof![
        Just(HealthStatus::None),
        Just(HealthStatus::Okay),
        Just(HealthStatus::InvalidPath),
        Just(HealthStatus::Duplicate),
    ]
}

fn tree_strategy() -> impl Strategy<Value = InstallationTree> {
    let versions = prop::collection::vec(health_strategy(), 0..4);
    let families = prop::collection::vec(versions, 0..4);
    prop::collection::vec(families, 0..4).prop_map(|vendors| {
        let vendors = vendors
            .into_iter()
            .enumerate()
            .map(|(v, families)| {
                let mut vendor = InstallationNode::vendor(format!("V{v}"));
                for (f, versions) in families.into_iter().enumerate() {
                    let mut family =
                        InstallationNode::child(&vendor.logical_path, format!("F{f}"), NodeLevel::Family);
                    for (n, health) in versions.into_iter().enumerate() {
                        let mut version = InstallationNode::child(
                            &family.logical_path,
                            format!("{n}.0"),
                            NodeLevel::Version,
                        );
                        version.health = health;
                        family.children.push(version);
                    }
                    vendor.children.push(family);
                }
                vendor
            })
            .collect();
        InstallationTree::new(vendors, true)
    })
}

proptest! {
    #[test]
    fn prop_severity_dominates_subtree(tree in tree_strategy()) {
        for node in tree.iter() {
            let severity = highest_severity(node);
            prop_assert!(severity >= node.health);
            for child in &node.children {
                prop_assert!(severity >= highest_severity(child));
            }
            let worst_below = node.iter().map(|n| n.health).max().unwrap_or_default();
            prop_assert_eq!(severity, worst_below);
        }
    }

    #[test]
    fn prop_restore_only_returns_tree_paths(
        tree in tree_strategy(),
        expanded in prop::collection::vec("[VF0-9./]{1,8}", 0..8),
    ) {
        let mut tracker = ViewStateTracker::new();
        for path in &expanded {
            tracker.set_expanded(path, true);
        }
        let restored = tracker.restore(&tree);
        for path in &restored {
            prop_assert!(tree.find(path).is_some());
            prop_assert!(expanded.contains(path));
        }
    }
}
