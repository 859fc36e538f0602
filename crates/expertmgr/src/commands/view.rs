//! Select, expand and collapse commands

use anyhow::{bail, Result};
use camino::Utf8Path;

use super::Session;
use crate::cli::NodeArgs;
use crate::output;

pub fn select(args: NodeArgs, store: Option<&Utf8Path>) -> Result<()> {
    let mut session = Session::open(store)?;
    let Some(node) = session.manager.select(&args.path) else {
        bail!("{} is not in the installation tree", args.path);
    };
    let viewable = node.health.is_viewable();

    // Keep the path to the selection visible in the tree
    let parts: Vec<&str> = args.path.split('/').collect();
    for depth in 1..parts.len() {
        session
            .manager
            .view_state_mut()
            .set_expanded(&parts[..depth].join("/"), true);
    }
    session.save_view_state()?;

    output::success(&format!("Selected {}", args.path));
    if !viewable {
        output::info("Not an installation; list and macros need a vendor/family/version path");
    }
    Ok(())
}

pub fn set_expanded(args: NodeArgs, store: Option<&Utf8Path>, expanded: bool) -> Result<()> {
    let mut session = Session::open(store)?;
    if session.tree.find(&args.path).is_none() {
        bail!("{} is not in the installation tree", args.path);
    }
    session
        .manager
        .view_state_mut()
        .set_expanded(&args.path, expanded);
    session.save_view_state()?;

    output::success(&format!(
        "{} {}",
        if expanded { "Expanded" } else { "Collapsed" },
        args.path
    ));
    Ok(())
}
