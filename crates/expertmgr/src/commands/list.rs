//! List command

use anyhow::{bail, Result};
use camino::Utf8Path;
use expertmgr_core::types::Entry;
use expertmgr_experts::ListKind;
use owo_colors::OwoColorize;
use std::collections::HashMap;
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

use super::Session;
use crate::cli::ListArgs;
use crate::output;

#[derive(Tabled)]
struct EntryRow {
    name: String,
    file: String,
    enabled: String,
    health: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            file: entry.target_path.clone(),
            enabled: if entry.enabled {
                "✓".green().to_string()
            } else {
                "✗".dimmed().to_string()
            },
            health: output::health(entry.health),
        }
    }
}

pub fn run(args: ListArgs, store: Option<&Utf8Path>) -> Result<()> {
    let mut session = Session::open(store)?;
    let installation = session.installation(args.path.as_deref())?;

    let logical_path = installation.logical_path();
    session.manager.select(&logical_path);
    let Some(rendered) = session.manager.render_selected(&HashMap::new()) else {
        bail!("{} has no registrations to show", logical_path);
    };
    session.save_view_state()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rendered.entries)?);
        return Ok(());
    }

    for kind in ListKind::ALL {
        output::header(&format!("{} ({})", kind, rendered.installation));
        let entries = rendered.entries.list(kind);
        if entries.is_empty() {
            println!("  (none)");
            continue;
        }
        let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        table.with(Modify::new(Columns::new(1..2)).with(Width::wrap(60)));
        println!("{}", table);
    }
    Ok(())
}
