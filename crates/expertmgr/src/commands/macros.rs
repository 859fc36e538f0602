//! Macros command

use anyhow::Result;
use camino::Utf8Path;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Session;
use crate::cli::MacrosArgs;
use crate::output;

#[derive(Tabled, Serialize)]
struct MacroRow {
    token: String,
    value: String,
}

pub fn run(args: MacrosArgs, store: Option<&Utf8Path>) -> Result<()> {
    let session = Session::open(store)?;
    let installation = session.installation(args.path.as_deref())?;
    let table = session.manager.macros(&installation);

    let rows: Vec<MacroRow> = table
        .iter()
        .map(|(token, value)| MacroRow {
            token: token.to_string(),
            value: value.to_string(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    output::header(&format!("Macros for {}", installation));
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}
