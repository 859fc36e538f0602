//! Add, edit, remove, enable and disable commands

use anyhow::{anyhow, Result};
use camino::Utf8Path;
use expertmgr_core::types::{Entry, HealthStatus, InstallationPath};
use expertmgr_experts::ListKind;

use super::Session;
use crate::cli::{AddArgs, EditArgs, EntryArgs, SectionArg};
use crate::output;

/// Look an entry up by expert name or package file
fn find_entry(
    session: &Session,
    installation: &InstallationPath,
    section: SectionArg,
    key: &str,
) -> Result<Entry> {
    let kind = ListKind::for_section(section.section());
    let rendered = session.manager.render(installation);
    rendered
        .list(kind)
        .iter()
        .find(|entry| match section {
            SectionArg::Experts => entry.name == key,
            _ => entry.target_path == key,
        })
        .cloned()
        .ok_or_else(|| anyhow!("No entry '{}' in {} of {}", key, kind, installation))
}

/// Print the outcome of a mutation
fn report(outcome: expertmgr_core::Result<HealthStatus>, done: &str) -> Result<()> {
    match outcome {
        Ok(health) => {
            output::success(done);
            output::kv("Installation health", &output::health(health));
            Ok(())
        }
        Err(e) if e.is_conflict() => {
            output::warning("The store changed only partway; run `expertmgr list` to re-check");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn add(args: AddArgs, store: Option<&Utf8Path>) -> Result<()> {
    let mut session = Session::open(store)?;
    let installation = session.installation(Some(&args.path))?;
    let mut editor = session.manager.editor(&installation.logical_path())?;

    let outcome = match args.section {
        SectionArg::Experts => editor.add_expert(&args.name, &args.file),
        section => editor.add_package(section.section(), &args.file, &args.name),
    };
    report(outcome, &format!("Added {} to {}", args.name, installation))
}

pub fn edit(args: EditArgs, store: Option<&Utf8Path>) -> Result<()> {
    let mut session = Session::open(store)?;
    let installation = session.installation(Some(&args.path))?;
    let entry = find_entry(&session, &installation, args.section, &args.entry)?;

    let new_name = args.name.unwrap_or_else(|| entry.name.clone());
    let new_file = args.file.unwrap_or_else(|| entry.target_path.clone());
    let mut editor = session.manager.editor(&installation.logical_path())?;

    let outcome = match args.section {
        SectionArg::Experts => editor.edit_expert(&entry.name, entry.enabled, &new_name, &new_file),
        section => editor.edit_package(
            section.section(),
            &entry.target_path,
            &new_file,
            &new_name,
            entry.enabled,
        ),
    };
    report(outcome, &format!("Updated {}", new_name))
}

pub fn remove(args: EntryArgs, store: Option<&Utf8Path>) -> Result<()> {
    let mut session = Session::open(store)?;
    let installation = session.installation(Some(&args.path))?;
    let entry = find_entry(&session, &installation, args.section, &args.entry)?;
    let mut editor = session.manager.editor(&installation.logical_path())?;

    let outcome = match args.section {
        SectionArg::Experts => editor.delete_expert(&entry.name, entry.enabled),
        section => editor.delete_package(section.section(), &entry.target_path),
    };
    report(outcome, &format!("Removed {}", entry.name))
}

pub fn set_enabled(args: EntryArgs, store: Option<&Utf8Path>, enabled: bool) -> Result<()> {
    let mut session = Session::open(store)?;
    let installation = session.installation(Some(&args.path))?;
    let entry = find_entry(&session, &installation, args.section, &args.entry)?;
    let verb = if enabled { "Enabled" } else { "Disabled" };

    if entry.enabled == enabled {
        output::info(&format!("{} is already {}", entry.name, verb.to_lowercase()));
        return Ok(());
    }

    let mut editor = session.manager.editor(&installation.logical_path())?;
    let outcome = match args.section {
        SectionArg::Experts => editor.set_expert_enabled(&entry.name, &entry.target_path, enabled),
        section => {
            editor.set_package_enabled(section.section(), &entry.target_path, &entry.name, enabled)
        }
    };
    report(outcome, &format!("{} {}", verb, entry.name))
}
