//! Validate command

use anyhow::Result;
use camino::Utf8Path;
use expertmgr_core::types::{HealthStatus, InstallationPath};
use expertmgr_experts::ValidationReport;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Session;
use crate::cli::ValidateArgs;
use crate::output;

#[derive(Tabled, Serialize)]
struct ReportRow {
    installation: String,
    experts: String,
    #[tabled(rename = "known IDE packages")]
    known_ide_packages: String,
    #[tabled(rename = "known packages")]
    known_packages: String,
    #[tabled(rename = "disabled experts")]
    disabled_experts: usize,
    overall: String,
}

impl ReportRow {
    fn new(
        installation: &InstallationPath,
        report: &ValidationReport,
        label: fn(HealthStatus) -> String,
    ) -> Self {
        Self {
            installation: installation.to_string(),
            experts: label(report.experts),
            known_ide_packages: label(report.known_ide_packages),
            known_packages: label(report.known_packages),
            disabled_experts: report.disabled_experts,
            overall: label(report.overall()),
        }
    }
}

fn plain(status: HealthStatus) -> String {
    status.label().to_string()
}

pub fn run(args: ValidateArgs, store: Option<&Utf8Path>) -> Result<()> {
    let session = Session::open(store)?;

    let installations: Vec<InstallationPath> = match args.path.as_deref() {
        Some(path) => vec![session.installation(Some(path))?],
        None => session
            .tree
            .installations()
            .filter_map(|node| node.installation_path())
            .collect(),
    };

    let reports: Vec<(InstallationPath, ValidationReport)> = installations
        .into_iter()
        .map(|installation| {
            let report = session.manager.report(&installation);
            (installation, report)
        })
        .collect();

    if args.json {
        let rows: Vec<ReportRow> = reports
            .iter()
            .map(|(installation, report)| ReportRow::new(installation, report, plain))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if reports.is_empty() {
        output::info("No installations to validate");
        return Ok(());
    }

    let rows: Vec<ReportRow> = reports
        .iter()
        .map(|(installation, report)| ReportRow::new(installation, report, output::health))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    let worst = reports
        .iter()
        .map(|(_, report)| report.overall())
        .max()
        .unwrap_or_default();
    match worst {
        HealthStatus::Duplicate => println!(
            "{}",
            "Duplicate filenames registered; remove or disable one of each pair.".red()
        ),
        HealthStatus::InvalidPath => {
            println!("{}", "Some registrations point at missing files.".yellow())
        }
        _ => println!(
            "{}",
            format!("{} installation(s) healthy.", reports.len()).green()
        ),
    }
    Ok(())
}
