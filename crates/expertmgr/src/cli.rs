//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use expertmgr_core::types::Section;

/// Expert Manager - inventory and repair IDE expert registrations
#[derive(Parser, Debug)]
#[command(name = "expertmgr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the registry store (overrides configuration)
    #[arg(long, global = true)]
    pub store: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the installation tree
    Tree(TreeArgs),

    /// Validate installations
    Validate(ValidateArgs),

    /// List experts and packages of an installation
    List(ListArgs),

    /// Show the path macros of an installation
    Macros(MacrosArgs),

    /// Select a node of the tree
    Select(NodeArgs),

    /// Expand a node of the tree
    Expand(NodeArgs),

    /// Collapse a node of the tree
    Collapse(NodeArgs),

    /// Register an expert or package
    Add(AddArgs),

    /// Change an expert or package
    Edit(EditArgs),

    /// Remove an expert or package
    Remove(EntryArgs),

    /// Enable an expert or package
    Enable(EntryArgs),

    /// Disable an expert or package
    Disable(EntryArgs),

    /// Show version information
    Version(VersionArgs),
}

/// Registration list addressed by entry commands
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionArg {
    Experts,
    KnownIdePackages,
    KnownPackages,
}

impl SectionArg {
    /// Store section new entries are written to
    pub fn section(self) -> Section {
        match self {
            Self::Experts => Section::Experts,
            Self::KnownIdePackages => Section::KnownIdePackages,
            Self::KnownPackages => Section::KnownPackages,
        }
    }
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Show every node regardless of expansion
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Installation to validate (vendor/family/version); all when omitted
    pub path: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Installation to list; the selected node when omitted
    pub path: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MacrosArgs {
    /// Installation whose macros to show; the selected node when omitted
    pub path: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct NodeArgs {
    /// Logical path of the node (e.g. Embarcadero/BDS/22.0)
    pub path: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Installation (vendor/family/version)
    pub path: String,

    /// List to add to
    #[arg(short, long, value_enum, default_value = "experts")]
    pub section: SectionArg,

    /// Expert name, or package description
    pub name: String,

    /// Registered file; may contain macros such as $(BDSBIN)
    pub file: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Installation (vendor/family/version)
    pub path: String,

    /// List holding the entry
    #[arg(short, long, value_enum, default_value = "experts")]
    pub section: SectionArg,

    /// Expert name, or package file
    pub entry: String,

    /// New name or description
    #[arg(long)]
    pub name: Option<String>,

    /// New registered file
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Installation (vendor/family/version)
    pub path: String,

    /// List holding the entry
    #[arg(short, long, value_enum, default_value = "experts")]
    pub section: SectionArg,

    /// Expert name, or package file
    pub entry: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_package() {
        let cli = Cli::try_parse_from([
            "expertmgr",
            "add",
            "Embarcadero/BDS/22.0",
            "--section",
            "known-ide-packages",
            "Foo Components",
            r"$(BDSBIN)\dclfoo.bpl",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.section.section(), Section::KnownIdePackages);
                assert_eq!(args.name, "Foo Components");
                assert_eq!(args.file, r"$(BDSBIN)\dclfoo.bpl");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["expertmgr", "tree", "-vv", "--store", "/tmp/r.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.store.as_deref(), Some(camino::Utf8Path::new("/tmp/r.yaml")));
    }

    #[test]
    fn test_section_defaults_to_experts() {
        let cli = Cli::try_parse_from(["expertmgr", "disable", "CodeGear/BDS/6.0", "GExperts"]).unwrap();
        match cli.command {
            Commands::Disable(args) => assert_eq!(args.section, SectionArg::Experts),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
