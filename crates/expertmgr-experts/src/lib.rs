//! Installation discovery and expert management for Expert Manager
//!
//! This crate handles:
//! - Scanning the store for vendor/family/version installations
//! - Path macro expansion per installation
//! - Health classification (missing files, duplicate filenames)
//! - Health aggregation over the tree
//! - Rendering expert and package lists with duplicate linkage
//! - Adding, editing, removing and toggling registrations
//! - View state that survives rescans, and its persistence

pub mod aggregator;
pub mod editor;
pub mod entries;
pub mod macros;
pub mod manager;
pub mod scanner;
pub mod settings;
pub mod validator;
pub mod view_state;

pub use editor::EntryEditor;
pub use entries::{render_installation, EntryListBuilder, ListKind, RenderedEntries};
pub use macros::{MacroTable, PathResolver};
pub use manager::{ExpertManager, RenderedSelection, Suppression, SuppressionGuard};
pub use scanner::{is_version_label, CancelToken, InstallationScanner};
pub use settings::{SettingsManager, ViewSettings};
pub use validator::{ValidationReport, Validator};
pub use view_state::{PersistedViewState, ViewStateTracker};
