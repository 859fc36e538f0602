//! Path macro expansion
//!
//! Registered paths may contain placeholders such as `$(BDS)\bin\x.bpl`.
//! A [`MacroTable`] is built for exactly one installation and a
//! [`PathResolver`] pairs it with the injected [`FileProbe`].

use expertmgr_core::store::{ConfigStore, FileProbe};
use expertmgr_core::types::{ENVIRONMENT_VARIABLES_SECTION, ROOT_DIR_KEY};
use indexmap::IndexMap;
use tracing::{trace, warn};

/// Root directory of the installation
pub const BDS: &str = "$(BDS)";
/// C++Builder alias of the root directory
pub const BCB: &str = "$(BCB)";
/// Delphi alias of the root directory
pub const DELPHI: &str = "$(DELPHI)";
/// Binaries directory
pub const BDSBIN: &str = "$(BDSBIN)";
/// Include directory
pub const BDSINCLUDE: &str = "$(BDSINCLUDE)";
/// Library directory
pub const BDSLIB: &str = "$(BDSLIB)";

/// Wrap a variable name in macro syntax (`NAME` → `$(NAME)`)
pub fn macro_token(name: &str) -> String {
    if name.starts_with("$(") && name.ends_with(')') {
        name.to_string()
    } else {
        format!("$({})", name)
    }
}

/// Macro tokens and their values for one installation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    macros: IndexMap<String, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in macros derived from an installation root directory
    pub fn with_root_dir(root_dir: &str) -> Self {
        let mut table = Self::new();
        table.add(BDS, root_dir);
        table.add(BCB, root_dir);
        table.add(BDSBIN, format!(r"{}\Bin", root_dir));
        table.add(BDSINCLUDE, format!(r"{}\Include", root_dir));
        table.add(BDSLIB, format!(r"{}\Lib", root_dir));
        table.add(DELPHI, root_dir);
        table
    }

    /// Build the table for the installation whose base section is
    /// `installation_base`: built-ins from `RootDir`, then every
    /// `Environment Variables` entry, later entries overriding earlier ones.
    pub fn build_for<S: ConfigStore + ?Sized>(store: &S, installation_base: &str) -> Self {
        let root_dir = store
            .read_string(installation_base, "", ROOT_DIR_KEY, "")
            .unwrap_or_else(|e| {
                warn!("Could not read {} for {}: {}", ROOT_DIR_KEY, installation_base, e);
                String::new()
            });
        let mut table = Self::with_root_dir(&root_dir);

        match store.enumerate_keys(installation_base, ENVIRONMENT_VARIABLES_SECTION) {
            Ok(variables) => {
                for (name, value) in variables {
                    table.add(macro_token(&name), value);
                }
            }
            Err(e) => warn!(
                "Could not read environment variables for {}: {}",
                installation_base, e
            ),
        }

        trace!("Built {} macros for {}", table.len(), installation_base);
        table
    }

    /// Insert a macro, overwriting the value of an existing token in place
    pub fn add(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.macros.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.macros.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Tokens and values in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.macros.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every occurrence of every known token.
    ///
    /// Tokens are applied in table order; when two tokens overlap, the one
    /// applied first wins for that span.
    pub fn expand(&self, path: &str) -> String {
        let mut expanded = path.to_string();
        for (token, value) in &self.macros {
            if expanded.contains(token.as_str()) {
                expanded = expanded.replace(token.as_str(), value);
            }
        }
        expanded
    }
}

/// Expands macros and checks the result against the filesystem predicate
pub struct PathResolver<'a, P: FileProbe + ?Sized> {
    macros: MacroTable,
    probe: &'a P,
}

impl<'a, P: FileProbe + ?Sized> PathResolver<'a, P> {
    pub fn new(macros: MacroTable, probe: &'a P) -> Self {
        Self { macros, probe }
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn resolve(&self, path: &str) -> String {
        self.macros.expand(path)
    }

    /// Whether the registered path points at an existing file
    pub fn exists(&self, path: &str) -> bool {
        let resolved = self.resolve(path);
        let found = self.probe.exists(&resolved);
        if !found {
            trace!("Unresolved path: {} -> {}", path, resolved);
        }
        found
    }
}
