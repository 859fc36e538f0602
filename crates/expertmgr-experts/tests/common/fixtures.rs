//! Store fixtures
//!
//! Builds in-memory stores laid out like a real registry export:
//! `Software/<vendor>/<family>/<version>/{Experts, Known Packages, ...}`.

#![allow(dead_code)]

use expertmgr_core::store::ConfigStore;
use expertmgr_core::types::{
    InstallationPath, Section, ENVIRONMENT_VARIABLES_SECTION, ROOT_DIR_KEY,
};
use expertmgr_core::MemoryStore;
use expertmgr_experts::InstallationScanner;

/// Store root used by every fixture
pub const ROOT: &str = "Software";

/// Installation used by most tests
pub const RAD_22: &str = "Embarcadero/BDS/22.0";

/// Root directory of [`RAD_22`]
pub const RAD_22_DIR: &str = r"C:\Program Files\Embarcadero\Studio\22.0";

/// Store section of an installation given by logical path
pub fn base(logical_path: &str) -> String {
    format!("{}/{}", ROOT, logical_path)
}

pub fn installation(logical_path: &str) -> InstallationPath {
    InstallationPath::parse(logical_path).unwrap()
}

/// Scanner over the default vendors and [`ROOT`]
pub fn scanner() -> InstallationScanner {
    InstallationScanner::new(ROOT, ["Borland", "CodeGear", "Embarcadero"])
}

/// Fluent builder for [`MemoryStore`] fixtures
#[derive(Default)]
pub struct StoreBuilder {
    store: MemoryStore,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an installation with its `RootDir`
    pub fn installation(mut self, logical_path: &str, root_dir: &str) -> Self {
        self.store
            .write_string(&base(logical_path), "", ROOT_DIR_KEY, root_dir)
            .unwrap();
        self
    }

    /// Create an empty section below the store root
    pub fn section(mut self, path: &str) -> Self {
        self.store.ensure_section(&base(path));
        self
    }

    pub fn expert(self, logical_path: &str, name: &str, path: &str) -> Self {
        self.value(logical_path, Section::Experts.store_name(), name, path)
    }

    pub fn disabled_expert(self, logical_path: &str, name: &str, path: &str) -> Self {
        self.value(logical_path, Section::DisabledExperts.store_name(), name, path)
    }

    pub fn package(
        self,
        logical_path: &str,
        section: Section,
        path: &str,
        description: &str,
    ) -> Self {
        self.value(logical_path, section.store_name(), path, description)
    }

    pub fn env_var(self, logical_path: &str, name: &str, value: &str) -> Self {
        self.value(logical_path, ENVIRONMENT_VARIABLES_SECTION, name, value)
    }

    fn value(mut self, logical_path: &str, section: &str, key: &str, value: &str) -> Self {
        self.store
            .write_string(&base(logical_path), section, key, value)
            .unwrap();
        self
    }

    pub fn build(self) -> MemoryStore {
        self.store
    }
}

/// Three vendors with a mix of healthy and broken installations
pub fn sample_store() -> MemoryStore {
    StoreBuilder::new()
        .installation("Borland/Delphi/7.0", r"C:\Delphi7")
        .expert("Borland/Delphi/7.0", "GExperts", r"C:\GExperts\GExpertsD7.dll")
        .section("Borland/Delphi/Globals")
        .installation("CodeGear/BDS/6.0", r"C:\RAD2009")
        .expert("CodeGear/BDS/6.0", "Missing", r"$(BDS)\bin\missing.dll")
        .installation(RAD_22, RAD_22_DIR)
        .expert(RAD_22, "GExperts", r"$(BDSBIN)\GExpertsRS11.dll")
        .expert(RAD_22, "CnPack", r"C:\CnPack\CnWizards_D110A.dll")
        .package(RAD_22, Section::KnownIdePackages, r"$(BDSBIN)\dclfoo.bpl", "Foo Components")
        .package(RAD_22, Section::KnownPackages, r"$(BDSBIN)\bar.bpl", "Bar Runtime")
        .build()
}

/// Files present for [`sample_store`]
pub fn sample_files() -> Vec<String> {
    vec![
        r"C:\GExperts\GExpertsD7.dll".to_string(),
        format!(r"{}\Bin\GExpertsRS11.dll", RAD_22_DIR),
        r"C:\CnPack\CnWizards_D110A.dll".to_string(),
        format!(r"{}\Bin\dclfoo.bpl", RAD_22_DIR),
        format!(r"{}\Bin\bar.bpl", RAD_22_DIR),
    ]
}
