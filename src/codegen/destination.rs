//! Destination resolver: picks one of the two disjoint output trees.

use crate::codegen::types::NamingConvention;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory that holds every generated feature, relative to the project root
pub const APP_DIR: &str = "src/app";

/// Output root family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputRoot {
    /// `src/app/generate/<folder>/...`
    Generate,
    /// `src/app/dashboard/<folder>/...`
    Dashboard,
}

impl OutputRoot {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputRoot::Generate => "generate",
            OutputRoot::Dashboard => "dashboard",
        }
    }

    /// `src/app/<root>`
    pub fn base_dir(&self) -> PathBuf {
        Path::new(APP_DIR).join(self.as_str())
    }

    /// `src/app/<root>/<folder>`
    pub fn feature_dir(&self, folder_name: &str) -> PathBuf {
        self.base_dir().join(folder_name)
    }
}

impl fmt::Display for OutputRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the output root from the naming convention's folder flag
pub fn resolve_root(naming: &NamingConvention) -> OutputRoot {
    if naming.use_generate_folder {
        OutputRoot::Generate
    } else {
        OutputRoot::Dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_dirs_are_disjoint() {
        let generate = OutputRoot::Generate.feature_dir("posts");
        let dashboard = OutputRoot::Dashboard.feature_dir("posts");

        assert_eq!(generate, PathBuf::from("src/app/generate/posts"));
        assert_eq!(dashboard, PathBuf::from("src/app/dashboard/posts"));
        assert!(!generate.starts_with(OutputRoot::Dashboard.base_dir()));
        assert!(!dashboard.starts_with(OutputRoot::Generate.base_dir()));
    }
}
