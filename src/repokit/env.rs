//! Tooling lookups the registrar depends on but does not own. Installing
//! missing tools is somebody else's job; here we only ask whether they exist.

use std::path::Path;

pub trait Installer {
    fn is_installed(&self, executable: &str) -> bool;
}

/// Resolves executables on `PATH`. A name that already points at an existing
/// file (e.g. `./scripts/fetch.sh`) counts as installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathInstaller;

impl Installer for PathInstaller {
    fn is_installed(&self, executable: &str) -> bool {
        let has_separator = executable.contains('/') || executable.contains('\\');
        if has_separator && Path::new(executable).is_file() {
            return true;
        }
        which::which(executable).is_ok()
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::Installer;
    use std::collections::HashSet;

    /// Installer that only knows the names it was given.
    #[derive(Debug, Clone, Default)]
    pub struct FakeInstaller {
        installed: HashSet<String>,
    }

    impl FakeInstaller {
        pub fn with(names: &[&str]) -> Self {
            Self {
                installed: names.iter().map(|n| n.to_string()).collect(),
            }
        }
    }

    impl Installer for FakeInstaller {
        fn is_installed(&self, executable: &str) -> bool {
            self.installed.contains(executable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tool_is_not_installed() {
        assert!(!PathInstaller.is_installed("repokit-surely-not-a-real-tool"));
    }

    #[test]
    fn test_explicit_path_counts_as_installed() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("fetch.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        assert!(PathInstaller.is_installed(script.to_str().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_is_installed() {
        assert!(PathInstaller.is_installed("sh"));
    }
}
