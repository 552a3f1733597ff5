//! Version-control fingerprints for registered destinations.
//!
//! The fingerprint is a git object id: `git hash-object` of the file, or for a
//! directory the object id of the concatenated object ids of its files in
//! sorted order. It is best-effort; any failure yields `None` and the record
//! simply carries no hash.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::inventory;

pub trait VersionControl {
    fn object_id(&self, path: &Path) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    fn hash_file(&self, path: &Path) -> Option<String> {
        let output = Command::new("git")
            .arg("hash-object")
            .arg(path)
            .output()
            .ok()?;
        non_empty(output.status.success(), &output.stdout)
    }

    fn hash_stdin(&self, input: &str) -> Option<String> {
        let mut child = Command::new("git")
            .args(["hash-object", "--stdin"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;
        child.stdin.take()?.write_all(input.as_bytes()).ok()?;
        let output = child.wait_with_output().ok()?;
        non_empty(output.status.success(), &output.stdout)
    }
}

impl VersionControl for GitCli {
    fn object_id(&self, path: &Path) -> Option<String> {
        if which::which("git").is_err() {
            debug!("git not installed, skipping hash for {}", path.display());
            return None;
        }

        if path.is_file() {
            return self.hash_file(path);
        }

        let files = inventory::snapshot(path).ok()?;
        let mut combined = String::new();
        for file in &files {
            combined.push_str(&self.hash_file(file)?);
        }
        self.hash_stdin(&combined)
    }
}

fn non_empty(success: bool, stdout: &[u8]) -> Option<String> {
    if !success {
        return None;
    }
    let id = String::from_utf8_lossy(stdout).trim().to_string();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// No version control: records never carry a hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVcs;

impl VersionControl for NoVcs {
    fn object_id(&self, _path: &Path) -> Option<String> {
        None
    }
}
