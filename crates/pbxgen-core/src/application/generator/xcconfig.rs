//! Minimal `.xcconfig` reader.
//!
//! Only used to answer "does this config file already set key X", so values
//! are kept as plain strings and variable references are left unexpanded.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::SourceScanner;
use crate::domain::{BuildSettings, SettingValue};

/// One parsed line of an xcconfig file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Include(&'a str),
    Setting(&'a str, &'a str),
}

fn parse_line(line: &str) -> Option<Line<'_>> {
    let line = match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
    .trim();

    if let Some(rest) = line.strip_prefix("#include") {
        let rest = rest.strip_prefix('?').unwrap_or(rest).trim();
        let path = rest.trim_matches('"');
        return (!path.is_empty()).then_some(Line::Include(path));
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(Line::Setting(key, value.trim()))
}

/// Settings declared by the xcconfig at `path`, including everything it
/// `#include`s. Unreadable files contribute nothing.
pub fn load(scanner: &dyn SourceScanner, path: &Path) -> BuildSettings {
    let mut settings = BuildSettings::new();
    let mut visited = HashSet::new();
    load_into(scanner, path, &mut settings, &mut visited);
    settings
}

fn load_into(
    scanner: &dyn SourceScanner,
    path: &Path,
    settings: &mut BuildSettings,
    visited: &mut HashSet<PathBuf>,
) {
    if !visited.insert(path.to_path_buf()) {
        return;
    }
    let contents = match scanner.read_file(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping unreadable xcconfig");
            return;
        }
    };

    for line in contents.lines() {
        match parse_line(line) {
            Some(Line::Include(include)) => {
                let included = path.parent().unwrap_or(Path::new("")).join(include);
                load_into(scanner, &included, settings, visited);
            }
            Some(Line::Setting(key, value)) => {
                settings.insert(key.to_string(), SettingValue::from(value));
            }
            None => {}
        }
    }
}
