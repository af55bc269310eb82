//! OpenStep property-list writer for `project.pbxproj`.
//!
//! Objects are serialized through `serde_json::Value` and printed one section
//! per `isa`, in reference order, with `isa` as the first key of each object.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, instrument};

use pbxgen_core::application::GeneratedProject;
use pbxgen_core::application::ports::ProjectWriter;
use pbxgen_core::error::{CoreError, CoreResult};
use pbxgen_core::graph::{Object, Reference};

const HEADER: &str = "// !$*UTF8*$!";
const PBXPROJ_FILE: &str = "project.pbxproj";

/// Writes `<output>/<Name>.xcodeproj/project.pbxproj`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PbxprojWriter;

impl PbxprojWriter {
    pub fn new() -> Self {
        Self
    }

    /// Directory the project bundle is written to.
    pub fn project_dir(project: &GeneratedProject, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.xcodeproj", project.name))
    }

    /// Render the whole file.
    pub fn render(&self, project: &GeneratedProject) -> CoreResult<String> {
        let graph = &project.graph;

        let mut sections: BTreeMap<&str, Vec<(&Reference, &Object)>> = BTreeMap::new();
        for (reference, object) in graph.iter() {
            sections
                .entry(object.kind().isa())
                .or_default()
                .push((reference, object));
        }

        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n{\n");
        out.push_str(&format!("\tarchiveVersion = {};\n", graph.archive_version()));
        out.push_str("\tclasses = {\n\t};\n");
        out.push_str(&format!("\tobjectVersion = {};\n", graph.object_version()));
        out.push_str("\tobjects = {\n");

        for (isa, objects) in sections {
            out.push_str(&format!("\n/* Begin {isa} section */\n"));
            for (reference, object) in objects {
                let value = serde_json::to_value(object).map_err(|e| CoreError::Output {
                    path: PathBuf::from(PBXPROJ_FILE),
                    reason: format!("failed to serialize {reference}: {e}"),
                })?;
                out.push_str(&format!("\t\t{} = ", quote(reference.as_str())));
                render_value(&mut out, &value, 2);
                out.push_str(";\n");
            }
            out.push_str(&format!("/* End {isa} section */\n"));
        }

        out.push_str("\t};\n");
        out.push_str(&format!("\trootObject = {};\n", quote(project.root.as_str())));
        out.push_str("}\n");
        Ok(out)
    }
}

impl ProjectWriter for PbxprojWriter {
    #[instrument(skip_all, fields(project = %project.name, output = %output_dir.display()))]
    fn write(&self, project: &GeneratedProject, output_dir: &Path) -> CoreResult<PathBuf> {
        let contents = self.render(project)?;

        let project_dir = Self::project_dir(project, output_dir);
        fs::create_dir_all(&project_dir).map_err(|e| output_error(&project_dir, e))?;

        let path = project_dir.join(PBXPROJ_FILE);
        fs::write(&path, contents).map_err(|e| output_error(&path, e))?;

        info!(path = %path.display(), objects = project.graph.len(), "Project written");
        Ok(path)
    }
}

fn output_error(path: &Path, e: io::Error) -> CoreError {
    CoreError::Output {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn render_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("\"\""),
        Value::Bool(true) => out.push_str("YES"),
        Value::Bool(false) => out.push_str("NO"),
        Value::Number(n) => out.push_str(&quote(&n.to_string())),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(items) => {
            out.push_str("(\n");
            for item in items {
                indent(out, depth + 1);
                render_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push(')');
        }
        Value::Object(map) => {
            out.push_str("{\n");
            if let Some(isa) = map.get("isa") {
                render_entry(out, "isa", isa, depth + 1);
            }
            for (key, item) in map.iter().filter(|(k, _)| k.as_str() != "isa") {
                render_entry(out, key, item, depth + 1);
            }
            indent(out, depth);
            out.push('}');
        }
    }
}

fn render_entry(out: &mut String, key: &str, value: &Value, depth: usize) {
    indent(out, depth);
    out.push_str(&quote(key));
    out.push_str(" = ");
    render_value(out, value, depth);
    out.push_str(";\n");
}

/// Quote `s` unless it only uses characters plist scalars may carry bare.
fn quote(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'));
    if bare {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
