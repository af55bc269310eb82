//! Target dependencies.
//!
//! A dependency is one of three closed kinds, so every linking and embedding
//! branch in the generator is checked exhaustively at compile time.

use serde::{Deserialize, Serialize};

use crate::domain::{SettingValue, TargetType, settings::BuildSettings};

/// What a dependency points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Another target in the same project.
    Target { name: String, link: bool },
    /// A prebuilt framework on disk. `implicit` frameworks live in the build
    /// products directory instead of the project tree.
    Framework { path: String, implicit: bool },
    /// A framework built by Carthage, located by name under the Carthage
    /// build directory for the target's platform.
    Carthage { name: String },
}

/// A dependency declared on a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub kind: DependencyKind,
    /// Explicit embed flag; `None` means "embed when the owner is an app".
    pub embed: Option<bool>,
    pub code_sign: bool,
    pub remove_headers: bool,
}

impl Dependency {
    fn with_kind(kind: DependencyKind) -> Self {
        Self {
            kind,
            embed: None,
            code_sign: true,
            remove_headers: true,
        }
    }

    pub fn target(name: impl Into<String>) -> Self {
        Self::with_kind(DependencyKind::Target {
            name: name.into(),
            link: true,
        })
    }

    pub fn framework(path: impl Into<String>) -> Self {
        Self::with_kind(DependencyKind::Framework {
            path: path.into(),
            implicit: false,
        })
    }

    pub fn implicit_framework(path: impl Into<String>) -> Self {
        Self::with_kind(DependencyKind::Framework {
            path: path.into(),
            implicit: true,
        })
    }

    pub fn carthage(name: impl Into<String>) -> Self {
        Self::with_kind(DependencyKind::Carthage { name: name.into() })
    }

    pub fn embed(mut self, embed: bool) -> Self {
        self.embed = Some(embed);
        self
    }

    /// Only meaningful for target dependencies.
    pub fn link(mut self, link: bool) -> Self {
        if let DependencyKind::Target { link: l, .. } = &mut self.kind {
            *l = link;
        }
        self
    }

    pub fn code_sign(mut self, code_sign: bool) -> Self {
        self.code_sign = code_sign;
        self
    }

    pub fn remove_headers(mut self, remove_headers: bool) -> Self {
        self.remove_headers = remove_headers;
        self
    }

    /// Resolve the embed flag against the owning target's type.
    pub fn should_embed(&self, owner: TargetType) -> bool {
        self.embed.unwrap_or(owner.is_app())
    }

    /// Name of the referenced target, for target dependencies.
    pub fn target_name(&self) -> Option<&str> {
        match &self.kind {
            DependencyKind::Target { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Settings attached to the embed build file of this dependency.
    pub fn embed_settings(&self) -> BuildSettings {
        let mut attributes = Vec::new();
        if self.code_sign {
            attributes.push("CodeSignOnCopy".to_string());
        }
        if self.remove_headers {
            attributes.push("RemoveHeadersOnCopy".to_string());
        }
        let mut settings = BuildSettings::new();
        settings.insert("ATTRIBUTES".into(), SettingValue::List(attributes));
        settings
    }
}
