//! Domain value objects: Platform, TargetType, ConfigType, SettingPresets.
//!
//! # Design
//!
//! These are plain `Copy` value types compared by value.
//! This file's only job is to define the types, their string representations,
//! their `FromStr` parsers and the small classification predicates the
//! generator branches on.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a preset entry in `application::generator::presets` if needed

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Platform ─────────────────────────────────────────────────────────────────

/// An Apple platform a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "macOS")]
    MacOs,
    #[serde(rename = "tvOS")]
    TvOs,
    #[serde(rename = "watchOS")]
    WatchOs,
}

impl Platform {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::MacOs => "macOS",
            Self::TvOs => "tvOS",
            Self::WatchOs => "watchOS",
        }
    }

    /// Directory name Carthage uses for this platform under its build path.
    pub const fn carthage_directory_name(&self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::MacOs => "Mac",
            Self::TvOs => "tvOS",
            Self::WatchOs => "watchOS",
        }
    }

    /// Desktop platforms embed Carthage frameworks through a copy phase
    /// instead of the `carthage copy-frameworks` script.
    pub const fn is_desktop(&self) -> bool {
        matches!(self, Self::MacOs)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "macos" | "osx" | "mac" => Ok(Self::MacOs),
            "tvos" => Ok(Self::TvOs),
            "watchos" => Ok(Self::WatchOs),
            other => Err(DomainError::UnknownPlatform(other.to_string())),
        }
    }
}

// ── TargetType ───────────────────────────────────────────────────────────────

/// The product type of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Application,
    Framework,
    StaticLibrary,
    DynamicLibrary,
    Bundle,
    UnitTestBundle,
    UiTestBundle,
    AppExtension,
    CommandLineTool,
    WatchApp,
    Watch2App,
    WatchExtension,
    Watch2Extension,
    TvExtension,
    MessagesApplication,
    MessagesExtension,
    StickerPack,
    XpcService,
}

impl TargetType {
    /// The spec-facing name (`type:` key in a manifest).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::StaticLibrary => "library.static",
            Self::DynamicLibrary => "library.dynamic",
            Self::Bundle => "bundle",
            Self::UnitTestBundle => "bundle.unit-test",
            Self::UiTestBundle => "bundle.ui-testing",
            Self::AppExtension => "app-extension",
            Self::CommandLineTool => "tool",
            Self::WatchApp => "application.watchapp",
            Self::Watch2App => "application.watchapp2",
            Self::WatchExtension => "watchkit-extension",
            Self::Watch2Extension => "watchkit2-extension",
            Self::TvExtension => "tv-app-extension",
            Self::MessagesApplication => "application.messages",
            Self::MessagesExtension => "app-extension.messages",
            Self::StickerPack => "app-extension.messages-sticker-pack",
            Self::XpcService => "xpc-service",
        }
    }

    /// Xcode product type identifier.
    pub fn product_type(&self) -> String {
        format!("com.apple.product-type.{}", self.as_str())
    }

    /// Extension of the built product, if it has one.
    pub const fn file_extension(&self) -> Option<&'static str> {
        match self {
            Self::Application
            | Self::WatchApp
            | Self::Watch2App
            | Self::MessagesApplication => Some("app"),
            Self::Framework => Some("framework"),
            Self::StaticLibrary => Some("a"),
            Self::DynamicLibrary => Some("dylib"),
            Self::Bundle => Some("bundle"),
            Self::UnitTestBundle | Self::UiTestBundle => Some("xctest"),
            Self::AppExtension
            | Self::WatchExtension
            | Self::Watch2Extension
            | Self::TvExtension
            | Self::MessagesExtension
            | Self::StickerPack => Some("appex"),
            Self::XpcService => Some("xpc"),
            Self::CommandLineTool => None,
        }
    }

    /// `explicitFileType` of the product file reference.
    pub const fn explicit_file_type(&self) -> &'static str {
        match self {
            Self::Application
            | Self::WatchApp
            | Self::Watch2App
            | Self::MessagesApplication => "wrapper.application",
            Self::Framework => "wrapper.framework",
            Self::StaticLibrary => "archive.ar",
            Self::DynamicLibrary => "compiled.mach-o.dylib",
            Self::AppExtension
            | Self::WatchExtension
            | Self::Watch2Extension
            | Self::TvExtension
            | Self::MessagesExtension
            | Self::StickerPack => "wrapper.app-extension",
            Self::XpcService => "wrapper.xpc-service",
            Self::Bundle | Self::UnitTestBundle | Self::UiTestBundle => "wrapper.cfbundle",
            Self::CommandLineTool => "compiled.mach-o.executable",
        }
    }

    pub const fn is_app(&self) -> bool {
        matches!(
            self,
            Self::Application | Self::WatchApp | Self::Watch2App | Self::MessagesApplication
        )
    }

    pub const fn is_library(&self) -> bool {
        matches!(self, Self::StaticLibrary | Self::DynamicLibrary)
    }

    pub const fn is_framework(&self) -> bool {
        matches!(self, Self::Framework)
    }

    pub const fn is_extension(&self) -> bool {
        matches!(
            self,
            Self::AppExtension
                | Self::WatchExtension
                | Self::Watch2Extension
                | Self::TvExtension
                | Self::MessagesExtension
                | Self::StickerPack
        )
    }

    pub const fn is_test(&self) -> bool {
        matches!(self, Self::UnitTestBundle | Self::UiTestBundle)
    }

    /// Only frameworks and dynamic libraries publish a headers phase.
    pub const fn has_headers_phase(&self) -> bool {
        matches!(self, Self::Framework | Self::DynamicLibrary)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library.static" => Self::StaticLibrary,
            "library.dynamic" => Self::DynamicLibrary,
            "bundle" => Self::Bundle,
            "bundle.unit-test" => Self::UnitTestBundle,
            "bundle.ui-testing" => Self::UiTestBundle,
            "app-extension" => Self::AppExtension,
            "tool" => Self::CommandLineTool,
            "application.watchapp" => Self::WatchApp,
            "application.watchapp2" => Self::Watch2App,
            "watchkit-extension" => Self::WatchExtension,
            "watchkit2-extension" => Self::Watch2Extension,
            "tv-app-extension" => Self::TvExtension,
            "application.messages" => Self::MessagesApplication,
            "app-extension.messages" => Self::MessagesExtension,
            "app-extension.messages-sticker-pack" => Self::StickerPack,
            "xpc-service" => Self::XpcService,
            other => return Err(DomainError::UnknownTargetType(other.to_string())),
        };
        Ok(ty)
    }
}

// ── ConfigType ───────────────────────────────────────────────────────────────

/// Which preset family a build configuration draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    Debug,
    Release,
}

impl ConfigType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(DomainError::InvalidSpec(format!(
                "unknown config type: {other}"
            ))),
        }
    }
}

// ── SettingPresets ───────────────────────────────────────────────────────────

/// Which built-in setting presets are layered under the spec's settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingPresets {
    #[default]
    All,
    Project,
    Targets,
    None,
}

impl SettingPresets {
    pub const fn applies_to_project(&self) -> bool {
        matches!(self, Self::All | Self::Project)
    }

    pub const fn applies_to_targets(&self) -> bool {
        matches!(self, Self::All | Self::Targets)
    }
}

impl FromStr for SettingPresets {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "project" => Ok(Self::Project),
            "targets" => Ok(Self::Targets),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidSpec(format!(
                "unknown setting presets value: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_type_round_trips_through_str() {
        for ty in [
            TargetType::Application,
            TargetType::UiTestBundle,
            TargetType::StickerPack,
            TargetType::DynamicLibrary,
        ] {
            assert_eq!(TargetType::from_str(ty.as_str()).unwrap(), ty);
        }
        assert!(TargetType::from_str("applet").is_err());
    }

    #[test]
    fn target_type_classification() {
        assert!(TargetType::Watch2App.is_app());
        assert!(TargetType::StaticLibrary.is_library());
        assert!(TargetType::MessagesExtension.is_extension());
        assert!(!TargetType::Framework.is_library());
        assert!(TargetType::DynamicLibrary.has_headers_phase());
        assert!(!TargetType::StaticLibrary.has_headers_phase());
    }

    #[test]
    fn product_type_identifier() {
        assert_eq!(
            TargetType::UiTestBundle.product_type(),
            "com.apple.product-type.bundle.ui-testing"
        );
    }

    #[test]
    fn platform_parsing_and_carthage_names() {
        assert_eq!(Platform::from_str("macOS").unwrap(), Platform::MacOs);
        assert_eq!(Platform::MacOs.carthage_directory_name(), "Mac");
        assert_eq!(Platform::Ios.carthage_directory_name(), "iOS");
        assert!(Platform::from_str("linux").is_err());
    }
}
