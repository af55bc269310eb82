//! Settings resolution for project and target build configurations.

use std::collections::HashSet;

use tracing::warn;

use crate::application::generator::presets;
use crate::domain::{
    BuildSettings, Config, ProjectSpec, SettingValue, Settings, Target, settings::merge_into,
};

pub const INFOPLIST_FILE: &str = "INFOPLIST_FILE";
pub const PRODUCT_BUNDLE_IDENTIFIER: &str = "PRODUCT_BUNDLE_IDENTIFIER";
pub const TEST_TARGET_NAME: &str = "TEST_TARGET_NAME";
pub const FRAMEWORK_SEARCH_PATHS: &str = "FRAMEWORK_SEARCH_PATHS";

/// Merges presets and declared settings for one spec.
pub struct SettingsResolver<'a> {
    spec: &'a ProjectSpec,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(spec: &'a ProjectSpec) -> Self {
        Self { spec }
    }

    /// Settings of the project-level configuration `config`.
    pub fn project_settings(&self, config: &Config) -> BuildSettings {
        let mut settings = BuildSettings::new();
        if self.spec.options.setting_presets.applies_to_project() {
            merge_into(&mut settings, &presets::project_base());
            if let Some(config_type) = config.config_type {
                merge_into(&mut settings, &presets::config(config_type));
            }
        }
        merge_into(&mut settings, &self.resolve(&self.spec.settings, config));
        settings
    }

    /// Settings of `target` for `config`, before implicit derivations.
    pub fn target_settings(&self, target: &Target, config: &Config) -> BuildSettings {
        let mut settings = self.project_settings(config);
        if self.spec.options.setting_presets.applies_to_targets() {
            merge_into(&mut settings, &presets::platform(target.platform));
            merge_into(
                &mut settings,
                &presets::product(target.target_type, target.platform),
            );
        }
        merge_into(&mut settings, &self.resolve(&target.settings, config));
        settings
    }

    /// Flatten a `Settings` declaration for one configuration: groups first,
    /// then plain settings, then every matching per-config variant.
    pub fn resolve(&self, settings: &Settings, config: &Config) -> BuildSettings {
        let mut visited = HashSet::new();
        self.resolve_with(settings, config, &mut visited)
    }

    fn resolve_with(
        &self,
        settings: &Settings,
        config: &Config,
        visited: &mut HashSet<String>,
    ) -> BuildSettings {
        let mut resolved = BuildSettings::new();

        for group in &settings.groups {
            if !visited.insert(group.clone()) {
                continue;
            }
            match self.spec.setting_groups.get(group) {
                Some(group_settings) => {
                    let group_resolved = self.resolve_with(group_settings, config, visited);
                    merge_into(&mut resolved, &group_resolved);
                }
                None => warn!(group = %group, "Unknown setting group"),
            }
        }

        merge_into(&mut resolved, &settings.build_settings);

        let config_name = config.name.to_lowercase();
        for (variant, variant_settings) in &settings.config_settings {
            if config_name.contains(&variant.to_lowercase()) {
                let variant_resolved = self.resolve_with(variant_settings, config, visited);
                merge_into(&mut resolved, &variant_resolved);
            }
        }

        resolved
    }
}

/// Inputs for the settings a target gets without declaring them.
#[derive(Debug, Clone, Default)]
pub struct ImplicitSettings<'a> {
    /// `Info.plist` path relative to the project base.
    pub info_plist: Option<String>,
    pub bundle_id_prefix: Option<&'a str>,
    /// Application a UI test bundle drives.
    pub test_target_name: Option<&'a str>,
    /// Carthage platform directory to add to the framework search path.
    pub carthage_search_path: Option<String>,
}

impl ImplicitSettings<'_> {
    /// Apply each derivation whose key neither `settings` nor the target's
    /// xcconfig (`xcconfig`) sets already.
    pub fn apply(&self, target_name: &str, settings: &mut BuildSettings, xcconfig: &BuildSettings) {
        if !has_setting(settings, xcconfig, INFOPLIST_FILE) {
            if let Some(plist) = &self.info_plist {
                settings.insert(INFOPLIST_FILE.into(), plist.as_str().into());
            }
        }

        if !has_setting(settings, xcconfig, PRODUCT_BUNDLE_IDENTIFIER) {
            if let Some(prefix) = self.bundle_id_prefix {
                settings.insert(
                    PRODUCT_BUNDLE_IDENTIFIER.into(),
                    format!("{prefix}.{}", sanitize_bundle_name(target_name)).into(),
                );
            }
        }

        if !has_setting(settings, xcconfig, TEST_TARGET_NAME) {
            if let Some(app) = self.test_target_name {
                settings.insert(TEST_TARGET_NAME.into(), app.into());
            }
        }

        if let Some(path) = &self.carthage_search_path {
            append_search_path(settings, FRAMEWORK_SEARCH_PATHS, path);
        }
    }
}

/// Whether `key` is set explicitly, in the merged settings or the xcconfig.
pub fn has_setting(settings: &BuildSettings, xcconfig: &BuildSettings, key: &str) -> bool {
    settings.contains_key(key) || xcconfig.contains_key(key)
}

/// Make a target name safe for a bundle identifier: `_` becomes `-` and
/// anything outside `[A-Za-z0-9-.]` is dropped.
pub fn sanitize_bundle_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == '_' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.')
        .collect()
}

/// Append `path` to a search-path setting, normalizing it to a list.
pub fn append_search_path(settings: &mut BuildSettings, key: &str, path: &str) {
    let value = match settings.remove(key) {
        Some(SettingValue::List(mut items)) => {
            items.push(path.to_string());
            items
        }
        Some(scalar) => vec![scalar.as_scalar(), path.to_string()],
        None => vec!["$(inherited)".to_string(), path.to_string()],
    };
    settings.insert(key.to_string(), SettingValue::List(value));
}
