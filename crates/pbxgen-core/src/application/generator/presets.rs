//! Built-in setting presets layered under the spec's own settings.
//!
//! The values follow what Xcode writes into a freshly created project of the
//! same kind.

use crate::domain::{BuildSettings, ConfigType, Platform, SettingValue, TargetType};

fn settings(entries: &[(&str, SettingValue)]) -> BuildSettings {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn list(items: &[&str]) -> SettingValue {
    SettingValue::List(items.iter().map(|s| s.to_string()).collect())
}

fn yes() -> SettingValue {
    SettingValue::Bool(true)
}

fn no() -> SettingValue {
    SettingValue::Bool(false)
}

/// Settings every project configuration starts from.
pub fn project_base() -> BuildSettings {
    settings(&[
        ("ALWAYS_SEARCH_USER_PATHS", no()),
        ("CLANG_ANALYZER_NONNULL", yes()),
        ("CLANG_CXX_LANGUAGE_STANDARD", "gnu++14".into()),
        ("CLANG_CXX_LIBRARY", "libc++".into()),
        ("CLANG_ENABLE_MODULES", yes()),
        ("CLANG_ENABLE_OBJC_ARC", yes()),
        ("CLANG_WARN_BOOL_CONVERSION", yes()),
        ("CLANG_WARN_CONSTANT_CONVERSION", yes()),
        ("CLANG_WARN_DIRECT_OBJC_ISA_USAGE", "YES_ERROR".into()),
        ("CLANG_WARN_DOCUMENTATION_COMMENTS", yes()),
        ("CLANG_WARN_EMPTY_BODY", yes()),
        ("CLANG_WARN_ENUM_CONVERSION", yes()),
        ("CLANG_WARN_INFINITE_RECURSION", yes()),
        ("CLANG_WARN_INT_CONVERSION", yes()),
        ("CLANG_WARN_OBJC_ROOT_CLASS", "YES_ERROR".into()),
        ("CLANG_WARN_SUSPICIOUS_MOVE", yes()),
        ("CLANG_WARN_UNREACHABLE_CODE", yes()),
        ("CLANG_WARN__DUPLICATE_METHOD_MATCH", yes()),
        ("COPY_PHASE_STRIP", no()),
        ("ENABLE_STRICT_OBJC_MSGSEND", yes()),
        ("GCC_C_LANGUAGE_STANDARD", "gnu11".into()),
        ("GCC_NO_COMMON_BLOCKS", yes()),
        ("GCC_WARN_64_TO_32_BIT_CONVERSION", yes()),
        ("GCC_WARN_ABOUT_RETURN_TYPE", "YES_ERROR".into()),
        ("GCC_WARN_UNDECLARED_SELECTOR", yes()),
        ("GCC_WARN_UNINITIALIZED_AUTOS", "YES_AGGRESSIVE".into()),
        ("GCC_WARN_UNUSED_FUNCTION", yes()),
        ("GCC_WARN_UNUSED_VARIABLE", yes()),
        ("PRODUCT_NAME", "$(TARGET_NAME)".into()),
        ("SWIFT_VERSION", "4.0".into()),
    ])
}

/// Project settings for a configuration type.
pub fn config(config_type: ConfigType) -> BuildSettings {
    match config_type {
        ConfigType::Debug => settings(&[
            ("DEBUG_INFORMATION_FORMAT", "dwarf".into()),
            ("ENABLE_TESTABILITY", yes()),
            ("GCC_DYNAMIC_NO_PIC", no()),
            ("GCC_OPTIMIZATION_LEVEL", SettingValue::Integer(0)),
            (
                "GCC_PREPROCESSOR_DEFINITIONS",
                list(&["$(inherited)", "DEBUG=1"]),
            ),
            ("MTL_ENABLE_DEBUG_INFO", yes()),
            ("ONLY_ACTIVE_ARCH", yes()),
            ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", "DEBUG".into()),
            ("SWIFT_OPTIMIZATION_LEVEL", "-Onone".into()),
        ]),
        ConfigType::Release => settings(&[
            ("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym".into()),
            ("ENABLE_NS_ASSERTIONS", no()),
            ("MTL_ENABLE_DEBUG_INFO", no()),
            ("SWIFT_OPTIMIZATION_LEVEL", "-Owholemodule".into()),
            ("VALIDATE_PRODUCT", yes()),
        ]),
    }
}

/// Target settings for a platform.
pub fn platform(platform: Platform) -> BuildSettings {
    match platform {
        Platform::Ios => settings(&[
            ("SDKROOT", "iphoneos".into()),
            ("TARGETED_DEVICE_FAMILY", "1,2".into()),
            ("CODE_SIGN_IDENTITY[sdk=iphoneos*]", "iPhone Developer".into()),
        ]),
        Platform::MacOs => settings(&[
            ("SDKROOT", "macosx".into()),
            ("COMBINE_HIDPI_IMAGES", yes()),
            ("CODE_SIGN_IDENTITY", "-".into()),
        ]),
        Platform::TvOs => settings(&[
            ("SDKROOT", "appletvos".into()),
            ("TARGETED_DEVICE_FAMILY", SettingValue::Integer(3)),
        ]),
        Platform::WatchOs => settings(&[
            ("SDKROOT", "watchos".into()),
            ("TARGETED_DEVICE_FAMILY", SettingValue::Integer(4)),
            ("SKIP_INSTALL", yes()),
        ]),
    }
}

/// Target settings for a product type on a platform.
pub fn product(target_type: TargetType, platform: Platform) -> BuildSettings {
    let frameworks = if platform.is_desktop() {
        "@executable_path/../Frameworks"
    } else {
        "@executable_path/Frameworks"
    };

    match target_type {
        TargetType::Application | TargetType::MessagesApplication => settings(&[
            ("ASSETCATALOG_COMPILER_APPICON_NAME", "AppIcon".into()),
            ("LD_RUNPATH_SEARCH_PATHS", list(&["$(inherited)", frameworks])),
        ]),
        TargetType::WatchApp | TargetType::Watch2App => settings(&[
            ("ASSETCATALOG_COMPILER_APPICON_NAME", "AppIcon".into()),
            ("SKIP_INSTALL", yes()),
        ]),
        TargetType::Framework => settings(&[
            ("CURRENT_PROJECT_VERSION", SettingValue::Integer(1)),
            ("DEFINES_MODULE", yes()),
            ("DYLIB_COMPATIBILITY_VERSION", SettingValue::Integer(1)),
            ("DYLIB_CURRENT_VERSION", SettingValue::Integer(1)),
            ("DYLIB_INSTALL_NAME_BASE", "@rpath".into()),
            ("INSTALL_PATH", "$(LOCAL_LIBRARY_DIR)/Frameworks".into()),
            (
                "LD_RUNPATH_SEARCH_PATHS",
                list(&["$(inherited)", frameworks, "@loader_path/Frameworks"]),
            ),
            ("SKIP_INSTALL", yes()),
            ("VERSIONING_SYSTEM", "apple-generic".into()),
            ("VERSION_INFO_PREFIX", "".into()),
        ]),
        TargetType::StaticLibrary => settings(&[
            ("OTHER_LDFLAGS", "-ObjC".into()),
            ("SKIP_INSTALL", yes()),
        ]),
        TargetType::DynamicLibrary => settings(&[
            ("DYLIB_COMPATIBILITY_VERSION", SettingValue::Integer(1)),
            ("DYLIB_CURRENT_VERSION", SettingValue::Integer(1)),
            ("EXECUTABLE_PREFIX", "lib".into()),
            ("SKIP_INSTALL", yes()),
        ]),
        TargetType::UnitTestBundle | TargetType::UiTestBundle => settings(&[(
            "LD_RUNPATH_SEARCH_PATHS",
            list(&["$(inherited)", frameworks, "@loader_path/Frameworks"]),
        )]),
        TargetType::AppExtension
        | TargetType::TvExtension
        | TargetType::MessagesExtension
        | TargetType::WatchExtension
        | TargetType::Watch2Extension => settings(&[
            (
                "LD_RUNPATH_SEARCH_PATHS",
                list(&[
                    "$(inherited)",
                    frameworks,
                    "@executable_path/../../Frameworks",
                ]),
            ),
            ("SKIP_INSTALL", yes()),
        ]),
        TargetType::StickerPack => settings(&[(
            "ASSETCATALOG_COMPILER_APPICON_NAME",
            "iMessage App Icon".into(),
        )]),
        TargetType::Bundle | TargetType::CommandLineTool | TargetType::XpcService => {
            BuildSettings::new()
        }
    }
}
