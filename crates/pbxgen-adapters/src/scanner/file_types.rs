//! Extension tables: Xcode file types and default build phases.

use std::path::Path;

use pbxgen_core::application::ports::FilePhase;

const SOURCE_EXTENSIONS: &[&str] = &[
    "swift",
    "m",
    "mm",
    "c",
    "cc",
    "cpp",
    "cxx",
    "s",
    "metal",
    "xcdatamodeld",
    "intentdefinition",
    "mlmodel",
];

const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "ipp", "tpp"];

/// Files that live in the tree but are never part of a phase.
const UNBUILT_EXTENSIONS: &[&str] = &[
    "xcconfig",
    "entitlements",
    "gpx",
    "lproj",
    "xcfilelist",
    "apns",
    "pch",
    "modulemap",
    "framework",
    "a",
    "dylib",
];

/// Directories Xcode treats as a single file.
const BUNDLE_EXTENSIONS: &[&str] = &[
    "xcassets",
    "xcdatamodeld",
    "xcdatamodel",
    "framework",
    "bundle",
    "playground",
    "scnassets",
    "app",
    "appex",
    "xctest",
    "xcodeproj",
    "xcworkspace",
    "rcproject",
];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Phase a file joins when nothing overrides it.
pub fn default_phase(path: &Path) -> Option<FilePhase> {
    if path.file_name().is_some_and(|n| n == "Info.plist") {
        return None;
    }
    let Some(ext) = extension(path) else {
        return Some(FilePhase::Resources);
    };
    let ext = ext.as_str();
    if SOURCE_EXTENSIONS.contains(&ext) {
        Some(FilePhase::Sources)
    } else if HEADER_EXTENSIONS.contains(&ext) {
        Some(FilePhase::Headers)
    } else if UNBUILT_EXTENSIONS.contains(&ext) {
        None
    } else {
        Some(FilePhase::Resources)
    }
}

/// Whether a directory at `path` is listed as one file instead of a group.
pub fn is_bundle_directory(path: &Path) -> bool {
    extension(path).is_some_and(|ext| BUNDLE_EXTENSIONS.contains(&ext.as_str()))
}

/// `lastKnownFileType` for a file element.
pub fn last_known_file_type(path: &Path) -> Option<&'static str> {
    let ty = match extension(path)?.as_str() {
        "swift" => "sourcecode.swift",
        "m" => "sourcecode.c.objc",
        "mm" => "sourcecode.cpp.objcpp",
        "c" => "sourcecode.c.c",
        "cc" | "cpp" | "cxx" => "sourcecode.cpp.cpp",
        "h" => "sourcecode.c.h",
        "hh" | "hpp" | "hxx" => "sourcecode.cpp.h",
        "s" => "sourcecode.asm",
        "metal" => "sourcecode.metal",
        "storyboard" => "file.storyboard",
        "xib" => "file.xib",
        "xcassets" => "folder.assetcatalog",
        "strings" => "text.plist.strings",
        "stringsdict" => "text.plist.stringsdict",
        "plist" => "text.plist.xml",
        "entitlements" => "text.plist.entitlements",
        "json" => "text.json",
        "xcconfig" => "text.xcconfig",
        "md" => "net.daringfireball.markdown",
        "sh" => "text.script.sh",
        "png" => "image.png",
        "jpg" | "jpeg" => "image.jpeg",
        "pdf" => "image.pdf",
        "framework" => "wrapper.framework",
        "bundle" => "wrapper.plug-in",
        "xcdatamodeld" => "wrapper.xcdatamodeld",
        "playground" => "file.playground",
        "a" => "archive.ar",
        "dylib" => "compiled.mach-o.dylib",
        "modulemap" => "sourcecode.module-map",
        _ => return None,
    };
    Some(ty)
}
