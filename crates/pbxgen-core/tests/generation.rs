//! End-to-end generation tests against an in-memory scanner.

mod support;

use pbxgen_core::graph::{Object, ObjectKind, SubfolderSpec};
use pbxgen_core::prelude::*;
use pretty_assertions::assert_eq;

use support::*;

fn app(name: &str) -> Target {
    Target::new(name, TargetType::Application, Platform::Ios)
}

fn framework(name: &str) -> Target {
    Target::new(name, TargetType::Framework, Platform::Ios)
}

fn spec() -> ProjectSpec {
    ProjectSpec::new("Demo", BASE)
}

fn copy_phase<'a>(graph: &'a ObjectGraph, target: &str, name: &str) -> Option<&'a Object> {
    phases(graph, target).into_iter().find(|p| {
        matches!(p, Object::CopyFilesBuildPhase(c) if c.name.as_deref() == Some(name))
    })
}

// ── Determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_spec_generates_identical_graphs() {
    let build = || {
        let spec = spec()
            .with_target(
                app("App")
                    .with_dependency(Dependency::target("Kit"))
                    .with_dependency(Dependency::carthage("Alamofire")),
            )
            .with_target(framework("Kit"));
        let scanner = StubScanner::new()
            .with_sources("App", &[("App/main.swift", Some(FilePhase::Sources))])
            .with_sources("Kit", &[("Kit/Kit.h", Some(FilePhase::Headers))]);
        generate(spec, scanner)
    };

    let first = build();
    let second = build();
    assert_eq!(first.root, second.root);
    assert_eq!(first.graph, second.graph);
}

// ── Cross-references ─────────────────────────────────────────────────────────

#[test]
fn every_link_resolves_to_an_object() {
    let mut spec = spec()
        .with_target(
            app("App")
                .with_dependency(Dependency::target("Kit"))
                .with_dependency(Dependency::target("Widget"))
                .with_dependency(Dependency::framework("Vendor/X.framework"))
                .with_dependency(Dependency::carthage("Alamofire"))
                .with_config_file("Debug", "configs/App-Debug.xcconfig")
                .with_prebuild_script(BuildScript::from_path("scripts/lint.sh")),
        )
        .with_target(framework("Kit").with_dependency(Dependency::carthage("Result")))
        .with_target(Target::new("Widget", TargetType::AppExtension, Platform::Ios))
        .with_target(
            Target::new("AppTests", TargetType::UnitTestBundle, Platform::Ios)
                .with_dependency(Dependency::target("App")),
        );
    spec.config_files
        .insert("Release".into(), "configs/Release.xcconfig".into());
    spec.file_groups.push("Docs".into());

    let scanner = StubScanner::new()
        .with_sources(
            "App",
            &[
                ("App/main.swift", Some(FilePhase::Sources)),
                ("App/Main.storyboard", Some(FilePhase::Resources)),
            ],
        )
        .with_sources("Kit", &[("Kit/Kit.h", Some(FilePhase::Headers))])
        .with_file("configs/App-Debug.xcconfig", "SWIFT_VERSION = 5.0\n")
        .with_file("configs/Release.xcconfig", "")
        .with_file("scripts/lint.sh", "swiftlint\n")
        .with_region("en");

    let project = generate(spec, scanner);
    let graph = &project.graph;
    assert_eq!(dangling_links(graph), Vec::<String>::new());
    for kind in [
        ObjectKind::TargetDependency,
        ObjectKind::ContainerItemProxy,
        ObjectKind::CopyFilesBuildPhase,
        ObjectKind::ShellScriptBuildPhase,
        ObjectKind::HeadersBuildPhase,
    ] {
        assert!(graph.of_kind(kind).next().is_some(), "no {kind:?} in the graph");
    }
    assert!(
        graph
            .of_kind(ObjectKind::BuildConfiguration)
            .filter_map(|(_, o)| o.as_build_configuration())
            .any(|c| c.base_configuration_reference.is_some())
    );
}

// ── Single use ───────────────────────────────────────────────────────────────

#[test]
fn second_generate_call_is_a_contract_violation() {
    let mut generator = ProjectGenerator::new(
        spec().with_target(app("App")),
        StubScanner::new().boxed(),
        GeneratorOptions::default(),
    );
    assert!(generator.generate().is_ok());

    let err = generator.generate().unwrap_err();
    assert_eq!(err, CoreError::Generation(GenerationError::AlreadyGenerated));
    assert_eq!(err.category(), ErrorCategory::Contract);
}

// ── Project root ─────────────────────────────────────────────────────────────

#[test]
fn project_root_carries_groups_configs_and_metadata() {
    let mut spec = spec().with_target(app("App"));
    spec.attributes
        .insert("ORGANIZATIONNAME".into(), SettingValue::from("Example"));
    let scanner = StubScanner::new()
        .with_sources("App", &[("App/main.swift", Some(FilePhase::Sources))])
        .with_region("fr")
        .with_region("Base")
        .with_region("en");

    let project = generate(spec, scanner);
    let graph = &project.graph;
    assert_eq!(graph.root(), Some(&project.root));
    assert_eq!(graph.object_version(), 46);
    assert_eq!(graph.archive_version(), 1);

    let root = graph.require(&project.root).unwrap().as_project().unwrap();
    assert_eq!(root.compatibility_version, "Xcode 3.2");
    assert_eq!(root.development_region, "en");
    assert_eq!(root.known_regions, ["Base", "en", "fr"]);
    assert_eq!(
        root.attributes["LastUpgradeCheck"],
        SettingValue::from("0930")
    );
    assert_eq!(
        root.attributes["ORGANIZATIONNAME"],
        SettingValue::from("Example")
    );
    assert_eq!(root.targets.len(), 1);

    let main = graph.require(&root.main_group).unwrap().as_group().unwrap();
    let names: Vec<_> = main
        .children
        .iter()
        .map(|c| graph.get(c).unwrap().name_or_path())
        .collect();
    assert_eq!(names, ["App", "Products"]);

    let products = graph
        .require(root.product_ref_group.as_ref().unwrap())
        .unwrap()
        .as_group()
        .unwrap();
    assert_eq!(products.name.as_deref(), Some("Products"));
    assert_eq!(products.children.len(), 1);

    let list = graph.require(&root.build_configuration_list).unwrap();
    let Object::ConfigurationList(list) = list else {
        panic!("expected a configuration list");
    };
    assert_eq!(list.default_configuration_name, "Debug");
    assert_eq!(list.build_configurations.len(), 2);
}

#[test]
fn development_language_overrides_region() {
    let mut spec = spec();
    spec.options.development_language = Some("de".into());
    let project = generate(spec, StubScanner::new());
    let root = project
        .graph
        .require(&project.root)
        .unwrap()
        .as_project()
        .unwrap();
    assert_eq!(root.development_region, "de");
}

#[test]
fn product_file_reference_describes_the_product() {
    let project = generate(spec().with_target(app("App")), StubScanner::new());
    let graph = &project.graph;
    let target = native_target(graph, "App");
    let product = graph
        .require(&target.product_reference)
        .unwrap()
        .as_file_reference()
        .unwrap();
    assert_eq!(product.path, "App.app");
    assert_eq!(product.explicit_file_type.as_deref(), Some("wrapper.application"));
    assert_eq!(target.product_type, "com.apple.product-type.application");
}

// ── Phases ───────────────────────────────────────────────────────────────────

#[test]
fn target_without_resources_has_no_resources_phase() {
    let scanner = StubScanner::new()
        .with_sources("App", &[("App/main.swift", Some(FilePhase::Sources))]);
    let project = generate(spec().with_target(app("App")), scanner);
    assert_eq!(
        phase_kinds(&project.graph, "App"),
        [ObjectKind::SourcesBuildPhase]
    );
}

#[test]
fn resources_phase_lists_resources_sorted_by_file_name() {
    let scanner = StubScanner::new().with_sources(
        "App",
        &[
            ("App/main.swift", Some(FilePhase::Sources)),
            ("App/Views/Main.storyboard", Some(FilePhase::Resources)),
            ("App/Assets.xcassets", Some(FilePhase::Resources)),
            ("App/Info.plist", None),
        ],
    );
    let project = generate(spec().with_target(app("App")), scanner);
    let graph = &project.graph;

    let resources: Vec<_> = phases(graph, "App")
        .into_iter()
        .filter(|p| p.kind() == ObjectKind::ResourcesBuildPhase)
        .collect();
    assert_eq!(resources.len(), 1);
    assert_eq!(
        phase_paths(graph, resources[0]),
        ["App/Assets.xcassets", "App/Views/Main.storyboard"]
    );
}

#[test]
fn headers_phase_only_for_frameworks_and_dynamic_libraries() {
    let headers = [("Lib/Lib.h", Some(FilePhase::Headers))];
    let spec = spec()
        .with_target(framework("Kit"))
        .with_target(Target::new("Static", TargetType::StaticLibrary, Platform::Ios));
    let scanner = StubScanner::new()
        .with_sources("Kit", &headers)
        .with_sources("Static", &[("Static/Static.h", Some(FilePhase::Headers))]);

    let project = generate(spec, scanner);
    assert_eq!(
        phase_kinds(&project.graph, "Kit"),
        [ObjectKind::HeadersBuildPhase]
    );
    assert!(phase_kinds(&project.graph, "Static").is_empty());
}

#[test]
fn phases_follow_the_fixed_order() {
    let spec = spec()
        .with_target(
            app("App")
                .with_prebuild_script(BuildScript::inline("echo pre"))
                .with_postbuild_script(BuildScript::inline("echo post").named("Post"))
                .with_dependency(Dependency::target("Kit"))
                .with_dependency(Dependency::target("Widget"))
                .with_dependency(Dependency::carthage("Alamofire")),
        )
        .with_target(framework("Kit"))
        .with_target(Target::new("Widget", TargetType::AppExtension, Platform::Ios));
    let scanner = StubScanner::new().with_sources(
        "App",
        &[
            ("App/main.swift", Some(FilePhase::Sources)),
            ("App/Assets.xcassets", Some(FilePhase::Resources)),
        ],
    );

    let project = generate(spec, scanner);
    let graph = &project.graph;
    assert_eq!(
        phase_kinds(graph, "App"),
        [
            ObjectKind::ShellScriptBuildPhase,
            ObjectKind::SourcesBuildPhase,
            ObjectKind::ResourcesBuildPhase,
            ObjectKind::FrameworksBuildPhase,
            ObjectKind::CopyFilesBuildPhase,
            ObjectKind::CopyFilesBuildPhase,
            ObjectKind::ShellScriptBuildPhase,
            ObjectKind::ShellScriptBuildPhase,
        ]
    );

    let all = phases(graph, "App");
    let Object::ShellScriptBuildPhase(pre) = all[0] else {
        panic!("expected a script phase");
    };
    assert_eq!(pre.name, "Run Script");
    assert_eq!(pre.shell_path, "/bin/sh");
    assert_eq!(pre.shell_script, "echo pre");

    let Object::ShellScriptBuildPhase(carthage) = all[6] else {
        panic!("expected the Carthage phase");
    };
    assert_eq!(carthage.name, "Carthage");

    let Object::ShellScriptBuildPhase(post) = all[7] else {
        panic!("expected a script phase");
    };
    assert_eq!(post.name, "Post");
}

#[test]
fn script_phase_reads_body_from_file() {
    let spec = spec().with_target(
        app("App").with_prebuild_script(
            BuildScript::from_path("scripts/lint.sh")
                .shell("/bin/zsh")
                .run_only_when_installing(true),
        ),
    );
    let scanner = StubScanner::new().with_file("scripts/lint.sh", "swiftlint\n");

    let project = generate(spec, scanner);
    let all = phases(&project.graph, "App");
    let Object::ShellScriptBuildPhase(phase) = all[0] else {
        panic!("expected a script phase");
    };
    assert_eq!(phase.shell_script, "swiftlint\n");
    assert_eq!(phase.shell_path, "/bin/zsh");
    assert_eq!(phase.run_only_for_deployment_postprocessing, 1);
}

#[test]
fn unreadable_script_file_aborts_generation() {
    let spec =
        spec().with_target(app("App").with_postbuild_script(BuildScript::from_path("missing.sh")));

    let err = try_generate(spec, StubScanner::new()).unwrap_err();
    assert_eq!(
        err,
        CoreError::Generation(GenerationError::ScriptNotFound {
            path: "/project/missing.sh".into(),
            target: "App".into(),
        })
    );
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

// ── Dependencies and embedding ───────────────────────────────────────────────

#[test]
fn app_embeds_framework_dependency_by_default() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::target("Kit")))
        .with_target(framework("Kit"));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let embed = copy_phase(graph, "App", "Embed Frameworks").expect("embed phase");
    let Object::CopyFilesBuildPhase(embed) = embed else {
        unreachable!()
    };
    assert_eq!(embed.dst_subfolder_spec, SubfolderSpec::Frameworks);
    assert_eq!(embed.files.len(), 1);

    let embed_file = graph.require(&embed.files[0]).unwrap().as_build_file().unwrap();
    assert_eq!(
        embed_file.settings["ATTRIBUTES"],
        SettingValue::List(vec!["CodeSignOnCopy".into(), "RemoveHeadersOnCopy".into()])
    );
    assert_eq!(phase_paths(graph, phases(graph, "App")[0]), ["Kit.framework"]);
}

#[test]
fn non_app_targets_do_not_embed_by_default() {
    let spec = spec()
        .with_target(framework("Outer").with_dependency(Dependency::target("Kit")))
        .with_target(framework("Kit"));
    let project = generate(spec, StubScanner::new());
    assert_eq!(
        phase_kinds(&project.graph, "Outer"),
        [ObjectKind::FrameworksBuildPhase]
    );
}

#[test]
fn explicit_embed_false_suppresses_embedding() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::target("Kit").embed(false)))
        .with_target(framework("Kit"));
    let project = generate(spec, StubScanner::new());
    assert!(copy_phase(&project.graph, "App", "Embed Frameworks").is_none());
}

#[test]
fn extensions_and_watch_apps_get_their_own_copy_phases() {
    let spec = spec()
        .with_target(
            app("App")
                .with_dependency(Dependency::target("Widget"))
                .with_dependency(Dependency::target("Watch")),
        )
        .with_target(Target::new("Widget", TargetType::AppExtension, Platform::Ios))
        .with_target(Target::new("Watch", TargetType::Watch2App, Platform::WatchOs));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let Some(Object::CopyFilesBuildPhase(extensions)) =
        copy_phase(graph, "App", "Embed App Extensions")
    else {
        panic!("missing extensions phase");
    };
    assert_eq!(extensions.dst_subfolder_spec, SubfolderSpec::Plugins);
    assert_eq!(extensions.dst_path, "");

    let Some(Object::CopyFilesBuildPhase(watch)) = copy_phase(graph, "App", "Embed Watch Content")
    else {
        panic!("missing watch phase");
    };
    assert_eq!(watch.dst_subfolder_spec, SubfolderSpec::ProductsDirectory);
    assert_eq!(watch.dst_path, "$(CONTENTS_FOLDER_PATH)/Watch");

    // Neither is linked.
    assert!(
        !phase_kinds(graph, "App").contains(&ObjectKind::FrameworksBuildPhase)
    );
}

#[test]
fn embedded_bundles_are_copied_as_resources() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::target("Assets")))
        .with_target(Target::new("Assets", TargetType::Bundle, Platform::Ios));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;
    let resources = phases(graph, "App")
        .into_iter()
        .find(|p| p.kind() == ObjectKind::ResourcesBuildPhase)
        .expect("resources phase");
    assert_eq!(phase_paths(graph, resources), ["Assets.bundle"]);
}

#[test]
fn target_dependency_links_through_a_proxy_on_the_project() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::target("Kit")))
        .with_target(framework("Kit"));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let app = native_target(graph, "App");
    assert_eq!(app.dependencies.len(), 1);
    let Some(Object::TargetDependency(dependency)) = graph.get(&app.dependencies[0]) else {
        panic!("expected a target dependency");
    };
    let Some(Object::ContainerItemProxy(proxy)) = graph.get(&dependency.target_proxy) else {
        panic!("expected a container item proxy");
    };
    assert_eq!(proxy.container_portal, project.root);
    assert_eq!(proxy.remote_info, "Kit");

    let kit = graph
        .iter()
        .find(|(_, o)| o.as_native_target().is_some_and(|t| t.name == "Kit"))
        .map(|(r, _)| r)
        .unwrap();
    assert_eq!(&dependency.target, kit);
    assert_eq!(&proxy.remote_global_id, kit);
}

#[test]
fn unknown_target_dependency_is_skipped_by_default() {
    let spec = spec().with_target(app("App").with_dependency(Dependency::target("Ghost")));
    let project = generate(spec, StubScanner::new());
    assert!(native_target(&project.graph, "App").dependencies.is_empty());
    assert_eq!(project.graph.of_kind(ObjectKind::ContainerItemProxy).count(), 0);
}

#[test]
fn unknown_target_dependency_fails_in_strict_mode() {
    let mut spec = spec().with_target(app("App").with_dependency(Dependency::target("Ghost")));
    spec.options.strict_dependencies = true;

    let err = try_generate(spec, StubScanner::new()).unwrap_err();
    assert_eq!(
        err,
        CoreError::Generation(GenerationError::UnknownDependency {
            target: "App".into(),
            dependency: "Ghost".into(),
        })
    );
}

#[test]
fn static_libraries_are_linked_but_never_embedded() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::target("Core")))
        .with_target(Target::new("Core", TargetType::StaticLibrary, Platform::Ios));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;
    assert_eq!(
        phase_kinds(graph, "App"),
        [ObjectKind::FrameworksBuildPhase]
    );
    assert_eq!(phase_paths(graph, phases(graph, "App")[0]), ["libCore.a"]);
}

#[test]
fn prebuilt_frameworks_are_shared_and_embedded_for_apps() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::framework("Vendor/X.framework")))
        .with_target(
            framework("Kit").with_dependency(Dependency::framework("Vendor/X.framework")),
        );
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let refs = file_references(graph, "Vendor/X.framework");
    assert_eq!(refs.len(), 1);
    // App: link + embed. Kit: link.
    assert_eq!(build_files_for(graph, refs[0]).len(), 3);
    assert!(copy_phase(graph, "App", "Embed Frameworks").is_some());

    let root = graph.require(&project.root).unwrap().as_project().unwrap();
    let main = graph.require(&root.main_group).unwrap().as_group().unwrap();
    let frameworks = main
        .children
        .iter()
        .filter_map(|c| graph.get(c)?.as_group())
        .find(|g| g.name.as_deref() == Some("Frameworks"))
        .expect("frameworks group");
    assert_eq!(&frameworks.children, &[refs[0].clone()]);
}

// ── Carthage ─────────────────────────────────────────────────────────────────

#[test]
fn carthage_framework_is_shared_across_targets_on_a_platform() {
    let spec = spec()
        .with_target(framework("A").with_dependency(Dependency::carthage("Alamofire")))
        .with_target(framework("B").with_dependency(Dependency::carthage("Alamofire")));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let refs = file_references(graph, "Alamofire.framework");
    assert_eq!(refs.len(), 1);
    assert_eq!(build_files_for(graph, refs[0]).len(), 2);
}

#[test]
fn ios_app_copies_carthage_frameworks_with_a_script() {
    let spec = spec().with_target(
        app("App")
            .with_dependency(Dependency::carthage("Result"))
            .with_dependency(Dependency::carthage("Alamofire"))
            .with_dependency(Dependency::carthage("Hidden").embed(false)),
    );
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let script = phases(graph, "App")
        .into_iter()
        .find_map(|p| match p {
            Object::ShellScriptBuildPhase(s) if s.name == "Carthage" => Some(s),
            _ => None,
        })
        .expect("carthage phase");
    assert_eq!(
        script.input_paths,
        [
            "$(SRCROOT)/Carthage/Build/iOS/Alamofire.framework",
            "$(SRCROOT)/Carthage/Build/iOS/Result.framework",
        ]
    );
    assert_eq!(
        script.output_paths,
        [
            "$(BUILT_PRODUCTS_DIR)/$(FRAMEWORKS_FOLDER_PATH)/Alamofire.framework",
            "$(BUILT_PRODUCTS_DIR)/$(FRAMEWORKS_FOLDER_PATH)/Result.framework",
        ]
    );
    assert_eq!(script.shell_script, "carthage copy-frameworks\n");
    assert!(copy_phase(graph, "App", "Embed Frameworks").is_none());

    assert_eq!(
        settings(graph, "App", "Debug")["FRAMEWORK_SEARCH_PATHS"],
        SettingValue::List(vec![
            "$(inherited)".into(),
            "$(PROJECT_DIR)/Carthage/Build/iOS".into()
        ])
    );
}

#[test]
fn carthage_options_change_paths_and_executable() {
    let mut spec = spec().with_target(app("App").with_dependency(Dependency::carthage("Alamofire")));
    spec.options.carthage_build_path = Some("Vendor/Carthage".into());
    spec.options.carthage_executable_path = Some("/opt/bin/carthage".into());
    let project = generate(spec, StubScanner::new());

    let script = phases(&project.graph, "App")
        .into_iter()
        .find_map(|p| match p {
            Object::ShellScriptBuildPhase(s) => Some(s),
            _ => None,
        })
        .expect("carthage phase");
    assert_eq!(
        script.input_paths,
        ["$(SRCROOT)/Vendor/Carthage/iOS/Alamofire.framework"]
    );
    assert_eq!(script.shell_script, "/opt/bin/carthage copy-frameworks\n");
}

#[test]
fn macos_app_embeds_carthage_frameworks_with_a_copy_phase() {
    let spec = spec().with_target(
        Target::new("Mac", TargetType::Application, Platform::MacOs)
            .with_dependency(Dependency::carthage("Alamofire")),
    );
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    assert!(copy_phase(graph, "Mac", "Embed Frameworks").is_some());
    assert!(
        !phases(graph, "Mac")
            .iter()
            .any(|p| p.kind() == ObjectKind::ShellScriptBuildPhase)
    );
    assert_eq!(
        settings(graph, "Mac", "Release")["FRAMEWORK_SEARCH_PATHS"],
        SettingValue::List(vec![
            "$(inherited)".into(),
            "$(PROJECT_DIR)/Carthage/Build/Mac".into()
        ])
    );
}

#[test]
fn transitive_carthage_dependencies_reach_the_app() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::target("Kit")))
        .with_target(framework("Kit").with_dependency(Dependency::carthage("Alamofire")));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    assert!(settings(graph, "App", "Debug").contains_key("FRAMEWORK_SEARCH_PATHS"));
    assert!(
        phases(graph, "App")
            .iter()
            .any(|p| matches!(p, Object::ShellScriptBuildPhase(s) if s.name == "Carthage"))
    );
}

#[test]
fn cyclic_target_dependencies_terminate() {
    let spec = spec()
        .with_target(app("A").with_dependency(Dependency::target("B")))
        .with_target(
            framework("B")
                .with_dependency(Dependency::carthage("Alamofire"))
                .with_dependency(Dependency::target("A")),
        );
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    // B's walk reaches A again, so A collects nothing from B.
    assert!(!settings(graph, "A", "Debug").contains_key("FRAMEWORK_SEARCH_PATHS"));
    assert!(
        !phases(graph, "A")
            .iter()
            .any(|p| matches!(p, Object::ShellScriptBuildPhase(_)))
    );
    assert_eq!(native_target(graph, "A").dependencies.len(), 1);
    assert_eq!(native_target(graph, "B").dependencies.len(), 1);
}

#[test]
fn carthage_group_nests_platform_groups() {
    let spec = spec()
        .with_target(app("App").with_dependency(Dependency::carthage("Alamofire")))
        .with_target(
            Target::new("Mac", TargetType::Application, Platform::MacOs)
                .with_dependency(Dependency::carthage("Alamofire")),
        );
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    let carthage = graph
        .of_kind(ObjectKind::Group)
        .filter_map(|(_, o)| o.as_group())
        .find(|g| g.name.as_deref() == Some("Carthage"))
        .expect("carthage group");
    assert_eq!(carthage.path.as_deref(), Some("Carthage/Build"));

    let platforms: Vec<_> = carthage
        .children
        .iter()
        .map(|c| graph.get(c).unwrap().name_or_path())
        .collect();
    assert_eq!(platforms, ["Mac", "iOS"]);
    // One file reference per platform directory.
    assert_eq!(file_references(graph, "Alamofire.framework").len(), 2);
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[test]
fn bundle_identifier_is_derived_from_the_prefix() {
    let mut spec = spec()
        .with_target(app("My_App"))
        .with_target(app("My-Target"));
    spec.options.bundle_id_prefix = Some("com.example".into());
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;

    assert_eq!(
        settings(graph, "My_App", "Debug")["PRODUCT_BUNDLE_IDENTIFIER"],
        SettingValue::from("com.example.My-App")
    );
    assert_eq!(
        settings(graph, "My-Target", "Release")["PRODUCT_BUNDLE_IDENTIFIER"],
        SettingValue::from("com.example.My-Target")
    );
}

#[test]
fn explicit_settings_win_over_derivations() {
    let mut spec = spec().with_target(app("App").with_settings(
        Settings::default().with_setting("PRODUCT_BUNDLE_IDENTIFIER", "com.custom.app"),
    ));
    spec.options.bundle_id_prefix = Some("com.example".into());
    let project = generate(spec, StubScanner::new());
    assert_eq!(
        settings(&project.graph, "App", "Debug")["PRODUCT_BUNDLE_IDENTIFIER"],
        SettingValue::from("com.custom.app")
    );
}

#[test]
fn xcconfig_settings_block_derivations_and_become_base_configurations() {
    let mut spec = spec().with_target(
        app("App")
            .with_config_file("Debug", "configs/App-Debug.xcconfig")
            .with_source("App"),
    );
    spec.options.bundle_id_prefix = Some("com.example".into());
    let scanner = StubScanner::new()
        .with_file(
            "configs/App-Debug.xcconfig",
            "#include \"Shared.xcconfig\"\nSWIFT_VERSION = 4.0\n",
        )
        .with_file(
            "configs/Shared.xcconfig",
            "PRODUCT_BUNDLE_IDENTIFIER = com.shared // from include\n",
        )
        .with_file("App/Info.plist", "<plist/>");

    let project = generate(spec, scanner);
    let graph = &project.graph;

    let debug = configuration(graph, "App", "Debug");
    assert!(!debug.build_settings.contains_key("PRODUCT_BUNDLE_IDENTIFIER"));
    assert_eq!(
        debug.build_settings["INFOPLIST_FILE"],
        SettingValue::from("App/Info.plist")
    );
    let base = debug.base_configuration_reference.as_ref().expect("base config");
    assert_eq!(
        graph.require(base).unwrap().as_file_reference().unwrap().path,
        "configs/App-Debug.xcconfig"
    );

    let release = configuration(graph, "App", "Release");
    assert!(release.base_configuration_reference.is_none());
    assert_eq!(
        release.build_settings["PRODUCT_BUNDLE_IDENTIFIER"],
        SettingValue::from("com.example.App")
    );
}

#[test]
fn ui_tests_name_their_application() {
    let spec = spec()
        .with_target(framework("Kit"))
        .with_target(app("App"))
        .with_target(
            Target::new("AppUITests", TargetType::UiTestBundle, Platform::Ios)
                .with_dependency(Dependency::target("Kit"))
                .with_dependency(Dependency::target("App")),
        );
    let project = generate(spec, StubScanner::new());
    assert_eq!(
        settings(&project.graph, "AppUITests", "Debug")["TEST_TARGET_NAME"],
        SettingValue::from("App")
    );
    assert!(!settings(&project.graph, "App", "Debug").contains_key("TEST_TARGET_NAME"));
}

#[test]
fn config_specific_settings_apply_by_name() {
    let spec = spec().with_configs(vec![
        Config::debug("Debug"),
        Config::debug("Staging Debug"),
        Config::release("Release"),
    ]);
    let spec = spec.with_target(app("App").with_settings(
        Settings::default()
            .with_setting("API", "prod")
            .with_config_settings("staging", Settings::default().with_setting("API", "staging")),
    ));
    let project = generate(spec, StubScanner::new());
    let graph = &project.graph;
    assert_eq!(settings(graph, "App", "Debug")["API"], SettingValue::from("prod"));
    assert_eq!(
        settings(graph, "App", "Staging Debug")["API"],
        SettingValue::from("staging")
    );
    assert_eq!(settings(graph, "App", "Release")["API"], SettingValue::from("prod"));
}
