use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use testrun_args::{
    ArgumentError, CommandLine, Project, RealFileSystem, ReporterRegistry, RunnerReporter,
    TransformRegistry,
};

#[derive(Debug)]
struct NamedReporter {
    switch: Option<&'static str>,
    auto: bool,
}

impl RunnerReporter for NamedReporter {
    fn switch_name(&self) -> Option<&str> {
        self.switch
    }

    fn description(&self) -> &str {
        "test reporter"
    }

    fn is_environmentally_enabled(&self) -> bool {
        self.auto
    }
}

fn create_file(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, b"").unwrap();
    path.to_string_lossy().into_owned()
}

fn parse(args: &[&str]) -> Result<Project, ArgumentError> {
    let reporters = ReporterRegistry::new(Arc::new(NamedReporter {
        switch: None,
        auto: false,
    }))
    .with(Arc::new(NamedReporter {
        switch: Some("verbose"),
        auto: false,
    }));
    let transforms = TransformRegistry::builtin();
    let command_line = CommandLine::new(&RealFileSystem, &reporters, &transforms).processor_count(8);
    command_line.parse(args)
}

#[test]
fn test_full_invocation() {
    let tmp = TempDir::new().unwrap();
    let assembly = create_file(tmp.path(), "tests.dll");
    let config = create_file(tmp.path(), "tests.JSON");

    let project = parse(&[
        assembly.as_str(),
        config.as_str(),
        "-NoLogo",
        "-parallel",
        "collections",
        "-maxthreads",
        "0.5x",
        "-culture",
        "invariant",
        "-trait",
        "category=fast",
        "-notrait",
        "category=slow",
        "-class",
        "Tests.Widgets",
        "-xml",
        "results.xml",
        "-verbose",
    ])
    .unwrap();

    let assembly_config = &project.assemblies()[0];
    assert!(assembly_config.assembly_file.is_absolute());
    assert_eq!(
        assembly_config.assembly_file,
        Path::new(&assembly).canonicalize().unwrap()
    );
    assert_eq!(
        assembly_config.config_file.as_deref(),
        Some(Path::new(&config).canonicalize().unwrap().as_path())
    );

    let configuration = &assembly_config.configuration;
    assert_eq!(configuration.parallelize_test_collections, Some(true));
    assert_eq!(configuration.max_parallel_threads, Some(4));
    assert_eq!(configuration.culture.as_deref(), Some(""));
    assert!(configuration.filters.included_traits["category"].contains("fast"));
    assert!(configuration.filters.excluded_traits["category"].contains("slow"));
    assert!(configuration.filters.included_classes.contains("Tests.Widgets"));

    assert!(project.configuration().no_logo_or_default());
    assert!(!project.configuration().wait_or_default());
    assert_eq!(project.output("xml"), Some(Path::new("results.xml")));
    assert_eq!(project.reporter().switch_name(), Some("verbose"));
}

#[test]
fn test_second_token_must_be_config_file() {
    let tmp = TempDir::new().unwrap();
    let assembly = create_file(tmp.path(), "tests.dll");
    let other = create_file(tmp.path(), "settings.xml");

    let err = parse(&[assembly.as_str(), other.as_str()]).unwrap_err();
    assert_eq!(err, ArgumentError::UnknownOption(other.clone()));
    assert_eq!(err.to_string(), format!("unknown option: {}", other));
}

#[test]
fn test_missing_config_file() {
    let tmp = TempDir::new().unwrap();
    let assembly = create_file(tmp.path(), "tests.dll");
    let config = tmp.path().join("absent.json");
    let config = config.to_string_lossy().into_owned();

    let err = parse(&[assembly.as_str(), config.as_str()]).unwrap_err();
    assert_eq!(err.to_string(), format!("config file not found: {}", config));
}

#[test]
fn test_directory_is_not_an_assembly() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_string_lossy().into_owned();

    let err = parse(&[dir.as_str()]).unwrap_err();
    assert_eq!(err, ArgumentError::FileNotFound(dir));
}
