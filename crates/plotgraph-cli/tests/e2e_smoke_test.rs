use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use plotgraph::PlotgraphError;
use plotgraph_cli::{Args, exit_code, run};

/// Demo stories live at the workspace root, not in the crate.
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .xml files from a directory
fn collect_xml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("xml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, out: Option<&Path>, out_dot: Option<&Path>) -> Args {
    Args {
        xml: input.to_string_lossy().to_string(),
        out: out.map(|path| path.to_string_lossy().to_string()),
        out_dot: out_dot.map(|path| path.to_string_lossy().to_string()),
        use_label: false,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_xml_files(demos_dir());

    assert!(!demos.is_empty(), "No demo stories found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let stem = demo.file_stem().unwrap().to_string_lossy().to_string();
        let html = temp_dir.path().join(format!("{stem}.html"));
        let dot = temp_dir.path().join(format!("{stem}.dot"));

        match run(&args(demo, Some(&html), Some(&dot))) {
            Ok(()) => {
                assert!(html.is_file(), "missing HTML output for {stem}");
                assert!(dot.is_file(), "missing DOT output for {stem}");
            }
            Err(e) => failed.push((demo.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo stories that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo story(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_xml_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    for demo in &error_demos {
        let dot = temp_dir.path().join("error.dot");
        let result = run(&args(demo, None, Some(&dot)));

        assert!(
            matches!(result, Err(PlotgraphError::Parse { .. })),
            "{} should fail to parse",
            demo.display()
        );
        if let Err(err) = &result {
            assert_eq!(exit_code(err), 1);
        }
        assert!(!dot.exists(), "{} left a partial output", demo.display());
    }
}

#[test]
fn test_branches_dot_output() {
    let temp_dir = tempdir().unwrap();
    let dot = temp_dir.path().join("branches.dot");

    run(&args(&demos_dir().join("branches.xml"), None, Some(&dot))).unwrap();
    let text = fs::read_to_string(&dot).unwrap();

    let edges: Vec<&str> = text.lines().filter(|line| line.contains("->")).collect();
    assert_eq!(
        edges,
        vec![
            r#"  "Harbor" -> "market" [label="child::node@next"];"#,
            r#"  "Harbor" -> "tavern" [label="child::node@next"];"#,
            r#"  "dock" -> "market" [label="next"];"#,
            r#"  "dock" -> "tavern" [label="next"];"#,
            r#"  "market" -> "tavern" [label="inline"];"#,
            r#"  "tavern" -> "ship" [label="child::action@targetId"];"#,
            r#"  "tavern" -> "Open Sea" [label="child::action::default::next"];"#,
            r#"  "tavern" -> "nowhere" [label="child::link@ref"];"#,
            r#"  "Open Sea" -> "ship" [label="default::next"];"#,
            r#"  "ship" -> "storm" [label="default::next"];"#,
            r#"  "storm" -> "ship" [label="inline"];"#,
            r#"  "storm" -> "wreck" [label="inline"];"#,
        ]
    );
}

#[test]
fn test_use_label_switches_dot_labels() {
    let temp_dir = tempdir().unwrap();
    let dot = temp_dir.path().join("branches.dot");
    let mut args = args(&demos_dir().join("branches.xml"), None, Some(&dot));
    args.use_label = true;

    run(&args).unwrap();
    let text = fs::read_to_string(&dot).unwrap();

    assert!(text.contains(r#"  "dock" [label="The \"Mermaid\" is docked"];"#));
    assert!(text.contains(r#"  "tavern" [label="Sailors sing & drink."];"#));
}

#[test]
fn test_crlf_story_with_doctype_entities() {
    let temp_dir = tempdir().unwrap();
    let dot = temp_dir.path().join("lighthouse.dot");
    let mut args = args(&demos_dir().join("lighthouse.xml"), None, Some(&dot));
    args.use_label = true;

    run(&args).unwrap();
    let text = fs::read_to_string(&dot).unwrap();

    assert!(!text.contains('\r'));
    assert!(text.contains(r#"  "dusk" [label="Dusk on the   rocks"];"#));
    assert!(text.contains(r#"  "night" [label="A ship signals."];"#));
    assert!(text.contains(r#"  "dawn" [label="the lighthouse keeper sleeps."];"#));

    let edges: Vec<&str> = text.lines().filter(|line| line.contains("->")).collect();
    assert_eq!(
        edges,
        vec![
            r#"  "dusk" -> "night" [label="inline"];"#,
            r#"  "night" -> "rescue" [label="child::choice@target"];"#,
            r#"  "night" -> "dawn" [label="child::choice@target"];"#,
            r#"  "rescue" -> "dawn" [label="default::next"];"#,
        ]
    );
}

#[test]
fn test_synthesized_nodes_in_html() {
    let temp_dir = tempdir().unwrap();
    let html = temp_dir.path().join("pages.html");

    run(&args(&demos_dir().join("pages.xml"), Some(&html), None)).unwrap();
    let text = fs::read_to_string(&html).unwrap();

    for id in ["page_0", "page_1", "interlude_2", "page_3"] {
        assert!(text.contains(&format!(r#""id":"{id}""#)), "missing node {id}");
    }
    assert!(text.contains(r#"{"from":"interlude_2","to":"page_3","label":"default::next"}"#));
}

#[test]
fn test_missing_input_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let html = temp_dir.path().join("out.html");
    let missing = temp_dir.path().join("missing.xml");

    let err = run(&args(&missing, Some(&html), None)).unwrap_err();

    assert!(matches!(err, PlotgraphError::InputNotFound(ref path) if path == &missing));
    assert_eq!(exit_code(&err), 0);
    assert!(!html.exists());
}

#[test]
fn test_no_outputs_requested() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("story.xml");
    fs::write(&input, r#"<story><scene id="a"/><scene id="b"/></story>"#).unwrap();

    run(&args(&input, None, None)).unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("story.xml");
    let config = temp_dir.path().join("plotgraph.toml");
    let dot = temp_dir.path().join("story.dot");
    fs::write(&input, r#"<story><scene key="a" jump_to="b"/><scene key="b"/></story>"#).unwrap();
    fs::write(
        &config,
        "[inference]\nid_attributes = [\"key\"]\ntarget_attributes = [\"jump_to\"]\n\n[render]\ngraph_name = \"adventure\"\n",
    )
    .unwrap();

    let mut args = args(&input, None, Some(&dot));
    args.config = Some(config.to_string_lossy().to_string());
    run(&args).unwrap();

    let text = fs::read_to_string(&dot).unwrap();
    assert!(text.starts_with("digraph adventure {"));
    assert!(text.contains(r#"  "a" -> "b" [label="jump_to"];"#));
}
