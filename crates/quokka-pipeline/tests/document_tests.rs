//! Integration tests for the document pipeline.

use quokka_pipeline::css::{BoxType, CssValue, Unit};
use quokka_pipeline::{Document, DocumentSource, PipelineError, format_layout_tree};

const HTML: &str = "<body><h1 class=\"title\">Hi</h1><p>One <em>two</em></p></body>";
const CSS: &str = "body, h1, p { display: block; } .title { margin: 10px; }";

#[test]
fn test_every_stage_from_one_source() {
    let doc = Document::from_source(&DocumentSource::new(HTML, CSS)).unwrap();

    let styled = doc.style_tree();
    assert_eq!(
        styled.children[0].value("margin"),
        Some(&CssValue::Length(10.0, Unit::Px))
    );

    let shape = doc
        .with_layout(|root| {
            root.children
                .iter()
                .map(|child| matches!(child.box_type, BoxType::BlockNode(_)))
                .collect::<Vec<_>>()
        })
        .unwrap();
    assert_eq!(shape, [true, true]);
}

#[test]
fn test_layout_summary_matches_free_function() {
    let doc = Document::parse(HTML, CSS).unwrap();
    let from_closure = doc.with_layout(format_layout_tree).unwrap();
    let summary = doc.layout_summary().unwrap();
    assert_eq!(summary, from_closure);
    assert!(summary.starts_with("block <body>\n  block <h1>\n"));
    assert!(summary.contains("      inline <em>\n"));
}

#[test]
fn test_json_snapshot_has_every_stage() {
    let doc = Document::parse(HTML, CSS).unwrap();
    let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

    assert_eq!(json["dom"]["node_type"]["Element"]["tag_name"], "body");
    assert_eq!(json["stylesheet"]["rules"].as_array().unwrap().len(), 2);
    assert_eq!(json["styled"]["specified_values"]["display"]["Keyword"], "block");
    assert_eq!(json["layout"]["children"].as_array().unwrap().len(), 2);
}

#[test]
fn test_save_json_round_trips_through_file() {
    let doc = Document::parse(HTML, CSS).unwrap();
    let path = std::env::temp_dir().join(format!("quokka-snapshot-{}.json", std::process::id()));

    doc.save_json(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, doc.to_json().unwrap());
}

#[test]
fn test_save_json_reports_bad_path() {
    let doc = Document::parse(HTML, CSS).unwrap();
    let path = std::env::temp_dir()
        .join("quokka-missing-dir")
        .join("nested")
        .join("out.json");

    let err = doc.save_json(&path).unwrap_err();
    assert!(err.to_string().starts_with("failed to save snapshot to"));
}

#[test]
fn test_hidden_root_fails_every_layout_entry_point() {
    let doc = Document::parse("<main>x</main>", "main { display: none; }").unwrap();
    assert!(matches!(doc.layout_summary(), Err(PipelineError::Layout(_))));
    assert!(matches!(doc.to_json(), Err(PipelineError::Layout(_))));
    assert!(doc.save_json(&std::env::temp_dir().join("unused.json")).is_err());
}

#[test]
fn test_snapshot_of_deep_document_stays_small() {
    let depth = 80;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = Document::parse(&html, "div { display: block; }").unwrap();

    let json = doc.to_json().unwrap();
    assert!(json.len() < 2_000_000, "snapshot is {} bytes", json.len());

    let snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot["layout"]["box_type"]["BlockNode"]["Element"]["tag_name"], "div");
    assert!(snapshot["styled"]["node"].get("children").is_none());
}
