//! End-to-end tests for the Converter API: container in, diagram document
//! out, covering the cross-stage properties no single stage can check alone.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use trellis::config::AppConfig;
use trellis::{Converter, TrellisError};

/// Assembles an in-memory container with the given entries.
fn container(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer
            .write_all(content.as_bytes())
            .expect("write zip entry");
    }
    writer.finish().expect("finish zip")
}

fn structured(json: &str) -> Cursor<Vec<u8>> {
    container(&[("content.json", json)])
}

fn markup(xml: &str) -> Cursor<Vec<u8>> {
    container(&[("content.xml", xml)])
}

const TWO_CHILDREN_JSON: &str = r#"[{"rootTopic": {"title": "A", "children": {
    "attached": [ {"title": "B"}, {"title": "C"} ]
}}}]"#;

const TWO_CHILDREN_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xmap-content xmlns="urn:xmind:xmap:xmlns:content:2.0" version="2.0">
  <sheet><topic><title>A</title><children>
    <topics type="attached">
      <topic><title>B</title></topic>
      <topic><title>C</title></topic>
    </topics>
  </children></topic></sheet>
</xmap-content>"#;

/// Collected view of one generated document for structural assertions.
#[derive(Debug, Default)]
struct DocumentShape {
    mxfile: usize,
    diagrams: usize,
    models: usize,
    roots: usize,
    cell_ids: Vec<u64>,
    values_by_id: Vec<(u64, String)>,
}

/// Walks the generated XML and collects the structural facts the tests
/// assert on. Also proves the document is well-formed markup.
fn document_shape(document: &str) -> DocumentShape {
    let mut reader = Reader::from_str(document);
    let mut shape = DocumentShape::default();

    loop {
        match reader.read_event().expect("well-formed document") {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"mxfile" => shape.mxfile += 1,
                b"diagram" => shape.diagrams += 1,
                b"mxGraphModel" => shape.models += 1,
                b"root" => shape.roots += 1,
                b"mxCell" => {
                    let mut id = None;
                    let mut value = None;
                    for attr in e.attributes() {
                        let attr = attr.expect("well-formed attribute");
                        match attr.key.as_ref() {
                            b"id" => {
                                id = Some(
                                    attr.unescape_value()
                                        .expect("id value")
                                        .parse::<u64>()
                                        .expect("numeric id"),
                                );
                            }
                            b"value" => {
                                value =
                                    Some(attr.unescape_value().expect("value attr").into_owned());
                            }
                            _ => {}
                        }
                    }
                    let id = id.expect("every cell has an id");
                    shape.cell_ids.push(id);
                    if let Some(value) = value {
                        shape.values_by_id.push((id, value));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    shape
}

#[test]
fn test_two_children_scenario() {
    let converter = Converter::default();
    let document = converter
        .convert(structured(TWO_CHILDREN_JSON))
        .expect("convert");

    let shape = document_shape(&document);
    assert_eq!(shape.mxfile, 1);
    assert_eq!(shape.diagrams, 1);
    assert_eq!(shape.models, 1);
    assert_eq!(shape.roots, 1);

    // Topic shapes take 2, 3, 4; the two curved connectors follow.
    let titled: Vec<(u64, &str)> = shape
        .values_by_id
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(id, v)| (*id, v.as_str()))
        .collect();
    assert_eq!(titled, [(2, "A"), (3, "B"), (4, "C")]);
    assert!(document.contains("source=\"2\" target=\"3\""));
    assert!(document.contains("source=\"2\" target=\"4\""));
    assert!(document.contains("curved=1;"));
}

#[test]
fn test_cell_identifiers_are_unique_and_start_after_reserved() {
    let converter = Converter::default();
    let document = converter
        .convert(structured(
            r#"[{"rootTopic": {"title": "r", "children": {
                "attached": [
                    {"title": "a", "children": {"attached": [{"title": "a1"}], "callout": [{"title": "n"}]}},
                    {"title": "b"}
                ]
            }}}]"#,
        ))
        .expect("convert");

    let shape = document_shape(&document);
    let unique: HashSet<u64> = shape.cell_ids.iter().copied().collect();
    assert_eq!(unique.len(), shape.cell_ids.len(), "duplicate cell id");

    let (reserved, content): (Vec<u64>, Vec<u64>) =
        shape.cell_ids.iter().copied().partition(|&id| id < 2);
    assert_eq!(reserved, [0, 1]);
    assert!(content.iter().all(|&id| id >= 2));
}

#[test]
fn test_both_encodings_generate_identical_documents() {
    let converter = Converter::default();
    let from_json = converter
        .convert(structured(TWO_CHILDREN_JSON))
        .expect("structured");
    let from_xml = converter.convert(markup(TWO_CHILDREN_XML)).expect("markup");
    assert_eq!(from_json, from_xml);
}

#[test]
fn test_conversion_is_deterministic() {
    let converter = Converter::default();
    let first = converter
        .convert(structured(TWO_CHILDREN_JSON))
        .expect("first run");
    let second = converter
        .convert(structured(TWO_CHILDREN_JSON))
        .expect("second run");
    assert_eq!(first, second);
}

#[test]
fn test_multibyte_titles_round_trip() {
    let title = "トピック 🚀 ümlaut & <tag>";
    let json = serde_json_escape(title);
    let converter = Converter::default();
    let document = converter
        .convert(structured(&format!(
            r#"[{{"rootTopic": {{"title": "{json}"}}}}]"#
        )))
        .expect("convert");

    let shape = document_shape(&document);
    let (_, value) = shape
        .values_by_id
        .iter()
        .find(|(id, _)| *id == 2)
        .expect("root cell");
    assert_eq!(value, title);
}

// Just enough escaping for the titles used above.
fn serde_json_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[test]
fn test_callout_scenario() {
    let converter = Converter::default();
    let document = converter
        .convert(structured(
            r#"[{"rootTopic": {"title": "r", "children": {
                "attached": [
                    {"title": "plain"},
                    {"title": "annotated", "children": {"callout": [{"title": "note1"}]}}
                ]
            }}}]"#,
        ))
        .expect("convert");

    assert!(document.contains("value=\"note1\" style=\"shape=note;"));
    assert!(document.contains("dashed=1;"));

    // The note sits above its topic: smaller y on the note's geometry.
    let mut root = converter.parse(structured(
        r#"[{"rootTopic": {"title": "r", "children": {
            "attached": [
                {"title": "plain"},
                {"title": "annotated", "children": {"callout": [{"title": "note1"}]}}
            ]
        }}}]"#,
    ))
    .expect("parse");
    converter.layout(&mut root).expect("layout");

    let plain = root.children()[0].geometry().expect("plain");
    let annotated = root.children()[1].geometry().expect("annotated");
    let note = root.children()[1].callouts()[0].geometry().expect("note");
    assert!(note.bottom() <= annotated.y());
    assert!(!note.overlaps_vertically(plain));
}

#[test]
fn test_parse_failure_is_attributed_to_parse_stage() {
    let converter = Converter::default();
    let result = converter.convert(container(&[("unrelated.txt", "hello")]));
    match result {
        Err(err @ TrellisError::Parse(_)) => assert_eq!(err.stage(), "parse"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_alternate_configuration_changes_geometry_only() {
    let mut config = AppConfig::default();
    config.layout.level_offset = 400.0;

    let converter = Converter::new(config);
    let document = converter
        .convert(structured(TWO_CHILDREN_JSON))
        .expect("convert");

    // Children move to the wider column; structure is unchanged.
    let shape = document_shape(&document);
    assert_eq!(shape.mxfile, 1);
    assert!(document.contains("x=\"440\""));
}
