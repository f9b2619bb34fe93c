//! mxGraph XML backend.
//!
//! Emits the fixed document envelope (one `mxfile`, one `diagram`, one
//! `mxGraphModel`, one `root`) with the two reserved structural cells before
//! any content, then one vertex cell per topic, one note-styled vertex per
//! callout, and connector edges between them. Cell identifiers count up from
//! [`FIRST_CONTENT_ID`] in a fixed traversal order, so output for unchanged
//! input is byte-identical across runs.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use trellis_core::geometry::Rect;
use trellis_core::topic::Topic;

use crate::config::AppConfig;
use crate::export::{Exporter, GenerationError};

/// First identifier available to generated cells; `0` and `1` are the
/// reserved root and layer cells of the graph model.
pub const FIRST_CONTENT_ID: u64 = 2;

/// Cell id sequence scoped to one generated document.
struct IdSequence(u64);

impl IdSequence {
    fn new() -> Self {
        Self(FIRST_CONTENT_ID)
    }

    fn next_id(&mut self) -> u64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Exporter producing mxGraph XML (draw.io) documents.
pub struct DrawioExporter<'a> {
    config: &'a AppConfig,
}

impl<'a> DrawioExporter<'a> {
    /// Creates an exporter over the given configuration.
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Writes one topic subtree: the topic's own shape, each child subtree,
    /// the connectors to the children, then the topic's callouts. Returns
    /// the topic's cell id.
    fn write_topic<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        topic: &Topic,
        depth: usize,
        ids: &mut IdSequence,
    ) -> Result<u64, GenerationError> {
        let geometry = topic
            .geometry()
            .ok_or_else(|| GenerationError::MissingGeometry {
                title: topic.title().to_string(),
            })?;

        let id = ids.next_id();
        let style = self.config.style.topic_style(depth);
        write_vertex(writer, id, topic.title(), &style, geometry)?;

        let mut child_ids = Vec::with_capacity(topic.children().len());
        for child in topic.children() {
            child_ids.push(self.write_topic(writer, child, depth + 1, ids)?);
        }

        let connector_style = self.config.style.topic_connector_style();
        for child_id in child_ids {
            write_edge(writer, ids.next_id(), id, child_id, &connector_style)?;
        }

        let callout_style = self.config.style.callout_style();
        let callout_connector_style = self.config.style.callout_connector_style();
        for callout in topic.callouts() {
            let geometry =
                callout
                    .geometry()
                    .ok_or_else(|| GenerationError::MissingGeometry {
                        title: callout.text().to_string(),
                    })?;
            let callout_id = ids.next_id();
            write_vertex(writer, callout_id, callout.text(), &callout_style, geometry)?;
            write_edge(
                writer,
                ids.next_id(),
                id,
                callout_id,
                &callout_connector_style,
            )?;
        }

        Ok(id)
    }
}

impl Exporter for DrawioExporter<'_> {
    fn export(&mut self, root: &Topic) -> Result<String, GenerationError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut mxfile = BytesStart::new("mxfile");
        mxfile.push_attribute(("host", "app.diagrams.net"));
        mxfile.push_attribute(("version", "21.0.0"));
        writer.write_event(Event::Start(mxfile))?;

        let mut diagram = BytesStart::new("diagram");
        diagram.push_attribute(("name", "Page-1"));
        writer.write_event(Event::Start(diagram))?;

        let mut model = BytesStart::new("mxGraphModel");
        model.push_attribute(("dx", "1426"));
        model.push_attribute(("dy", "782"));
        model.push_attribute(("grid", "1"));
        model.push_attribute(("gridSize", "10"));
        model.push_attribute(("guides", "1"));
        writer.write_event(Event::Start(model))?;

        writer.write_event(Event::Start(BytesStart::new("root")))?;

        // The two reserved structural cells every graph model requires.
        let mut cell0 = BytesStart::new("mxCell");
        cell0.push_attribute(("id", "0"));
        writer.write_event(Event::Empty(cell0))?;

        let mut cell1 = BytesStart::new("mxCell");
        cell1.push_attribute(("id", "1"));
        cell1.push_attribute(("parent", "0"));
        writer.write_event(Event::Empty(cell1))?;

        let mut ids = IdSequence::new();
        self.write_topic(&mut writer, root, 0, &mut ids)?;

        writer.write_event(Event::End(BytesEnd::new("root")))?;
        writer.write_event(Event::End(BytesEnd::new("mxGraphModel")))?;
        writer.write_event(Event::End(BytesEnd::new("diagram")))?;
        writer.write_event(Event::End(BytesEnd::new("mxfile")))?;

        let bytes = writer.into_inner();
        Ok(String::from_utf8(bytes).expect("writer only emits UTF-8"))
    }
}

/// Writes one vertex cell with its geometry child element.
fn write_vertex<W: std::io::Write>(
    writer: &mut Writer<W>,
    id: u64,
    value: &str,
    style: &str,
    geometry: Rect,
) -> Result<(), GenerationError> {
    let id = id.to_string();
    let mut cell = BytesStart::new("mxCell");
    cell.push_attribute(("id", id.as_str()));
    cell.push_attribute(("value", value));
    cell.push_attribute(("style", style));
    cell.push_attribute(("vertex", "1"));
    cell.push_attribute(("parent", "1"));
    writer.write_event(Event::Start(cell))?;

    let x = format_coordinate(geometry.x());
    let y = format_coordinate(geometry.y());
    let width = format_coordinate(geometry.width());
    let height = format_coordinate(geometry.height());
    let mut geo = BytesStart::new("mxGeometry");
    geo.push_attribute(("x", x.as_str()));
    geo.push_attribute(("y", y.as_str()));
    geo.push_attribute(("width", width.as_str()));
    geo.push_attribute(("height", height.as_str()));
    // The target format requires exactly this attribute name.
    geo.push_attribute(("as", "geometry"));
    writer.write_event(Event::Empty(geo))?;

    writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    Ok(())
}

/// Writes one connector cell between two existing cells.
fn write_edge<W: std::io::Write>(
    writer: &mut Writer<W>,
    id: u64,
    source: u64,
    target: u64,
    style: &str,
) -> Result<(), GenerationError> {
    let id = id.to_string();
    let source = source.to_string();
    let target = target.to_string();
    let mut cell = BytesStart::new("mxCell");
    cell.push_attribute(("id", id.as_str()));
    cell.push_attribute(("value", ""));
    cell.push_attribute(("style", style));
    cell.push_attribute(("edge", "1"));
    cell.push_attribute(("parent", "1"));
    cell.push_attribute(("source", source.as_str()));
    cell.push_attribute(("target", target.as_str()));
    writer.write_event(Event::Start(cell))?;

    let mut geo = BytesStart::new("mxGeometry");
    geo.push_attribute(("relative", "1"));
    geo.push_attribute(("as", "geometry"));
    writer.write_event(Event::Empty(geo))?;

    writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    Ok(())
}

/// Formats a coordinate without a trailing `.0` for whole values, keeping
/// output stable and close to hand-written documents.
fn format_coordinate(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::geometry::Point;
    use trellis_core::topic::Annotation;

    use crate::layout;

    fn exported(mut root: Topic) -> String {
        let config = AppConfig::default();
        layout::layout(&mut root, Point::new(40.0, 40.0), &config.layout).expect("layout");
        DrawioExporter::new(&config).export(&root).expect("export")
    }

    #[test]
    fn test_envelope_and_reserved_cells() {
        let document = exported(Topic::new("solo"));

        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(document.contains("<mxfile host=\"app.diagrams.net\" version=\"21.0.0\">"));
        assert!(document.contains("<diagram name=\"Page-1\">"));
        assert!(document.contains("<mxCell id=\"0\"/>"));
        assert!(document.contains("<mxCell id=\"1\" parent=\"0\"/>"));

        // Reserved cells precede any generated content.
        let reserved = document.find("<mxCell id=\"1\"").expect("layer cell");
        let content = document.find("<mxCell id=\"2\"").expect("content cell");
        assert!(reserved < content);
    }

    #[test]
    fn test_two_children_scenario_ids() {
        let document = exported(
            Topic::new("A")
                .with_child(Topic::new("B"))
                .with_child(Topic::new("C")),
        );

        // Shapes claim 2, 3, 4 in traversal order; connectors follow.
        assert!(document.contains("<mxCell id=\"2\" value=\"A\""));
        assert!(document.contains("<mxCell id=\"3\" value=\"B\""));
        assert!(document.contains("<mxCell id=\"4\" value=\"C\""));
        assert!(document.contains("id=\"5\" value=\"\" style=\"edgeStyle=entityRelationEdgeStyle"));
        assert!(document.contains("source=\"2\" target=\"3\""));
        assert!(document.contains("source=\"2\" target=\"4\""));
    }

    #[test]
    fn test_geometry_attribute_name() {
        let document = exported(Topic::new("t"));
        assert!(document.contains("as=\"geometry\""));
    }

    #[test]
    fn test_callout_gets_note_shape_and_dashed_connector() {
        let document = exported(Topic::new("topic").with_callout(Annotation::new("note1")));

        assert!(document.contains("value=\"note1\" style=\"shape=note;"));
        assert!(document.contains("dashed=1;"));
        // Topic is 2, callout 3, dashed connector 4.
        assert!(document.contains("<mxCell id=\"4\" value=\"\""));
        assert!(document.contains("source=\"2\" target=\"3\""));
    }

    #[test]
    fn test_missing_geometry_is_an_error() {
        let config = AppConfig::default();
        let root = Topic::new("never laid out");
        let result = DrawioExporter::new(&config).export(&root);
        assert!(matches!(
            result,
            Err(GenerationError::MissingGeometry { .. })
        ));
    }

    #[test]
    fn test_titles_are_escaped() {
        let document = exported(Topic::new("a & b <c> \"d\""));
        assert!(document.contains("value=\"a &amp; b &lt;c&gt; &quot;d&quot;\""));
    }

    #[test]
    fn test_coordinates_drop_trailing_zero() {
        assert_eq!(format_coordinate(120.0), "120");
        assert_eq!(format_coordinate(70.5), "70.5");
        assert_eq!(format_coordinate(-50.0), "-50");
    }
}
