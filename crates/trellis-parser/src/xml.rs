//! Markup (XML) content decoding.
//!
//! The markup encoding nests topics as
//! `xmap-content > sheet > topic > children > topics > topic ...`, where each
//! `topics` container carries a `type` attribute separating `attached`
//! subtopics from `callout` annotations. Only the first sheet's topic tree is
//! converted, matching the structured encoding.
//!
//! Decoding walks the event stream with an explicit frame stack instead of
//! building a DOM; title text is accumulated exactly as written, with entity
//! references resolved and whitespace preserved.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use trellis_core::topic::{Annotation, Topic};

use crate::error::ParseError;

/// How a completed topic attaches to the frame above it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ChildKind {
    Attached,
    Callout,
}

/// A topic whose closing tag has not been seen yet.
struct Frame {
    topic: Topic,
    kind: ChildKind,
}

/// Decodes a markup content entry into a topic tree.
pub(crate) fn decode(bytes: &[u8]) -> Result<Topic, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut root: Option<Topic> = None;
    let mut stack: Vec<Frame> = Vec::new();
    // Nesting of `topics` containers; the innermost entry decides how the
    // next completed topic attaches.
    let mut container_kinds: Vec<ChildKind> = Vec::new();
    let mut in_title = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"topic" => {
                    let kind = container_kinds.last().copied().unwrap_or(ChildKind::Attached);
                    stack.push(Frame {
                        topic: Topic::new(""),
                        kind,
                    });
                }
                b"topics" => {
                    container_kinds.push(container_kind(&e)?);
                }
                b"title" if !stack.is_empty() => {
                    in_title = true;
                }
                _ => {}
            },

            Event::Empty(e) => match e.local_name().as_ref() {
                b"topic" => {
                    let kind = container_kinds.last().copied().unwrap_or(ChildKind::Attached);
                    attach(Topic::new(""), kind, &mut stack, &mut root);
                }
                _ => {}
            },

            Event::Text(e) => {
                if in_title {
                    let text = reader.decoder().decode(&e)?;
                    push_title(&mut stack, &text);
                }
            }

            Event::GeneralRef(e) => {
                if in_title {
                    let entity = reader.decoder().decode(&e)?;
                    push_title(&mut stack, &resolve_entity(&entity));
                }
            }

            Event::CData(e) => {
                if in_title {
                    let text = reader.decoder().decode(&e)?;
                    push_title(&mut stack, &text);
                }
            }

            Event::End(e) => match e.local_name().as_ref() {
                b"topic" => {
                    if let Some(frame) = stack.pop() {
                        attach(frame.topic, frame.kind, &mut stack, &mut root);
                    }
                }
                b"topics" => {
                    container_kinds.pop();
                }
                b"title" => {
                    in_title = false;
                }
                _ => {}
            },

            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or(ParseError::MissingRoot)
}

/// Reads the `type` attribute of a `topics` container; unmarked containers
/// hold attached subtopics.
fn container_kind(e: &BytesStart<'_>) -> Result<ChildKind, ParseError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"type" {
            let value = attr.unescape_value()?;
            if value.as_ref() == "callout" {
                return Ok(ChildKind::Callout);
            }
        }
    }
    Ok(ChildKind::Attached)
}

// Titles may arrive in several text/entity events; append each piece.
fn push_title(stack: &mut [Frame], text: &str) {
    if let Some(frame) = stack.last_mut() {
        let mut title = frame.topic.title().to_string();
        title.push_str(text);
        frame.topic.set_title(title);
    }
}

/// Attaches a completed topic to its parent frame, or records it as the
/// document root. Later sheets' roots are ignored; only the first counts.
fn attach(topic: Topic, kind: ChildKind, stack: &mut Vec<Frame>, root: &mut Option<Topic>) {
    match stack.last_mut() {
        Some(parent) => match kind {
            ChildKind::Attached => parent.topic.add_child(topic),
            // Callouts carry text only, matching the structured encoding.
            ChildKind::Callout => parent.topic.add_callout(Annotation::new(topic.title())),
        },
        None => {
            if root.is_none() {
                *root = Some(topic);
            }
        }
    }
}

/// Resolves a general entity reference to its character value.
fn resolve_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
