//! Structured (JSON) content decoding.
//!
//! The structured encoding is an array of sheets; only the first sheet's
//! root topic is converted. A topic's `children` object separates attached
//! subtopics from callout annotations. Unknown fields (ids, style classes,
//! markers) are ignored.

use serde::Deserialize;

use trellis_core::topic::{Annotation, Topic};

use crate::error::ParseError;

#[derive(Debug, Deserialize)]
struct Sheet {
    #[serde(rename = "rootTopic")]
    root_topic: Option<JsonTopic>,
}

#[derive(Debug, Deserialize)]
struct JsonTopic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    children: JsonChildren,
}

#[derive(Debug, Default, Deserialize)]
struct JsonChildren {
    #[serde(default)]
    attached: Vec<JsonTopic>,
    #[serde(default)]
    callout: Vec<JsonTopic>,
}

/// Decodes a structured content entry into a topic tree.
pub(crate) fn decode(bytes: &[u8]) -> Result<Topic, ParseError> {
    let sheets: Vec<Sheet> = serde_json::from_slice(bytes)?;
    let root = sheets
        .into_iter()
        .next()
        .and_then(|sheet| sheet.root_topic)
        .ok_or(ParseError::MissingRoot)?;
    Ok(normalize(root))
}

fn normalize(source: JsonTopic) -> Topic {
    let mut topic = Topic::new(source.title);
    for child in source.children.attached {
        topic.add_child(normalize(child));
    }
    // Callouts carry text only; any nesting below a callout is flattened away.
    for callout in source.children.callout {
        topic.add_callout(Annotation::new(callout.title));
    }
    topic
}
