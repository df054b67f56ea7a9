use serde::Serialize;

use crate::hashtag::HASHTAG_REGEX;

/// A piece of post text, either plain or a hashtag to render as a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment<'a> {
    Text(&'a str),
    Hashtag {
        /// The hashtag as written, including the leading #
        marked: &'a str,
        /// The hashtag as written, without the #; not normalized
        tag: &'a str,
    },
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(text) => text,
            Segment::Hashtag { marked, .. } => marked,
        }
    }
}

/// Split text into plain and hashtag segments using the extraction grammar.
///
/// Joining the segments reproduces the input exactly. Hashtags keep their
/// original spelling so clicking one can filter by what the reader saw.
pub fn highlight_hashtags(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for cap in HASHTAG_REGEX.captures_iter(text) {
        let (Some(whole), Some(tag)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(&text[last..whole.start()]));
        }
        segments.push(Segment::Hashtag {
            marked: whole.as_str(),
            tag: tag.as_str(),
        });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}
