//! Line-delimited framing for the web client: one `0:"<escaped>"\n`
//! record per fragment, emitted as soon as the fragment arrives. JSON
//! string escaping keeps embedded quotes and newlines from corrupting
//! the framing, and `0:""` stays distinguishable from end-of-stream.

use std::convert::Infallible;

use futures::{Stream, StreamExt};

use crate::pipeline::TurnStream;

/// Tag for text parts in the stream protocol the front end consumes.
const TEXT_PART_TAG: &str = "0";

pub fn encode_fragment(fragment: &str) -> String {
    // Serializing a string cannot realistically fail; the fallback
    // keeps the framing intact regardless.
    let literal = serde_json::to_string(fragment).unwrap_or_else(|_| String::from("\"\""));
    format!("{TEXT_PART_TAG}:{literal}\n")
}

pub fn encode_stream(fragments: TurnStream) -> impl Stream<Item = Result<String, Infallible>> + Send {
    fragments.map(|fragment| Ok(encode_fragment(&fragment)))
}
