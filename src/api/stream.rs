//! Synthetic NDJSON streaming emulation
//!
//! The backends only return a complete response, but the wire protocol's
//! clients expect incremental delivery. The already-computed result string
//! is split into fixed-width slices and replayed as newline-delimited JSON
//! chunks, followed by exactly one terminal chunk. This is a pure
//! post-processing transform over the finished text; no backend I/O
//! happens while the stream is being written.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

use crate::api::models::ChatChunk;

/// Width of one synthetic slice, in characters
///
/// Slicing is purely character-count based; chunk boundaries carry no
/// semantic meaning.
pub const STREAM_CHUNK_CHARS: usize = 12;

/// Split text into fixed-width character slices
///
/// Empty input yields no slices. `width` must be non-zero.
pub fn split_chunks(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|slice| slice.iter().collect())
        .collect()
}

/// Build the chunked NDJSON response for a streamed chat result
pub fn ndjson_chat_response(model: &str, content: &str) -> Response {
    let mut lines: Vec<String> = split_chunks(content, STREAM_CHUNK_CHARS)
        .into_iter()
        .map(|slice| chunk_line(&ChatChunk::fragment(model, slice)))
        .collect();
    lines.push(chunk_line(&ChatChunk::terminal(model)));

    let stream = futures::stream::iter(lines.into_iter().map(Ok::<_, Infallible>));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn chunk_line(chunk: &ChatChunk) -> String {
    let mut line = serde_json::to_string(chunk).unwrap_or_default();
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenated_slices_reconstruct_input() {
        for text in [
            "",
            "short",
            "exactly-12ch",
            "a response long enough to need several slices of twelve characters each",
        ] {
            let joined: String = split_chunks(text, STREAM_CHUNK_CHARS).concat();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn slices_have_fixed_width_except_last() {
        let chunks = split_chunks("abcdefghijklmnopqrstuvwxyz", 12);
        assert_eq!(chunks, vec!["abcdefghijkl", "mnopqrstuvwx", "yz"]);
    }

    #[test]
    fn empty_text_yields_no_slices() {
        assert!(split_chunks("", 12).is_empty());
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        // Four 3-byte characters fit one slice of width 4
        let chunks = split_chunks("日本語だよ", 4);
        assert_eq!(chunks, vec!["日本語だ", "よ"]);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let chunks = split_chunks("abcdefghijklmnopqrstuvwx", 12);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }
}
