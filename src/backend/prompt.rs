//! Conversation-to-prompt rendering, one renderer per provider convention
//!
//! Each backend takes a single prompt string rather than a structured
//! conversation, so the ordered message list is flattened here. Rendering
//! is pure and independent of any transport.

use crate::backend::ChatMessage;

/// Render a conversation for the Anthropic-style backend
///
/// A `system` message becomes a prefix joined with a blank line; the
/// remaining messages render as `User:` / `Assistant:` lines. When several
/// system messages occur, the last one wins; an empty one clears the
/// prefix. Unknown roles are skipped.
pub fn render_anthropic(messages: &[ChatMessage]) -> String {
    let mut system = String::new();
    let mut parts: Vec<String> = Vec::new();
    for message in messages {
        match message.role.as_str() {
            "system" => system = message.content.clone(),
            "user" => parts.push(format!("User: {}", message.content)),
            "assistant" => parts.push(format!("Assistant: {}", message.content)),
            _ => {}
        }
    }
    let dialogue = parts.join("\n");
    if system.is_empty() {
        dialogue
    } else {
        format!("{system}\n\n{dialogue}")
    }
}

/// Render a conversation for the OpenAI-style backend
///
/// Every message, including `system`, becomes a `Role: content` line.
/// Unknown roles are skipped.
pub fn render_openai(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter_map(|message| match message.role.as_str() {
            "system" => Some(format!("System: {}", message.content)),
            "user" => Some(format!("User: {}", message.content)),
            "assistant" => Some(format!("Assistant: {}", message.content)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
