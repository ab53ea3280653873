//! Compiled-in model registry and alias resolution
//!
//! The registry is the only process-wide state: an immutable table mapping
//! each public model alias to the provider kind serving it and the
//! provider's native model id. It is built once at startup and never
//! mutated afterwards.

use std::fmt;

/// Category of backend capability a model is served by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Embedding,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Embedding => "embedding",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry row: the provider serving an alias and its native model id
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub provider: ProviderKind,
    pub backend_model: &'static str,
}

/// A successfully resolved alias (version suffix already stripped)
#[derive(Debug, Clone, Copy)]
pub struct ResolvedModel {
    pub alias: &'static str,
    pub provider: ProviderKind,
    pub backend_model: &'static str,
}

/// Immutable alias table, kept in declaration order for enumeration
pub struct ModelRegistry {
    entries: Vec<(&'static str, RegistryEntry)>,
}

fn entry(provider: ProviderKind, backend_model: &'static str) -> RegistryEntry {
    RegistryEntry {
        provider,
        backend_model,
    }
}

impl ModelRegistry {
    /// The compiled-in model table
    pub fn builtin() -> Self {
        use ProviderKind::{Anthropic, Embedding, OpenAi};
        Self {
            entries: vec![
                // Claude models
                ("claude-sonnet", entry(Anthropic, "claude-sonnet-4-5-20250929")),
                ("claude-opus", entry(Anthropic, "claude-opus-4-5-20251101")),
                ("claude-haiku", entry(Anthropic, "claude-haiku-4-5-20251001")),
                // Embedding model (required by the note app for AI search)
                ("nomic-embed-text", entry(Embedding, "nomic-embed-text")),
                // OpenAI models
                ("gpt-5.3-codex", entry(OpenAi, "gpt-5.3-codex")),
                ("gpt-5.3-codex-spark", entry(OpenAi, "gpt-5.3-codex-spark")),
                ("gpt-5.2-codex", entry(OpenAi, "gpt-5.2-codex")),
                ("gpt-5.2", entry(OpenAi, "gpt-5.2")),
                ("gpt-5.1-codex-max", entry(OpenAi, "gpt-5.1-codex-max")),
                ("gpt-5.1-codex", entry(OpenAi, "gpt-5.1-codex")),
                ("gpt-5.1", entry(OpenAi, "gpt-5.1")),
                ("gpt-5-codex", entry(OpenAi, "gpt-5-codex")),
                ("gpt-5-codex-mini", entry(OpenAi, "gpt-5-codex-mini")),
                ("gpt-5", entry(OpenAi, "gpt-5")),
                ("o3", entry(OpenAi, "o3")),
                ("o4-mini", entry(OpenAi, "o4-mini")),
                ("gpt-4.1", entry(OpenAi, "gpt-4.1")),
                ("gpt-4o", entry(OpenAi, "gpt-4o")),
                ("gpt-4o-mini", entry(OpenAi, "gpt-4o-mini")),
            ],
        }
    }

    /// Resolve a raw client-sent model name
    ///
    /// Strips exactly one trailing `:latest` tag, then performs an exact,
    /// case-sensitive lookup. No partial or fuzzy matching.
    pub fn resolve(&self, raw: &str) -> Option<ResolvedModel> {
        let name = raw.strip_suffix(":latest").unwrap_or(raw);
        self.entries
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(alias, entry)| ResolvedModel {
                alias,
                provider: entry.provider,
                backend_model: entry.backend_model,
            })
    }

    /// Enumerate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RegistryEntry)> + '_ {
        self.entries.iter().map(|(alias, entry)| (*alias, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Comma-separated alias listing, used in unknown-model error payloads
    pub fn alias_list(&self) -> String {
        self.entries
            .iter()
            .map(|(alias, _)| *alias)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_strips_latest_tag() {
        let registry = ModelRegistry::builtin();
        for (alias, _) in registry.iter() {
            let tagged = format!("{alias}:latest");
            let direct = registry.resolve(alias).unwrap();
            let via_tag = registry.resolve(&tagged).unwrap();
            assert_eq!(direct.alias, via_tag.alias);
            assert_eq!(direct.provider, via_tag.provider);
            assert_eq!(direct.backend_model, via_tag.backend_model);
        }
    }

    #[test]
    fn resolve_unknown_is_none() {
        let registry = ModelRegistry::builtin();
        assert!(registry.resolve("foo").is_none());
        assert!(registry.resolve("").is_none());
        assert!(registry.resolve("foo:latest").is_none());
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let registry = ModelRegistry::builtin();
        assert!(registry.resolve("claude-sonnet").is_some());
        assert!(registry.resolve("Claude-Sonnet").is_none());
        assert!(registry.resolve("CLAUDE-SONNET:latest").is_none());
    }

    #[test]
    fn resolve_strips_only_trailing_tag() {
        let registry = ModelRegistry::builtin();
        // The tag must be the literal trailing suffix
        assert!(registry.resolve("claude-sonnet:v2").is_none());
        assert!(registry.resolve(":latestclaude-sonnet").is_none());
    }

    #[test]
    fn enumeration_keeps_declaration_order() {
        let registry = ModelRegistry::builtin();
        let aliases: Vec<_> = registry.iter().map(|(alias, _)| alias).collect();
        assert_eq!(aliases.first(), Some(&"claude-sonnet"));
        assert_eq!(aliases.get(3), Some(&"nomic-embed-text"));
        assert_eq!(aliases.last(), Some(&"gpt-4o-mini"));
        assert_eq!(aliases.len(), registry.len());
    }

    #[test]
    fn alias_list_is_comma_separated() {
        let registry = ModelRegistry::builtin();
        let list = registry.alias_list();
        assert!(list.starts_with("claude-sonnet, claude-opus"));
        assert!(list.contains("nomic-embed-text"));
        assert!(!list.contains(":latest"));
    }

    #[test]
    fn provider_kinds_cover_all_variants() {
        let registry = ModelRegistry::builtin();
        let mut kinds: Vec<&str> = registry
            .iter()
            .map(|(_, entry)| entry.provider.as_str())
            .collect();
        kinds.dedup();
        assert_eq!(kinds, vec!["anthropic", "embedding", "openai"]);
    }
}
