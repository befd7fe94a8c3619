//! Source kinds and the parsing of user-supplied source names.

use std::fmt;

/// One external provider of text about an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Page summary from Wikipedia.
    Wikipedia,
    /// Short entity description from Wikidata.
    Wikidata,
    /// Snippet from the entity's own website.
    Homepage,
    /// Recent headlines from a news RSS feed.
    News,
    /// Abstract or first related topic from an instant-answer API.
    InstantAnswer,
    /// Abstract literal from a SPARQL endpoint.
    Abstract,
    /// Fresh snippets harvested from general web search.
    Search,
}

impl SourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [SourceKind; 7] = [
        SourceKind::Wikipedia,
        SourceKind::Wikidata,
        SourceKind::Homepage,
        SourceKind::News,
        SourceKind::InstantAnswer,
        SourceKind::Abstract,
        SourceKind::Search,
    ];

    /// Canonical name, as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wikipedia => "wikipedia",
            Self::Wikidata => "wikidata",
            Self::Homepage => "homepage",
            Self::News => "news",
            Self::InstantAnswer => "instant-answer",
            Self::Abstract => "abstract",
            Self::Search => "search",
        }
    }

    /// Look up a kind by canonical name or alias, ignoring case and
    /// surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "wikipedia" => Some(Self::Wikipedia),
            "wikidata" => Some(Self::Wikidata),
            "homepage" => Some(Self::Homepage),
            "news" => Some(Self::News),
            "instant-answer" | "instant_answer" | "duckduckgo" | "ddg" => {
                Some(Self::InstantAnswer)
            }
            "abstract" | "dbpedia" => Some(Self::Abstract),
            "search" => Some(Self::Search),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured source entry: either a kind this crate knows or a name it
/// will skip with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A recognised source.
    Known(SourceKind),
    /// An unrecognised name, kept as written for the warning.
    Unknown(String),
}

impl SourceSpec {
    /// Classify a configured name, accepting aliases in any case.
    pub fn parse(name: &str) -> Self {
        match SourceKind::from_name(name) {
            Some(kind) => Self::Known(kind),
            None => Self::Unknown(name.to_owned()),
        }
    }
}
