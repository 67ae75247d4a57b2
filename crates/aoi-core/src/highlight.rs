//! HTML syntax highlighting for AOI snippets.
//!
//! Colors come from a fixed table keyed by token kind and [`Theme`]. Token
//! text is escaped before it is wrapped in a styled `<span>`, so the output
//! is safe to embed in a page.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lexer::{Token, TokenKind, Vocabulary, tokenize};

/// Display theme for highlighted code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Returned when a theme name is neither `dark` nor `light`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?} (expected \"dark\" or \"light\")")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Color for a token kind under the given theme, as a CSS hex string.
pub fn color_for(kind: TokenKind, theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => match kind {
            TokenKind::Keyword => "#C586C0",
            TokenKind::BuiltinFunction => "#DCDCAA",
            TokenKind::String => "#CE9178",
            TokenKind::Comment => "#6A9955",
            TokenKind::Number => "#B5CEA8",
            TokenKind::Operator => "#D4D4D4",
            TokenKind::Identifier => "#9CDCFE",
            TokenKind::Text => "#D4D4D4",
        },
        Theme::Light => match kind {
            TokenKind::Keyword => "#AF00DB",
            TokenKind::BuiltinFunction => "#795E26",
            TokenKind::String => "#A31515",
            TokenKind::Comment => "#008000",
            TokenKind::Number => "#098658",
            TokenKind::Operator => "#000000",
            TokenKind::Identifier => "#001080",
            TokenKind::Text => "#000000",
        },
    }
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Render already-tokenized source as a run of colored `<span>` elements.
pub fn render_tokens(tokens: &[Token], theme: Theme) -> String {
    let mut out = String::new();
    for token in tokens {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "<span style=\"color: {}\">{}</span>",
            color_for(token.kind, theme),
            escape_html(&token.value)
        );
    }
    out
}

/// Tokenize and render `source` in one step.
pub fn render_highlighted(source: &str, vocabulary: &Vocabulary, theme: Theme) -> String {
    render_tokens(&tokenize(source, vocabulary), theme)
}
