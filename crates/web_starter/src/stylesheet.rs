//! Read-only view of the global stylesheet.
//!
//! The browser loads `style/main.css` through the trunk pipeline. This module embeds the same
//! file so tooling and the headless host can answer which declarations apply document-wide.
//! The parser understands flat rule blocks with comments and quoted values; at-rule blocks are
//! skipped.

use thiserror::Error;

/// Source of `style/main.css`.
pub const GLOBAL_STYLESHEET_SOURCE: &str = include_str!("../style/main.css");

const DOCUMENT_SELECTORS: [&str; 4] = [":root", "html", "body", "*"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Stylesheet parse failures.
pub enum StylesheetError {
    /// A `/*` comment is never closed.
    #[error("unterminated comment at byte {0}")]
    UnterminatedComment(usize),
    /// A `{` block is never closed, or a `}` appears without an opening brace.
    #[error("unbalanced braces near byte {0}")]
    Unbalanced(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `selector, ... { property: value; ... }` block.
pub struct CssRule {
    /// Comma-separated selectors, trimmed.
    pub selectors: Vec<String>,
    /// Declarations in source order.
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    /// Whether any selector of this rule matches the document root or every element.
    pub fn is_document_wide(&self) -> bool {
        self.selectors
            .iter()
            .any(|selector| DOCUMENT_SELECTORS.contains(&selector.as_str()))
    }

    /// Last value declared for `property` in this rule.
    pub fn declaration(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parsed global stylesheet.
pub struct GlobalStylesheet {
    rules: Vec<CssRule>,
}

impl GlobalStylesheet {
    /// Parses the embedded `style/main.css`.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError`] if the shipped stylesheet is malformed.
    pub fn embedded() -> Result<Self, StylesheetError> {
        Self::parse(GLOBAL_STYLESHEET_SOURCE)
    }

    /// Parses stylesheet source text.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError`] for unterminated comments or unbalanced braces.
    pub fn parse(source: &str) -> Result<Self, StylesheetError> {
        let source = strip_comments(source)?;
        let mut rules = Vec::new();
        let mut rest = source.as_str();
        let mut offset = 0;

        loop {
            let Some(open) = find_unquoted(rest, '{') else {
                if let Some(close) = find_unquoted(rest, '}') {
                    return Err(StylesheetError::Unbalanced(offset + close));
                }
                break;
            };
            let prelude = rest[..open].trim();
            if let Some(close) = find_unquoted(&rest[..open], '}') {
                return Err(StylesheetError::Unbalanced(offset + close));
            }
            let body_start = open + 1;
            let body_len = block_len(&rest[body_start..])
                .ok_or(StylesheetError::Unbalanced(offset + open))?;
            let body = &rest[body_start..body_start + body_len];

            if !prelude.starts_with('@') {
                rules.push(CssRule {
                    selectors: prelude
                        .split(',')
                        .map(|selector| selector.trim().to_string())
                        .filter(|selector| !selector.is_empty())
                        .collect(),
                    declarations: parse_declarations(body),
                });
            }

            let consumed = body_start + body_len + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }

        Ok(Self { rules })
    }

    /// Rules in source order.
    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Value of `property` declared by document-wide rules; later rules win.
    pub fn document_declaration(&self, property: &str) -> Option<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.is_document_wide())
            .filter_map(|rule| rule.declaration(property))
            .last()
    }

    /// Base font family applied to the whole document.
    pub fn document_font_family(&self) -> Option<&str> {
        self.document_declaration("font-family")
    }

    /// Rules that declare `property` without applying document-wide.
    pub fn scoped_rules_declaring<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a CssRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| !rule.is_document_wide() && rule.declaration(property).is_some())
    }
}

fn strip_comments(source: &str) -> Result<String, StylesheetError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    let mut offset = 0;
    while let Some(start) = comment_start(rest) {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("*/")
            .ok_or(StylesheetError::UnterminatedComment(offset + start))?;
        let consumed = start + 2 + end + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

fn comment_start(source: &str) -> Option<usize> {
    unquoted_chars(source)
        .find(|&(idx, ch)| ch == '/' && source[idx + 1..].starts_with('*'))
        .map(|(idx, _)| idx)
}

// Characters outside `"..."` and `'...'` strings, with their byte offsets.
fn unquoted_chars(source: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    source.char_indices().filter(move |&(_, ch)| {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            false
        } else if ch == '"' || ch == '\'' {
            quote = Some(ch);
            false
        } else {
            true
        }
    })
}

fn find_unquoted(source: &str, target: char) -> Option<usize> {
    unquoted_chars(source)
        .find(|&(_, ch)| ch == target)
        .map(|(idx, _)| idx)
}

// Length of a block body up to (not including) its matching `}`.
fn block_len(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in unquoted_chars(body) {
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return Some(idx),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn parse_declarations(body: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut start = 0;
    for (idx, _) in unquoted_chars(body).filter(|&(_, ch)| ch == ';') {
        declarations.push(&body[start..idx]);
        start = idx + 1;
    }
    declarations.push(&body[start..]);

    declarations
        .into_iter()
        .filter_map(|declaration| {
            let colon = find_unquoted(declaration, ':')?;
            let name = declaration[..colon].trim();
            let value = declaration[colon + 1..].trim();
            (!name.is_empty() && !value.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect()
}
