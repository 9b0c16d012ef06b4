//! Entry document inspection.
//!
//! `index.html` is the only contract between bootstrap and the page it runs in. [`EntryDocument`]
//! scans its start tags so tooling can check that the mount element exists exactly once, is
//! empty, and that the document carries no inline styling or behaviour. The same scanner reads
//! rendered markup back into start tags and text runs for the headless host.

use thiserror::Error;

/// Source of the shipped `index.html`.
pub const ENTRY_DOCUMENT_SOURCE: &str = include_str!("../index.html");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Entry document defects.
pub enum EntryError {
    /// A tag or comment is never closed.
    #[error("malformed markup near byte {0}")]
    Malformed(usize),
    /// No element carries the mount id.
    #[error("no element with id `{0}`")]
    MissingMountPoint(String),
    /// More than one element carries the mount id.
    #[error("{count} elements share mount id `{id}`")]
    DuplicateMountPoint {
        /// Mount id.
        id: String,
        /// Number of elements carrying it.
        count: usize,
    },
    /// The mount element already has content.
    #[error("mount element `{0}` is not empty")]
    MountPointNotEmpty(String),
    /// An element carries a `style` attribute.
    #[error("inline style attribute on <{0}>")]
    InlineStyle(String),
    /// A `<style>` block is embedded in the document.
    #[error("embedded <style> block")]
    StyleBlock,
    /// An element carries an `on*` event handler attribute.
    #[error("inline handler `{attribute}` on <{tag}>")]
    InlineHandler {
        /// Tag name.
        tag: String,
        /// Handler attribute name.
        attribute: String,
    },
    /// A `<script>` element has an inline body.
    #[error("inline <script> body")]
    InlineScript,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A start tag with its attributes in source order.
pub struct StartTag {
    /// Lowercased tag name.
    pub name: String,
    /// Lowercased attribute names with their unquoted values.
    pub attributes: Vec<(String, Option<String>)>,
    /// Written as `<name ... />`.
    pub self_closing: bool,
    body_start: usize,
}

impl StartTag {
    /// Value of the named attribute, if present with a value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Value of the `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Scanned entry document.
pub struct EntryDocument {
    source: String,
    tags: Vec<StartTag>,
    text: Vec<String>,
    style_blocks: usize,
    inline_scripts: usize,
}

impl EntryDocument {
    /// Scans markup into start tags.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Malformed`] for unterminated tags, comments, or raw-text elements.
    pub fn parse(source: &str) -> Result<Self, EntryError> {
        let lower = source.to_ascii_lowercase();
        let mut tags = Vec::new();
        let mut text = Vec::new();
        let mut style_blocks = 0;
        let mut inline_scripts = 0;
        let mut pos = 0;

        while let Some(found) = source[pos..].find('<') {
            let start = pos + found;
            push_text(&mut text, &source[pos..start]);
            let rest = &source[start..];

            if rest.starts_with("<!--") {
                let end = rest.find("-->").ok_or(EntryError::Malformed(start))?;
                pos = start + end + 3;
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("</") || rest.starts_with("<?") {
                let end = rest.find('>').ok_or(EntryError::Malformed(start))?;
                pos = start + end + 1;
                continue;
            }

            let (tag, end) = scan_start_tag(source, start)?;
            pos = end;

            if tag.name == "script" || tag.name == "style" {
                let close = format!("</{}", tag.name);
                let body_len = lower[end..]
                    .find(&close)
                    .ok_or(EntryError::Malformed(start))?;
                let body = &source[end..end + body_len];
                if tag.name == "style" {
                    style_blocks += 1;
                } else if !body.trim().is_empty() {
                    inline_scripts += 1;
                }
                pos = end + body_len;
            }
            tags.push(tag);
        }
        push_text(&mut text, &source[pos..]);

        Ok(Self {
            source: source.to_string(),
            tags,
            text,
            style_blocks,
            inline_scripts,
        })
    }

    /// Start tags in document order.
    pub fn tags(&self) -> &[StartTag] {
        &self.tags
    }

    /// Trimmed, entity-decoded text runs between tags, in document order.
    ///
    /// Comments and `script`/`style` bodies are not text.
    pub fn text(&self) -> &[String] {
        &self.text
    }

    /// Number of start tags named `name`.
    pub fn count_elements(&self, name: &str) -> usize {
        self.tags.iter().filter(|tag| tag.name == name).count()
    }

    /// Elements whose id equals `id`.
    pub fn elements_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a StartTag> + 'a {
        self.tags.iter().filter(move |tag| tag.id() == Some(id))
    }

    /// Checks the structural contract bootstrap relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`EntryError`] found: mount element problems first, then inline
    /// styling, then inline behaviour.
    pub fn validate(&self, mount_id: &str) -> Result<(), EntryError> {
        let mounts: Vec<&StartTag> = self.elements_with_id(mount_id).collect();
        match mounts.as_slice() {
            [] => return Err(EntryError::MissingMountPoint(mount_id.to_string())),
            [mount] => {
                if !self.is_empty_element(mount) {
                    return Err(EntryError::MountPointNotEmpty(mount_id.to_string()));
                }
            }
            many => {
                return Err(EntryError::DuplicateMountPoint {
                    id: mount_id.to_string(),
                    count: many.len(),
                })
            }
        }

        if self.style_blocks > 0 {
            return Err(EntryError::StyleBlock);
        }
        for tag in &self.tags {
            if tag.attributes.iter().any(|(name, _)| name == "style") {
                return Err(EntryError::InlineStyle(tag.name.clone()));
            }
            if let Some((attribute, _)) = tag
                .attributes
                .iter()
                .find(|(name, _)| name.starts_with("on") && name.len() > 2)
            {
                return Err(EntryError::InlineHandler {
                    tag: tag.name.clone(),
                    attribute: attribute.clone(),
                });
            }
        }
        if self.inline_scripts > 0 {
            return Err(EntryError::InlineScript);
        }
        Ok(())
    }

    fn is_empty_element(&self, tag: &StartTag) -> bool {
        if tag.self_closing {
            return true;
        }
        let close = format!("</{}", tag.name);
        self.source[tag.body_start..]
            .trim_start()
            .to_ascii_lowercase()
            .starts_with(&close)
    }
}

// Scans `<name attr="v" ...>` starting at `start`; returns the tag and the byte after `>`.
fn scan_start_tag(source: &str, start: usize) -> Result<(StartTag, usize), EntryError> {
    let bytes = source.as_bytes();
    let mut pos = start + 1;

    let name_start = pos;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'-') {
        pos += 1;
    }
    if pos == name_start {
        return Err(EntryError::Malformed(start));
    }
    let name = source[name_start..pos].to_ascii_lowercase();
    let mut attributes = Vec::new();
    let mut self_closing = false;

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos) {
            None => return Err(EntryError::Malformed(start)),
            Some(b'>') => {
                pos += 1;
                break;
            }
            Some(b'/') if bytes.get(pos + 1) == Some(&b'>') => {
                pos += 2;
                self_closing = true;
                break;
            }
            Some(_) => {}
        }

        let attr_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        if pos == attr_start {
            // Stray `/` inside the tag.
            pos += 1;
            continue;
        }
        let attr_name = source[attr_start..pos].to_ascii_lowercase();

        let mut value = None;
        if bytes.get(pos) == Some(&b'=') {
            pos += 1;
            match bytes.get(pos) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    let value_start = pos + 1;
                    let len = source[value_start..]
                        .find(quote as char)
                        .ok_or(EntryError::Malformed(start))?;
                    value = Some(source[value_start..value_start + len].to_string());
                    pos = value_start + len + 1;
                }
                Some(_) => {
                    let value_start = pos;
                    while pos < bytes.len()
                        && !bytes[pos].is_ascii_whitespace()
                        && bytes[pos] != b'>'
                    {
                        pos += 1;
                    }
                    value = Some(source[value_start..pos].to_string());
                }
                None => return Err(EntryError::Malformed(start)),
            }
        }
        attributes.push((attr_name, value));
    }

    Ok((
        StartTag {
            name,
            attributes,
            self_closing,
            body_start: pos,
        },
        pos,
    ))
}

fn push_text(text: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        text.push(decode_entities(trimmed));
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn validate(html: &str) -> Result<(), EntryError> {
        EntryDocument::parse(html).expect("parse").validate("root")
    }

    #[test]
    fn scans_attributes_in_all_quoting_styles() {
        let doc = EntryDocument::parse(r#"<div id="root" data-a='x' data-b=y hidden></div>"#)
            .expect("parse");
        let tag = &doc.tags()[0];
        assert_eq!(tag.name, "div");
        assert_eq!(tag.id(), Some("root"));
        assert_eq!(tag.attribute("data-a"), Some("x"));
        assert_eq!(tag.attribute("data-b"), Some("y"));
        assert_eq!(tag.attribute("hidden"), None);
        assert!(tag.attributes.iter().any(|(name, _)| name == "hidden"));
    }

    #[test]
    fn comments_doctype_and_end_tags_are_skipped() {
        let doc = EntryDocument::parse(
            "<!DOCTYPE html><!-- <div id=\"root\"></div> --><body><div id=\"root\"></div></body>",
        )
        .expect("parse");
        let names: Vec<&str> = doc.tags().iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["body", "div"]);
        assert_eq!(doc.elements_with_id("root").count(), 1);
    }

    #[test]
    fn single_empty_mount_point_is_valid() {
        assert_eq!(validate("<body>\n  <div id=\"root\">  </div>\n</body>"), Ok(()));
    }

    #[test]
    fn missing_duplicate_and_filled_mount_points_are_rejected() {
        assert_eq!(
            validate("<body></body>"),
            Err(EntryError::MissingMountPoint("root".into()))
        );
        assert_eq!(
            validate("<div id=root></div><span id=\"root\"></span>"),
            Err(EntryError::DuplicateMountPoint {
                id: "root".into(),
                count: 2
            })
        );
        assert_eq!(
            validate("<div id=\"root\"><p>loading</p></div>"),
            Err(EntryError::MountPointNotEmpty("root".into()))
        );
    }

    #[test]
    fn self_closing_mount_point_counts_as_empty() {
        assert_eq!(validate("<body><div id=\"root\"/></body>"), Ok(()));
        assert_eq!(validate("<body><div id=\"root\" /></body>"), Ok(()));
    }

    #[test]
    fn text_runs_skip_tags_comments_and_raw_bodies() {
        let doc = EntryDocument::parse(
            "<main><!-- x --><h1 class=\"a\">Fish &amp; Chips</h1>\n  <p>It&#x27;s &lt;ok&gt;</p>\
             <script>ignored()</script></main>",
        )
        .expect("parse");
        assert_eq!(
            doc.text(),
            &["Fish & Chips".to_string(), "It's <ok>".to_string()]
        );
        assert_eq!(doc.count_elements("h1"), 1);
        assert_eq!(doc.count_elements("p"), 1);
    }

    #[test]
    fn inline_styling_and_behaviour_are_rejected() {
        assert_eq!(
            validate("<div id=\"root\" style=\"color: red\"></div>"),
            Err(EntryError::InlineStyle("div".into()))
        );
        assert_eq!(
            validate("<style>body{}</style><div id=\"root\"></div>"),
            Err(EntryError::StyleBlock)
        );
        assert_eq!(
            validate("<body onload=\"init()\"><div id=\"root\"></div></body>"),
            Err(EntryError::InlineHandler {
                tag: "body".into(),
                attribute: "onload".into()
            })
        );
        assert_eq!(
            validate("<div id=\"root\"></div><script>boot()</script>"),
            Err(EntryError::InlineScript)
        );
    }

    #[test]
    fn external_script_without_body_is_allowed() {
        assert_eq!(
            validate("<div id=\"root\"></div><script src=\"app.js\"></script>"),
            Ok(())
        );
    }

    #[test]
    fn unterminated_markup_is_malformed() {
        assert_eq!(
            EntryDocument::parse("<div id=\"root"),
            Err(EntryError::Malformed(0))
        );
        assert!(matches!(
            EntryDocument::parse("<p></p><!-- open"),
            Err(EntryError::Malformed(_))
        ));
    }
}
