//! Front-matter extraction for task documents.

use super::{ParseDocumentError, TaskFrontmatter};

/// A task document split into front-matter and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    frontmatter: TaskFrontmatter,
    body: String,
}

impl ParsedDocument {
    /// Returns the parsed front-matter.
    #[must_use]
    pub const fn frontmatter(&self) -> &TaskFrontmatter {
        &self.frontmatter
    }

    /// Consumes the document, returning the parsed front-matter.
    #[must_use]
    pub fn into_frontmatter(self) -> TaskFrontmatter {
        self.frontmatter
    }

    /// Returns the document body following the front-matter block.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Parses a task document, extracting its `---`-delimited front-matter.
///
/// Documents without a front-matter block (including blocks that are never
/// terminated) yield empty front-matter rather than an error; downstream
/// rules fail closed on the missing keys. A block whose YAML is a valid
/// non-mapping value likewise yields empty front-matter.
///
/// # Errors
///
/// Returns [`ParseDocumentError`] only when the block contains malformed
/// YAML.
pub fn parse_document(content: &str) -> Result<ParsedDocument, ParseDocumentError> {
    let Some((block, body)) = split_frontmatter(content) else {
        return Ok(ParsedDocument {
            frontmatter: TaskFrontmatter::default(),
            body: content.to_owned(),
        });
    };

    let value: serde_yaml_bw::Value = serde_yaml_bw::from_str(block)?;
    // A syntactically valid block of the wrong shape degrades to an empty
    // mapping; only malformed YAML is reported to the caller.
    let frontmatter = serde_yaml_bw::from_value::<TaskFrontmatter>(value).unwrap_or_default();

    Ok(ParsedDocument {
        frontmatter,
        body: body.to_owned(),
    })
}

/// Splits `content` into its front-matter block and body.
///
/// The block must open with `---` on the first line and close with a `---`
/// line; the closing delimiter may sit at end of input.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---\n")?;
    if let Some((block, body)) = rest.split_once("\n---\n") {
        return Some((block, body));
    }
    rest.strip_suffix("\n---").map(|block| (block, ""))
}
