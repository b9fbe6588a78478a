//! Template parser.
//!
//! Scans a template source string with a mutable current delimiter pair and
//! builds an ordered tree of [`Node`]s, validating section nesting. The tree
//! is consumed by the renderer; lambda and partial expansion re-enters the
//! parser through [`parse_with_delimiters`].

use whisker_rs_core::error::{WhiskerError, WhiskerResult};

/// The default opening delimiter.
pub const DEFAULT_DELIMITER_BEGIN: &str = "{{";
/// The default closing delimiter.
pub const DEFAULT_DELIMITER_END: &str = "}}";

// End delimiter of the `{{{name}}}` unescaped-variable shorthand.
const UNESCAPED_DELIMITER_END: &str = "}}}";

/// A begin/end delimiter pair.
///
/// Mutable parser state: a set-delimiter tag replaces the active pair for
/// all subsequent scanning, with no automatic restoration when a section
/// closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// The opening delimiter.
    pub begin: String,
    /// The closing delimiter.
    pub end: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            begin: DEFAULT_DELIMITER_BEGIN.to_string(),
            end: DEFAULT_DELIMITER_END.to_string(),
        }
    }
}

impl Delimiters {
    /// Returns `true` if this is the default `{{` / `}}` pair, which is the
    /// only pair under which the `{{{name}}}` shorthand applies.
    pub fn is_default_braces(&self) -> bool {
        self.begin == DEFAULT_DELIMITER_BEGIN && self.end == DEFAULT_DELIMITER_END
    }
}

/// The classified kind of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `{{name}}` — variable substitution with HTML escaping.
    Variable,
    /// `{{{name}}}` or `{{&name}}` — variable substitution without escaping.
    UnescapedVariable,
    /// `{{#name}}` — section begin.
    SectionBegin,
    /// `{{^name}}` — inverted section begin.
    InvertedSectionBegin,
    /// `{{/name}}` — section end.
    SectionEnd,
    /// `{{!text}}` — comment, no output.
    Comment,
    /// `{{>name}}` — partial expansion.
    Partial,
    /// `{{=begin end=}}` — delimiter change; never reaches the tree.
    SetDelimiter,
}

/// A parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The classified kind.
    pub kind: TagKind,
    /// The trimmed tag name (sigil stripped).
    pub name: String,
    /// Byte offset of the tag's opening delimiter in the original input.
    pub position: usize,
    /// The delimiter pair active at the tag's site, used when lambda or
    /// partial output is re-parsed.
    pub delimiters: Delimiters,
    /// For sections, the raw inner source text between the begin and end
    /// tags, handed verbatim to section lambdas.
    pub section_text: Option<String>,
}

/// A node in the parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A literal text segment, emitted verbatim.
    Text(String),
    /// A tag and, for sections, the child nodes it owns.
    Tag(Tag, Vec<Node>),
}

/// A section whose end tag has not been seen yet. Children grow in a local
/// list and are attached to the parent only once the section closes, or
/// during the end-of-input unwind.
struct OpenSection {
    tag: Tag,
    children: Vec<Node>,
    body_start: usize,
}

/// Parses a template with the default `{{` / `}}` delimiters.
///
/// # Errors
///
/// Returns the first syntax error encountered; no partial tree is exposed.
pub fn parse(input: &str) -> WhiskerResult<Vec<Node>> {
    parse_with_delimiters(input, &Delimiters::default())
}

/// Parses a template starting from the given delimiter pair.
///
/// Lambda and partial output is parsed through this entry point with the
/// delimiters that were active at the referencing tag's site.
///
/// # Errors
///
/// Returns the first syntax error encountered; no partial tree is exposed.
pub fn parse_with_delimiters(input: &str, initial: &Delimiters) -> WhiskerResult<Vec<Node>> {
    let mut delimiters = initial.clone();
    let mut root: Vec<Node> = Vec::new();
    let mut open: Vec<OpenSection> = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        // Find the next tag start delimiter.
        let Some(found) = input[pos..].find(&delimiters.begin) else {
            // No tag found. Add the remaining text.
            current_children(&mut root, &mut open).push(Node::Text(input[pos..].to_string()));
            break;
        };
        let tag_start = pos + found;
        if tag_start > pos {
            // Tag found; add the text up to it first.
            current_children(&mut root, &mut open)
                .push(Node::Text(input[pos..tag_start].to_string()));
        }

        // `{{{` shorthand: only under the default pair, and only when the
        // byte right after the begin delimiter is another brace.
        let mut content_start = tag_start + delimiters.begin.len();
        let shorthand =
            delimiters.is_default_braces() && input.as_bytes().get(content_start) == Some(&b'{');
        let end_delimiter = if shorthand {
            UNESCAPED_DELIMITER_END
        } else {
            delimiters.end.as_str()
        };
        if shorthand {
            content_start += 1;
        }

        let Some(end_found) = input[content_start..].find(end_delimiter) else {
            return Err(WhiskerError::UnclosedTag {
                position: tag_start,
            });
        };
        let tag_end = content_start + end_found;
        let content = input[content_start..tag_end].trim();
        pos = tag_end + end_delimiter.len();

        let (kind, name) = if shorthand {
            (TagKind::UnescapedVariable, content.to_string())
        } else {
            classify(content)
        };

        if kind == TagKind::SetDelimiter {
            // Delimiter change takes effect for all subsequent scanning and
            // leaves no node behind.
            delimiters =
                parse_set_delimiter(content).ok_or(WhiskerError::InvalidSetDelimiter {
                    position: tag_start,
                })?;
            continue;
        }

        let tag = Tag {
            kind,
            name,
            position: tag_start,
            delimiters: delimiters.clone(),
            section_text: None,
        };
        match kind {
            TagKind::SectionBegin | TagKind::InvertedSectionBegin => {
                open.push(OpenSection {
                    tag,
                    children: Vec::new(),
                    body_start: pos,
                });
            }
            TagKind::SectionEnd => {
                let Some(mut section) = open.pop() else {
                    return Err(WhiskerError::UnopenedSection {
                        name: tag.name,
                        position: tag_start,
                    });
                };
                section.tag.section_text =
                    Some(input[section.body_start..tag_start].to_string());
                // The end marker stays in the children until the validation
                // pass matches and discards it.
                section.children.push(Node::Tag(tag, Vec::new()));
                current_children(&mut root, &mut open)
                    .push(Node::Tag(section.tag, section.children));
            }
            _ => current_children(&mut root, &mut open).push(Node::Tag(tag, Vec::new())),
        }
    }

    // Sections still open at end of input are attached as-is so the
    // validation pass reports them with their begin positions.
    while let Some(section) = open.pop() {
        current_children(&mut root, &mut open).push(Node::Tag(section.tag, section.children));
    }

    check_sections(&mut root)?;
    Ok(root)
}

/// Returns the child list of the innermost open section, or the root list.
fn current_children<'t>(
    root: &'t mut Vec<Node>,
    open: &'t mut Vec<OpenSection>,
) -> &'t mut Vec<Node> {
    open.last_mut().map_or(root, |section| &mut section.children)
}

/// Classifies trimmed tag content by its leading sigil.
fn classify(content: &str) -> (TagKind, String) {
    let Some(sigil) = content.chars().next() else {
        return (TagKind::Variable, String::new());
    };
    let kind = match sigil {
        '#' => TagKind::SectionBegin,
        '^' => TagKind::InvertedSectionBegin,
        '/' => TagKind::SectionEnd,
        '>' => TagKind::Partial,
        '&' => TagKind::UnescapedVariable,
        '!' => TagKind::Comment,
        '=' => TagKind::SetDelimiter,
        _ => TagKind::Variable,
    };
    if kind == TagKind::Variable {
        (kind, content.to_string())
    } else {
        (kind, content[sigil.len_utf8()..].trim().to_string())
    }
}

/// Validates set-delimiter tag content (including the `=` sigils) and
/// returns the new pair.
///
/// The interior must trim to exactly two non-empty tokens separated by one
/// whitespace run, with neither token containing `=` or internal whitespace.
fn parse_set_delimiter(content: &str) -> Option<Delimiters> {
    let interior = content.strip_prefix('=')?.strip_suffix('=')?;
    let mut tokens = interior.split_whitespace();
    let begin = tokens.next()?;
    let end = tokens.next()?;
    if tokens.next().is_some() || begin.contains('=') || end.contains('=') {
        return None;
    }
    Some(Delimiters {
        begin: begin.to_string(),
        end: end.to_string(),
    })
}

/// Depth-first validation pass: every section's last child must be a
/// matching end marker, which is then discarded. The first offending
/// section is reported with its *begin* tag's position.
fn check_sections(nodes: &mut Vec<Node>) -> WhiskerResult<()> {
    for node in nodes {
        let Node::Tag(tag, children) = node else {
            continue;
        };
        if !matches!(
            tag.kind,
            TagKind::SectionBegin | TagKind::InvertedSectionBegin
        ) {
            continue;
        }
        let closed = matches!(
            children.last(),
            Some(Node::Tag(end, _))
                if end.kind == TagKind::SectionEnd && end.name == tag.name
        );
        if !closed {
            return Err(WhiskerError::UnclosedSection {
                name: tag.name.clone(),
                position: tag.position,
            });
        }
        children.pop();
        check_sections(children)?;
    }
    Ok(())
}
