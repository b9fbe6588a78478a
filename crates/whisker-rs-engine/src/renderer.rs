//! Template renderer.
//!
//! Walks a parsed [`Node`] tree against a context stack rooted at a
//! caller-supplied [`Data`] value, resolving tags, escaping, iterating
//! lists, and expanding lambdas and partials (which recursively re-enter the
//! parser with the delimiters recorded at the referencing tag's site).

use whisker_rs_core::error::WhiskerResult;

use crate::data::{escape_html, Data};
use crate::parser::{self, Delimiters, Node, Tag, TagKind};

/// Renders a parsed node tree against a root data value.
///
/// # Errors
///
/// A parse failure inside lambda or partial output aborts the whole render;
/// no output is returned. Template-level state is never touched — errors
/// are isolated to the render call.
pub fn render(nodes: &[Node], data: &Data) -> WhiskerResult<String> {
    let mut out = String::new();
    Renderer::new(data).render_nodes(nodes, &mut out)?;
    Ok(out)
}

/// Render state: the context stack, innermost scope last.
struct Renderer<'a> {
    stack: Vec<&'a Data>,
}

impl<'a> Renderer<'a> {
    fn new(root: &'a Data) -> Self {
        Self { stack: vec![root] }
    }

    fn render_nodes(&mut self, nodes: &[Node], out: &mut String) -> WhiskerResult<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Tag(tag, children) => self.render_tag(tag, children, out)?,
            }
        }
        Ok(())
    }

    fn render_tag(&mut self, tag: &Tag, children: &[Node], out: &mut String) -> WhiskerResult<()> {
        match tag.kind {
            TagKind::Variable => self.render_variable(tag, true, out),
            TagKind::UnescapedVariable => self.render_variable(tag, false, out),
            TagKind::SectionBegin => self.render_section(tag, children, out),
            TagKind::InvertedSectionBegin => {
                // No scope is pushed for inverted bodies.
                if !self.resolve(&tag.name).is_some_and(Data::is_truthy) {
                    self.render_nodes(children, out)?;
                }
                Ok(())
            }
            TagKind::Partial => self.render_partial(tag, out),
            // Comments emit nothing; end markers are consumed at parse time
            // and set-delimiter tags never reach the tree.
            TagKind::Comment | TagKind::SectionEnd | TagKind::SetDelimiter => Ok(()),
        }
    }

    fn render_variable(&mut self, tag: &Tag, escape: bool, out: &mut String) -> WhiskerResult<()> {
        let Some(value) = self.resolve(&tag.name) else {
            return Ok(());
        };
        match value {
            Data::String(s) => {
                if escape {
                    out.push_str(&escape_html(s));
                } else {
                    out.push_str(s);
                }
            }
            Data::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Data::Lambda(f) => {
                // Variable tags carry no inner text. The expansion is
                // re-invoked on every occurrence; nothing is cached.
                let produced = f("");
                let expanded = self.expand(&produced, &tag.delimiters)?;
                if escape {
                    out.push_str(&escape_html(&expanded));
                } else {
                    out.push_str(&expanded);
                }
            }
            Data::Object(_) | Data::List(_) | Data::Partial(_) | Data::Invalid => {}
        }
        Ok(())
    }

    fn render_section(&mut self, tag: &Tag, children: &[Node], out: &mut String) -> WhiskerResult<()> {
        let Some(value) = self.resolve(&tag.name) else {
            return Ok(());
        };
        if !value.is_truthy() {
            return Ok(());
        }
        match value {
            Data::List(items) => {
                for item in items {
                    self.stack.push(item);
                    let result = self.render_nodes(children, out);
                    self.stack.pop();
                    result?;
                }
            }
            Data::Lambda(f) => {
                let produced = f(tag.section_text.as_deref().unwrap_or_default());
                let expanded = self.expand(&produced, &tag.delimiters)?;
                out.push_str(&expanded);
            }
            other => {
                self.stack.push(other);
                let result = self.render_nodes(children, out);
                self.stack.pop();
                result?;
            }
        }
        Ok(())
    }

    fn render_partial(&mut self, tag: &Tag, out: &mut String) -> WhiskerResult<()> {
        // Partial names resolve literally, so a key like "a.b" works; the
        // expansion sees the unmodified current context stack.
        let Some(Data::Partial(f)) = self.find_in_stack(&tag.name) else {
            return Ok(());
        };
        tracing::trace!(name = %tag.name, "expanding partial");
        let produced = f();
        let expanded = self.expand(&produced, &tag.delimiters)?;
        out.push_str(&expanded);
        Ok(())
    }

    /// Parses produced text with the given delimiters and renders it against
    /// the current context stack.
    fn expand(&mut self, source: &str, delimiters: &Delimiters) -> WhiskerResult<String> {
        let nodes = parser::parse_with_delimiters(source, delimiters)?;
        let mut out = String::new();
        self.render_nodes(&nodes, &mut out)?;
        Ok(out)
    }

    /// Resolves a tag name against the context stack, innermost scope first.
    ///
    /// The literal name `.` is the innermost scope. A dotted path resolves
    /// its first segment in the nearest scope that has it, then each further
    /// segment strictly inside the value just found; a miss partway through
    /// fails outright with no fallback to outer scopes (the broken-chain
    /// rule).
    fn resolve(&self, name: &str) -> Option<&'a Data> {
        if name == "." {
            return self.stack.last().copied();
        }
        let mut segments = name.split('.');
        let mut current = self.find_in_stack(segments.next()?)?;
        for segment in segments {
            let Data::Object(map) = current else {
                return None;
            };
            current = map.get(segment)?;
        }
        Some(current)
    }

    /// Finds a key in the nearest enclosing Object scope. Non-object scopes
    /// (list elements that are strings, section values) hold no names.
    fn find_in_stack(&self, key: &str) -> Option<&'a Data> {
        for scope in self.stack.iter().rev() {
            if let Data::Object(map) = *scope {
                if let Some(value) = map.get(key) {
                    return Some(value);
                }
            }
        }
        None
    }
}
