use std::ops::Range;

use lexi_types::{ElementId, Token};
use serde::Serialize;

use crate::candidates::CandidateIndex;
use crate::script::ScriptClass;

/// Snapshot of a token carried by an overlay element
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlayAttrs {
    /// Identity key of the word (dictionary form when known)
    pub original: String,
    pub translation: String,
    pub pos: String,
    pub grammar: String,
    pub in_vocabulary: bool,
    pub color: Option<String>,
}

impl OverlayAttrs {
    pub fn from_token(token: &Token) -> Self {
        Self {
            original: token.key().to_string(),
            translation: token.translation.clone(),
            pos: token.pos.clone(),
            grammar: token.grammar_info.clone(),
            in_vocabulary: token.in_vocabulary,
            color: token
                .highlight_color
                .clone()
                .filter(|c| !c.trim().is_empty() && !c.eq_ignore_ascii_case("transparent")),
        }
    }

    /// Tooltip text: translation, else dictionary form
    pub fn tooltip(&self) -> &str {
        if self.translation.is_empty() {
            &self.original
        } else {
            &self.translation
        }
    }
}

/// Interactive element bound to one matched range of a text node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub id: ElementId,
    /// Matched text, shown verbatim
    pub text: String,
    /// Byte range of `text` inside the source text node
    pub range: Range<usize>,
    pub attrs: OverlayAttrs,
}

/// Host content as seen by the mapper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Text(String),
    Overlay(Overlay),
    /// Content the mapper must never rewrite (inputs, editable regions)
    Editable(String),
}

impl Node {
    pub fn as_overlay(&self) -> Option<&Overlay> {
        match self {
            Node::Overlay(overlay) => Some(overlay),
            _ => None,
        }
    }

    /// Rendered text of the node
    pub fn text(&self) -> &str {
        match self {
            Node::Text(text) | Node::Editable(text) => text,
            Node::Overlay(overlay) => &overlay.text,
        }
    }
}

/// Result of an annotation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotated {
    pub nodes: Vec<Node>,
    /// Overlays created by this pass (pre-existing ones not counted)
    pub created: usize,
}

impl Annotated {
    /// Nothing interactive was found; hosts show their fallback UX
    pub fn is_empty(&self) -> bool {
        self.created == 0
    }

    /// Overlays created or carried over, in document order
    pub fn overlays(&self) -> impl Iterator<Item = &Overlay> {
        self.nodes.iter().filter_map(Node::as_overlay)
    }
}

/// Longest-match segmentation of script runs into overlays
pub struct OverlayMapper<'a> {
    index: &'a CandidateIndex,
    script: ScriptClass,
}

impl<'a> OverlayMapper<'a> {
    pub fn new(index: &'a CandidateIndex, script: ScriptClass) -> Self {
        Self { index, script }
    }

    pub fn hangul(index: &'a CandidateIndex) -> Self {
        Self::new(index, ScriptClass::hangul())
    }

    /// Rewrite every plain text node; overlays from earlier passes and
    /// editable content pass through untouched
    pub fn annotate(&self, nodes: Vec<Node>) -> Annotated {
        if self.index.is_empty() {
            return Annotated { nodes, created: 0 };
        }

        let mut out = Vec::with_capacity(nodes.len());
        let mut created = 0;

        for node in nodes {
            match node {
                Node::Text(text) => {
                    let mapped = self.map_text(&text);
                    created += mapped.iter().filter(|n| n.as_overlay().is_some()).count();
                    out.extend(mapped);
                }
                other => out.push(other),
            }
        }

        tracing::debug!("Annotation pass created {} overlays", created);

        Annotated {
            nodes: out,
            created,
        }
    }

    /// Segment one text node into literal text and overlays
    pub fn map_text(&self, text: &str) -> Vec<Node> {
        let mut out = Vec::new();
        let mut literal = String::new();

        for (range, in_script) in self.script.runs(text) {
            if !in_script || self.index.is_empty() {
                literal.push_str(&text[range]);
                continue;
            }

            let run = &text[range.clone()];
            let mut cursor = 0;

            while cursor < run.len() {
                let rest = &run[cursor..];

                if let Some(key) = self.index.longest_prefix(rest) {
                    if !literal.is_empty() {
                        out.push(Node::Text(std::mem::take(&mut literal)));
                    }

                    let attrs = self
                        .index
                        .token(key)
                        .map(OverlayAttrs::from_token)
                        .unwrap_or_else(|| OverlayAttrs {
                            original: key.to_string(),
                            ..Default::default()
                        });

                    let start = range.start + cursor;
                    out.push(Node::Overlay(Overlay {
                        id: ElementId::new(),
                        text: key.to_string(),
                        range: start..start + key.len(),
                        attrs,
                    }));
                    cursor += key.len();
                } else if let Some(c) = rest.chars().next() {
                    literal.push(c);
                    cursor += c.len_utf8();
                }
            }
        }

        if !literal.is_empty() {
            out.push(Node::Text(literal));
        }

        out
    }
}
