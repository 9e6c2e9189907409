//! Placement of word overlays on top of an OCR'd image.
//!
//! The analyzer sees the OCR item texts joined by single spaces. Each token
//! is located in that joined text (forward only), attributed to the item that
//! contains it, and given a sub-box by linear interpolation along the item's
//! width. Characters are assumed to be equally wide inside an item.

use lexi_types::{BoundingBox, ElementId, OcrItem, Token};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::overlay::OverlayAttrs;
use crate::pos::is_interactive_pos;

static RGBA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^rgba?\(([^)]+)\)$").expect("rgba"));

/// Background for overlays of words that are not in the vocabulary yet
pub const UNKNOWN_WORD_COLOR: &str = "rgba(212, 237, 218, 0.6)";

/// Box in fractions of the rendered image size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelativeBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Client rectangle of a rendered element, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Current geometry of the image and the container overlays are placed in.
/// Read it again after every resize or load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageGeometry {
    pub image: ClientRect,
    pub container: ClientRect,
}

impl RelativeBox {
    /// Absolute rectangle relative to the container
    pub fn to_pixels(&self, geometry: &ImageGeometry) -> ClientRect {
        let image = geometry.image;
        let offset_x = image.left - geometry.container.left;
        let offset_y = image.top - geometry.container.top;

        ClientRect {
            left: offset_x + self.left * image.width,
            top: offset_y + self.top * image.height,
            width: self.width * image.width,
            height: self.height * image.height,
        }
    }
}

/// Character span of one OCR item inside the joined text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemSpan {
    item: usize,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrOverlay {
    pub id: ElementId,
    pub surface: String,
    pub attrs: OverlayAttrs,
    pub rect: RelativeBox,
}

impl OcrOverlay {
    /// Underline gradient in the word's highlight colour
    pub fn background(&self) -> String {
        match (&self.attrs.color, self.attrs.in_vocabulary) {
            (Some(color), true) => gradient_for_color(color),
            _ => gradient_for_color(UNKNOWN_WORD_COLOR),
        }
    }
}

pub struct OcrLayout {
    items: Vec<OcrItem>,
    spans: Vec<ItemSpan>,
    text: String,
    /// Byte offset in `text`; only moves forward
    cursor: usize,
}

impl OcrLayout {
    pub fn new(items: Vec<OcrItem>) -> Self {
        let mut spans = Vec::with_capacity(items.len());
        let mut offset = 0;

        for (idx, item) in items.iter().enumerate() {
            let start = offset;
            let end = start + item.text.chars().count();
            spans.push(ItemSpan {
                item: idx,
                start,
                end,
            });
            offset = end + 1;
        }

        let text = items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            items,
            spans,
            text,
            cursor: 0,
        }
    }

    /// The text handed to the analyzer
    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Relative box for the next occurrence of `token`, or `None` when the
    /// token is skipped (filtered tag, no text, no match, no box)
    pub fn place(&mut self, token: &Token) -> Option<RelativeBox> {
        if !is_interactive_pos(&token.pos) {
            return None;
        }

        let surface = token.surface.trim();
        if surface.is_empty() {
            return None;
        }

        let found = self.text[self.cursor..].find(surface)?;
        let byte_start = self.cursor + found;
        let byte_end = byte_start + surface.len();
        self.cursor = byte_end;

        let start = self.text[..byte_start].chars().count();
        let end = start + surface.chars().count();

        let Some(span) = self
            .spans
            .iter()
            .find(|span| start >= span.start && end <= span.end)
        else {
            tracing::debug!("No OCR item contains '{}' at {}..{}", surface, start, end);
            return None;
        };

        let bbox = self.items[span.item].bounding_box?;
        Some(interpolate(&bbox, span.end - span.start, start - span.start, end - span.start))
    }

    /// Overlays for every placeable token, in order
    pub fn place_all(&mut self, tokens: &[Token]) -> Vec<OcrOverlay> {
        tokens
            .iter()
            .filter_map(|token| {
                let rect = self.place(token)?;
                let surface = token.surface.trim();
                Some(OcrOverlay {
                    id: ElementId::new(),
                    surface: surface.to_string(),
                    attrs: OverlayAttrs::from_token(token),
                    rect,
                })
            })
            .collect()
    }
}

/// Sub-box of characters `[from, to)` of an item `len` characters long
pub fn interpolate(bbox: &BoundingBox, len: usize, from: usize, to: usize) -> RelativeBox {
    let width_chars = if len == 0 { 1.0 } else { len as f64 };
    let rel_start = from as f64 / width_chars;
    let rel_end = to as f64 / width_chars;

    RelativeBox {
        left: bbox.x + bbox.w * rel_start,
        top: bbox.y,
        width: bbox.w * (rel_end - rel_start),
        height: bbox.h,
    }
}

/// Transparent-to-colour gradient along the bottom edge.
/// Non-rgb colours are returned unchanged.
pub fn gradient_for_color(color: &str) -> String {
    let Some(caps) = RGBA_RE.captures(color.trim()) else {
        return color.to_string();
    };

    let parts: Vec<&str> = caps[1].split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return color.to_string();
    }

    let (r, g, b) = (parts[0], parts[1], parts[2]);
    let alpha = parts
        .get(3)
        .and_then(|a| a.parse::<f64>().ok())
        .filter(|a| !a.is_nan())
        .unwrap_or(1.0);

    let base = format!("rgba({r}, {g}, {b}, {alpha})");
    let transparent = format!("rgba({r}, {g}, {b}, 0)");
    format!("linear-gradient(to bottom, {transparent} 0%, {transparent} 90%, {base} 100%)")
}
