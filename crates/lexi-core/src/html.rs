//! Reading tokens back out of pre-rendered analyzer markup.

use lexi_types::Token;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static WORD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".interactive-word").expect("word selector"));
static BACKGROUND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)background-color:\s*([^;]+)").expect("background"));

/// One token per `.interactive-word` element, in document order.
/// A word counts as known when it carries an inline, non-transparent
/// background colour.
pub fn tokens_from_html(html: &str) -> Vec<Token> {
    let fragment = Html::parse_fragment(html);

    let tokens: Vec<Token> = fragment
        .select(&WORD_SELECTOR)
        .map(|el| {
            let attr = |name: &str| el.value().attr(name).unwrap_or_default().to_string();

            let color = el
                .value()
                .attr("style")
                .and_then(|style| BACKGROUND_RE.captures(style))
                .map(|caps| caps[1].trim().to_lowercase())
                .unwrap_or_default();
            let known = !color.is_empty() && color != "transparent";

            Token {
                surface: el.text().collect::<String>(),
                base: attr("data-original"),
                pos: attr("data-pos"),
                translation: attr("data-translation"),
                in_vocabulary: known,
                highlight_color: (!color.is_empty()).then_some(color),
                grammar_info: attr("data-grammar"),
            }
        })
        .collect();

    tracing::debug!("Parsed {} tokens from {} bytes of markup", tokens.len(), html.len());
    tokens
}
