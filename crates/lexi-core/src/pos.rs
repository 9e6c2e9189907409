//! Sejong part-of-speech tags as emitted by the analyzer.

/// Tags that become interactive only on an exact match
const INTERACTIVE_TAGS: [&str; 8] = ["NNG", "NNP", "NP", "NR", "MAG", "MAJ", "MM", "XR"];

/// Stem tags that make any (compound) tag interactive
const STEM_TAGS: [&str; 3] = ["VV", "VA", "VX"];

const POS_LABELS: [(&str, &str); 42] = [
    ("NNG", "General Noun"),
    ("NNP", "Proper Noun"),
    ("NNB", "Bound Noun"),
    ("NP", "Pronoun"),
    ("NR", "Numeral"),
    ("VV", "Verb"),
    ("VA", "Adjective"),
    ("VX", "Auxiliary Verb"),
    ("VCP", "Copula"),
    ("VCN", "Negative Copula"),
    ("MM", "Determiner"),
    ("MAG", "General Adverb"),
    ("MAJ", "Conjunctive Adverb"),
    ("IC", "Interjection"),
    ("JKS", "Subject Particle"),
    ("JKC", "Complement Particle"),
    ("JKG", "Genitive Particle"),
    ("JKO", "Object Particle"),
    ("JKB", "Adverbial Particle"),
    ("JKV", "Vocative Particle"),
    ("JKQ", "Quotative Particle"),
    ("JX", "Auxiliary Particle"),
    ("JC", "Conjunctive Particle"),
    ("EP", "Pre-final Ending"),
    ("EF", "Final Ending"),
    ("EC", "Conjunctive Ending"),
    ("ETN", "Nominal Ending"),
    ("ETM", "Adnominal Ending"),
    ("XPN", "Prefix"),
    ("XSN", "Noun Suffix"),
    ("XSV", "Verb Suffix"),
    ("XSA", "Adjective Suffix"),
    ("XR", "Root"),
    ("SF", "Sentence-final Punctuation"),
    ("SP", "Separator"),
    ("SS", "Symbol"),
    ("SE", "Ellipsis"),
    ("SO", "Opening Bracket"),
    ("SW", "Closing Bracket"),
    ("SL", "Foreign Word"),
    ("SH", "Chinese Character"),
    ("SN", "Number"),
];

/// Whether a token with this tag becomes a clickable overlay
pub fn is_interactive_pos(pos: &str) -> bool {
    if pos.is_empty() {
        return false;
    }

    if STEM_TAGS.iter().any(|stem| pos.contains(stem)) {
        return true;
    }

    INTERACTIVE_TAGS.contains(&pos)
}

/// Human readable label; the first known tag contained in `pos` wins,
/// unknown tags are returned as is
pub fn pos_description(pos: &str) -> &str {
    if pos.is_empty() {
        return "";
    }

    POS_LABELS
        .iter()
        .find(|(tag, _)| pos.contains(tag))
        .map(|(_, label)| *label)
        .unwrap_or(pos)
}
