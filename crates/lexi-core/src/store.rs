use std::collections::{BTreeSet, HashMap};

use lexi_types::ElementId;

use crate::overlay::OverlayAttrs;

/// Highlight given to words saved without a server-provided colour
pub const DEFAULT_KNOWN_COLOR: &str = "rgba(255, 255, 0, 0.9)";

/// What the engine knows about one word, shared by all of its elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordEntry {
    pub translation: String,
    pub pos: String,
    pub grammar: String,
    pub in_vocabulary: bool,
    pub color: Option<String>,
}

/// Word state keyed by identity key, plus the elements currently mounted for
/// each word. Elements are projections of their word's entry.
#[derive(Debug, Default)]
pub struct WordStore {
    words: HashMap<String, WordEntry>,
    elements: HashMap<ElementId, String>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created element. Its snapshot fills gaps in the
    /// word entry but never replaces a translation that is already resolved.
    pub fn mount(&mut self, id: ElementId, attrs: &OverlayAttrs) {
        let word = attrs.original.clone();
        let entry = self.words.entry(word.clone()).or_default();

        if !attrs.translation.is_empty() && unresolved(&entry.translation, &word) {
            entry.translation = attrs.translation.clone();
        }
        if entry.pos.is_empty() {
            entry.pos = attrs.pos.clone();
        }
        if entry.grammar.is_empty() {
            entry.grammar = attrs.grammar.clone();
        }
        if attrs.in_vocabulary {
            entry.in_vocabulary = true;
            if attrs.color.is_some() {
                entry.color = attrs.color.clone();
            }
        }

        self.elements.insert(id, word);
    }

    /// Drop every mounted element (the container was cleared). Word entries
    /// stay as a translation cache.
    pub fn unmount_all(&mut self) {
        self.elements.clear();
    }

    pub fn mounted(&self) -> usize {
        self.elements.len()
    }

    pub fn word_for(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(String::as_str)
    }

    pub fn entry(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(word)
    }

    pub fn elements_for<'a>(&'a self, word: &'a str) -> impl Iterator<Item = ElementId> + 'a {
        self.elements
            .iter()
            .filter(move |(_, w)| w.as_str() == word)
            .map(|(id, _)| *id)
    }

    /// Distinct words with at least one mounted element, sorted
    pub fn mounted_words(&self) -> BTreeSet<String> {
        self.elements.values().cloned().collect()
    }

    /// Current attributes of a mounted element
    pub fn attrs_for(&self, id: ElementId) -> Option<OverlayAttrs> {
        let word = self.elements.get(&id)?;
        let entry = self.words.get(word)?;

        Some(OverlayAttrs {
            original: word.clone(),
            translation: entry.translation.clone(),
            pos: entry.pos.clone(),
            grammar: entry.grammar.clone(),
            in_vocabulary: entry.in_vocabulary,
            color: entry.color.clone(),
        })
    }

    /// True while no real translation is known for the word
    pub fn needs_translation(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.words
            .get(word)
            .is_none_or(|entry| unresolved(&entry.translation, word))
    }

    /// Result of a background resolution. Applied only when the stored value
    /// is still empty or the raw word; returns whether it was applied.
    pub fn apply_translation(&mut self, word: &str, translation: &str) -> bool {
        if translation.is_empty() {
            return false;
        }

        let entry = self.words.entry(word.to_string()).or_default();
        if !unresolved(&entry.translation, word) {
            return false;
        }

        entry.translation = translation.to_string();
        true
    }

    /// Result of an explicit lookup; any non-empty value wins
    pub fn set_explicit_translation(&mut self, word: &str, translation: &str) -> bool {
        if translation.is_empty() {
            return false;
        }

        self.words.entry(word.to_string()).or_default().translation = translation.to_string();
        true
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.words.get(word).is_some_and(|entry| entry.in_vocabulary)
    }

    /// Mark every occurrence of the word as saved
    pub fn mark_known(&mut self, word: &str, color: Option<&str>) {
        let entry = self.words.entry(word.to_string()).or_default();
        entry.in_vocabulary = true;
        entry.color = Some(color.unwrap_or(DEFAULT_KNOWN_COLOR).to_string());
    }
}

fn unresolved(current: &str, word: &str) -> bool {
    current.is_empty() || current == word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(original: &str, translation: &str) -> OverlayAttrs {
        OverlayAttrs {
            original: original.to_string(),
            translation: translation.to_string(),
            pos: "NNG".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn background_result_fills_unresolved_only() {
        let mut store = WordStore::new();
        store.mount(ElementId::new(), &attrs("사과", ""));

        assert!(store.needs_translation("사과"));
        assert!(store.apply_translation("사과", "apple"));
        assert!(!store.needs_translation("사과"));
        assert!(!store.apply_translation("사과", "sorry"));
        assert_eq!(store.entry("사과").unwrap().translation, "apple");
    }

    #[test]
    fn raw_word_counts_as_unresolved() {
        let mut store = WordStore::new();
        store.mount(ElementId::new(), &attrs("김치", "김치"));

        assert!(store.needs_translation("김치"));
        assert!(store.apply_translation("김치", "kimchi"));
    }

    #[test]
    fn applying_twice_is_the_same_as_once() {
        let mut once = WordStore::new();
        once.apply_translation("배", "pear");

        let mut twice = WordStore::new();
        twice.apply_translation("배", "pear");
        twice.apply_translation("배", "pear");

        assert_eq!(once.entry("배"), twice.entry("배"));
    }

    #[test]
    fn never_degrades_to_empty() {
        let mut store = WordStore::new();
        store.set_explicit_translation("물", "water");

        assert!(!store.apply_translation("물", ""));
        assert!(!store.set_explicit_translation("물", ""));
        store.mount(ElementId::new(), &attrs("물", ""));
        assert_eq!(store.entry("물").unwrap().translation, "water");
    }

    #[test]
    fn explicit_lookup_overrides_background_value() {
        let mut store = WordStore::new();
        store.apply_translation("눈", "snow");
        store.set_explicit_translation("눈", "eye");
        assert!(!store.apply_translation("눈", "snow"));
        assert_eq!(store.entry("눈").unwrap().translation, "eye");
    }

    #[test]
    fn elements_project_their_word() {
        let mut store = WordStore::new();
        let a = ElementId::new();
        let b = ElementId::new();
        store.mount(a, &attrs("책", ""));
        store.mount(b, &attrs("책", ""));

        store.apply_translation("책", "book");
        store.mark_known("책", None);

        for id in [a, b] {
            let projected = store.attrs_for(id).unwrap();
            assert_eq!(projected.translation, "book");
            assert!(projected.in_vocabulary);
            assert_eq!(projected.color.as_deref(), Some(DEFAULT_KNOWN_COLOR));
        }
        assert_eq!(store.elements_for("책").count(), 2);

        store.unmount_all();
        assert_eq!(store.mounted(), 0);
        assert!(store.attrs_for(a).is_none());
        assert_eq!(store.entry("책").unwrap().translation, "book");
    }
}
