use std::ops::{Range, RangeInclusive};

/// Character class of the target script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptClass {
    ranges: Vec<RangeInclusive<char>>,
}

impl ScriptClass {
    pub fn new(ranges: Vec<RangeInclusive<char>>) -> Self {
        Self { ranges }
    }

    /// Precomposed Hangul syllables
    pub fn hangul() -> Self {
        Self::new(vec!['\u{AC00}'..='\u{D7A3}'])
    }

    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|r| r.contains(&c))
    }

    pub fn appears_in(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }

    /// Split `text` into maximal byte ranges that are either all inside
    /// or all outside the class, in order
    pub fn runs(&self, text: &str) -> Vec<(Range<usize>, bool)> {
        let mut runs = Vec::new();
        let mut start = 0;
        let mut current: Option<bool> = None;

        for (idx, c) in text.char_indices() {
            let inside = self.contains(c);
            match current {
                Some(state) if state == inside => {}
                Some(state) => {
                    runs.push((start..idx, state));
                    start = idx;
                    current = Some(inside);
                }
                None => current = Some(inside),
            }
        }

        if let Some(state) = current {
            runs.push((start..text.len(), state));
        }

        runs
    }
}

impl Default for ScriptClass {
    fn default() -> Self {
        Self::hangul()
    }
}
