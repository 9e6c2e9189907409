use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default key preprocessor: analyzer output is precomposed Hangul
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFC), keeps syllable blocks intact
        text.nfc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_decomposed_jamo() {
        // 한 as conjoining jamo
        let decomposed = "\u{1112}\u{1161}\u{11AB}";
        assert_eq!(DefaultPreprocessor.process(decomposed), "한");
        assert_eq!(DefaultPreprocessor.process("  학교 "), "학교");
        assert_eq!(DefaultPreprocessor.process("   "), "");
    }
}
