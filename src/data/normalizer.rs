// ============================================================
// Layer 4: Text Normalizer
// ============================================================
// Puts every question into one canonical form before it is
// counted (training) or looked up (inference):
//
//   "Hello, World!  " → "hello world"
//
// Steps (applied in order):
//   1. Lowercase
//   2. Remove ASCII punctuation  (!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~)
//   3. Collapse every whitespace run (tabs, newlines, NBSP...)
//      into a single space
//   4. Trim both ends
//
// Punctuation is removed, not replaced: "it's" → "its" and
// "covid-19" → "covid19", so the vocabulary sees one token.
//
// The result is a fixed point: normalising twice changes nothing.

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true; // swallows leading whitespace

        for c in text.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_punctuation() {
                continue;
            }
            if c.is_whitespace() {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can survive the loop
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

/// Shorthand for `Normalizer::new().normalize(text)`.
pub fn normalize(text: &str) -> String {
    Normalizer.normalize(text)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world() {
        assert_eq!(normalize("Hello, World!  "), "hello world");
    }

    #[test]
    fn test_collapses_mixed_whitespace() {
        assert_eq!(normalize("  what\tis\n\n a\u{00A0}cold? "), "what is a cold");
    }

    #[test]
    fn test_punctuation_is_removed_not_spaced() {
        assert_eq!(normalize("It's COVID-19."), "its covid19");
    }

    #[test]
    fn test_punctuation_only_between_spaces() {
        assert_eq!(normalize("pain - and - fever"), "pain and fever");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Hello, World!  ",
            "  What are the SIGNS of a stroke?? ",
            "Çà   Ünïcödé\ttext",
            "a - b",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
