//! Dictionary-free Indonesian stemmer.
//!
//! Indonesian morphology is mostly affixation: particles and possessive
//! pronouns are glued to the end of a word, derivational prefixes and
//! suffixes wrap around the root. This stemmer strips them with fixed rules
//! in the Tala order:
//!
//! 1. Particles: `-kah`, `-lah`, `-pun`, `-tah`
//! 2. Possessive pronouns: `-nya`, `-ku`, `-mu`
//! 3. First-order prefixes: `meng-`, `meny-`, `men-`, `mem-`, `me-`,
//!    `peng-`, `peny-`, `pen-`, `pem-`, `di-`, `ter-`, `ke-`
//! 4. If a first-order prefix was removed: derivational suffix, then
//!    second-order prefix. Otherwise: second-order prefix, then suffix.
//!
//! Second-order prefixes are `ber-`, `bel-`, `be-`, `per-`, `pel-`, `pe-`
//! and derivational suffixes are `-kan`, `-an`, `-i`.
//!
//! A rule only fires while the word still has more than two vowels, and the
//! remainder must keep at least two characters. Nasal prefixes recode the
//! initial consonant they absorbed when a vowel follows (`menyapu` → `sapu`,
//! `memukul` → `pukul`, `menulis` → `tulis`).
//!
//! # Examples
//!
//! ```
//! use temu::analysis::token_filter::stem::Stemmer;
//! use temu::analysis::token_filter::stem::indonesian::IndonesianStemmer;
//!
//! let stemmer = IndonesianStemmer::new();
//!
//! assert_eq!(stemmer.stem("bermain"), "main");
//! assert_eq!(stemmer.stem("kebersihan"), "bersih");
//! assert_eq!(stemmer.stem("memperbaiki"), "baik");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const PARTICLES: &[&str] = &["kah", "lah", "pun", "tah"];

const POSSESSIVE_PRONOUNS: &[&str] = &["nya", "ku", "mu"];

const DERIVATIONAL_SUFFIXES: &[&str] = &["kan", "an", "i"];

/// First-order prefixes, longest first, with the consonant restored when
/// the prefix is followed by a vowel.
const FIRST_ORDER_PREFIXES: &[(&str, Option<&str>)] = &[
    ("meng", None),
    ("meny", Some("s")),
    ("men", Some("t")),
    ("mem", Some("p")),
    ("me", None),
    ("peng", None),
    ("peny", Some("s")),
    ("pen", Some("t")),
    ("pem", Some("p")),
    ("di", None),
    ("ter", None),
    ("ke", None),
];

const SECOND_ORDER_PREFIXES: &[&str] = &["ber", "bel", "be", "per", "pel", "pe"];

const MIN_STEM_CHARS: usize = 2;

/// Rule-based Indonesian stemmer.
#[derive(Debug, Clone, Default)]
pub struct IndonesianStemmer;

impl IndonesianStemmer {
    /// Create a new Indonesian stemmer.
    pub fn new() -> Self {
        IndonesianStemmer
    }

    fn is_vowel(c: char) -> bool {
        matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
    }

    fn vowel_count(word: &str) -> usize {
        word.chars().filter(|&c| Self::is_vowel(c)).count()
    }

    fn can_strip(word: &str) -> bool {
        Self::vowel_count(word) > 2
    }

    fn long_enough(rest: &str) -> bool {
        rest.chars().count() >= MIN_STEM_CHARS
    }

    fn remove_suffix(word: &str, suffixes: &[&str]) -> Option<String> {
        if !Self::can_strip(word) {
            return None;
        }
        suffixes.iter().find_map(|suffix| {
            word.strip_suffix(suffix)
                .filter(|rest| Self::long_enough(rest))
                .map(str::to_string)
        })
    }

    fn remove_first_order_prefix(word: &str) -> Option<String> {
        if !Self::can_strip(word) {
            return None;
        }
        FIRST_ORDER_PREFIXES.iter().find_map(|(prefix, recode)| {
            let rest = word.strip_prefix(prefix)?;
            let stem = match recode {
                Some(consonant) if rest.starts_with(Self::is_vowel) => format!("{consonant}{rest}"),
                _ => rest.to_string(),
            };
            Self::long_enough(&stem).then_some(stem)
        })
    }

    fn remove_second_order_prefix(word: &str) -> Option<String> {
        if !Self::can_strip(word) {
            return None;
        }
        SECOND_ORDER_PREFIXES.iter().find_map(|prefix| {
            word.strip_prefix(prefix)
                .filter(|rest| Self::long_enough(rest))
                .map(str::to_string)
        })
    }
}

impl Stemmer for IndonesianStemmer {
    fn stem(&self, word: &str) -> String {
        // Numbers, identifiers with underscores and mixed tokens are kept as-is.
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return word.to_string();
        }

        let mut stem = word.to_string();

        if let Some(rest) = Self::remove_suffix(&stem, PARTICLES) {
            stem = rest;
        }
        if let Some(rest) = Self::remove_suffix(&stem, POSSESSIVE_PRONOUNS) {
            stem = rest;
        }

        if let Some(rest) = Self::remove_first_order_prefix(&stem) {
            stem = rest;
            if let Some(rest) = Self::remove_suffix(&stem, DERIVATIONAL_SUFFIXES) {
                stem = rest;
            }
            if let Some(rest) = Self::remove_second_order_prefix(&stem) {
                stem = rest;
            }
        } else {
            if let Some(rest) = Self::remove_second_order_prefix(&stem) {
                stem = rest;
            }
            if let Some(rest) = Self::remove_suffix(&stem, DERIVATIONAL_SUFFIXES) {
                stem = rest;
            }
        }

        stem
    }

    fn name(&self) -> &'static str {
        "indonesian"
    }
}
