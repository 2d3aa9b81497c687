//! Lao block (U+0E80..U+0EFF) character classes.

use std::ops::RangeInclusive;

/// The whole Lao Unicode block.
pub const LAO_BLOCK: RangeInclusive<char> = '\u{0E80}'..='\u{0EFF}';

/// Consonant letters, the structural anchors of a syllable.
pub const CONSONANTS: RangeInclusive<char> = '\u{0E81}'..='\u{0EAE}';

/// Lao digits ໐..໙.
pub const DIGITS: RangeInclusive<char> = '\u{0ED0}'..='\u{0ED9}';

/// Returns `true` for any codepoint of the Lao block.
pub fn is_lao(c: char) -> bool {
	LAO_BLOCK.contains(&c)
}

/// Returns `true` for a Lao consonant letter.
pub fn is_consonant(c: char) -> bool {
	CONSONANTS.contains(&c)
}

/// Returns `true` for the Lao ligatures and the subscript lo, which also
/// belong to the consonant class when scanning for a tone anchor.
pub fn is_consonant_class(c: char) -> bool {
	is_consonant(c) || matches!(c, '\u{0EBC}' | '\u{0EDC}'..='\u{0EDF}')
}

/// Returns `true` for the non-spacing marks that stack on a base letter
/// (vowels above/below, tone marks, cancellation mark, niggahita).
pub fn is_combining(c: char) -> bool {
	matches!(c, '\u{0EB1}' | '\u{0EB4}'..='\u{0EBC}' | '\u{0EC8}'..='\u{0ECE}')
}

/// Returns `true` for the tone marks and the cancellation mark.
pub fn is_tone_mark(c: char) -> bool {
	matches!(c, '\u{0EC8}'..='\u{0ECC}')
}

/// Returns `true` for ASCII or Lao digits.
pub fn is_digit(c: char) -> bool {
	c.is_ascii_digit() || DIGITS.contains(&c)
}

/// Characters kept by normalization: the Lao block, printable ASCII and line breaks.
pub fn is_allowed(c: char) -> bool {
	is_lao(c) || (' '..='~').contains(&c) || c == '\n'
}

/// A sentence may start here: ASCII capital or Lao consonant.
pub fn is_sentence_initial(c: char) -> bool {
	c.is_ascii_uppercase() || is_consonant(c)
}

pub fn contains_lao(s: &str) -> bool {
	s.chars().any(is_lao)
}

/// Non-empty and made of Lao codepoints only.
pub fn is_pure_lao(s: &str) -> bool {
	!s.is_empty() && s.chars().all(is_lao)
}

/// Non-empty, contains Lao, and otherwise only whitespace.
pub fn is_clean_lao(s: &str) -> bool {
	contains_lao(s) && s.chars().all(|c| is_lao(c) || c.is_whitespace())
}

pub fn has_numbers(s: &str) -> bool {
	s.chars().any(is_digit)
}

/// Lao mixed with Latin letters.
pub fn has_mixed_script(s: &str) -> bool {
	contains_lao(s) && s.chars().any(|c| c.is_ascii_alphabetic())
}

/// Length in characters, the unit every length threshold uses.
pub fn char_len(s: &str) -> usize {
	s.chars().count()
}

/// Approximates the syllable count by the number of consonant letters.
///
/// Text without any consonant counts as one syllable.
pub fn count_syllables(s: &str) -> usize {
	match s.chars().filter(|c| is_consonant(*c)).count() {
		0 => 1,
		n => n,
	}
}

/// Whitespace-separated word count.
pub fn count_words(s: &str) -> usize {
	s.split_whitespace().count()
}
