//! Closed word lists and character sets used by the segmenter.

/// Frequent function words and particles.
pub(crate) const COMMON_WORDS: [&str; 30] = [
	"ແລະ", "ຫຼື", "ກັບ", "ຂອງ", "ທີ່", "ໃນ", "ຢູ່", "ມີ", "ເປັນ", "ໄດ້",
	"ຈະ", "ບໍ່", "ບໍ", "ແມ່ນ", "ກໍ", "ຍັງ", "ແລ້ວ", "ເດີ້", "ເທົ່ານັ້ນ", "ພຽງແຕ່",
	"ສຳລັບ", "ເພື່ອ", "ຈາກ", "ໄປ", "ມາ", "ຂຶ້ນ", "ລົງ", "ອອກ", "ເຂົ້າ", "ຜ່ານ",
];

/// Discourse connectors used to build connector phrases.
pub(crate) const CONNECTORS: [&str; 14] = [
	"ແລະ", "ຫຼື", "ແຕ່", "ເພາະວ່າ", "ຖ້າ", "ເມື່ອ", "ໃນຂະນະທີ່", "ຫຼັງຈາກ",
	"ກ່ອນທີ່", "ເພື່ອທີ່", "ເຖິງແມ່ນວ່າ", "ເນື່ອງຈາກ", "ດັ່ງນັ້ນ", "ຢ່າງໃດກໍຕາມ",
];

/// Characters that may close a sentence.
pub(crate) const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

/// Characters that open or close a quoted span; typographic quotes are
/// folded onto these by normalization.
pub(crate) const QUOTES: [char; 2] = ['"', '\''];

/// Substrings left behind by broken font encodings or PDF extraction.
pub(crate) const GARBLED_PATTERNS: [&str; 12] = [
	"◊", "�", "□", ":t^", "Tj[L", "PSw*", "EVIH/", "C5nkf]", "ObBz+", "Q7bq", "%OM{", "j<PSw",
];

pub(crate) fn is_common_word(word: &str) -> bool {
	COMMON_WORDS.contains(&word)
}

/// Word boundary: whitespace, ASCII punctuation, Lao ellipsis and repetition marks.
pub(crate) fn is_word_boundary(c: char) -> bool {
	c.is_whitespace() || c.is_ascii_punctuation() || matches!(c, '\u{0EAF}' | '\u{0EC6}')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_boundaries() {
		assert!(is_word_boundary(' '));
		assert!(is_word_boundary(','));
		assert!(is_word_boundary('ຯ'));
		assert!(!is_word_boundary('ກ'));
		assert!(!is_word_boundary('7'));
	}

	#[test]
	fn test_common_words() {
		assert!(is_common_word("ແລະ"));
		assert!(!is_common_word("ສະບາຍດີ"));
	}
}
