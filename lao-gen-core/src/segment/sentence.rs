use super::lexicon::{QUOTES, SENTENCE_ENDINGS};
use super::weights::SentenceWeights;
use crate::script;

/// Splits a line into sentences.
///
/// A terminal mark closes a sentence only outside quotes and only when it is
/// followed by whitespace then a capital or Lao consonant, or by the end of
/// the text. Decimal points and single-letter abbreviations never split.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
	let chars: Vec<char> = text.chars().collect();
	let mut sentences = Vec::new();
	let mut current = String::new();
	let mut open_quote: Option<char> = None;

	for (i, &c) in chars.iter().enumerate() {
		current.push(c);

		if QUOTES.contains(&c) && !is_apostrophe(&chars, i) {
			match open_quote {
				None => open_quote = Some(c),
				Some(q) if q == c => open_quote = None,
				Some(_) => {}
			}
			continue;
		}

		if open_quote.is_none() && SENTENCE_ENDINGS.contains(&c) && ends_sentence(&chars, i) {
			push_trimmed(&mut sentences, &current);
			current.clear();
		}
	}
	push_trimmed(&mut sentences, &current);
	sentences
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
	let trimmed = sentence.trim();
	if !trimmed.is_empty() {
		sentences.push(trimmed.to_owned());
	}
}

/// A single quote between two letters is an apostrophe, not a quote.
fn is_apostrophe(chars: &[char], i: usize) -> bool {
	let is_letter = |c: &char| c.is_alphabetic();
	chars[i] == '\'' && i > 0 && is_letter(&chars[i - 1]) && chars.get(i + 1).is_some_and(is_letter)
}

fn ends_sentence(chars: &[char], i: usize) -> bool {
	let prev = i.checked_sub(1).map(|j| chars[j]);
	let next = chars.get(i + 1).copied();

	if chars[i] == '.' {
		// 3.14, ໓.໕
		if prev.is_some_and(script::is_digit) && next.is_some_and(script::is_digit) {
			return false;
		}
		// e.g, etc.
		if prev.is_some_and(|p| p.is_ascii_alphabetic() || script::is_consonant(p)) && next.is_some_and(|n| n.is_ascii_lowercase()) {
			return false;
		}
		// A. Smith, U.S.
		if prev.is_some_and(|p| p.is_ascii_alphabetic()) && (i < 2 || chars[i - 2].is_whitespace() || chars[i - 2] == '.') {
			return false;
		}
	}

	let rest = &chars[i + 1..];
	let gap = rest.iter().take_while(|c| c.is_whitespace()).count();
	match rest.get(gap) {
		None => true,
		Some(first) => gap > 0 && script::is_sentence_initial(*first),
	}
}

pub(crate) fn sentence_confidence(sentence: &str, w: &SentenceWeights) -> f64 {
	let mut confidence = w.base;
	if sentence.chars().next().is_some_and(script::is_sentence_initial) {
		confidence += w.initial_bonus;
	}
	if sentence.chars().last().is_some_and(|c| SENTENCE_ENDINGS.contains(&c)) {
		confidence += w.terminal_bonus;
	}
	if script::count_words(sentence) >= 2 {
		confidence += w.multi_word_bonus;
	}
	if script::contains_lao(sentence) {
		confidence += w.script_bonus;
	}
	let len = script::char_len(sentence);
	if len < w.short_below {
		confidence -= w.short_penalty;
	}
	if len > w.long_above {
		confidence -= w.long_penalty;
	}
	confidence.clamp(w.floor, w.ceiling)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::segment::weights::ConfidenceWeights;

	#[test]
	fn test_split_on_terminal_then_initial() {
		assert_eq!(
			split_sentences("ຂ້ອຍໄປຮຽນ. ລາວໄປເຮັດວຽກ! Done"),
			vec!["ຂ້ອຍໄປຮຽນ.", "ລາວໄປເຮັດວຽກ!", "Done"]
		);
	}

	#[test]
	fn test_no_split_without_whitespace_or_initial() {
		assert_eq!(split_sentences("ກາ.ຂາ"), vec!["ກາ.ຂາ"]);
		assert_eq!(split_sentences("ok. then"), vec!["ok. then"]);
	}

	#[test]
	fn test_no_split_inside_quotes() {
		assert_eq!(
			split_sentences("ລາວເວົ້າ \"ດີ. ບໍ່\" ແລ້ວ. ຂ້ອຍມາ"),
			vec!["ລາວເວົ້າ \"ດີ. ບໍ່\" ແລ້ວ.", "ຂ້ອຍມາ"]
		);
	}

	#[test]
	fn test_apostrophe_does_not_open_quote() {
		assert_eq!(split_sentences("It's fine. Next"), vec!["It's fine.", "Next"]);
	}

	#[test]
	fn test_decimal_and_abbreviation() {
		assert_eq!(split_sentences("ລາຄາ 3.5 ກີບ"), vec!["ລາຄາ 3.5 ກີບ"]);
		assert_eq!(split_sentences("ທ່ານ A. Smith ມາ"), vec!["ທ່ານ A. Smith ມາ"]);
		assert_eq!(split_sentences("ຢູ່ U.S. ແລ້ວ"), vec!["ຢູ່ U.S. ແລ້ວ"]);
	}

	#[test]
	fn test_end_of_text_and_empty() {
		assert_eq!(split_sentences("ກ ຂ ຄ."), vec!["ກ ຂ ຄ."]);
		assert!(split_sentences("   ").is_empty());
	}

	#[test]
	fn test_sentence_confidence() {
		let w = ConfidenceWeights::V1.sentence;
		// 0.6 + initial + terminal + words + script
		assert!((sentence_confidence("ຂ້ອຍ ໄປ ຮຽນ.", &w) - 1.0).abs() < 1e-9);
		// 0.6 + words - short
		assert!((sentence_confidence("a b", &w) - 0.6).abs() < 1e-9);
		// floor
		assert!(sentence_confidence("x", &w) >= w.floor);
	}
}
