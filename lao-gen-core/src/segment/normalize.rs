use tracing::info;

use crate::script;

/// Maps typographic variants onto their ASCII form and other whitespace onto
/// a plain space. Line breaks are kept.
fn fold_char(c: char) -> char {
	match c {
		'\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '«' | '»' => '"',
		'\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
		'\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
		'\n' => '\n',
		c if c.is_whitespace() => ' ',
		c => c,
	}
}

/// Normalizes raw text.
///
/// - `\r\n` and lone `\r` become `\n`
/// - Quotes and dashes are folded to ASCII
/// - Characters outside the allow-list are dropped
/// - Runs of spaces collapse to one; every line is trimmed
pub(crate) fn normalize(raw: &str) -> String {
	let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
	let filtered: String = unified.chars().map(fold_char).filter(|c| script::is_allowed(*c)).collect();
	filtered
		.split('\n')
		.map(|line| line.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
		.collect::<Vec<_>>()
		.join("\n")
		.trim()
		.to_owned()
}

/// Keeps the first `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => {
			info!("Input truncated from {} to {} characters", script::char_len(text), max_chars);
			&text[..cut]
		}
		None => text,
	}
}

/// Splits normalized text into at most `max_lines` non-empty lines, wrapping
/// any line longer than `max_line_chars`.
pub(crate) fn split_lines(text: &str, max_lines: usize, max_line_chars: usize) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	let mut total = 0usize;
	for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
		total += 1;
		if lines.len() >= max_lines {
			continue;
		}
		for piece in wrap(line, max_line_chars) {
			if lines.len() < max_lines {
				lines.push(piece);
			}
		}
	}
	if total > lines.len() {
		info!("Input has {} lines, processing the first {}", total, lines.len());
	}
	lines
}

/// Wraps at spaces; a single word longer than the limit is cut.
///
/// A zero limit disables wrapping.
fn wrap(line: &str, max_chars: usize) -> Vec<String> {
	if max_chars == 0 || script::char_len(line) <= max_chars {
		return vec![line.to_owned()];
	}
	let mut pieces = Vec::new();
	let mut current = String::new();
	let mut current_len = 0usize;
	for word in line.split(' ') {
		let mut word: Vec<char> = word.chars().collect();
		while word.len() > max_chars {
			if !current.is_empty() {
				pieces.push(std::mem::take(&mut current));
				current_len = 0;
			}
			let rest = word.split_off(max_chars);
			pieces.push(word.into_iter().collect());
			word = rest;
		}
		let needed = if current.is_empty() { word.len() } else { word.len() + 1 };
		if current_len + needed > max_chars {
			pieces.push(std::mem::take(&mut current));
			current_len = 0;
		}
		if !current.is_empty() {
			current.push(' ');
			current_len += 1;
		}
		current_len += word.len();
		current.extend(word);
	}
	if !current.is_empty() {
		pieces.push(current);
	}
	pieces
}
