use serde::{Deserialize, Serialize};

use crate::error::{LaoGenError, LaoGenResult};
use crate::script;

/// Whether a consonant anchor is a single letter or a ຫ-led cluster.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsonantKind {
	Single,
	Cluster,
}

/// A grapheme (or grapheme cluster) acting as a syllable's structural anchor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConsonantEntry {
	pub grapheme: String,
	pub kind: ConsonantKind,
}

impl ConsonantEntry {
	pub fn single(grapheme: &str) -> Self {
		Self { grapheme: grapheme.to_owned(), kind: ConsonantKind::Single }
	}

	pub fn cluster(grapheme: &str) -> Self {
		Self { grapheme: grapheme.to_owned(), kind: ConsonantKind::Cluster }
	}

	/// Checks that the entry is a Lao string starting with a consonant letter.
	///
	/// # Errors
	/// Returns a description of the first problem found.
	pub fn check(&self) -> Result<(), String> {
		let first = match self.grapheme.chars().next() {
			Some(c) => c,
			None => return Err("empty consonant entry".to_owned()),
		};
		if !script::is_consonant(first) {
			return Err(format!("consonant entry {:?} does not start with a consonant letter", self.grapheme));
		}
		if let Some(c) = self.grapheme.chars().find(|c| !script::is_lao(*c)) {
			return Err(format!("consonant entry {:?} contains non-Lao codepoint U+{:04X}", self.grapheme, c as u32));
		}
		Ok(())
	}
}

/// How a vowel's written form is placed around the consonant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attachment {
	/// Written after the consonant.
	Suffix { suffix: String },
	/// Wraps the consonant: `prefix + consonant + suffix`.
	Circumfix { prefix: String, suffix: String },
	/// Written before the consonant.
	Prefix { prefix: String },
}

/// Grouping used for organisation only; has no effect on composition.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VowelGroup {
	Simple,
	E,
	Ae,
	O,
	Special,
}

/// A vowel's written form plus its attachment pattern.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VowelTemplate {
	pub form: String,
	pub attachment: Attachment,
	pub group: VowelGroup,
}

impl VowelTemplate {
	pub fn suffix(form: &str, group: VowelGroup) -> Self {
		Self {
			form: form.to_owned(),
			attachment: Attachment::Suffix { suffix: form.to_owned() },
			group,
		}
	}

	/// Builds a circumfix template: the first character of `form` goes before
	/// the consonant, the rest after it.
	pub fn circumfix(form: &str, group: VowelGroup) -> Self {
		let mut chars = form.chars();
		let prefix: String = chars.next().map(String::from).unwrap_or_default();
		let suffix: String = chars.collect();
		Self {
			form: form.to_owned(),
			attachment: Attachment::Circumfix { prefix, suffix },
			group,
		}
	}

	pub fn prefix(form: &str, group: VowelGroup) -> Self {
		Self {
			form: form.to_owned(),
			attachment: Attachment::Prefix { prefix: form.to_owned() },
			group,
		}
	}

	/// Checks that every fragment is non-empty Lao and that the fragments
	/// spell out `form`.
	///
	/// # Errors
	/// Returns a description of the first problem found.
	pub fn check(&self) -> Result<(), String> {
		let pieces: Vec<&str> = match &self.attachment {
			Attachment::Suffix { suffix } => vec![suffix],
			Attachment::Circumfix { prefix, suffix } => vec![prefix, suffix],
			Attachment::Prefix { prefix } => vec![prefix],
		};
		for piece in &pieces {
			if !script::is_pure_lao(piece) {
				return Err(format!("vowel template {:?} has an empty or non-Lao fragment {:?}", self.form, piece));
			}
		}
		if pieces.concat() != self.form {
			return Err(format!("vowel template fragments {:?} do not spell {:?}", pieces, self.form));
		}
		Ok(())
	}
}

/// A tone: a combining mark, or nothing for the unmarked tone.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ToneMark {
	pub symbol: String,
	pub name: String,
	pub name_en: String,
}

impl ToneMark {
	pub fn new(symbol: &str, name: &str, name_en: &str) -> Self {
		Self { symbol: symbol.to_owned(), name: name.to_owned(), name_en: name_en.to_owned() }
	}

	/// An empty symbol or exactly one tone mark.
	///
	/// # Errors
	/// Returns a description of the problem.
	pub fn check(&self) -> Result<(), String> {
		let mut chars = self.symbol.chars();
		match (chars.next(), chars.next()) {
			(None, _) => Ok(()),
			(Some(c), None) if script::is_tone_mark(c) => Ok(()),
			_ => Err(format!("tone {:?} is not a single tone mark: {:?}", self.name_en, self.symbol)),
		}
	}
}

/// Alternate spellings sharing one pronunciation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VariantGroup {
	pub canonical: String,
	pub alternates: Vec<String>,
}

/// Closed lexicon for subject + verb + object template phrases.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PhraseLexicon {
	pub subjects: Vec<String>,
	pub verbs: Vec<String>,
	pub objects: Vec<String>,
	pub greetings: Vec<String>,
}

/// The closed grapheme tables driving the whole generator.
///
/// Table order is significant: it fixes the enumeration order and
/// therefore dataset reproducibility.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RuleTables {
	pub consonants: Vec<ConsonantEntry>,
	pub vowels: Vec<VowelTemplate>,
	pub tones: Vec<ToneMark>,
	#[serde(default)]
	pub variants: Vec<VariantGroup>,
	#[serde(default)]
	pub phrases: PhraseLexicon,
}

const SINGLE_CONSONANTS: [&str; 27] = [
	"ກ", "ຂ", "ຄ", "ງ", "ຈ", "ຊ", "ຍ", "ດ", "ຕ", "ຖ", "ທ", "ນ", "ບ", "ປ",
	"ຜ", "ຝ", "ພ", "ຟ", "ມ", "ຢ", "ຣ", "ລ", "ວ", "ສ", "ຫ", "ອ", "ຮ",
];

const CLUSTER_CONSONANTS: [&str; 10] = ["ຫງ", "ຫຍ", "ຫນ", "ຫມ", "ຫລ", "ຫວ", "ຫຣ", "ຫຼ", "ຫຢ", "ຫອ"];

const SIMPLE_VOWELS: [&str; 10] = ["ະ", "າ", "ິ", "ີ", "ຶ", "ື", "ຸ", "ູ", "ົ", "ອ"];
const E_VOWELS: [&str; 8] = ["ເະ", "ເາ", "ເິະ", "ເີາ", "ເຶອ", "ເືອ", "ເຸອ", "ເູອ"];
const AE_VOWELS: [&str; 2] = ["ແະ", "ແາ"];
const O_VOWELS: [&str; 2] = ["ໂະ", "ໂາ"];
const PREFIX_VOWELS: [&str; 2] = ["ໄ", "ໃ"];
const SPECIAL_SUFFIX_VOWELS: [&str; 4] = ["ຳ", "ຽ", "ຽະ", "ຽາ"];

fn owned(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| (*s).to_owned()).collect()
}

impl RuleTables {
	/// Built-in Lao tables: 37 consonant anchors, 28 vowel templates, 5 tones.
	pub fn lao() -> Self {
		let consonants = SINGLE_CONSONANTS
			.iter()
			.map(|c| ConsonantEntry::single(c))
			.chain(CLUSTER_CONSONANTS.iter().map(|c| ConsonantEntry::cluster(c)))
			.collect();

		let mut vowels: Vec<VowelTemplate> = Vec::with_capacity(28);
		vowels.extend(SIMPLE_VOWELS.iter().map(|v| VowelTemplate::suffix(v, VowelGroup::Simple)));
		vowels.extend(E_VOWELS.iter().map(|v| VowelTemplate::circumfix(v, VowelGroup::E)));
		vowels.extend(AE_VOWELS.iter().map(|v| VowelTemplate::circumfix(v, VowelGroup::Ae)));
		vowels.extend(O_VOWELS.iter().map(|v| VowelTemplate::circumfix(v, VowelGroup::O)));
		vowels.extend(PREFIX_VOWELS.iter().map(|v| VowelTemplate::prefix(v, VowelGroup::Special)));
		vowels.extend(SPECIAL_SUFFIX_VOWELS.iter().map(|v| VowelTemplate::suffix(v, VowelGroup::Special)));

		let tones = vec![
			ToneMark::new("", "ສຽງສາມັນ", "Mid Tone"),
			ToneMark::new("\u{0EC8}", "ໄມ້ເອກ", "Low Tone"),
			ToneMark::new("\u{0EC9}", "ໄມ້ໂທ", "Falling Tone"),
			ToneMark::new("\u{0ECB}", "ໄມ້ຕີ", "High Tone"),
			ToneMark::new("\u{0ECC}", "ໄມ້ຈັດຕະວາ", "Rising Tone"),
		];

		let variants = vec![
			VariantGroup { canonical: "ຫຼ".to_owned(), alternates: owned(&["ຣ", "ຫຣ"]) },
			VariantGroup { canonical: "ຫຍ".to_owned(), alternates: owned(&["ຍ"]) },
		];

		let phrases = PhraseLexicon {
			subjects: owned(&["ຂ້ອຍ", "ເຈົ້າ", "ລາວ", "ພວກເຮົາ", "ເຂົາ"]),
			verbs: owned(&["ກິນ", "ໄປ", "ມາ", "ຮຽນ", "ເຮັດ", "ເວົ້າ", "ຟັງ", "ເບິ່ງ"]),
			objects: owned(&["ເຂົ້າ", "ນ້ຳ", "ໜັງສື", "ວຽກ", "ໂຮງຮຽນ", "ບ້ານ"]),
			greetings: owned(&["ສະບາຍດີ", "ສະບາຍດີບໍ່", "ຂອບໃຈ", "ຂໍໂທດ", "ລາກ່ອນ", "ແລ້ວພົບກັນໃໝ່", "ຢູ່ດີບໍ່"]),
		};

		Self { consonants, vowels, tones, variants, phrases }
	}

	/// Parses tables from TOML.
	///
	/// Malformed individual entries are accepted here and skipped at
	/// enumeration time; only tables that cannot produce anything are rejected.
	///
	/// # Errors
	/// - `ConfigParse` if the document is not valid TOML for this schema.
	/// - `InvalidRuleTable` if the consonant, vowel or tone table is empty.
	pub fn from_toml_str(source: &str) -> LaoGenResult<Self> {
		let tables: Self = toml::from_str(source).map_err(|e| LaoGenError::ConfigParse {
			path: "<rule tables>".to_owned(),
			reason: e.to_string(),
		})?;
		tables.check_not_empty()?;
		Ok(tables)
	}

	fn check_not_empty(&self) -> LaoGenResult<()> {
		if self.consonants.is_empty() {
			return Err(LaoGenError::InvalidRuleTable("no consonants".to_owned()));
		}
		if self.vowels.is_empty() {
			return Err(LaoGenError::InvalidRuleTable("no vowel templates".to_owned()));
		}
		if self.tones.is_empty() {
			return Err(LaoGenError::InvalidRuleTable("no tones".to_owned()));
		}
		Ok(())
	}

	/// Upper bound of the single-syllable space, `|C| x |V| x |T|`.
	pub fn total_possible(&self) -> usize {
		self.consonants.len() * self.vowels.len() * self.tones.len()
	}
}

impl Default for RuleTables {
	fn default() -> Self {
		Self::lao()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lao_table_sizes() {
		let tables = RuleTables::lao();
		assert_eq!(tables.consonants.len(), 37);
		assert_eq!(tables.vowels.len(), 28);
		assert_eq!(tables.tones.len(), 5);
		assert_eq!(tables.total_possible(), 5180);
	}

	#[test]
	fn test_lao_tables_are_well_formed() {
		let tables = RuleTables::lao();
		for c in &tables.consonants {
			assert!(c.check().is_ok(), "{:?}", c);
		}
		for v in &tables.vowels {
			assert!(v.check().is_ok(), "{:?}", v);
		}
		for t in &tables.tones {
			assert!(t.check().is_ok(), "{:?}", t);
		}
	}

	#[test]
	fn test_circumfix_split() {
		let v = VowelTemplate::circumfix("ເືອ", VowelGroup::E);
		assert_eq!(v.attachment, Attachment::Circumfix { prefix: "ເ".to_owned(), suffix: "ືອ".to_owned() });
	}

	#[test]
	fn test_malformed_entries() {
		// Tibetan BA looks like ບ but is outside the Lao block
		assert!(ConsonantEntry::single("\u{0F56}").check().is_err());
		assert!(ConsonantEntry::single("").check().is_err());
		assert!(ConsonantEntry::single("າ").check().is_err());
		assert!(VowelTemplate::circumfix("ເ", VowelGroup::E).check().is_err());
		assert!(ToneMark::new("ກ", "bad", "bad").check().is_err());
		assert!(ToneMark::new("\u{0EC8}\u{0EC9}", "bad", "bad").check().is_err());
	}

	#[test]
	fn test_from_toml() {
		let source = r#"
			[[consonants]]
			grapheme = "ກ"
			kind = "single"

			[[vowels]]
			form = "າ"
			group = "simple"
			attachment = { kind = "suffix", suffix = "າ" }

			[[tones]]
			symbol = ""
			name = "ສາມັນ"
			name_en = "Mid Tone"
		"#;
		let tables = RuleTables::from_toml_str(source).unwrap();
		assert_eq!(tables.total_possible(), 1);
		assert!(tables.variants.is_empty());
	}

	#[test]
	fn test_from_toml_rejects_empty_tables() {
		let source = "consonants = []\nvowels = []\ntones = []\n";
		assert!(matches!(RuleTables::from_toml_str(source), Err(LaoGenError::InvalidRuleTable(_))));
		assert!(matches!(RuleTables::from_toml_str("nonsense = ["), Err(LaoGenError::ConfigParse { .. })));
	}
}
