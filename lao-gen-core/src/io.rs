use std::path::{Path, PathBuf};
use std::{env, fs};

use tracing::warn;

use crate::error::{LaoGenError, LaoGenResult};
use crate::script;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Invalid UTF-8 sequences are replaced, not rejected
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(path: P) -> LaoGenResult<Vec<String>> {
	let bytes = fs::read(path)?;
	Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_owned).collect())
}

/// Reads a whole document for segmentation.
///
/// # Errors
/// - Returns `Io` if the file cannot be read.
/// - Returns `NoScriptText` if the document holds no Lao character.
///
/// # Notes
/// Invalid UTF-8 is decoded lossily; the replacement characters are dropped
/// later by normalization.
pub fn read_document<P: AsRef<Path>>(path: P) -> LaoGenResult<String> {
	let path = path.as_ref();
	let bytes = fs::read(path)?;
	let text = String::from_utf8_lossy(&bytes).into_owned();
	if !script::contains_lao(&text) {
		return Err(LaoGenError::NoScriptText(path.display().to_string()));
	}
	Ok(text)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Returns file names only (no paths).
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> LaoGenResult<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

/// Reads every document with the given extension in a folder.
///
/// Returns `(file name, content)` pairs; documents without Lao text are
/// skipped with a warning.
///
/// # Errors
/// Returns an error if the folder cannot be listed or a file cannot be read.
pub fn read_folder(folder: &str, extension: &str) -> LaoGenResult<Vec<(String, String)>> {
	let folder = normalize_folder(folder);
	let mut documents = Vec::new();
	for name in list_files(&folder, extension)? {
		match read_document(folder.join(&name)) {
			Ok(text) => documents.push((name, text)),
			Err(LaoGenError::NoScriptText(path)) => warn!("Skipping {}: no Lao text", path),
			Err(e) => return Err(e),
		}
	}
	Ok(documents)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scratch_dir(name: &str) -> PathBuf {
		let dir = env::temp_dir().join(format!("lao-gen-io-{}-{}", name, std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		dir
	}

	#[test]
	fn test_read_document_and_lines() {
		let dir = scratch_dir("doc");
		let path = dir.join("a.txt");
		fs::write(&path, "ສະບາຍດີ\r\nລາວ\n").unwrap();
		assert_eq!(read_lines(&path).unwrap(), vec!["ສະບາຍດີ", "ລາວ"]);
		assert!(read_document(&path).unwrap().contains("ລາວ"));
		fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn test_read_document_rejects_non_lao_and_decodes_lossily() {
		let dir = scratch_dir("lossy");
		let latin = dir.join("latin.txt");
		fs::write(&latin, "hello").unwrap();
		assert!(matches!(read_document(&latin), Err(LaoGenError::NoScriptText(_))));

		let broken = dir.join("broken.txt");
		let mut bytes = "ລາວ".as_bytes().to_vec();
		bytes.push(0xFF);
		fs::write(&broken, bytes).unwrap();
		assert!(read_document(&broken).unwrap().starts_with("ລາວ"));
		fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn test_list_and_read_folder() {
		let dir = scratch_dir("folder");
		fs::write(dir.join("b.txt"), "ຂອບໃຈ").unwrap();
		fs::write(dir.join("a.txt"), "ລາວ").unwrap();
		fs::write(dir.join("c.txt"), "none").unwrap();
		fs::write(dir.join("d.md"), "ລາວ").unwrap();
		assert_eq!(list_files(&dir, "txt").unwrap(), vec!["a.txt", "b.txt", "c.txt"]);
		let documents = read_folder(dir.to_str().unwrap(), "txt").unwrap();
		let names: Vec<&str> = documents.iter().map(|(name, _)| name.as_str()).collect();
		assert_eq!(names, vec!["a.txt", "b.txt"]);
		fs::remove_dir_all(&dir).unwrap();
	}

	#[test]
	fn test_missing_file_is_io_error() {
		assert!(matches!(read_document("/nonexistent/doc.txt"), Err(LaoGenError::Io(_))));
	}
}
