use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::{NameGenError, Result};

/// Reads a corpus file and returns its training entries.
///
/// - One name per line (a name may contain several whitespace-separated words)
/// - Lines are trimmed; blank lines and `#` comment lines are skipped
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
	let path = path.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| NameGenError::io(e, Some(path.to_path_buf())))?;

	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(str::to_owned)
		.collect())
}

/// Builds a sibling path with a different extension.
///
/// Example:
/// `data/elvish.txt` + `"bin"` → `data/elvish.bin`
pub(crate) fn sibling_with_extension<P: AsRef<Path>>(path: P, extension: &str) -> Result<PathBuf> {
	let path = path.as_ref();
	let mut output = path.to_path_buf();
	if !output.set_extension(extension) {
		return Err(NameGenError::io(
			std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no filename"),
			Some(path.to_path_buf()),
		));
	}
	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/elvish.txt"` → `"elvish"`
/// - `"elvish.txt"` → `"elvish"`
pub(crate) fn file_stem<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	let stem = path.file_stem().ok_or_else(|| {
		NameGenError::io(
			std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no filename"),
			Some(path.to_path_buf()),
		)
	})?;
	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted for a stable listing.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let dir = dir.as_ref();
	let mut files = Vec::new();

	let entries = fs::read_dir(dir).map_err(|e| NameGenError::io(e, Some(dir.to_path_buf())))?;
	for entry in entries {
		let entry = entry.map_err(|e| NameGenError::io(e, Some(dir.to_path_buf())))?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Write;

	#[test]
	fn read_corpus_skips_blanks_and_comments() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("elvish.txt");
		let mut file = File::create(&path).expect("create corpus");
		writeln!(file, "# elvish names\n\nLegolas\n  Thranduil  \n\nElrond").expect("write corpus");

		let names = read_corpus(&path).expect("corpus reads");
		assert_eq!(names, vec!["Legolas", "Thranduil", "Elrond"]);
	}

	#[test]
	fn read_corpus_reports_the_failing_path() {
		let err = read_corpus("no/such/corpus.txt").expect_err("file does not exist");
		assert!(matches!(err, NameGenError::Io { path: Some(_), .. }));
	}

	#[test]
	fn list_files_filters_by_extension() {
		let dir = tempfile::tempdir().expect("temp dir");
		for name in ["b.txt", "a.txt", "c.bin", "d.md"] {
			File::create(dir.path().join(name)).expect("create file");
		}

		let files = list_files(dir.path(), "txt").expect("directory lists");
		assert_eq!(files, vec!["a.txt", "b.txt"]);
	}

	#[test]
	fn sibling_path_swaps_the_extension() {
		let path = sibling_with_extension("data/elvish.txt", "bin").expect("valid path");
		assert_eq!(path, PathBuf::from("data/elvish.bin"));
	}

	#[test]
	fn file_stem_drops_directory_and_extension() {
		assert_eq!(file_stem("./data/elvish.txt").expect("valid path"), "elvish");
		assert_eq!(file_stem("elvish.txt").expect("valid path"), "elvish");
	}
}
