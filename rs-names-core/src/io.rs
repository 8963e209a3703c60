use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::{env, fs, io};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Replaces the content of a file with one line per item.
pub(crate) fn write_lines<P: AsRef<Path>>(filename: P, lines: &[String]) -> io::Result<()> {
	let mut file = File::create(filename)?;
	for line in lines {
		writeln!(file, "{line}")?;
	}
	Ok(())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/orc_male.txt"` → `"orc_male"`
/// - `"orc_male.txt"` → `"orc_male"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path: `"."` and `"./"` resolve to the working directory.
pub(crate) fn normalize_folder(input: &Path) -> std::path::PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| input.to_path_buf())
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Returns file names only (no paths).
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lists_only_matching_files() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("orc_male.txt"), "Grom\n").unwrap();
		fs::write(dir.path().join("elf_last.txt"), "").unwrap();
		fs::write(dir.path().join("notes.md"), "").unwrap();
		fs::create_dir(dir.path().join("nested.txt")).unwrap();

		assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["elf_last.txt", "orc_male.txt"]);
	}

	#[test]
	fn write_then_read_lines() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("names.txt");
		write_lines(&path, &["Ada".to_owned(), "Bree".to_owned()]).unwrap();
		assert_eq!(read_file(&path).unwrap(), vec!["Ada", "Bree"]);
	}

	#[test]
	fn filename_without_extension() {
		assert_eq!(get_filename("./data/orc_male.txt").unwrap(), "orc_male");
		assert!(get_filename("/").is_err());
	}
}
