use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use dialoguer::Input;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Two words to compare, as read from a pairs file.
pub type WordPair = (String, String);

/// Turns a typed word into the symbol sequence the distance functions see.
/// Lower-cases unless `keep_case` is set.
pub fn normalize_word(word: &str, keep_case: bool) -> Vec<char> {
    if keep_case {
        word.chars().collect()
    } else {
        word.to_lowercase().chars().collect()
    }
}

/// Prompts on the terminal for two words and returns them normalized.
pub fn prompt_words(keep_case: bool) -> Result<(Vec<char>, Vec<char>), dialoguer::Error> {
    let first: String = Input::new()
        .with_prompt("Enter the first word")
        .interact_text()?;
    let second: String = Input::new()
        .with_prompt("Enter the second word")
        .interact_text()?;
    Ok((
        normalize_word(first.trim(), keep_case),
        normalize_word(second.trim(), keep_case),
    ))
}

/// Loads word pairs from a file, one pair per line. Paths ending in `.gz` are
/// read as gzip.
pub fn load_pairs(path: &Path) -> Result<Vec<WordPair>> {
    let file = File::open(path).map_err(|source| Error::OpenPairs {
        path: path.to_path_buf(),
        source,
    })?;

    let source_name = format!("pairs file '{}'", path.display());
    let is_gzipped = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzipped {
        info!(path = %path.display(), "reading gzipped pairs file");
    }
    parse_pairs(open_reader(file, is_gzipped), &source_name)
}

/// Same as [`load_pairs`] for content already in memory.
pub fn load_pairs_from_bytes(content: &[u8], is_gzipped: bool) -> Result<Vec<WordPair>> {
    parse_pairs(open_reader(content, is_gzipped), "pairs input")
}

fn open_reader<'a, R: Read + 'a>(inner: R, is_gzipped: bool) -> Box<dyn BufRead + 'a> {
    if is_gzipped {
        Box::new(BufReader::new(GzDecoder::new(inner)))
    } else {
        Box::new(BufReader::new(inner))
    }
}

/// Parses `first second` lines. Blank lines and `#` comments are skipped.
pub fn parse_pairs<R: BufRead>(reader: R, source_name: &str) -> Result<Vec<WordPair>> {
    let mut pairs = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line_result.map_err(|source| Error::ReadPairs {
            source_name: source_name.to_string(),
            line: line_no,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        match words.as_slice() {
            [first, second] => pairs.push((first.to_string(), second.to_string())),
            _ => {
                return Err(Error::MalformedPair {
                    source_name: source_name.to_string(),
                    line: line_no,
                    found: words.len(),
                })
            }
        }
    }

    debug!(count = pairs.len(), source = source_name, "parsed word pairs");
    Ok(pairs)
}
