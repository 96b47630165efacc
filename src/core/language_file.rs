//! Translation phrase files.
//!
//! Two shapes are accepted:
//! - legacy: `{ "author"?: {...}, "rtl"?: bool, "phrases": { ... } }`
//! - flat: `{ "<key>": "<phrase>", ... }`
//!
//! The shape is detected once, by checking whether `phrases` is an object.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::core::error::LoadError;

/// Name of the directory holding language files next to a manifest.
pub const LANGS_DIR: &str = "langs";

/// Extension of language files inside [`LANGS_DIR`].
pub const LANGUAGE_FILE_EXTENSION: &str = "json";

/// Language codes written right to left.
pub const RTL_LANGUAGE_CODES: [&str; 10] =
    ["ar", "dv", "fa", "ha", "he", "ks", "ku", "ps", "ur", "yi"];

/// Author block of a legacy language file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Legacy language file with metadata around the phrase map.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyLanguageFile {
    #[serde(default)]
    pub author: Option<LanguageAuthor>,
    #[serde(default)]
    pub rtl: Option<bool>,
    pub phrases: BTreeMap<String, String>,
}

/// The on-disk shape of a language file.
#[derive(Debug, Clone)]
pub enum LanguageFileFormat {
    Legacy(LegacyLanguageFile),
    Flat(BTreeMap<String, String>),
}

impl LanguageFileFormat {
    /// Detect the shape of a parsed document and decode it.
    pub fn detect(value: Value) -> Result<Self, serde_json::Error> {
        let is_legacy = value
            .as_object()
            .and_then(|obj| obj.get("phrases"))
            .is_some_and(Value::is_object);

        if is_legacy {
            serde_json::from_value(value).map(LanguageFileFormat::Legacy)
        } else {
            serde_json::from_value(value).map(LanguageFileFormat::Flat)
        }
    }
}

/// Phrases of one language, contributed by a package or a frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    code: String,
    phrases: BTreeMap<String, String>,
    rtl: Option<bool>,
}

impl LanguageFile {
    /// Create a language file from already decoded phrases.
    pub fn new(code: impl Into<String>, phrases: BTreeMap<String, String>, rtl: Option<bool>) -> Self {
        LanguageFile {
            code: code.into(),
            phrases,
            rtl,
        }
    }

    /// Load and decode a single language file.
    pub fn load(path: &Path, code: &str) -> Result<Self, LoadError> {
        if !path.is_file() {
            tracing::error!("language file {} does not exist", path.display());
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::parse(&content, path, code)
    }

    /// Decode language file content.
    pub fn parse(content: &str, path: &Path, code: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(content).map_err(|e| LoadError::parse(path, e))?;

        match LanguageFileFormat::detect(value).map_err(|e| LoadError::parse(path, e))? {
            LanguageFileFormat::Legacy(legacy) => Ok(LanguageFile::new(code, legacy.phrases, legacy.rtl)),
            LanguageFileFormat::Flat(phrases) => Ok(LanguageFile::new(code, phrases, None)),
        }
    }

    /// The language code, taken from the file name.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn phrases(&self) -> &BTreeMap<String, String> {
        &self.phrases
    }

    /// Explicit `rtl` flag if the file declared one, else whether the code
    /// is a known right-to-left language.
    pub fn is_rtl(&self) -> bool {
        match self.rtl {
            Some(rtl) => rtl,
            None => RTL_LANGUAGE_CODES.contains(&self.code.as_str()),
        }
    }
}

/// Load every `*.json` file of `dir` as a language file keyed by its stem.
///
/// A missing directory yields no languages. Files are loaded in parallel and
/// returned ordered by file name; any failure fails the whole directory.
pub fn load_languages_dir(dir: &Path) -> Result<Vec<LanguageFile>, LoadError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<(PathBuf, String)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => LoadError::io(path, io),
                None => LoadError::parse(path, "filesystem loop"),
            }
        })?;

        // Symlinked language files count; broken links are skipped.
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some(LANGUAGE_FILE_EXTENSION) {
            continue;
        }

        if let Some(code) = path.file_stem().and_then(|s| s.to_str()) {
            files.push((path.to_path_buf(), code.to_string()));
        }
    }

    tracing::debug!("Loading {} language files from {}", files.len(), dir.display());

    let results: Vec<Result<LanguageFile, LoadError>> = files
        .par_iter()
        .map(|(path, code)| LanguageFile::load(path, code))
        .collect();

    results.into_iter().collect()
}
