//! Translation bundle generation.
//!
//! Language files of every package and frontend are grouped by language code
//! into one script per code. Each script pushes one item per contributing
//! source onto `window.jalno.translator.langs[<code>]`; phrases repeated by
//! several sources are all kept, in contribution order.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{LanguageFile, Package};
use crate::ops::compile::{BOOTSTRAP, GENERATED_BANNER};
use crate::util::config::ResolvedConfig;
use crate::util::fs::{check_file_stem, OutputFile};

const LANGS_GLOBAL: &str = "window.jalno.translator.langs";

/// Phrases contributed by one package or frontend for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationItem {
    /// `<package>-package` or `<derived-frontend-name>-frontend`
    pub source: String,
    pub phrases: BTreeMap<String, String>,
    #[serde(rename = "isRightToLeft")]
    pub is_right_to_left: bool,
}

impl TranslationItem {
    fn from_file(source: &str, file: &LanguageFile) -> Self {
        TranslationItem {
            source: source.to_string(),
            phrases: file.phrases().clone(),
            is_right_to_left: file.is_rtl(),
        }
    }
}

/// Every item contributed for one language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBundle {
    pub code: String,
    pub items: Vec<TranslationItem>,
}

/// Group language files by code.
///
/// Packages are visited in order; a package's own files come before the
/// files of its frontends. Codes keep the order they are first seen in.
pub fn collect_translations(packages: &[Package]) -> Vec<LanguageBundle> {
    let mut bundles: Vec<LanguageBundle> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut push = |source: &str, file: &LanguageFile| {
        let idx = *index.entry(file.code().to_string()).or_insert_with(|| {
            bundles.push(LanguageBundle {
                code: file.code().to_string(),
                items: Vec::new(),
            });
            bundles.len() - 1
        });
        bundles[idx].items.push(TranslationItem::from_file(source, file));
    };

    for package in packages {
        let source = format!("{}-package", package.name());
        for file in package.languages() {
            push(&source, file);
        }

        for frontend in package.frontends() {
            let source = format!("{}-frontend", frontend.npm_like_name());
            for file in frontend.languages() {
                push(&source, file);
            }
        }
    }

    bundles
}

/// Full content of a generated translation script.
pub fn render_bundle(bundle: &LanguageBundle) -> Result<String> {
    let key = serde_json::to_string(&bundle.code)?;
    let target = format!("{}[{}]", LANGS_GLOBAL, key);

    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push('\n');
    out.push_str(BOOTSTRAP);
    out.push_str(&format!("{0} = {0} || {{}};\n", LANGS_GLOBAL));
    out.push_str(&format!("{0} = {0} || [];\n", target));

    for item in &bundle.items {
        let json = serde_json::to_string(item)
            .with_context(|| format!("failed to encode translations of {}", item.source))?;
        out.push_str(&format!("{}.push({});\n", target, json));
    }

    Ok(out)
}

/// Plan one translation script per language code.
pub fn translation_outputs(packages: &[Package], config: &ResolvedConfig) -> Result<Vec<OutputFile>> {
    let output_dir = config.translations_dir();

    collect_translations(packages)
        .iter()
        .map(|bundle| -> Result<OutputFile> {
            check_file_stem(&bundle.code, "language")?;
            let path = output_dir.join(config.translation_file_name_for(&bundle.code));
            Ok(OutputFile::new(path, render_bundle(bundle)?))
        })
        .collect()
}
