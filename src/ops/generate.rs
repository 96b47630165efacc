//! Implementation of `jalno generate`.
//!
//! Loads the registry once, then runs the style, script and translation
//! passes concurrently over the same read-only snapshot. Files are written
//! only after every pass has planned its output.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::core::{Package, PackageRegistry};
use crate::ops::compile::{compiled_outputs, AssetPass};
use crate::ops::translations::translation_outputs;
use crate::util::config::ResolvedConfig;
use crate::util::fs::OutputFile;

/// Files written by one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub styles: Vec<PathBuf>,
    pub scripts: Vec<PathBuf>,
    pub translations: Vec<PathBuf>,
}

impl GeneratedFiles {
    /// Every generated file in bundler entry order: styles, scripts, then
    /// translations.
    pub fn entry_points(&self) -> impl Iterator<Item = &PathBuf> {
        self.styles
            .iter()
            .chain(self.scripts.iter())
            .chain(self.translations.iter())
    }

    pub fn len(&self) -> usize {
        self.styles.len() + self.scripts.len() + self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fail if two planned files share a path.
fn check_overlap(passes: &[&[OutputFile]]) -> Result<()> {
    let mut seen: HashSet<&Path> = HashSet::new();
    for file in passes.iter().flat_map(|files| files.iter()) {
        if !seen.insert(file.path.as_path()) {
            bail!(
                "more than one generated file would be written to {}; \
                 use distinct styles, scripts and translations directories",
                file.path.display()
            );
        }
    }
    Ok(())
}

fn paths(files: &[OutputFile]) -> Vec<PathBuf> {
    files.iter().map(|file| file.path.clone()).collect()
}

/// Run the three passes over an already loaded snapshot.
pub fn generate_from_packages(
    packages: &[Package],
    config: &ResolvedConfig,
) -> Result<GeneratedFiles> {
    let ((styles, scripts), translations) = rayon::join(
        || {
            rayon::join(
                || compiled_outputs(packages, config, AssetPass::Style),
                || compiled_outputs(packages, config, AssetPass::Script),
            )
        },
        || translation_outputs(packages, config),
    );
    let (styles, scripts, translations) = (styles?, scripts?, translations?);

    check_overlap(&[styles.as_slice(), scripts.as_slice(), translations.as_slice()])?;

    let results: Vec<Result<()>> = styles
        .par_iter()
        .chain(scripts.par_iter())
        .chain(translations.par_iter())
        .map(|file| {
            tracing::info!("Write file into: {}", file.path.display());
            file.write()
        })
        .collect();
    for result in results {
        result?;
    }

    Ok(GeneratedFiles {
        styles: paths(&styles),
        scripts: paths(&scripts),
        translations: paths(&translations),
    })
}

/// Load `registry` (once) and generate every theme and translation file.
///
/// A registry that fails to load produces no output at all.
pub fn generate(registry: &mut PackageRegistry, config: &ResolvedConfig) -> Result<GeneratedFiles> {
    registry.load(false)?;
    let packages = registry.packages()?;

    tracing::debug!("Generating assets for {} packages", packages.len());

    let generated = generate_from_packages(packages, config)?;

    tracing::info!(
        "Generated {} style, {} script and {} translation files",
        generated.styles.len(),
        generated.scripts.len(),
        generated.translations.len()
    );

    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Asset, FrontendBuilder, LanguageFile, LoadError, ScriptType};
    use crate::sources::ComposerSource;
    use crate::test_support::{ProjectFixture, PACKAGE_MANIFEST};
    use crate::util::Config;
    use serde_json::json;

    #[test]
    fn test_generate_end_to_end() {
        let project = ProjectFixture::new()
            .root_package("acme/site", "package.json")
            .file("package.json", PACKAGE_MANIFEST)
            .file(
                "frontend/jalno.json",
                &json!({
                    "name": "default",
                    "assets": [{"type": "css", "file": "a.css"}, {"type": "js", "file": "a.js"}]
                })
                .to_string(),
            )
            .file("frontend/langs/fa.json", r#"{"hello": "salam"}"#)
            .installed_package("jalno/base", "package.json", PACKAGE_MANIFEST)
            .installed_frontend("jalno/base", "default", json!([{"type": "scss", "file": "base.scss"}]))
            .file("vendor/jalno/base/langs/fa.json", r#"{"phrases": {"bye": "khodahafez"}}"#)
            .write_installed();

        let config = Config::default().resolve(project.root()).unwrap();
        let mut registry = PackageRegistry::new(Box::new(ComposerSource::new(project.root())));

        let generated = generate(&mut registry, &config).unwrap();
        assert_eq!(generated.styles, vec![project.root().join("resources/css/default.css")]);
        assert_eq!(generated.scripts, vec![project.root().join("resources/js/default.js")]);
        assert_eq!(
            generated.translations,
            vec![project.root().join("resources/js/langs/fa.js")]
        );
        assert_eq!(generated.len(), 3);

        let css = std::fs::read_to_string(&generated.styles[0]).unwrap();
        assert!(css.contains("@import \"jalno-site-frontend/a.css\";"));
        assert!(css.contains("@import \"jalno-base-frontend/base.scss\";"));

        let js = std::fs::read_to_string(&generated.scripts[0]).unwrap();
        assert!(js.contains("import \"jalno-site-frontend/a.js\";"));
        assert!(js.contains("START FRONTEND 'jalno-base-frontend'"));

        let fa = std::fs::read_to_string(&generated.translations[0]).unwrap();
        let site = fa.find("jalno-site-frontend-frontend").unwrap();
        let base = fa.find("base-package").unwrap();
        assert!(site < base);
    }

    #[test]
    fn test_failed_registry_writes_nothing() {
        let project = ProjectFixture::new()
            .installed_package("jalno/base", "package.json", PACKAGE_MANIFEST)
            .installed_package("other/base", "package.json", PACKAGE_MANIFEST)
            .installed_frontend("jalno/base", "default", json!([{"type": "css", "file": "a.css"}]))
            .installed_frontend("other/base", "default", json!([]))
            .write_installed();

        let config = Config::default().resolve(project.root()).unwrap();
        let mut registry = PackageRegistry::new(Box::new(ComposerSource::new(project.root())));

        let err = generate(&mut registry, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::DuplicatePackage { .. })
        ));
        assert!(!project.root().join("resources").exists());

        let err = generate(&mut registry, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::RegistryInvalid)
        ));
    }

    #[test]
    fn test_entry_points_order() {
        let generated = GeneratedFiles {
            styles: vec![PathBuf::from("s.css")],
            scripts: vec![PathBuf::from("s.js")],
            translations: vec![PathBuf::from("fa.js")],
        };
        let entries: Vec<_> = generated.entry_points().cloned().collect();
        assert_eq!(
            entries,
            vec![PathBuf::from("s.css"), PathBuf::from("s.js"), PathBuf::from("fa.js")]
        );
        assert!(!generated.is_empty());
    }

    #[test]
    fn test_overlapping_outputs_write_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let home = tmp.path().join("frontend");
        let frontend = FrontendBuilder::new(&home, "fa", home.join("jalno.json"), "site")
            .assets(vec![Asset::FileScript {
                subtype: ScriptType::Js,
                file: "a.js".to_string(),
            }])
            .build();
        let packages = vec![Package::new(
            tmp.path().to_path_buf(),
            "site",
            tmp.path().join("package.json"),
            vec![frontend],
            vec![LanguageFile::new("fa", Default::default(), None)],
        )];

        let mut raw = Config::default();
        raw.paths.translations_directory = Some("resources/js".to_string());
        let config = raw.resolve(tmp.path()).unwrap();

        let err = generate_from_packages(&packages, &config).unwrap_err();
        assert!(err.to_string().contains("fa.js"));
        assert!(!tmp.path().join("resources").exists());
    }
}
