//! Frontend assets.
//!
//! An asset is declared in a frontend manifest as
//! `{ "type": "<tag>", "file" | "code" | "name": ... }`. Decoding checks which
//! of `file`/`code` is present exactly once and produces an [`Asset`] variant,
//! so nothing downstream needs to look at the raw shape again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Script flavours a file or inline script asset may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptType {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::Js => "js",
            ScriptType::Jsx => "jsx",
            ScriptType::Ts => "ts",
            ScriptType::Tsx => "tsx",
        }
    }
}

/// Stylesheet flavours a file or inline style asset may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleType {
    Css,
    Less,
    Scss,
}

impl StyleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleType::Css => "css",
            StyleType::Less => "less",
            StyleType::Scss => "scss",
        }
    }
}

/// The `type` tag of an asset descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Js,
    Jsx,
    Ts,
    Tsx,
    Css,
    Less,
    Scss,
    Inline,
    Package,
}

impl AssetType {
    /// Default tags gathered into theme stylesheets.
    pub const STYLES: [AssetType; 3] = [AssetType::Css, AssetType::Less, AssetType::Scss];

    /// Default tags gathered into theme scripts.
    pub const SCRIPTS: [AssetType; 4] =
        [AssetType::Js, AssetType::Jsx, AssetType::Ts, AssetType::Tsx];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Js => "js",
            AssetType::Jsx => "jsx",
            AssetType::Ts => "ts",
            AssetType::Tsx => "tsx",
            AssetType::Css => "css",
            AssetType::Less => "less",
            AssetType::Scss => "scss",
            AssetType::Inline => "inline",
            AssetType::Package => "package",
        }
    }

    fn script(&self) -> Option<ScriptType> {
        match self {
            AssetType::Js => Some(ScriptType::Js),
            AssetType::Jsx => Some(ScriptType::Jsx),
            AssetType::Ts => Some(ScriptType::Ts),
            AssetType::Tsx => Some(ScriptType::Tsx),
            _ => None,
        }
    }

    fn style(&self) -> Option<StyleType> {
        match self {
            AssetType::Css => Some(StyleType::Css),
            AssetType::Less => Some(StyleType::Less),
            AssetType::Scss => Some(StyleType::Scss),
            _ => None,
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "js" => Ok(AssetType::Js),
            "jsx" => Ok(AssetType::Jsx),
            "ts" => Ok(AssetType::Ts),
            "tsx" => Ok(AssetType::Tsx),
            "css" => Ok(AssetType::Css),
            "less" => Ok(AssetType::Less),
            "scss" => Ok(AssetType::Scss),
            "inline" => Ok(AssetType::Inline),
            "package" => Ok(AssetType::Package),
            other => Err(format!(
                "invalid asset type '{}'; expected one of js, jsx, ts, tsx, css, less, scss, inline, package",
                other
            )),
        }
    }
}

/// A typed frontend asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAsset")]
pub enum Asset {
    /// Inline script code; `None` when declared with the generic `inline` tag.
    InlineScript {
        subtype: Option<ScriptType>,
        code: String,
    },
    /// Inline stylesheet code.
    InlineStyle { subtype: StyleType, code: String },
    /// Script file relative to the frontend home.
    FileScript { subtype: ScriptType, file: String },
    /// Stylesheet file relative to the frontend home.
    FileStyle { subtype: StyleType, file: String },
    /// Kept for old manifests only, never processed.
    PackageReference {
        name: String,
        version: Option<String>,
    },
}

impl Asset {
    /// The tag this asset was declared with.
    pub fn asset_type(&self) -> AssetType {
        match self {
            Asset::InlineScript { subtype: None, .. } => AssetType::Inline,
            Asset::InlineScript {
                subtype: Some(s), ..
            }
            | Asset::FileScript { subtype: s, .. } => match s {
                ScriptType::Js => AssetType::Js,
                ScriptType::Jsx => AssetType::Jsx,
                ScriptType::Ts => AssetType::Ts,
                ScriptType::Tsx => AssetType::Tsx,
            },
            Asset::InlineStyle { subtype: s, .. } | Asset::FileStyle { subtype: s, .. } => {
                match s {
                    StyleType::Css => AssetType::Css,
                    StyleType::Less => AssetType::Less,
                    StyleType::Scss => AssetType::Scss,
                }
            }
            Asset::PackageReference { .. } => AssetType::Package,
        }
    }

    /// The file path, for file assets.
    pub fn file(&self) -> Option<&str> {
        match self {
            Asset::FileScript { file, .. } | Asset::FileStyle { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn has_file(&self) -> bool {
        self.file().is_some()
    }
}

/// Asset descriptor as it appears in the manifest.
#[derive(Debug, Deserialize)]
struct RawAsset {
    #[serde(rename = "type")]
    kind: AssetType,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

impl TryFrom<RawAsset> for Asset {
    type Error = String;

    fn try_from(raw: RawAsset) -> Result<Self, Self::Error> {
        if raw.kind == AssetType::Package {
            let name = raw
                .name
                .ok_or_else(|| "package asset must have a `name`".to_string())?;
            return Ok(Asset::PackageReference {
                name,
                version: raw.version,
            });
        }

        match (raw.file, raw.code) {
            (Some(_), Some(_)) => Err(format!(
                "`{}` asset must declare either `file` or `code`, not both",
                raw.kind
            )),
            (None, None) => Err(format!(
                "`{}` asset must declare either `file` or `code`",
                raw.kind
            )),
            (Some(file), None) => {
                if let Some(subtype) = raw.kind.script() {
                    Ok(Asset::FileScript { subtype, file })
                } else if let Some(subtype) = raw.kind.style() {
                    Ok(Asset::FileStyle { subtype, file })
                } else {
                    Err(format!("`{}` asset can not declare a `file`", raw.kind))
                }
            }
            (None, Some(code)) => {
                if let Some(subtype) = raw.kind.style() {
                    Ok(Asset::InlineStyle { subtype, code })
                } else {
                    Ok(Asset::InlineScript {
                        subtype: raw.kind.script(),
                        code,
                    })
                }
            }
        }
    }
}
