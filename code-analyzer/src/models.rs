//! Data carried between the pipeline stages and returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A source file submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub filename: String,
    pub content: String,
    /// Path inside the uploaded archive/directory, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            relative_path: None,
        }
    }

    /// Relative path when present, otherwise the bare filename.
    pub fn display_path(&self) -> &str {
        self.relative_path.as_deref().unwrap_or(&self.filename)
    }
}

/// Per-file record produced by the structural analyzer.
///
/// Only `filename` and `file_content` are consumed here; everything else the
/// analyzer attaches is kept verbatim as metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFileRecord {
    pub filename: String,
    pub file_content: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// Style assessment over the four fixed aspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleReport {
    pub formatting: String,
    pub naming: String,
    pub documentation: String,
    pub structure: String,
}

impl StyleReport {
    pub const KEYS: [&'static str; 4] = ["formatting", "naming", "documentation", "structure"];

    /// Builds the report from values ordered like [`Self::KEYS`].
    pub fn from_values([formatting, naming, documentation, structure]: [String; 4]) -> Self {
        Self {
            formatting,
            naming,
            documentation,
            structure,
        }
    }

    /// `(aspect, text)` pairs in [`Self::KEYS`] order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("formatting", &self.formatting),
            ("naming", &self.naming),
            ("documentation", &self.documentation),
            ("structure", &self.structure),
        ]
    }
}

/// Assessment against each SOLID principle; always exactly these five keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidReport {
    #[serde(rename = "SRP")]
    pub srp: String,
    #[serde(rename = "OCP")]
    pub ocp: String,
    #[serde(rename = "LSP")]
    pub lsp: String,
    #[serde(rename = "ISP")]
    pub isp: String,
    #[serde(rename = "DIP")]
    pub dip: String,
}

impl SolidReport {
    pub const KEYS: [&'static str; 5] = ["SRP", "OCP", "LSP", "ISP", "DIP"];

    /// Builds the report from values ordered like [`Self::KEYS`].
    pub fn from_values([srp, ocp, lsp, isp, dip]: [String; 5]) -> Self {
        Self {
            srp,
            ocp,
            lsp,
            isp,
            dip,
        }
    }

    /// `(principle, text)` pairs in [`Self::KEYS`] order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("SRP", &self.srp),
            ("OCP", &self.ocp),
            ("LSP", &self.lsp),
            ("ISP", &self.isp),
            ("DIP", &self.dip),
        ]
    }
}

/// One potential problem reported by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub line: String,
    pub recommendation: String,
}

/// Whole-project advisory report.
///
/// The advisory keys in [`PackageReport::KEYS`] are always present; anything
/// else the model returned is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageReport {
    pub fields: Map<String, Value>,
}

impl PackageReport {
    pub const KEYS: [&'static str; 5] = [
        "architecture",
        "module_relations",
        "strong_points",
        "weak_points",
        "recommendations",
    ];

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Final per-file result of the AI analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub code_style: StyleReport,
    pub solid_principles: SolidReport,
    pub potential_issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    /// Always within `0.0..=1.0`.
    pub overall_score: f64,
}
