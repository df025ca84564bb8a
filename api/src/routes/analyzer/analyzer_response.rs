use code_analyzer::{AnalysisResult, FileOutcome, SourceFile};
use serde::Serialize;

/// One file captured by `/analyzer/analyze`.
#[derive(Debug, Serialize)]
pub struct CapturedFile {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    pub lines: usize,
}

impl From<&SourceFile> for CapturedFile {
    fn from(f: &SourceFile) -> Self {
        Self {
            filename: f.filename.clone(),
            relative_path: f.relative_path.clone(),
            lines: f.content.lines().count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Store generation created by this request.
    pub generation: u64,
    pub files: Vec<CapturedFile>,
}

/// Per-file entry of a batch response.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub filename: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FileOutcome> for BatchItem {
    fn from(o: FileOutcome) -> Self {
        match o.result {
            Ok(result) => Self {
                filename: o.filename,
                success: true,
                result: Some(result),
                error: None,
            },
            Err(e) => Self {
                filename: o.filename,
                success: false,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub total: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Model the server is configured with.
    pub current: &'static str,
    pub models: Vec<ModelInfo>,
}
