use code_analyzer::SourceFile;
use serde::Deserialize;

/// Body of the multi-file endpoints (`analyze`, `ai-analyze-batch`,
/// `ai-analyze-package`).
#[derive(Debug, Deserialize)]
pub struct FilesRequest {
    pub files: Vec<SourceFile>,
}

/// Body of `POST /analyzer/ai-analyze`.
///
/// Without `content` the code text captured by the latest
/// `/analyzer/analyze` batch is used.
#[derive(Debug, Deserialize)]
pub struct AiAnalyzeRequest {
    pub filename: String,
    #[serde(default)]
    pub content: Option<String>,
}
