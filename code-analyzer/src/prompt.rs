//! Prompt builders for the per-file analyses and the package overview.
//!
//! Each prompt opens with its instruction line, then the expected JSON shape,
//! then the payload. Code is embedded verbatim. The package prompt embeds
//! names only, never file contents.

/// The four independent per-file analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Style,
    Solid,
    Issues,
    Recommendations,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::Style,
        PromptKind::Solid,
        PromptKind::Issues,
        PromptKind::Recommendations,
    ];

    /// First line of the rendered prompt.
    pub const fn instruction(self) -> &'static str {
        match self {
            PromptKind::Style => {
                "Проанализируй стиль следующего кода и дай рекомендации по улучшению."
            }
            PromptKind::Solid => "Проверь соответствие следующего кода принципам SOLID.",
            PromptKind::Issues => "Найди потенциальные проблемы в следующем коде.",
            PromptKind::Recommendations => "Дай рекомендации по улучшению следующего кода.",
        }
    }

    const fn response_shape(self) -> &'static str {
        match self {
            PromptKind::Style => {
                r#"Ответ должен быть в формате JSON:
{
    "formatting": "оценка и рекомендации",
    "naming": "оценка и рекомендации",
    "documentation": "оценка и рекомендации",
    "structure": "оценка и рекомендации"
}"#
            }
            PromptKind::Solid => {
                r#"Ответ должен быть в формате JSON:
{
    "SRP": "оценка и объяснение",
    "OCP": "оценка и объяснение",
    "LSP": "оценка и объяснение",
    "ISP": "оценка и объяснение",
    "DIP": "оценка и объяснение"
}"#
            }
            PromptKind::Issues => {
                r#"Ответ должен быть в формате JSON массив объектов:
[
    {
        "type": "тип проблемы",
        "description": "описание проблемы",
        "line": "строка кода",
        "recommendation": "рекомендация по исправлению"
    }
]"#
            }
            PromptKind::Recommendations => {
                r#"Ответ должен быть в формате JSON массив строк:
[
    "рекомендация 1",
    "рекомендация 2"
]"#
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PromptKind::Style => "style",
            PromptKind::Solid => "solid",
            PromptKind::Issues => "issues",
            PromptKind::Recommendations => "recommendations",
        }
    }
}

/// First line of the package-structure prompt.
pub const PACKAGE_INSTRUCTION: &str =
    "Оцени архитектуру проекта по списку его файлов (содержимое файлов не приводится).";

const PACKAGE_SHAPE: &str = r#"Ответ должен быть в формате JSON:
{
    "architecture": "общая оценка архитектуры",
    "module_relations": "предполагаемые связи между модулями",
    "strong_points": "сильные стороны структуры",
    "weak_points": "слабые стороны структуры",
    "recommendations": "рекомендации по улучшению структуры"
}"#;

/// Renders the per-file prompt of `kind` for `code` from `filename`.
pub fn build_file_prompt(kind: PromptKind, code: &str, filename: &str) -> String {
    let mut s = String::with_capacity(code.len() + 512);
    s.push_str(kind.instruction());
    s.push('\n');
    s.push_str(kind.response_shape());
    s.push_str("\n\nФайл: ");
    s.push_str(filename);
    s.push_str("\nКод для анализа:\n");
    s.push_str(code);
    s.push('\n');
    s
}

/// Renders the package-structure prompt from file names/paths only.
pub fn build_package_prompt<S: AsRef<str>>(names: &[S]) -> String {
    let mut s = String::new();
    s.push_str(PACKAGE_INSTRUCTION);
    s.push('\n');
    s.push_str(PACKAGE_SHAPE);
    s.push_str("\n\nФайлы проекта:\n");
    for name in names {
        s.push_str("- ");
        s.push_str(name.as_ref());
        s.push('\n');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceFile;

    #[test]
    fn file_prompt_embeds_code_verbatim() {
        let code = "def f(x):\n    return x  # {braces} \"quotes\"";
        for kind in PromptKind::ALL {
            let p = build_file_prompt(kind, code, "m.py");
            assert!(p.starts_with(kind.instruction()));
            assert!(p.contains(code));
            assert!(p.contains("Файл: m.py"));
        }
    }

    #[test]
    fn prompts_are_deterministic() {
        let a = build_file_prompt(PromptKind::Solid, "x = 1", "a.py");
        let b = build_file_prompt(PromptKind::Solid, "x = 1", "a.py");
        assert_eq!(a, b);
    }

    #[test]
    fn solid_prompt_lists_all_principles() {
        let p = build_file_prompt(PromptKind::Solid, "x = 1", "a.py");
        for key in ["SRP", "OCP", "LSP", "ISP", "DIP"] {
            assert!(p.contains(key));
        }
    }

    #[test]
    fn package_prompt_contains_only_names() {
        let files = [
            SourceFile::new("a.py", "import os\nSECRET_A = os.environ['A']"),
            SourceFile::new("b.py", "def handler():\n    return 'SECRET_B'"),
        ];
        let names: Vec<&str> = files.iter().map(SourceFile::display_path).collect();
        let p = build_package_prompt(&names);

        assert!(p.starts_with(PACKAGE_INSTRUCTION));
        assert!(p.contains("- a.py\n"));
        assert!(p.contains("- b.py\n"));
        for f in &files {
            assert!(!p.contains(&f.content));
            for line in f.content.lines() {
                assert!(!p.contains(line), "leaked: {line}");
            }
        }
    }
}
