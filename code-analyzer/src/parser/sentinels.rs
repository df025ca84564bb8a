//! Fixed texts substituted for unusable or missing parts of a model answer.
//!
//! They are user-facing, in the same language the prompts ask the model to
//! answer in.

/// Value of every style/SOLID key when the whole answer is unusable.
pub const PARSE_ERROR: &str = "Ошибка парсинга ответа";

/// Value of a single SOLID key the model left out.
pub const MISSING_KEY: &str = "Ошибка: отсутствует в ответе";

/// Value of a single style aspect the model left out.
///
/// Must not contain any style score marker, otherwise a parser gap would be
/// penalized as a style defect.
pub const STYLE_MISSING_KEY: &str = "Ошибка: аспект не оценён моделью";

/// Value of a package-report advisory key the model left out.
pub const INSUFFICIENT_DATA: &str = "Недостаточно данных";

/// Per-field defaults of an issue record.
pub const ISSUE_DEFAULT_TYPE: &str = "Неизвестная проблема";
pub const ISSUE_DEFAULT_DESCRIPTION: &str = "Нет описания";
pub const ISSUE_DEFAULT_LINE: &str = "Не указана";
pub const ISSUE_DEFAULT_RECOMMENDATION: &str = "Нет рекомендации";

/// The single issue reported when the issue list is unusable.
pub const ISSUE_PARSE_ERROR_TYPE: &str = "Ошибка парсинга";
pub const ISSUE_PARSE_ERROR_DESCRIPTION: &str = "Не удалось разобрать ответ ИИ";
pub const ISSUE_PARSE_ERROR_LINE: &str = "Неизвестно";
pub const ISSUE_PARSE_ERROR_RECOMMENDATION: &str = "Проверьте формат ответа модели";

/// The single recommendation when the answer is a list of the wrong shape.
pub const RECOMMENDATIONS_NOT_A_LIST: &str = "Ошибка: рекомендации должны быть списком строк";
