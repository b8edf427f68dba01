//! 语言代码映射

/// 已知语言代码及其英文名称
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("el", "Greek"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
];

/// 返回语言代码对应的描述性名称，未知代码原样返回
pub fn language_name(code: &str) -> &str {
    let normalized = code.trim();
    LANGUAGE_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(normalized))
        .map(|(_, name)| *name)
        .unwrap_or(normalized)
}
