use regex::Regex;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches `{name}` placeholders; group 1 is the name.
pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// Validation message templates for one locale.
///
/// Templates use `{field}`, `{min}`, `{max}`, `{equal}` and `{values}`
/// placeholders, filled in by the translator.
#[derive(Debug, Clone)]
pub struct MessageBundle {
    // ==================== Presence ====================
    /// Field is missing
    /// Placeholders: {field}
    pub required: &'static str,

    // ==================== Length ====================
    /// Text shorter than the minimum
    /// Placeholders: {field}, {min}
    pub length_min: &'static str,

    /// Text longer than the maximum
    /// Placeholders: {field}, {max}
    pub length_max: &'static str,

    /// Text not exactly the required length
    /// Placeholders: {field}, {equal}
    pub length_equal: &'static str,

    /// Text outside both bounds
    /// Placeholders: {field}, {min}, {max}
    pub length_between: &'static str,

    // ==================== Range ====================
    /// Number below the minimum
    /// Placeholders: {field}, {min}
    pub range_min: &'static str,

    /// Number above the maximum
    /// Placeholders: {field}, {max}
    pub range_max: &'static str,

    /// Number outside both bounds
    /// Placeholders: {field}, {min}, {max}
    pub range_between: &'static str,

    // ==================== Format ====================
    /// Placeholders: {field}
    pub email: &'static str,

    /// Placeholders: {field}
    pub url: &'static str,

    /// Value not in the allowed set
    /// Placeholders: {field}, {values}
    pub one_of: &'static str,

    // ==================== Fallbacks ====================
    /// Used for constraint codes without a dedicated template
    /// Placeholders: {field}
    pub invalid: &'static str,

    /// The body could not be decoded at all
    pub malformed_body: &'static str,
}

// ==================== English Messages ====================

/// English messages (canonical)
pub static ENGLISH_MESSAGES: MessageBundle = MessageBundle {
    required: "{field} is a required field",

    length_min: "{field} must be at least {min} characters in length",
    length_max: "{field} must be a maximum of {max} characters in length",
    length_equal: "{field} must be {equal} characters in length",
    length_between: "{field} must be between {min} and {max} characters in length",

    range_min: "{field} must be {min} or greater",
    range_max: "{field} must be {max} or less",
    range_between: "{field} must be between {min} and {max}",

    email: "{field} must be a valid email address",
    url: "{field} must be a valid URL",
    one_of: "{field} must be one of [{values}]",

    invalid: "{field} is invalid",
    malformed_body: "The request body could not be decoded",
};

// ==================== Chinese Messages ====================

/// Chinese messages, shared by `zh` and `zh_Hans`
pub static CHINESE_MESSAGES: MessageBundle = MessageBundle {
    required: "{field}为必填字段",

    length_min: "{field}长度必须至少为{min}个字符",
    length_max: "{field}长度不能超过{max}个字符",
    length_equal: "{field}长度必须是{equal}个字符",
    length_between: "{field}长度必须在{min}到{max}个字符之间",

    range_min: "{field}必须大于或等于{min}",
    range_max: "{field}必须小于或等于{max}",
    range_between: "{field}必须在{min}和{max}之间",

    email: "{field}必须是一个有效的邮箱",
    url: "{field}必须是一个有效的URL",
    one_of: "{field}必须是[{values}]中的一个",

    invalid: "{field}无效",
    malformed_body: "请求体无法解析",
};

impl MessageBundle {
    /// All templates paired with their names, in declaration order.
    pub fn entries(&self) -> [(&'static str, &'static str); 13] {
        [
            ("required", self.required),
            ("length_min", self.length_min),
            ("length_max", self.length_max),
            ("length_equal", self.length_equal),
            ("length_between", self.length_between),
            ("range_min", self.range_min),
            ("range_max", self.range_max),
            ("range_between", self.range_between),
            ("email", self.email),
            ("url", self.url),
            ("one_of", self.one_of),
            ("invalid", self.invalid),
            ("malformed_body", self.malformed_body),
        ]
    }
}
