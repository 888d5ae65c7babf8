//! Static deny-list applied before compilation.

/// Any of these tokens anywhere in the source rejects the script outright.
pub const DENY_TOKENS: &[&str] = &[
    "import ",
    "exec(",
    "eval(",
    "compile(",
    "__",
    "open(",
    "file(",
    "input(",
    "globals(",
    "locals(",
    "vars(",
    "getattr",
    "setattr",
    "delattr",
    "subprocess",
    "os.",
    "sys.",
];

/// First deny-listed token present in `code`, if any.
pub fn find_denied_token(code: &str) -> Option<&'static str> {
    DENY_TOKENS.iter().copied().find(|token| code.contains(token))
}
