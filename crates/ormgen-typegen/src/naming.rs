//! Identifier casing for snake-case source names.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Go identifier: every word capitalised (`author_id` -> `AuthorId`).
pub fn go_ident(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Kotlin hard keywords; these cannot name a property without backticks.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Kotlin identifier: lower camel case (`created_at` -> `createdAt`), with
/// hard keywords quoted (`package` -> `` `package` ``).
pub fn kotlin_ident(name: &str) -> String {
    let ident = name.to_lower_camel_case();
    if KOTLIN_KEYWORDS.contains(&ident.as_str()) {
        format!("`{ident}`")
    } else {
        ident
    }
}
