//! Identifier helpers for generated code.

/// Split an identifier into words at `_`, `-`, `.` and spaces, and at case
/// changes. A run of capitals stays one word except for its last letter when
/// a lowercase letter follows (`HTTPHeader` is `HTTP`, `Header`).
fn words(s: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut words = Vec::new();
    let mut start = None;

    for (k, &(i, c)) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.' | ' ') {
            if let Some(from) = start.take() {
                words.push(&s[from..i]);
            }
            continue;
        }

        let boundary = c.is_uppercase()
            && k > 0
            && match chars[k - 1].1 {
                prev if prev.is_lowercase() || prev.is_ascii_digit() => true,
                prev if prev.is_uppercase() => chars.get(k + 1).is_some_and(|&(_, n)| n.is_lowercase()),
                _ => false,
            };
        match start {
            None => start = Some(i),
            Some(from) if boundary => {
                words.push(&s[from..i]);
                start = Some(i);
            }
            Some(_) => {}
        }
    }
    if let Some(from) = start {
        words.push(&s[from..]);
    }
    words
}

/// Convert an identifier in any common casing to PascalCase.
///
/// # Examples
/// ```
/// use pegmate_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("binary_expr"), "BinaryExpr");
/// assert_eq!(to_pascal_case("keyword.control"), "KeywordControl");
/// assert_eq!(to_pascal_case("BinaryExpr"), "BinaryExpr");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in words(s) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.extend(chars.flat_map(char::to_lowercase));
        }
    }
    result
}

/// Convert an identifier in any common casing to snake_case.
///
/// # Examples
/// ```
/// use pegmate_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("BinaryExpr"), "binary_expr");
/// assert_eq!(to_snake_case("HTTPHeader"), "http_header");
/// ```
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "yield", "gen",
];

/// Make `name` usable as a Rust identifier: invalid characters become `_`,
/// a leading digit gets a `_` prefix, keywords become raw identifiers.
pub fn to_rust_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        if matches!(ident.as_str(), "self" | "Self" | "super" | "crate") {
            ident.push('_');
        } else {
            ident.insert_str(0, "r#");
        }
    }
    ident
}
