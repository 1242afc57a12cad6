//! English inflection for resource names.
//!
//! A compact rule table in the style of the common Rails inflector: rules are
//! tried most-recently-defined first, uncountable words pass through, and
//! irregular pairs are matched on the last word of an underscored name.

use regex::Regex;
use std::sync::OnceLock;

/// `(pattern, replacement)`; the replacement uses `${n}` group syntax.
const PLURAL_RULES: &[(&str, &str)] = &[
    (r"$", "s"),
    (r"(?i)s$", "s"),
    (r"(?i)^(ax|test)is$", "${1}es"),
    (r"(?i)(octop|vir)us$", "${1}i"),
    (r"(?i)(octop|vir)i$", "${1}i"),
    (r"(?i)(alias|status)$", "${1}es"),
    (r"(?i)(bu)s$", "${1}ses"),
    (r"(?i)(buffal|tomat)o$", "${1}oes"),
    (r"(?i)([ti])um$", "${1}a"),
    (r"(?i)([ti])a$", "${1}a"),
    (r"(?i)sis$", "ses"),
    (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"(?i)(hive)$", "${1}s"),
    (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
    (r"(?i)(x|ch|ss|sh)$", "${1}es"),
    (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(?i)^(m|l)ouse$", "${1}ice"),
    (r"(?i)^(m|l)ice$", "${1}ice"),
    (r"(?i)^(ox)$", "${1}en"),
    (r"(?i)^(oxen)$", "${1}"),
    (r"(?i)(quiz)$", "${1}zes"),
];

const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

fn plural_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        PLURAL_RULES
            .iter()
            .rev()
            .map(|(pattern, replacement)| {
                (Regex::new(pattern).expect("static inflection rule"), *replacement)
            })
            .collect()
    })
}

fn underscore_boundaries() -> &'static (Regex, Regex) {
    static RE: OnceLock<(Regex, Regex)> = OnceLock::new();
    RE.get_or_init(|| {
        (
            Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("static underscore rule"),
            Regex::new(r"([a-z\d])([A-Z])").expect("static underscore rule"),
        )
    })
}

/// Returns the plural form of `word`.
///
/// Only the trailing word of an underscored or camel-cased name is inflected,
/// so `blog_post` becomes `blog_posts` and `BlogPost` becomes `BlogPosts`.
/// The result is a fixed point: pluralizing it again returns it unchanged.
///
/// # Examples
///
/// ```
/// use rest_resource_util::inflect::pluralize;
///
/// assert_eq!(pluralize("article"), "articles");
/// assert_eq!(pluralize("articles"), "articles");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("person"), "people");
/// assert_eq!(pluralize("sheep"), "sheep");
/// ```
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLES.iter().any(|u| ends_with_word(&lower, u)) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULARS {
        for candidate in [singular, plural] {
            if ends_with_word(&lower, candidate) {
                let stem = &word[..word.len() - candidate.len()];
                return format!("{stem}{}", match_first_case(&word[stem.len()..], plural));
            }
        }
    }
    // Re-apply until stable: a stem like `analysi` first gains an `s` and
    // must then land on the same form as `analysis` does.
    let mut current = word.to_string();
    for _ in 0..PLURAL_RULES.len() {
        let next = apply_plural_rule(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn apply_plural_rule(word: &str) -> String {
    for (rule, replacement) in plural_rules() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

/// Converts a camel-cased name to snake case.
///
/// # Examples
///
/// ```
/// use rest_resource_util::inflect::underscore;
///
/// assert_eq!(underscore("Article"), "article");
/// assert_eq!(underscore("BlogPost"), "blog_post");
/// assert_eq!(underscore("HTMLPage"), "html_page");
/// assert_eq!(underscore("Api::BlogPost"), "api/blog_post");
/// ```
pub fn underscore(word: &str) -> String {
    let (acronyms, humps) = underscore_boundaries();
    let word = word.replace("::", "/");
    let word = acronyms.replace_all(&word, "${1}_${2}");
    let word = humps.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Strips a module path, keeping the last segment.
///
/// ```
/// use rest_resource_util::inflect::demodulize;
///
/// assert_eq!(demodulize("Api::V1::Article"), "Article");
/// assert_eq!(demodulize("Article"), "Article");
/// ```
pub fn demodulize(path: &str) -> &str {
    match path.rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    }
}

/// Whether `lower` is `word` or ends with `word` at a word boundary
/// (underscore or camel hump in the original casing is not visible here,
/// so only `_` counts).
fn ends_with_word(lower: &str, word: &str) -> bool {
    if lower == word {
        return true;
    }
    lower.len() > word.len()
        && lower.ends_with(word)
        && lower.as_bytes()[lower.len() - word.len() - 1] == b'_'
}

fn match_first_case(original: &str, replacement: &str) -> String {
    let upper = original.chars().next().is_some_and(|c| c.is_uppercase());
    if !upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
