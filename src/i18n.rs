//! Message formatting.
//!
//! Widgets never format user-facing messages themselves: they hand a
//! template and a parameter map to a [`MessageFormatter`] injected at
//! construction. [`IcuMessageFormatter`] understands the part of ICU
//! MessageFormat the widgets use:
//!
//! - `{arg}` and `{arg, number}`, numbers grouped per locale,
//! - `{arg, plural, =0{..} one{..} few{..} many{..} other{..}}` with `#`
//!   replaced by the number,
//! - `{arg, select, key{..} other{..}}`.
//!
//! Placeholders naming an unknown parameter are left untouched. Apostrophe
//! quoting is not supported.

use std::collections::BTreeMap;

use serde_json::Value;

pub type MessageParams = BTreeMap<String, Value>;

pub const DEFAULT_LOCALE: &str = "en-US";

/// Formats a message template with named parameters for a locale.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, message: &str, params: &MessageParams, locale: &str) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IcuMessageFormatter;

impl IcuMessageFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl MessageFormatter for IcuMessageFormatter {
    fn format(&self, message: &str, params: &MessageParams, locale: &str) -> String {
        format_pattern(message, params, &language(locale), None)
    }
}

/// CLDR plural categories used by the supported languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::One => "one",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

/// Cardinal plural category of an integer for the given locale.
pub fn plural_category(locale: &str, number: i64) -> PluralCategory {
    let n = number.unsigned_abs();
    let (last, last_two) = (n % 10, n % 100);
    match language(locale).as_str() {
        "ja" | "zh" | "ko" | "th" | "vi" | "id" => PluralCategory::Other,
        "fr" | "pt" if n <= 1 => PluralCategory::One,
        "fr" | "pt" => PluralCategory::Other,
        "ru" | "uk" | "be" => {
            if last == 1 && last_two != 11 {
                PluralCategory::One
            } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                PluralCategory::Few
            } else {
                PluralCategory::Many
            }
        }
        "pl" => {
            if n == 1 {
                PluralCategory::One
            } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                PluralCategory::Few
            } else {
                PluralCategory::Many
            }
        }
        "cs" | "sk" => match n {
            1 => PluralCategory::One,
            2..=4 => PluralCategory::Few,
            _ => PluralCategory::Other,
        },
        _ if n == 1 => PluralCategory::One,
        _ => PluralCategory::Other,
    }
}

/// Formats a JSON number with the locale's grouping and decimal separators.
///
/// Returns `None` for non-numeric values.
pub fn format_number(value: &Value, locale: &str) -> Option<String> {
    let language = language(locale);
    let (group, decimal) = separators(&language);
    let text = match value {
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut formatted = format!("{sign}{}", group_digits(integer, group));
    if let Some(fraction) = fraction {
        formatted.push_str(decimal);
        formatted.push_str(fraction);
    }
    Some(formatted)
}

fn language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn separators(language: &str) -> (&'static str, &'static str) {
    match language {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => (".", ","),
        "ru" | "uk" | "be" | "fr" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" => ("\u{a0}", ","),
        _ => (",", "."),
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

fn format_pattern(
    pattern: &str,
    params: &MessageParams,
    language: &str,
    hash: Option<&str>,
) -> String {
    let mut formatted = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '{' => {
                let Some(end) = matching_brace(rest) else {
                    formatted.push_str(rest);
                    break;
                };
                match format_argument(&rest[1..end], params, language, hash) {
                    Some(argument) => formatted.push_str(&argument),
                    None => formatted.push_str(&rest[..=end]),
                }
                rest = &rest[end + 1..];
            }
            '#' => {
                formatted.push_str(hash.unwrap_or("#"));
                rest = &rest[1..];
            }
            _ => {
                formatted.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    formatted
}

/// Byte index of the brace closing the one `text` starts with.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn format_argument(
    body: &str,
    params: &MessageParams,
    language: &str,
    hash: Option<&str>,
) -> Option<String> {
    let mut parts = body.splitn(3, ',').map(str::trim);
    let name = parts.next()?;
    let kind = parts.next();
    let style = parts.next().unwrap_or_default();
    let value = params.get(name)?;

    match kind {
        None | Some("number") => Some(display(value, language)),
        Some("plural") => {
            let number = value.as_i64().or_else(|| value.as_f64().map(|n| n as i64))?;
            let exact = format!("={number}");
            let category = plural_category(language, number).as_str();
            let branch = pick_branch(style, &[exact.as_str(), category, "other"])?;
            let hash = display(value, language);
            Some(format_pattern(branch, params, language, Some(&hash)))
        }
        Some("select") => {
            let key = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            let branch = pick_branch(style, &[key.as_str(), "other"])?;
            Some(format_pattern(branch, params, language, hash))
        }
        Some(_) => None,
    }
}

fn display(value: &Value, language: &str) -> String {
    match value {
        Value::Number(_) => format_number(value, language).unwrap_or_default(),
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Returns the body of the first branch whose selector matches, trying the
/// candidates in order.
fn pick_branch<'a>(style: &'a str, candidates: &[&str]) -> Option<&'a str> {
    let branches = parse_branches(style)?;
    candidates.iter().find_map(|candidate| {
        branches
            .iter()
            .find(|(selector, _)| selector == candidate)
            .map(|(_, body)| *body)
    })
}

fn parse_branches(style: &str) -> Option<Vec<(&str, &str)>> {
    let mut branches = Vec::new();
    let mut rest = style.trim_start();
    while !rest.is_empty() {
        let open = rest.find('{')?;
        let selector = rest[..open].trim();
        let close = open + matching_brace(&rest[open..])?;
        branches.push((selector, &rest[open + 1..close]));
        rest = rest[close + 1..].trim_start();
    }
    Some(branches)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(pairs: &[(&str, Value)]) -> MessageParams {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    const SUMMARY: &str = "Showing <b>{begin, number}-{end, number}</b> of <b>{totalCount, number}</b> {totalCount, plural, one{item} other{items}}.";

    #[test]
    fn formats_summary_with_grouping_and_plural() {
        let formatter = IcuMessageFormatter::new();
        let params = params(&[
            ("begin", json!(11)),
            ("end", json!(20)),
            ("totalCount", json!(1234)),
        ]);

        assert_eq!(
            formatter.format(SUMMARY, &params, "en-US"),
            "Showing <b>11-20</b> of <b>1,234</b> items."
        );
    }

    #[test]
    fn singular_branch_is_selected_for_one() {
        let formatter = IcuMessageFormatter::new();
        let params = params(&[("count", json!(1))]);

        assert_eq!(
            formatter.format(
                "Total <b>{count, number}</b> {count, plural, one{item} other{items}}.",
                &params,
                "en"
            ),
            "Total <b>1</b> item."
        );
    }

    #[test]
    fn east_slavic_plural_categories() {
        let formatter = IcuMessageFormatter::new();
        let message = "{n, plural, one{# запись} few{# записи} many{# записей} other{# записи}}";
        let cases = [
            (1, "1 запись"),
            (3, "3 записи"),
            (5, "5 записей"),
            (11, "11 записей"),
            (21, "21 запись"),
            (1000, "1\u{a0}000 записей"),
        ];

        for (n, expected) in cases {
            let params = params(&[("n", json!(n))]);
            assert_eq!(formatter.format(message, &params, "ru-RU"), expected);
        }
    }

    #[test]
    fn exact_selector_wins_over_category() {
        let formatter = IcuMessageFormatter::new();
        let message = "{count, plural, =0{nothing} one{# item} other{# items}}";

        assert_eq!(
            formatter.format(message, &params(&[("count", json!(0))]), "en"),
            "nothing"
        );
        assert_eq!(
            formatter.format(message, &params(&[("count", json!(2))]), "en"),
            "2 items"
        );
    }

    #[test]
    fn unknown_placeholders_are_left_verbatim() {
        let formatter = IcuMessageFormatter::new();

        assert_eq!(
            formatter.format("{missing} and {count}", &params(&[("count", json!(3))]), "en"),
            "{missing} and 3"
        );
    }

    #[test]
    fn select_picks_matching_key() {
        let formatter = IcuMessageFormatter::new();
        let message = "{gender, select, female{She} male{He} other{They}} left";

        assert_eq!(
            formatter.format(message, &params(&[("gender", json!("female"))]), "en"),
            "She left"
        );
        assert_eq!(
            formatter.format(message, &params(&[("gender", json!("x"))]), "en"),
            "They left"
        );
    }

    #[test]
    fn numbers_use_locale_separators() {
        assert_eq!(
            format_number(&json!(-1234567), "en-US").as_deref(),
            Some("-1,234,567")
        );
        assert_eq!(format_number(&json!(1234.5), "de-DE").as_deref(), Some("1.234,5"));
        assert_eq!(format_number(&json!(999), "fr").as_deref(), Some("999"));
        assert_eq!(format_number(&json!("12"), "en"), None);
    }

    #[test]
    fn french_treats_zero_as_singular() {
        assert_eq!(plural_category("fr-FR", 0), PluralCategory::One);
        assert_eq!(plural_category("en-US", 0), PluralCategory::Other);
        assert_eq!(plural_category("pl", 22), PluralCategory::Few);
        assert_eq!(plural_category("ja", 1), PluralCategory::Other);
    }
}
