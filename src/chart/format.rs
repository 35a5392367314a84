//! Locale-aware number formatting for chart labels and reports.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `cs`, `cs_CZ`, `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "cs" | "cs_cz" | "czech" => (&Locale::cs, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format a value with thousands separators and at most two decimals,
/// trailing zeros trimmed: `1234.5` -> `1,234.5` (`en`) or `1.234,5` (`de`).
pub fn format_value(v: f64, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let cents = (v.abs() * 100.0).round() as i64;
    let (whole, frac) = (cents / 100, cents % 100);

    let mut out = String::new();
    if v < 0.0 && cents != 0 {
        out.push('-');
    }
    out.push_str(&whole.to_formatted_string(locale));
    if frac != 0 {
        let digits = format!("{:02}", frac);
        out.push(dec_sep);
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Like [`format_value`] but always carries a sign (`+12`, `-3.5`, `0`).
pub fn format_signed(v: f64, locale_tag: &str) -> String {
    let s = format_value(v, locale_tag);
    if v > 0.0 && s != "0" { format!("+{s}") } else { s }
}
