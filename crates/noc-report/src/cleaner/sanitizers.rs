//! Value-level text sanitization.

use anyhow::Result;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::{Captures, Regex};

/// A word for title-casing: a maximal run of alphabetic characters.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Alphabetic}+").expect("Invalid regex: alphabetic run"));

/// Title-case a string.
///
/// Each run of letters gets an upper-case first letter and a lower-case
/// remainder; everything else is left alone. Letters after digits or
/// punctuation start a new word, so `"they're"` becomes `"They'Re"` and
/// `"3rd"` becomes `"3Rd"`.
pub fn title_case(value: &str) -> String {
    WORD.replace_all(value, |caps: &Captures| {
        let word = &caps[0];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => {
                let mut out = String::with_capacity(word.len());
                push_titlecase(first, &mut out);
                out.extend(chars.flat_map(char::to_lowercase));
                out
            }
            None => String::new(),
        }
    })
    .into_owned()
}

/// Append the Unicode title-case form of `c`.
///
/// Only digraphs, ligatures and iota-subscript letters have a title case
/// distinct from their upper case; the rest go through `to_uppercase`.
fn push_titlecase(c: char, out: &mut String) {
    let expanded = match c {
        'ß' => Some("Ss"),
        '\u{FB00}' => Some("Ff"),
        '\u{FB01}' => Some("Fi"),
        '\u{FB02}' => Some("Fl"),
        '\u{FB03}' => Some("Ffi"),
        '\u{FB04}' => Some("Ffl"),
        '\u{FB05}' | '\u{FB06}' => Some("St"),
        '\u{0587}' => Some("\u{0535}\u{0582}"),
        _ => None,
    };
    if let Some(s) = expanded {
        out.push_str(s);
        return;
    }

    let single = match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)
        }
        '\u{1F88}'..='\u{1F8F}'
        | '\u{1F98}'..='\u{1F9F}'
        | '\u{1FA8}'..='\u{1FAF}'
        | '\u{1FBC}'
        | '\u{1FCC}'
        | '\u{1FFC}' => Some(c),
        '\u{1FB3}' => Some('\u{1FBC}'),
        '\u{1FC3}' => Some('\u{1FCC}'),
        '\u{1FF3}' => Some('\u{1FFC}'),
        _ => None,
    };
    match single {
        Some(t) => out.push(t),
        None => out.extend(c.to_uppercase()),
    }
}

/// Trim then title-case one value. Nulls stay null.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value.map(|v| title_case(v.trim()))
}

/// Normalize every value of a string series.
///
/// Returns the new series and the number of non-null values that changed.
pub(crate) fn normalize_text_series(series: &Series) -> Result<(Series, usize)> {
    let str_series = series.str()?;
    let mut changed = 0;
    let mut cleaned_values = Vec::with_capacity(str_series.len());

    for opt_val in str_series.into_iter() {
        let cleaned = normalize_text(opt_val);
        if opt_val.is_some() && opt_val != cleaned.as_deref() {
            changed += 1;
        }
        cleaned_values.push(cleaned);
    }

    Ok((Series::new(series.name().clone(), cleaned_values), changed))
}
