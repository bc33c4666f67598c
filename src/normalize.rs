//! Phrase normalizer.
//!
//! Turns a free-text span captured by an extraction rule into zero or more
//! singular, quantity-tagged item phrases:
//! 1. strip trailing qualifiers ("from the merchant", "for 10 gold");
//! 2. split comma- and "and"-delimited lists into independent phrases;
//! 3. read a leading quantity (digits, number word, or article);
//! 4. singularize and title-case the remaining name;
//! 5. discard stop words, fragments, and bare currency phrases.

use crate::patterns::{is_currency_phrase, trim_qualifiers};

/// A singular, quantity-tagged item phrase ready for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhrase {
    pub quantity: u32,
    pub name: String,
}

/// Multi-word quantity prefixes, checked before single tokens.
const QUANTITY_PHRASES: &[(&str, u32)] = &[
    ("a couple of", 2),
    ("a couple", 2),
    ("a pair of", 2),
    ("a few", 3),
    ("a handful of", 5),
];

/// Pronouns and deictics that never name an item.
const STOP_WORDS: &[&str] = &[
    "it", "them", "they", "him", "her", "us", "me", "you", "this", "that", "these", "those",
    "something", "anything", "everything", "nothing", "one", "ones", "some", "few", "each",
    "all", "here", "there", "more",
];

/// Plurals the suffix rules get wrong.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("knives", "knife"),
    ("wives", "wife"),
    ("staves", "staff"),
    ("dice", "die"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("oxen", "ox"),
];

/// Normalize one captured span into independent `(quantity, name)` phrases.
pub fn normalize_phrase(span: &str) -> Vec<NormalizedPhrase> {
    let trimmed = trim_qualifiers(span);
    split_conjunctions(&trimmed)
        .into_iter()
        .filter_map(|piece| normalize_single(&piece))
        .collect()
}

/// Split a phrase on commas and "and" into independent item phrases,
/// preserving left-to-right order.
pub fn split_conjunctions(phrase: &str) -> Vec<String> {
    phrase
        .split(',')
        .flat_map(|part| part.split(" and "))
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn normalize_single(piece: &str) -> Option<NormalizedPhrase> {
    let piece = trim_qualifiers(piece);
    if is_currency_phrase(&piece) {
        return None;
    }

    let (quantity, raw_name) = parse_quantity(&piece);
    let raw_name = raw_name.trim();
    if raw_name.len() < 2 {
        return None;
    }
    if STOP_WORDS.contains(&raw_name.to_lowercase().as_str()) {
        return None;
    }
    if is_currency_phrase(raw_name) {
        return None;
    }

    Some(NormalizedPhrase {
        quantity,
        name: title_case(&singularize(raw_name)),
    })
}

/// Detect a leading quantity: an integer literal, a number word, a fixed
/// quantity phrase, or an article. Defaults to 1.
pub fn parse_quantity(phrase: &str) -> (u32, String) {
    let phrase = phrase.trim();
    let lower = phrase.to_lowercase();

    // Integer literal.
    let digits: String = phrase.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        if let Ok(n) = digits.parse::<u32>() {
            let rest = phrase[digits.len()..].trim_start();
            return (n.max(1), rest.to_string());
        }
    }

    // Multi-word quantity phrases before single tokens.
    for &(prefix, n) in QUANTITY_PHRASES {
        if lower.starts_with(prefix) && lower.as_bytes().get(prefix.len()) == Some(&b' ') {
            return (n, phrase[prefix.len()..].trim_start().to_string());
        }
    }

    let (first, rest) = match phrase.split_once(char::is_whitespace) {
        Some((f, r)) => (f, r.trim_start()),
        None => (phrase, ""),
    };
    let n = match first.to_lowercase().as_str() {
        "a" | "an" | "the" => 1,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "some" => 3,
        "several" => 4,
        "many" => 5,
        _ => return (1, phrase.to_string()),
    };
    (n, rest.to_string())
}

/// Convert a raw item name to singular form: irregular table first, then
/// suffix rules. Only the final word of a multi-word name is adjusted.
pub fn singularize(name: &str) -> String {
    let name = name.trim();
    let (head, last) = match name.rsplit_once(char::is_whitespace) {
        Some((h, l)) => (h, l),
        None => ("", name),
    };

    let singular = singularize_word(last);
    if head.is_empty() {
        singular
    } else {
        format!("{head} {singular}")
    }
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    for &(plural, singular) in IRREGULAR_PLURALS {
        if lower == plural {
            return singular.to_string();
        }
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if lower.len() > 3 && lower.ends_with("ves") {
        return format!("{}f", &word[..word.len() - 3]);
    }
    if lower.len() > 2 && lower.ends_with("es") {
        let stem = &lower[..lower.len() - 2];
        // Sibilant stems took "-es" in the plural; everything else only "-s".
        if stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return word[..word.len() - 2].to_string();
        }
        return word[..word.len() - 1].to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') && !lower.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Title-case every word of a name ("healing potion" -> "Healing Potion").
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
