//! Extraction pattern library.
//!
//! An ordered set of text-matching rules for the four transaction event
//! classes: item acquisition, item loss, currency gain, currency loss.
//! Rules are plain `(event class, regex)` pairs evaluated independently —
//! they are deliberately not mutually exclusive, and a single sentence may
//! satisfy several. The extractor over-generates rather than under-generates;
//! a human confirmation step downstream filters false positives.
//!
//! Auxiliary patterns trim trailing qualifiers from matched phrases
//! ("from the merchant", "for 10 gold") and recognize bare currency phrases
//! so they are not misread as items.

use lazy_static::lazy_static;
use regex::Regex;

/// The transaction class an extraction rule reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    ItemGained,
    ItemLost,
    CurrencyGained,
    CurrencyLost,
}

/// A single extraction rule: a compiled pattern tagged with the event class
/// its matches produce.
///
/// Item-class rules capture the free-text item phrase in group 1. Currency
/// rules capture the amount in group 1 and the denomination word in group 2.
#[derive(Debug)]
pub struct ExtractionRule {
    pub class: EventClass,
    pub pattern: Regex,
}

impl ExtractionRule {
    fn new(class: EventClass, pattern: &str) -> Self {
        Self {
            class,
            pattern: Regex::new(pattern).expect("valid extraction pattern"),
        }
    }
}

const DENOMS: &str = "gold|silver|copper|platinum|gp|sp|cp|pp";

lazy_static! {
    /// The full rule set, evaluated in order against each narrative block.
    pub static ref EXTRACTION_RULES: Vec<ExtractionRule> = vec![
        // --- Item acquisition ---
        ExtractionRule::new(
            EventClass::ItemGained,
            r"(?i)\byou\s+(?:receive|obtain|acquire|find|discover|pick\s+up|take|grab|collect|loot|purchase|buy|steal|pocket|retrieve|claim)\s+(.+?)(?:[.!?;\n]|$)",
        ),
        ExtractionRule::new(
            EventClass::ItemGained,
            r"(?i)\b(?:hands?|gives?|gave|offers?|tosses|throws|passes)\s+you\s+(.+?)(?:[.!?;\n]|$)",
        ),
        ExtractionRule::new(
            EventClass::ItemGained,
            r"(?i)\byou\s+(?:are|were)\s+(?:given|handed|awarded|rewarded\s+with|presented\s+with)\s+(.+?)(?:[.!?;\n]|$)",
        ),
        // Third-party drops are loot from the player's point of view;
        // "you drop" is covered by the loss rules instead.
        ExtractionRule::new(
            EventClass::ItemGained,
            r"(?i)\bthe\s+\w+\s+drop(?:s|ped)\s+(.+?)(?:[.!?;\n]|$)",
        ),
        ExtractionRule::new(
            EventClass::ItemGained,
            r"(?i)\badds?\s+(.+?)\s+to\s+your\s+(?:pack|backpack|inventory|belongings|possessions)",
        ),
        // --- Item loss ---
        ExtractionRule::new(
            EventClass::ItemLost,
            r"(?i)\byou\s+(?:lose|drop|discard|toss(?:\s+aside)?|abandon|sell|consume|drink|eat|break|destroy|sacrifice|relinquish|surrender)\s+(.+?)(?:[.!?;\n]|$)",
        ),
        ExtractionRule::new(
            EventClass::ItemLost,
            r"(?i)\byou\s+(?:give|hand|offer|throw)\s+(.+?)\s+to\s+(?:the\s+)?\w+",
        ),
        ExtractionRule::new(
            EventClass::ItemLost,
            r"(?i)\byour\s+(.+?)\s+(?:is|are|was|were)\s+(?:stolen|taken|lost|destroyed|shattered|broken|confiscated|ruined)",
        ),
        // --- Currency gain ---
        ExtractionRule::new(
            EventClass::CurrencyGained,
            &format!(
                r"(?i)\b(?:receives?|finds?|gains?|earns?|loots?|collects?|pockets?|discovers?|(?:is|are|was|were)\s+(?:paid|given|awarded|rewarded(?:\s+with)?))\b[^.!?;\n]*?(\d+)\s*({DENOMS})\b"
            ),
        ),
        ExtractionRule::new(
            EventClass::CurrencyGained,
            &format!(r"(?i)\bthe\s+\w+\s+drop(?:s|ped)\b[^.!?;\n]*?(\d+)\s*({DENOMS})\b"),
        ),
        // --- Currency loss ---
        ExtractionRule::new(
            EventClass::CurrencyLost,
            &format!(
                r"(?i)\byou\s+(?:pay|spend|lose|drop|give|hand(?:\s+over)?|wager|donate|offer|part\s+with|buy|purchase)\b[^.!?;\n]*?(\d+)\s*({DENOMS})\b"
            ),
        ),
        ExtractionRule::new(
            EventClass::CurrencyLost,
            &format!(r"(?i)\bcosts?\s+(?:you\s+)?(\d+)\s*({DENOMS})\b"),
        ),
    ];

    /// Trailing qualifiers stripped from a matched item phrase, in order:
    /// source attributions, price clauses, container clauses.
    pub static ref QUALIFIER_ENDINGS: Vec<Regex> = vec![
        Regex::new(r"(?i)\s+from\s+.*$").expect("valid qualifier pattern"),
        Regex::new(r"(?i)\s+for\s+.*$").expect("valid qualifier pattern"),
        Regex::new(r"(?i)\s+(?:in|inside|within)\s+.*$").expect("valid qualifier pattern"),
        Regex::new(r"(?i)\s+(?:out\s+of|off\s+of|off)\s+.*$").expect("valid qualifier pattern"),
        Regex::new(r"(?i)\s+worth\s+.*$").expect("valid qualifier pattern"),
        Regex::new(r"(?i)\s+as\s+(?:a|an|your)\s+.*$").expect("valid qualifier pattern"),
        Regex::new(r"(?i)\s+belonging\s+to\s+.*$").expect("valid qualifier pattern"),
    ];

    /// A phrase that is purely a quantity of coin ("25 gold pieces", "gp").
    /// These belong to the currency rules, never to the item pipeline.
    pub static ref CURRENCY_PHRASE: Regex = Regex::new(&format!(
        r"(?i)^\d*\s*(?:{DENOMS})(?:\s+(?:pieces?|coins?))?$"
    ))
    .expect("valid currency phrase pattern");

    /// An explicit enhancement-bonus token ("+2") anywhere in an item name.
    pub static ref ENHANCEMENT_BONUS: Regex =
        Regex::new(r"\+(\d+)").expect("valid bonus pattern");
}

/// Strip trailing qualifiers (source, price, container clauses) from a
/// matched phrase. Each ending rule is applied once, in order.
pub fn trim_qualifiers(phrase: &str) -> String {
    let mut out = phrase.trim().to_string();
    for ending in QUALIFIER_ENDINGS.iter() {
        if let Some(m) = ending.find(&out) {
            out.truncate(m.start());
        }
    }
    out.trim().to_string()
}

/// True if the phrase is a bare currency amount rather than an item.
pub fn is_currency_phrase(phrase: &str) -> bool {
    CURRENCY_PHRASE.is_match(phrase.trim())
}

/// Extract an explicit enhancement bonus ("+N") from an item name, if any.
pub fn enhancement_bonus(name: &str) -> Option<u32> {
    ENHANCEMENT_BONUS
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}
