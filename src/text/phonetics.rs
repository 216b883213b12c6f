//! Ordered phonetic rewrite rules per regional variant
//!
//! Every rule is a global substitution over the current string. Rules of a
//! region run in registration order and each one sees the output of the
//! previous one, so the order is part of the rule set's meaning.

use super::region::RegionTag;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// A single rewrite rule
#[derive(Debug, Clone)]
pub struct PhoneticRule {
    pub pattern: Regex,
    pub replacement: &'static str,
    pub description: &'static str,
    pub region: RegionTag,
}

impl PhoneticRule {
    /// Build a rule from a pattern known to be valid
    fn fixed(
        region: RegionTag,
        pattern: &'static str,
        replacement: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
            description,
            region,
        }
    }

    /// Build a rule from caller-supplied pattern text
    pub fn new(
        region: RegionTag,
        pattern: &str,
        replacement: &'static str,
        description: &'static str,
    ) -> crate::Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement,
            description,
            region,
        })
    }

    /// Apply this rule to every match in `text`
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

lazy_static! {
    static ref RULES: HashMap<RegionTag, Vec<PhoneticRule>> = build_rules();
}

fn build_rules() -> HashMap<RegionTag, Vec<PhoneticRule>> {
    use RegionTag::*;

    let mut rules = HashMap::new();

    rules.insert(Neutral, Vec::new());

    rules.insert(
        Rioplatense,
        vec![
            PhoneticRule::fixed(Rioplatense, r"(?i)ll", "sh", "sheísmo: ll as [ʃ]"),
            PhoneticRule::fixed(
                Rioplatense,
                r"(?i)\by([aeiouáéíóú])",
                "sh$1",
                "sheísmo: word-initial y before a vowel",
            ),
            PhoneticRule::fixed(
                Rioplatense,
                r"(?i)([aeiouáéíóú])y([aeiouáéíóú])",
                "${1}sh${2}",
                "sheísmo: intervocalic y",
            ),
            PhoneticRule::fixed(
                Rioplatense,
                r"(?i)s([bcdfgkmpt])",
                "h$1",
                "aspiration of s before a consonant",
            ),
        ],
    );

    rules.insert(
        Colombian,
        vec![PhoneticRule::fixed(
            Colombian,
            r"(?i)\bpara\s+el\b",
            "pal",
            "contraction of 'para el'",
        )],
    );

    rules.insert(
        Mexican,
        vec![
            PhoneticRule::fixed(Mexican, r"(?i)\bm[eé]xico", "méjico", "x read as [x] in México"),
            PhoneticRule::fixed(Mexican, r"(?i)\boaxaca", "oajaca", "x read as [x] in Oaxaca"),
            PhoneticRule::fixed(Mexican, r"(?i)\bxalapa", "jalapa", "x read as [x] in Xalapa"),
        ],
    );

    rules.insert(
        Chilean,
        vec![
            PhoneticRule::fixed(Chilean, r"(?i)ch", "sh", "fricative ch"),
            PhoneticRule::fixed(Chilean, r"(?i)ado(s?)\b", "ao$1", "elision of intervocalic d in -ado"),
            PhoneticRule::fixed(
                Chilean,
                r"(?i)s([bcdfgkmpt])",
                "h$1",
                "aspiration of s before a consonant",
            ),
        ],
    );

    rules.insert(
        Caribbean,
        vec![
            PhoneticRule::fixed(Caribbean, r"(?i)ado(s?)\b", "ao$1", "elision of intervocalic d in -ado"),
            PhoneticRule::fixed(Caribbean, r"(?i)s\b", "h", "aspiration of word-final s"),
            PhoneticRule::fixed(
                Caribbean,
                r"(?i)s([bcdfgkmpt])",
                "h$1",
                "aspiration of s before a consonant",
            ),
            PhoneticRule::fixed(Caribbean, r"(?i)r\b", "l", "lateralization of word-final r"),
        ],
    );

    rules.insert(
        Andean,
        vec![PhoneticRule::fixed(
            Andean,
            r"(?i)rr",
            "ř",
            "assibilated trill",
        )],
    );

    rules
}

/// Applies the ordered rule list of a region
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneticRuleEngine;

impl PhoneticRuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rules registered for `region`, in application order
    pub fn rules(&self, region: RegionTag) -> &'static [PhoneticRule] {
        RULES.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Apply all rules of `region` to `text`
    pub fn apply(&self, text: &str, region: RegionTag) -> String {
        apply_rules(text, self.rules(region))
    }
}

/// Apply `rules` in order, each over the output of the previous one
pub fn apply_rules(text: &str, rules: &[PhoneticRule]) -> String {
    rules.iter().fold(text.to_string(), |current, rule| {
        let next = rule.apply(&current);
        if next != current {
            log::trace!("phonetic rule applied: {}", rule.description);
        }
        next
    })
}
