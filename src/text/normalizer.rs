//! Text normalization for Spanish TTS
//!
//! Rewrites written forms the acoustic model cannot read aloud (amounts,
//! dates, clock times, digits, abbreviations) into spoken Spanish. Stages run
//! from most to least specific so a date is never half-eaten by the bare
//! number stage. Every spoken form is free of digits, currency symbols and
//! abbreviation dots, which makes the whole chain idempotent.

use super::numbers::{self, Gender};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Currency recognised next to an amount
#[derive(Debug, Clone, Copy)]
struct Currency {
    singular: &'static str,
    plural: &'static str,
    gender: Gender,
    cent_singular: &'static str,
    cent_plural: &'static str,
}

const EURO: Currency = Currency {
    singular: "euro",
    plural: "euros",
    gender: Gender::Masculine,
    cent_singular: "céntimo",
    cent_plural: "céntimos",
};

const DOLLAR: Currency = Currency {
    singular: "dólar",
    plural: "dólares",
    gender: Gender::Masculine,
    cent_singular: "centavo",
    cent_plural: "centavos",
};

const PESO: Currency = Currency {
    singular: "peso",
    plural: "pesos",
    gender: Gender::Masculine,
    cent_singular: "centavo",
    cent_plural: "centavos",
};

const POUND: Currency = Currency {
    singular: "libra",
    plural: "libras",
    gender: Gender::Feminine,
    cent_singular: "penique",
    cent_plural: "peniques",
};

fn currency_for(symbol: &str) -> Currency {
    match symbol {
        "€" => EURO,
        "£" => POUND,
        "MX$" => PESO,
        _ => DOLLAR,
    }
}

const ORDINALS_MASC: [&str; 10] = [
    "primero", "segundo", "tercero", "cuarto", "quinto", "sexto", "séptimo", "octavo", "noveno",
    "décimo",
];

lazy_static! {
    static ref CURRENCY_PREFIX_REGEX: Regex =
        Regex::new(r"(US\$|MX\$|€|\$|£)\s?(\d{1,3}(?:\.\d{3})+|\d+)(?:[.,](\d{1,2}))?\b").unwrap();
    static ref CURRENCY_SUFFIX_REGEX: Regex =
        Regex::new(r"\b(\d{1,3}(?:\.\d{3})+|\d+)(?:[.,](\d{1,2}))?\s?(US\$|MX\$|€|\$|£)").unwrap();
    static ref DATE_REGEX: Regex = Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap();
    static ref TIME_REGEX: Regex = Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").unwrap();
    static ref PERCENT_REGEX: Regex = Regex::new(r"\b(\d+)(?:[.,](\d+))?\s?%").unwrap();
    static ref ORDINAL_REGEX: Regex = Regex::new(r"\b(\d{1,2})\.?([ºª])").unwrap();
    static ref THOUSANDS_REGEX: Regex = Regex::new(r"\b\d{1,3}(?:\.\d{3})+\b").unwrap();
    static ref DECIMAL_REGEX: Regex = Regex::new(r"\b(\d+)[.,](\d+)\b").unwrap();
    static ref INTEGER_REGEX: Regex = Regex::new(r"\b\d+\b").unwrap();
    static ref PARAGRAPH_REGEX: Regex = Regex::new(r"[ \t\r]*\n[ \t\r]*(?:\n\s*)+").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();

    /// Abbreviations, longest first. The flag marks the ones that may close a
    /// sentence before a capital; titles only close one at a hard boundary.
    static ref ABBREVIATIONS: Vec<(Regex, &'static str, bool)> = [
        (r"\bSrta\.", "señorita", false),
        (r"\bSra\.", "señora", false),
        (r"\bSr\.", "señor", false),
        (r"\bDra\.", "doctora", false),
        (r"\bDr\.", "doctor", false),
        (r"\bUds\.", "ustedes", true),
        (r"\bUd\.", "usted", true),
        (r"\bProf\.", "profesor", false),
        (r"\bLic\.", "licenciado", false),
        (r"\bIng\.", "ingeniero", false),
        (r"\bAv\.", "avenida", false),
        (r"\betc\.", "etcétera", true),
    ]
    .iter()
    .map(|(pattern, expansion, closes)| (Regex::new(pattern).unwrap(), *expansion, *closes))
    .collect();
}

#[derive(Debug, Clone)]
pub struct TextNormalizer {
    punct_map: HashMap<char, char>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        let mut punct_map = HashMap::new();
        punct_map.insert('\u{FF0C}', ',');
        punct_map.insert('\u{3002}', '.');
        punct_map.insert('\u{FF01}', '!');
        punct_map.insert('\u{FF1F}', '?');
        punct_map.insert('\u{FF1B}', ';');
        punct_map.insert('\u{FF1A}', ':');
        punct_map.insert('\u{201C}', '"');
        punct_map.insert('\u{201D}', '"');
        punct_map.insert('\u{00AB}', '"');
        punct_map.insert('\u{00BB}', '"');
        punct_map.insert('\u{2018}', '\'');
        punct_map.insert('\u{2019}', '\'');
        punct_map.insert('\u{00A0}', ' ');

        Self { punct_map }
    }

    /// Rewrite `text` into its spoken form
    pub fn normalize(&self, text: &str) -> String {
        let mut result = self.normalize_punctuation(text);
        result = self.expand_currency(&result);
        result = self.expand_dates(&result);
        result = self.expand_times(&result);
        result = self.expand_percentages(&result);
        result = self.expand_ordinals(&result);
        result = self.expand_decimals(&result);
        result = self.expand_integers(&result);
        result = self.expand_abbreviations(&result);
        self.normalize_whitespace(&result)
    }

    pub fn normalize_punctuation(&self, text: &str) -> String {
        text.replace('\u{2026}', "...")
            .chars()
            .map(|c| *self.punct_map.get(&c).unwrap_or(&c))
            .collect()
    }

    pub fn expand_currency(&self, text: &str) -> String {
        let prefixed = CURRENCY_PREFIX_REGEX.replace_all(text, |caps: &Captures| {
            let cents = caps.get(3).map(|m| m.as_str());
            spoken_amount(&caps[2], cents, currency_for(&caps[1]))
                .unwrap_or_else(|| caps[0].to_string())
        });
        CURRENCY_SUFFIX_REGEX
            .replace_all(&prefixed, |caps: &Captures| {
                let cents = caps.get(2).map(|m| m.as_str());
                spoken_amount(&caps[1], cents, currency_for(&caps[3]))
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    pub fn expand_dates(&self, text: &str) -> String {
        DATE_REGEX
            .replace_all(text, |caps: &Captures| {
                let day: u32 = caps[1].parse().unwrap_or(0);
                let month: u32 = caps[2].parse().unwrap_or(0);
                let year: u64 = caps[3].parse().unwrap_or(0);
                match numbers::month_name(month) {
                    Some(month_name) if (1..=31).contains(&day) => format!(
                        "{} de {} de {}",
                        numbers::day_words(day),
                        month_name,
                        numbers::to_words(year)
                    ),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    pub fn expand_times(&self, text: &str) -> String {
        TIME_REGEX
            .replace_all(text, |caps: &Captures| {
                let hour: u64 = caps[1].parse().unwrap_or(0);
                let minute: u64 = caps[2].parse().unwrap_or(0);
                spoken_time(hour, minute)
            })
            .into_owned()
    }

    pub fn expand_percentages(&self, text: &str) -> String {
        PERCENT_REGEX
            .replace_all(text, |caps: &Captures| {
                let number = match caps.get(2) {
                    Some(fraction) => spoken_decimal(&caps[1], fraction.as_str()),
                    None => spoken_integer(&caps[1]),
                };
                format!("{} por ciento", number)
            })
            .into_owned()
    }

    pub fn expand_ordinals(&self, text: &str) -> String {
        ORDINAL_REGEX
            .replace_all(text, |caps: &Captures| {
                let n: usize = caps[1].parse().unwrap_or(0);
                let feminine = &caps[2] == "ª";
                match n {
                    1..=10 => {
                        let word = ORDINALS_MASC[n - 1];
                        if feminine {
                            format!("{}a", word.trim_end_matches('o'))
                        } else {
                            word.to_string()
                        }
                    }
                    _ => spoken_integer(&caps[1]),
                }
            })
            .into_owned()
    }

    pub fn expand_decimals(&self, text: &str) -> String {
        let grouped = THOUSANDS_REGEX.replace_all(text, |caps: &Captures| caps[0].replace('.', ""));
        DECIMAL_REGEX
            .replace_all(&grouped, |caps: &Captures| spoken_decimal(&caps[1], &caps[2]))
            .into_owned()
    }

    pub fn expand_integers(&self, text: &str) -> String {
        INTEGER_REGEX
            .replace_all(text, |caps: &Captures| spoken_integer(&caps[0]))
            .into_owned()
    }

    pub fn expand_abbreviations(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (regex, expansion, closes_sentence) in ABBREVIATIONS.iter() {
            let current = result.clone();
            result = regex
                .replace_all(&current, |caps: &Captures| {
                    let end = caps.get(0).map_or(0, |m| m.end());
                    // The dot doubles as a full stop at the end of a sentence
                    let rest = &current[end..];
                    let closes = if *closes_sentence {
                        ends_sentence(rest)
                    } else {
                        ends_at_boundary(rest)
                    };
                    if closes {
                        format!("{}.", expansion)
                    } else {
                        expansion.to_string()
                    }
                })
                .into_owned();
        }
        result
    }

    /// Collapse whitespace, keeping blank lines as paragraph breaks
    pub fn normalize_whitespace(&self, text: &str) -> String {
        PARAGRAPH_REGEX
            .split(text)
            .map(|paragraph| WHITESPACE_REGEX.replace_all(paragraph, " ").trim().to_string())
            .filter(|paragraph| !paragraph.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            current.push(ch);
            let terminal = matches!(ch, '.' | '!' | '?');
            let run_continues = matches!(chars.peek(), Some('.' | '!' | '?'));
            let paragraph = ch == '\n' && chars.peek() == Some(&'\n');
            if (terminal && !run_continues) || paragraph {
                let trimmed = current.trim().to_string();
                if !trimmed.is_empty() {
                    sentences.push(trimmed);
                }
                current.clear();
            }
        }

        let trimmed = current.trim().to_string();
        if !trimmed.is_empty() {
            sentences.push(trimmed);
        }

        sentences
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn ends_sentence(rest: &str) -> bool {
    ends_at_boundary(rest)
        || rest
            .trim_start_matches([' ', '\t'])
            .starts_with(char::is_uppercase)
}

/// End of text, a line break, or an opening question or exclamation mark
fn ends_at_boundary(rest: &str) -> bool {
    let rest = rest.trim_start_matches([' ', '\t']);
    matches!(rest.chars().next(), None | Some('\n' | '¿' | '¡'))
}

fn parse_amount(digits: &str) -> Option<u64> {
    digits.replace('.', "").parse().ok()
}

fn spoken_integer(digits: &str) -> String {
    // Codes such as "007" keep their leading zeros
    if digits.len() > 1 && digits.starts_with('0') {
        return numbers::digits_to_words(digits);
    }
    digits
        .parse::<u64>()
        .map(numbers::to_words)
        .unwrap_or_else(|_| numbers::digits_to_words(digits))
}

fn spoken_decimal(integer: &str, fraction: &str) -> String {
    let fraction_words = if fraction.len() <= 2 && !fraction.starts_with('0') {
        spoken_integer(fraction)
    } else {
        numbers::digits_to_words(fraction)
    };
    format!("{} coma {}", spoken_integer(integer), fraction_words)
}

fn spoken_amount(amount: &str, cents: Option<&str>, currency: Currency) -> Option<String> {
    let value = parse_amount(amount)?;
    let mut words = numbers::to_words_before_noun(value, currency.gender);
    if words.ends_with("millón") || words.ends_with("millones") {
        words.push_str(" de");
    }
    let noun = if value == 1 {
        currency.singular
    } else {
        currency.plural
    };
    let mut spoken = format!("{} {}", words, noun);

    if let Some(cents) = cents {
        // A single digit after the separator means tenths: "3,5" is 3.50
        let cents_value: u64 = if cents.len() == 1 {
            cents.parse::<u64>().ok()? * 10
        } else {
            cents.parse().ok()?
        };
        if cents_value > 0 {
            let cent_noun = if cents_value == 1 {
                currency.cent_singular
            } else {
                currency.cent_plural
            };
            spoken.push_str(&format!(
                " con {} {}",
                numbers::to_words_before_noun(cents_value, Gender::Masculine),
                cent_noun
            ));
        }
    }
    Some(spoken)
}

fn spoken_time(hour: u64, minute: u64) -> String {
    let clock = |h: u64| {
        let h12 = match h % 12 {
            0 => 12,
            h => h,
        };
        numbers::to_words_gendered(h12, Gender::Feminine)
    };
    match minute {
        0 => format!("{} en punto", clock(hour)),
        15 => format!("{} y cuarto", clock(hour)),
        30 => format!("{} y media", clock(hour)),
        45 => format!("{} menos cuarto", clock(hour + 1)),
        m => format!("{} y {}", clock(hour), numbers::to_words(m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizer() {
        let n = TextNormalizer::new();
        let r = n.normalize_whitespace("  a  b  ");
        assert_eq!(r, "a b");
    }

    #[test]
    fn test_bare_numbers() {
        let n = TextNormalizer::new();
        let r = n.normalize("Tengo 25 euros");
        assert!(r.contains("veinticinco"));
        assert!(r.contains("euros"));
        assert_eq!(n.normalize("Son 1999 pasos"), "Son mil novecientos noventa y nueve pasos");
    }

    #[test]
    fn test_currency_symbols() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("Cuesta 25€"), "Cuesta veinticinco euros");
        assert_eq!(n.normalize("Cuesta €1"), "Cuesta un euro");
        assert_eq!(n.normalize("Pagó $21"), "Pagó veintiún dólares");
        assert_eq!(
            n.normalize("Son €3,50"),
            "Son tres euros con cincuenta céntimos"
        );
        assert_eq!(n.normalize("Vale £1"), "Vale una libra");
        assert_eq!(
            n.normalize("Ganó $1.000.000"),
            "Ganó un millón de dólares"
        );
    }

    #[test]
    fn test_dates() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.normalize("Nací el 25/12/1990"),
            "Nací el veinticinco de diciembre de mil novecientos noventa"
        );
        assert_eq!(
            n.normalize("Llega el 1/5/2024"),
            "Llega el primero de mayo de dos mil veinticuatro"
        );
    }

    #[test]
    fn test_invalid_date_falls_through_to_numbers() {
        let n = TextNormalizer::new();
        let r = n.normalize("Código 45/13/2020");
        assert!(!r.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_times() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("a las 10:30"), "a las diez y media");
        assert_eq!(n.normalize("a las 13:00"), "a las una en punto");
        assert_eq!(n.normalize("a las 8:15"), "a las ocho y cuarto");
        assert_eq!(n.normalize("a las 8:45"), "a las nueve menos cuarto");
        assert_eq!(n.normalize("a las 9:05"), "a las nueve y cinco");
        assert_eq!(n.normalize("a las 21:21"), "a las nueve y veintiuno");
    }

    #[test]
    fn test_percent_and_decimals() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("el 50%"), "el cincuenta por ciento");
        assert_eq!(n.normalize("mide 3,5 metros"), "mide tres coma cinco metros");
        assert_eq!(n.normalize("hay 1.500 personas"), "hay mil quinientos personas");
    }

    #[test]
    fn test_ordinals() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("el 3º piso"), "el tercero piso");
        assert_eq!(n.normalize("la 2ª vez"), "la segunda vez");
    }

    #[test]
    fn test_abbreviations() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.normalize("El Sr. Gómez y la Sra. Ruiz ven al Dr. Paz"),
            "El señor Gómez y la señora Ruiz ven al doctor Paz"
        );
        assert_eq!(n.normalize("Traje peras, uvas, etc."), "Traje peras, uvas, etcétera.");
    }

    #[test]
    fn test_title_closes_sentence_at_boundary() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("Fui a ver al Dr."), "Fui a ver al doctor.");
        assert_eq!(
            n.normalize("Pregunté por la Sra.\n\nNo estaba."),
            "Pregunté por la señora.\n\nNo estaba."
        );
        assert_eq!(
            n.normalize("Llamé al Sr. ¿Vendrá?"),
            "Llamé al señor. ¿Vendrá?"
        );
        assert_eq!(
            n.split_sentences(&n.normalize("Vino el Dr.\n\nLuego salí.")),
            vec!["Vino el doctor.", "Luego salí."]
        );
    }

    #[test]
    fn test_paragraphs_preserved() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.normalize("Hola.\n\n\n  Adiós.\nHasta luego."),
            "Hola.\n\nAdiós. Hasta luego."
        );
    }

    #[test]
    fn test_idempotent() {
        let n = TextNormalizer::new();
        let inputs = [
            "Tengo 25 euros",
            "El Sr. Pérez llegó el 12/10/2023 a las 18:30 con $1.250,75.",
            "Vale 3,5%… ¿seguro?\n\nSí, 100%.",
            "Código 007 y MP3, etc.",
        ];
        for input in inputs {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_split_sentences() {
        let n = TextNormalizer::new();
        let sentences = n.split_sentences("Hola. ¿Qué tal?! Bien...");
        assert_eq!(sentences, vec!["Hola.", "¿Qué tal?!", "Bien..."]);
    }
}
