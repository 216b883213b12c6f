//! Spanish number-to-words conversion

const UNITS: [&str; 30] = [
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve", "diez",
    "once", "doce", "trece", "catorce", "quince", "dieciséis", "diecisiete", "dieciocho",
    "diecinueve", "veinte", "veintiuno", "veintidós", "veintitrés", "veinticuatro",
    "veinticinco", "veintiséis", "veintisiete", "veintiocho", "veintinueve",
];

const TENS: [&str; 10] = [
    "", "", "", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta", "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Largest value spelled out exactly; longer numbers are read digit by digit
pub const MAX_CARDINAL: u64 = 999_999_999_999;

/// Grammatical gender for number words that agree with a noun
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// Convert an integer to Spanish cardinal words
///
/// ```
/// use acento::text::numbers::to_words;
/// assert_eq!(to_words(2024), "dos mil veinticuatro");
/// assert_eq!(to_words(101), "ciento uno");
/// ```
pub fn to_words(n: u64) -> String {
    if n > MAX_CARDINAL {
        return digits_to_words(&n.to_string());
    }
    if n == 0 {
        return UNITS[0].to_string();
    }

    let millions = n / 1_000_000;
    let thousands = (n / 1_000) % 1_000;
    let rest = n % 1_000;

    let mut parts: Vec<String> = Vec::new();

    if millions > 0 {
        if millions == 1 {
            parts.push("un millón".to_string());
        } else {
            parts.push(format!("{} millones", apocopate(&below_million(millions))));
        }
    }

    if thousands > 0 {
        if thousands == 1 {
            parts.push("mil".to_string());
        } else {
            parts.push(format!("{} mil", apocopate(&below_thousand(thousands))));
        }
    }

    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Cardinal words agreeing with a noun of the given gender
///
/// Feminine nouns turn every trailing "uno" into "una" and the hundreds into
/// their feminine forms ("doscientas libras").
pub fn to_words_gendered(n: u64, gender: Gender) -> String {
    let words = to_words(n);
    match gender {
        Gender::Masculine => words,
        Gender::Feminine => feminize(&words),
    }
}

/// Cardinal words placed directly before a masculine noun ("veintiún euros")
pub fn to_words_before_noun(n: u64, gender: Gender) -> String {
    match gender {
        Gender::Masculine => apocopate(&to_words(n)),
        Gender::Feminine => feminize(&to_words(n)),
    }
}

/// Read a run of digits one by one ("007" → "cero cero siete")
pub fn digits_to_words(digits: &str) -> String {
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| UNITS[d as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spanish month name for a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTHS[(month - 1) as usize])
    } else {
        None
    }
}

/// Spoken day of the month: "primero" for 1, cardinal otherwise
pub fn day_words(day: u32) -> String {
    if day == 1 {
        "primero".to_string()
    } else {
        to_words(day as u64)
    }
}

fn below_million(n: u64) -> String {
    let thousands = n / 1_000;
    let rest = n % 1_000;
    let mut parts = Vec::new();
    if thousands == 1 {
        parts.push("mil".to_string());
    } else if thousands > 1 {
        parts.push(format!("{} mil", apocopate(&below_thousand(thousands))));
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1_000);
    if n == 100 {
        return "cien".to_string();
    }
    let hundreds = (n / 100) as usize;
    let rest = n % 100;
    let mut parts = Vec::new();
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds].to_string());
    }
    if rest > 0 {
        parts.push(below_hundred(rest));
    }
    parts.join(" ")
}

fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 30 {
        return UNITS[n as usize].to_string();
    }
    let tens = TENS[(n / 10) as usize];
    match n % 10 {
        0 => tens.to_string(),
        unit => format!("{} y {}", tens, UNITS[unit as usize]),
    }
}

/// "uno" → "un", "veintiuno" → "veintiún" when a noun follows
fn apocopate(words: &str) -> String {
    if let Some(stem) = words.strip_suffix("veintiuno") {
        format!("{}veintiún", stem)
    } else if let Some(stem) = words.strip_suffix("uno") {
        format!("{}un", stem)
    } else {
        words.to_string()
    }
}

fn feminize(words: &str) -> String {
    let tokens: Vec<&str> = words.split(' ').collect();
    tokens
        .iter()
        .enumerate()
        .map(|(i, w)| {
            // "un millón" keeps the masculine article
            let before_million = tokens
                .get(i + 1)
                .map_or(false, |next| next.starts_with("mill"));
            match *w {
                "uno" | "un" if !before_million => "una".to_string(),
                "veintiuno" | "veintiún" if !before_million => "veintiuna".to_string(),
                _ if w.ends_with("ientos") && !before_million => {
                    format!("{}ientas", w.trim_end_matches("ientos"))
                }
                _ => w.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(to_words(0), "cero");
        assert_eq!(to_words(16), "dieciséis");
        assert_eq!(to_words(25), "veinticinco");
        assert_eq!(to_words(31), "treinta y uno");
        assert_eq!(to_words(90), "noventa");
    }

    #[test]
    fn test_hundreds_and_thousands() {
        assert_eq!(to_words(100), "cien");
        assert_eq!(to_words(115), "ciento quince");
        assert_eq!(to_words(500), "quinientos");
        assert_eq!(to_words(1000), "mil");
        assert_eq!(to_words(1999), "mil novecientos noventa y nueve");
        assert_eq!(to_words(21_000), "veintiún mil");
        assert_eq!(to_words(100_000), "cien mil");
    }

    #[test]
    fn test_millions() {
        assert_eq!(to_words(1_000_000), "un millón");
        assert_eq!(to_words(2_500_000), "dos millones quinientos mil");
        assert_eq!(to_words(31_000_000), "treinta y un millones");
    }

    #[test]
    fn test_digit_fallback() {
        assert_eq!(to_words(1_000_000_000_000), "uno cero cero cero cero cero cero cero cero cero cero cero cero");
        assert_eq!(digits_to_words("07"), "cero siete");
    }

    #[test]
    fn test_gender_and_apocope() {
        assert_eq!(to_words_before_noun(21, Gender::Masculine), "veintiún");
        assert_eq!(to_words_before_noun(1, Gender::Masculine), "un");
        assert_eq!(to_words_before_noun(1, Gender::Feminine), "una");
        assert_eq!(to_words_gendered(21, Gender::Feminine), "veintiuna");
        assert_eq!(to_words_gendered(200, Gender::Feminine), "doscientas");
    }

    #[test]
    fn test_dates_helpers() {
        assert_eq!(month_name(3), Some("marzo"));
        assert_eq!(month_name(13), None);
        assert_eq!(day_words(1), "primero");
        assert_eq!(day_words(25), "veinticinco");
    }
}
