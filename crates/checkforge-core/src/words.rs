//! Spelling out check amounts.

const ONES: [&str; 10] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];
const TEENS: [&str; 10] = [
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen",
];
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const SCALES: [&str; 4] = ["", "thousand", "million", "billion"];

/// Spell out a group below one thousand, e.g. `"three hundred forty two"`.
fn hundreds(mut n: u64) -> String {
    let mut words = Vec::new();
    if n >= 100 {
        words.push(ONES[(n / 100) as usize]);
        words.push("hundred");
        n %= 100;
    }
    if n >= 20 {
        words.push(TENS[(n / 10) as usize]);
        n %= 10;
    } else if n >= 10 {
        words.push(TEENS[(n - 10) as usize]);
        n = 0;
    }
    if n > 0 {
        words.push(ONES[n as usize]);
    }
    words.join(" ")
}

/// Spell out a whole-dollar amount.
fn dollars_in_words(mut dollars: u64) -> String {
    if dollars == 0 {
        return "zero".to_string();
    }
    let mut groups = Vec::new();
    let mut scale = 0;
    while dollars > 0 && scale < SCALES.len() {
        let group = dollars % 1000;
        if group > 0 {
            let mut words = hundreds(group);
            if !SCALES[scale].is_empty() {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        dollars /= 1000;
        scale += 1;
    }
    groups.reverse();
    groups.join(" ")
}

/// Spell out an amount the way it is written on the words line of a check.
///
/// `123.45` becomes `"One hundred twenty three dollars and 45/100"`. Zero,
/// negative and non-finite amounts yield an empty string.
pub fn amount_to_words(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 || amount >= 1e12 {
        return String::new();
    }

    let mut dollars = amount.floor() as u64;
    let mut cents = ((amount - amount.floor()) * 100.0).round() as u64;
    if cents >= 100 {
        dollars += 1;
        cents = 0;
    }

    let mut result = dollars_in_words(dollars);
    result.push_str(" dollars");
    if cents > 0 {
        result.push_str(&format!(" and {cents}/100"));
    }

    let mut chars = result.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => result,
    }
}

/// Parse a form amount and spell it out, if it is a number.
pub fn amount_text_to_words(amount: &str) -> Option<String> {
    let value: f64 = amount.trim().parse().ok()?;
    Some(amount_to_words(value))
}
