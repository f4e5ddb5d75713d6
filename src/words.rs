const UNITS: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAC: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// 0..=99
fn two_digits(n: u64) -> String {
    let n = n as usize;
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ if n % 10 == 0 => TENS[n / 10].to_string(),
        _ => format!("{} {}", TENS[n / 10], UNITS[n % 10]),
    }
}

/// 0..=999
fn three_digits(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    let mut out = String::new();
    if hundreds > 0 {
        out.push_str(UNITS[hundreds as usize]);
        out.push_str(" Hundred");
    }
    if rest > 0 {
        if !out.is_empty() {
            out.push_str(" and ");
        }
        out.push_str(&two_digits(rest));
    }
    out
}

/// Empty for zero. A crore count of 100 or more is itself spelled on the
/// same scale, e.g. "One Lac Crore".
fn integer_words(n: u64) -> String {
    let mut parts = Vec::new();

    let crore = n / CRORE;
    if crore > 0 {
        parts.push(format!("{} Crore", integer_words(crore)));
    }
    let lac = (n % CRORE) / LAC;
    if lac > 0 {
        parts.push(format!("{} Lac", two_digits(lac)));
    }
    let thousand = (n % LAC) / THOUSAND;
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digits(thousand)));
    }
    let below_thousand = n % THOUSAND;
    if below_thousand > 0 {
        parts.push(three_digits(below_thousand));
    }

    parts.join(" ")
}

/// Spell a taka amount on the crore/lac/thousand scale:
/// `1234.56` becomes "Taka One Thousand Two Hundred and Thirty Four and
/// Paisa Fifty Six Only". Negative or non-finite input reads as zero.
pub fn to_words(amount: f64) -> String {
    let amount = if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    };

    let mut taka = amount.trunc() as u64;
    let mut paisa = ((amount - amount.trunc()) * 100.0).round_ties_even() as u64;
    if paisa >= 100 {
        taka += 1;
        paisa -= 100;
    }

    let taka_words = integer_words(taka);
    let mut out = if taka_words.is_empty() {
        "Taka Zero".to_string()
    } else {
        format!("Taka {taka_words}")
    };
    if paisa > 0 {
        out.push_str(" and Paisa ");
        out.push_str(&two_digits(paisa));
    }
    out.push_str(" Only");
    out
}
