//! Match Rating Approach (Western Airlines, 1977): a phonetic codex plus a
//! similarity rating compared against a length-dependent minimum.
//!
//! Only alphabetic characters take part; digits, punctuation and spaces are
//! dropped before encoding.

const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Encode `input` into its match-rating codex (at most 6 characters).
pub fn codex(input: &str) -> String {
    let letters: Vec<char> = input
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect();

    let mut codex = Vec::with_capacity(letters.len());
    let mut prev: Option<char> = None;
    for (i, &c) in letters.iter().enumerate() {
        let vowel = VOWELS.contains(&c);
        // Leading vowel, or a consonant that does not repeat the previous letter.
        if (i == 0 && vowel) || (!vowel && prev != Some(c)) {
            codex.push(c);
        }
        prev = Some(c);
    }

    if codex.len() > 6 {
        let tail = codex.len() - 3;
        codex.drain(3..tail);
    }
    codex.into_iter().collect()
}

/// Compare two strings.
///
/// Returns `None` when the codex lengths differ by 3 or more (no rating is
/// defined), otherwise whether the rating reaches the minimum.
pub fn compare(a: &str, b: &str) -> Option<bool> {
    let first: Vec<char> = codex(a).chars().collect();
    let second: Vec<char> = codex(b).chars().collect();

    if first.len().abs_diff(second.len()) >= 3 {
        return None;
    }

    let minimum_rating = match first.len() + second.len() {
        0..=4 => 5,
        5..=7 => 4,
        8..=11 => 3,
        _ => 2,
    };

    // Left-to-right pass drops characters equal at the same position.
    let mut rest_first = Vec::<char>::new();
    let mut rest_second = Vec::<char>::new();
    for i in 0..first.len().max(second.len()) {
        let (x, y) = (first.get(i), second.get(i));
        if x != y {
            rest_first.extend(x);
            rest_second.extend(y);
        }
    }

    // Right-to-left pass counts what is still unmatched.
    rest_first.reverse();
    rest_second.reverse();
    let (mut unmatched_first, mut unmatched_second) = (0i64, 0i64);
    for i in 0..rest_first.len().max(rest_second.len()) {
        let (x, y) = (rest_first.get(i), rest_second.get(i));
        if x != y {
            unmatched_first += i64::from(x.is_some());
            unmatched_second += i64::from(y.is_some());
        }
    }

    Some(6 - unmatched_first.max(unmatched_second) >= minimum_rating)
}
