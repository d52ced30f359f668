//! Pure numerology engine: maps a (full name, birth date) pair to a
//! [`NumerologyResult`]. Never fails and never panics; malformed input
//! degrades to zeros / `None` so callers can recompute on every edit.

use crate::domain::model::NumerologyResult;
use chrono::{Datelike, Utc};
use std::collections::BTreeMap;

const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

const ENYE: char = 'Ñ';

/// Pythagorean letter table. Input must already be normalized (uppercase
/// A-Z or Ñ); anything else is worth 0 and stays out of every sum.
fn letter_value(letter: char) -> u32 {
    match letter {
        'A' | 'J' | 'S' => 1,
        'B' | 'K' | 'T' => 2,
        'C' | 'L' | 'U' => 3,
        'D' | 'M' | 'V' => 4,
        'E' | 'N' | 'W' | ENYE => 5,
        'F' | 'O' | 'X' => 6,
        'G' | 'P' | 'Y' => 7,
        'H' | 'Q' | 'Z' => 8,
        'I' | 'R' => 9,
        _ => 0,
    }
}

fn is_vowel(letter: char) -> bool {
    matches!(letter, 'A' | 'E' | 'I' | 'O' | 'U')
}

fn fold_accent(letter: char) -> char {
    match letter {
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        'Ç' => 'C',
        other => other,
    }
}

/// Normalizes a raw name into the letter sequence all name-based values are
/// computed from: uppercase, accents folded (É→E), everything outside
/// {A-Z, Ñ} dropped.
///
/// The Ñ check runs against the pre-folded uppercase character; folding
/// first would silently turn Ñ into plain N before the special rule can
/// see it.
pub fn normalize_name(raw: &str) -> Vec<char> {
    let mut letters = Vec::new();
    for ch in raw.chars() {
        let upper = ch.to_uppercase().next().unwrap_or(ch);
        let folded = if upper == ENYE { ENYE } else { fold_accent(upper) };
        if folded.is_ascii_uppercase() || folded == ENYE {
            letters.push(folded);
        }
    }
    letters
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Repeatedly digit-sums `value` down to a single digit. With `keep_master`
/// the reduction stops at 11, 22 or 33, checked on every intermediate sum
/// (29 → 11 stays 11, it never continues to 2).
pub fn reduce(value: u32, keep_master: bool) -> u32 {
    let mut n = value;
    loop {
        if keep_master && MASTER_NUMBERS.contains(&n) {
            return n;
        }
        if n < 10 {
            return n;
        }
        n = digit_sum(n);
    }
}

struct DateParts {
    day: Option<u32>,
    month: Option<u32>,
    year: Option<u32>,
}

/// `"YYYY-MM-DD"` with `"0000"` / `"00"` placeholders for unknown parts.
/// Unparseable or zero components come back as `None`, never as an error.
fn parse_birth_date(birth_date: &str) -> DateParts {
    let mut parts = birth_date.splitn(3, '-');
    let year = parts.next().and_then(parse_date_part);
    let month = parts.next().and_then(parse_date_part);
    let day = parts.next().and_then(parse_date_part);
    DateParts { day, month, year }
}

fn parse_date_part(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Convenience form using the current calendar year for the personal-year
/// cycle. All determinism guarantees are stated against
/// [`compute_numerology_for_year`]; this wrapper adds "today" as an
/// implicit input.
pub fn compute_numerology(full_name: &str, birth_date: &str) -> NumerologyResult {
    compute_numerology_for_year(full_name, birth_date, Utc::now().year())
}

/// Computes the full numerology profile. Pure and deterministic: identical
/// arguments always produce an identical result, including collection
/// ordering.
pub fn compute_numerology_for_year(
    full_name: &str,
    birth_date: &str,
    reference_year: i32,
) -> NumerologyResult {
    let letters = normalize_name(full_name);

    let mut vowel_sum = 0u32;
    let mut consonant_sum = 0u32;
    let mut inclusion: BTreeMap<u8, u32> = (1..=9).map(|d| (d, 0)).collect();

    for &letter in &letters {
        let value = letter_value(letter);
        if value == 0 {
            continue;
        }
        // Ñ is not in the vowel set, so it counts as a consonant.
        if is_vowel(letter) {
            vowel_sum += value;
        } else {
            consonant_sum += value;
        }
        if let Some(count) = inclusion.get_mut(&(value as u8)) {
            *count += 1;
        }
    }

    let soul = reduce(vowel_sum, true);
    let personality = reduce(consonant_sum, true);
    // Cosmic mission reduces the raw sums, not the already-reduced values.
    let cosmic_mission = reduce(vowel_sum + consonant_sum, true);

    let date = parse_birth_date(birth_date);
    let (life_path, personal_year) = match (date.day, date.month, date.year) {
        (Some(day), Some(month), Some(year)) => {
            let d_val = reduce(day, true);
            let m_val = reduce(month, true);
            let y_val = reduce(digit_sum(year), true);
            let life_path = reduce(d_val + m_val + y_val, true);
            let ref_val = reduce(digit_sum(reference_year.max(0) as u32), true);
            let personal_year = reduce(d_val + m_val + ref_val, true);
            (Some(life_path), Some(personal_year))
        }
        // A partial date carries no numerological meaning: missing day,
        // month or year all degrade to None for both date-based values.
        _ => (None, None),
    };

    let karmic_lessons: Vec<u8> = inclusion
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(&digit, _)| digit)
        .collect();

    let max_count = inclusion.values().copied().max().unwrap_or(0);
    let major_gifts: Vec<u8> = if max_count == 0 {
        Vec::new()
    } else {
        inclusion
            .iter()
            .filter(|(_, &count)| count == max_count)
            .map(|(&digit, _)| digit)
            .collect()
    };

    NumerologyResult {
        soul,
        personality,
        life_path,
        cosmic_mission,
        personal_year,
        inclusion,
        karmic_lessons,
        major_gifts,
    }
}
