//! Sample text generation for runs without an input.
//!
//! When no text or input file is given, we generate Spanish-like prose
//! with interesting codec characteristics: a skewed word distribution
//! (a few very common words, many rare ones), accented letters, ñ/ü, and
//! punctuation. This makes per-syllable and per-character modes visibly
//! different in the stats.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frequent function words, picked half of the time.
const COMMON_WORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "se", "del", "las", "un", "por", "con",
    "no", "una", "su", "para", "es", "al",
];

/// Content words exercising diphthongs, hiatus, clusters and digraphs.
const CONTENT_WORDS: &[&str] = &[
    "casa", "perro", "ciudad", "pingüino", "mañana", "corazón", "árbol", "camión", "hombre",
    "palabra", "guerra", "queso", "noche", "calle", "aéreo", "país", "leía", "instante",
    "transporte", "murciélago", "caballero", "montaña", "cigüeña", "lluvia", "tiempo",
    "escribir", "nuestro", "España", "río", "maíz",
];

/// Punctuation that may follow a word.
const PUNCTUATION: &[&str] = &[",", ".", ";", ":", "!", "?"];

/// Generate sample text of `words` words.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `words`: number of words to emit
///
/// Returns an empty string for `words == 0`.
pub fn generate_sample_text(seed: u64, words: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::new();
    let mut capitalize = true;

    for i in 0..words {
        if i > 0 {
            text.push(' ');
        }

        let word = pick_word(&mut rng);
        if capitalize {
            push_capitalized(&mut text, word);
            capitalize = false;
        } else {
            text.push_str(word);
        }

        // ~1 in 8 words carries punctuation; sentence ends capitalize next
        if rng.gen_range(0..8) == 0 {
            let mark = PUNCTUATION[rng.gen_range(0..PUNCTUATION.len())];
            text.push_str(mark);
            capitalize = matches!(mark, "." | "!" | "?");
        }
    }

    if words > 0 && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

fn pick_word(rng: &mut ChaCha8Rng) -> &'static str {
    if rng.gen_bool(0.5) {
        COMMON_WORDS[rng.gen_range(0..COMMON_WORDS.len())]
    } else {
        CONTENT_WORDS[rng.gen_range(0..CONTENT_WORDS.len())]
    }
}

fn push_capitalized(text: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        text.extend(first.to_uppercase());
        text.push_str(chars.as_str());
    }
}
