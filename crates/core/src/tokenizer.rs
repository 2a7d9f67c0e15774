//! Text tokenization into codec symbols.
//!
//! Two strategies:
//! - [`TokenizeMode::PerCharacter`]: one symbol per `char`
//! - [`TokenizeMode::PerSyllable`]: alphabetic runs are split into syllables,
//!   every other character is its own symbol
//!
//! # Invariant
//!
//! Concatenating the returned symbols reproduces the input text exactly,
//! in both modes and for any input.

use crate::syllable::Syllabifier;

/// How text is split into symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizeMode {
    #[default]
    PerCharacter,
    PerSyllable,
}

impl TokenizeMode {
    /// Mode selected by the `separate_syllables` request flag.
    pub fn from_flag(separate_syllables: bool) -> Self {
        if separate_syllables {
            TokenizeMode::PerSyllable
        } else {
            TokenizeMode::PerCharacter
        }
    }
}

/// Whether `c` belongs to the word alphabet used by per-syllable mode.
///
/// Latin letters plus the Spanish accented vowels, ñ and ü (both cases).
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(
            c,
            'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'Ñ' | 'ñ' | 'Ü' | 'ü'
        )
}

/// Split `text` into symbols.
pub fn tokenize(text: &str, mode: TokenizeMode, syllabifier: &dyn Syllabifier) -> Vec<String> {
    match mode {
        TokenizeMode::PerCharacter => text.chars().map(String::from).collect(),
        TokenizeMode::PerSyllable => split_syllables(text, syllabifier),
    }
}

fn split_syllables(text: &str, syllabifier: &dyn Syllabifier) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        if is_word_char(c) {
            word_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = word_start.take() {
            push_word(&text[start..idx], syllabifier, &mut symbols);
        }
        symbols.push(c.to_string());
    }

    if let Some(start) = word_start {
        push_word(&text[start..], syllabifier, &mut symbols);
    }

    symbols
}

fn push_word(word: &str, syllabifier: &dyn Syllabifier, symbols: &mut Vec<String>) {
    let syllables = syllabifier.syllabify(word);

    if syllables.iter().any(String::is_empty) || syllables.concat() != word {
        log::warn!(
            "syllabifier returned {:?} for {:?}; keeping the word whole",
            syllables,
            word
        );
        symbols.push(word.to_string());
        return;
    }

    log::trace!("{:?} -> {:?}", word, syllables);
    symbols.extend(syllables);
}
