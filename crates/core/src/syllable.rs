//! Syllable segmentation for the per-syllable tokenizer.
//!
//! The tokenizer hands every alphabetic run ("word") to a [`Syllabifier`].
//! The built-in [`SpanishSyllabifier`] applies Spanish orthographic rules.
//!
//! # Rules
//!
//! ```text
//! strong vowels   a e o á é ó í ú      (accented í/ú break diphthongs)
//! weak vowels     i u ü, y before a non-vowel or at the end of the word
//! consonant units ch, ll, rr count as one consonant
//!
//! V-V      hiatus: two strong vowels, or a repeated weak vowel (ii, uu)
//! V-CV     a single consonant opens the next syllable
//! V-CCV    inseparable onsets: bl br cl cr dr fl fr gl gr kl kr pl pr tr
//! VC-CV    any other pair splits
//! VCC-CV   three or more: only the last one or two (if inseparable) move
//! ```
//!
//! Every implementation must return syllables that concatenate back to the
//! word; the tokenizer checks this.

/// Splits a word into syllables.
pub trait Syllabifier: Send + Sync {
    /// Segment `word` into syllables, in order.
    fn syllabify(&self, word: &str) -> Vec<String>;
}

/// Rule-based Spanish syllabifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanishSyllabifier;

impl SpanishSyllabifier {
    pub fn new() -> Self {
        Self
    }
}

impl Syllabifier for SpanishSyllabifier {
    fn syllabify(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let classes = classify_word(&chars);
        let nuclei = find_nuclei(&chars, &classes);

        if nuclei.len() < 2 {
            return if word.is_empty() {
                Vec::new()
            } else {
                vec![word.to_string()]
            };
        }

        // Char index at which each syllable after the first begins
        let cuts: Vec<usize> = nuclei
            .windows(2)
            .map(|pair| {
                let gap_start = pair[0].end;
                let gap_end = pair[1].start;
                gap_start + onset_offset(&chars[gap_start..gap_end])
            })
            .collect();

        let mut syllables: Vec<String> = Vec::with_capacity(cuts.len() + 1);
        let mut start = 0;
        for cut in cuts.into_iter().chain(std::iter::once(chars.len())) {
            syllables.push(chars[start..cut].iter().collect());
            start = cut;
        }
        syllables
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Letter {
    Strong,
    Weak,
    Consonant,
}

/// Half-open char range of one syllable nucleus.
#[derive(Debug, Clone, Copy)]
struct Nucleus {
    start: usize,
    end: usize,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn is_vowel_letter(c: char) -> bool {
    matches!(
        fold(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü'
    )
}

fn classify_word(chars: &[char]) -> Vec<Letter> {
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| match fold(c) {
            'a' | 'e' | 'o' | 'á' | 'é' | 'ó' | 'í' | 'ú' => Letter::Strong,
            'i' | 'u' | 'ü' => Letter::Weak,
            'y' => match chars.get(i + 1) {
                Some(&next) if is_vowel_letter(next) => Letter::Consonant,
                _ => Letter::Weak,
            },
            _ => Letter::Consonant,
        })
        .collect()
}

fn find_nuclei(chars: &[char], classes: &[Letter]) -> Vec<Nucleus> {
    let mut nuclei: Vec<Nucleus> = Vec::new();
    let mut has_strong = false;

    for (i, &class) in classes.iter().enumerate() {
        if class == Letter::Consonant {
            continue;
        }

        let continues_run = matches!(nuclei.last(), Some(n) if n.end == i);
        let hiatus = continues_run
            && match class {
                Letter::Strong => has_strong,
                _ => fold(chars[i - 1]) == fold(chars[i]),
            };

        if continues_run && !hiatus {
            if let Some(last) = nuclei.last_mut() {
                last.end = i + 1;
            }
            has_strong |= class == Letter::Strong;
        } else {
            nuclei.push(Nucleus { start: i, end: i + 1 });
            has_strong = class == Letter::Strong;
        }
    }

    nuclei
}

/// Offset into `gap` (the consonants between two nuclei) where the next
/// syllable begins.
fn onset_offset(gap: &[char]) -> usize {
    let units = consonant_units(gap);
    let onset = match units.len() {
        0 => return gap.len(),
        1 => 1,
        n => {
            let (a, b) = (units[n - 2], units[n - 1]);
            if inseparable(&gap[a.0..a.1], &gap[b.0..b.1]) {
                2
            } else {
                1
            }
        }
    };
    units[units.len() - onset].0
}

/// Split consonants into units, treating ch, ll and rr as one.
fn consonant_units(gap: &[char]) -> Vec<(usize, usize)> {
    let mut units = Vec::new();
    let mut i = 0;
    while i < gap.len() {
        let digraph = gap.get(i + 1).is_some_and(|&next| {
            matches!((fold(gap[i]), fold(next)), ('c', 'h') | ('l', 'l') | ('r', 'r'))
        });
        let len = if digraph { 2 } else { 1 };
        units.push((i, i + len));
        i += len;
    }
    units
}

fn inseparable(first: &[char], second: &[char]) -> bool {
    let (&[a], &[b]) = (first, second) else {
        return false;
    };
    match (fold(a), fold(b)) {
        ('b' | 'c' | 'f' | 'g' | 'k' | 'p', 'l' | 'r') => true,
        ('d' | 't', 'r') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(word: &str) -> Vec<String> {
        SpanishSyllabifier::new().syllabify(word)
    }

    #[test]
    fn test_open_syllables() {
        assert_eq!(split("casa"), vec!["ca", "sa"]);
        assert_eq!(split("palabra"), vec!["pa", "la", "bra"]);
        assert_eq!(split("Mañana"), vec!["Ma", "ña", "na"]);
    }

    #[test]
    fn test_consonant_clusters() {
        assert_eq!(split("hombre"), vec!["hom", "bre"]);
        assert_eq!(split("carta"), vec!["car", "ta"]);
        assert_eq!(split("instante"), vec!["ins", "tan", "te"]);
        assert_eq!(split("obstruir"), vec!["obs", "truir"]);
        assert_eq!(split("atlas"), vec!["at", "las"]);
    }

    #[test]
    fn test_digraphs_stay_together() {
        assert_eq!(split("perro"), vec!["pe", "rro"]);
        assert_eq!(split("calle"), vec!["ca", "lle"]);
        assert_eq!(split("noche"), vec!["no", "che"]);
    }

    #[test]
    fn test_diphthongs_and_hiatus() {
        assert_eq!(split("ciudad"), vec!["ciu", "dad"]);
        assert_eq!(split("cuidado"), vec!["cui", "da", "do"]);
        assert_eq!(split("aéreo"), vec!["a", "é", "re", "o"]);
        assert_eq!(split("país"), vec!["pa", "ís"]);
        assert_eq!(split("leía"), vec!["le", "í", "a"]);
        assert_eq!(split("chiita"), vec!["chi", "i", "ta"]);
    }

    #[test]
    fn test_y_as_vowel_or_consonant() {
        assert_eq!(split("rey"), vec!["rey"]);
        assert_eq!(split("playa"), vec!["pla", "ya"]);
        assert_eq!(split("y"), vec!["y"]);
        assert_eq!(split("yo"), vec!["yo"]);
    }

    #[test]
    fn test_silent_u() {
        assert_eq!(split("queso"), vec!["que", "so"]);
        assert_eq!(split("guerra"), vec!["gue", "rra"]);
        assert_eq!(split("pingüino"), vec!["pin", "güi", "no"]);
    }

    #[test]
    fn test_words_without_vowels() {
        assert_eq!(split("pst"), vec!["pst"]);
        assert!(split("").is_empty());
    }

    #[test]
    fn test_uppercase_rules() {
        assert_eq!(split("HOMBRE"), vec!["HOM", "BRE"]);
        assert_eq!(split("CHAVAL"), vec!["CHA", "VAL"]);
    }

    #[test]
    fn test_concatenation_restores_word() {
        for word in ["extraordinario", "transporte", "Murciélago", "ahumado", "xyz", "Ü"] {
            assert_eq!(split(word).concat(), word);
        }
    }
}
