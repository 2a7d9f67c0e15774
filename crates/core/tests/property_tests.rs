use std::collections::HashMap;

use huffman_text_core::codec::TextCodec;
use huffman_text_core::huffman::HuffmanCodec;
use huffman_text_core::syllable::{SpanishSyllabifier, Syllabifier};
use huffman_text_core::tokenizer::{tokenize, TokenizeMode};
use proptest::prelude::*;

/// Text biased toward the Spanish word alphabet, with punctuation and spaces.
fn spanish_like() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::sample::select(vec![
                'a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'ü', 'y',
                'b', 'c', 'd', 'g', 'h', 'l', 'm', 'n', 'ñ', 'p', 'r', 's', 't',
                'A', 'E', 'Ñ', 'Ü', 'R', 'L',
            ]),
            1 => prop::sample::select(vec![' ', ',', '.', '¿', '?', '\n', '1']),
        ],
        1..80,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn mode_strategy() -> impl Strategy<Value = bool> {
    any::<bool>()
}

proptest! {
    #[test]
    fn test_round_trip_any_text(text in "\\PC{1,64}", separate_syllables in mode_strategy()) {
        let codec = HuffmanCodec::default();
        let encoded = codec.encode(&text, separate_syllables).unwrap();
        let decoded = codec.decode(&encoded.encoded_text, &encoded.encoding_map).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn test_round_trip_spanish(text in spanish_like(), separate_syllables in mode_strategy()) {
        let codec = HuffmanCodec::default();
        let encoded = codec.encode(&text, separate_syllables).unwrap();
        let decoded = codec.decode(&encoded.encoded_text, &encoded.encoding_map).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn test_codes_bijective_and_prefix_free(text in spanish_like(), separate_syllables in mode_strategy()) {
        let encoded = HuffmanCodec::default().encode(&text, separate_syllables).unwrap();
        let map = &encoded.encoding_map;

        prop_assert!(map.invert().is_ok());
        prop_assert!(map.is_prefix_free());
        for (_, code) in map.iter() {
            prop_assert!(!code.is_empty());
            prop_assert!(code.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn test_one_entry_per_distinct_symbol(text in spanish_like(), separate_syllables in mode_strategy()) {
        let mode = TokenizeMode::from_flag(separate_syllables);
        let symbols = tokenize(&text, mode, &SpanishSyllabifier);
        let encoded = HuffmanCodec::default().encode(&text, separate_syllables).unwrap();

        let mut distinct: Vec<&String> = symbols.iter().collect();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(encoded.encoding_map.len(), distinct.len());
        prop_assert_eq!(encoded.encoded_text.split(' ').count(), symbols.len());
    }

    #[test]
    fn test_monotonic_weighting(text in spanish_like(), separate_syllables in mode_strategy()) {
        let mode = TokenizeMode::from_flag(separate_syllables);
        let symbols = tokenize(&text, mode, &SpanishSyllabifier);
        let encoded = HuffmanCodec::default().encode(&text, separate_syllables).unwrap();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for symbol in &symbols {
            *counts.entry(symbol.as_str()).or_insert(0) += 1;
        }

        let lengths: Vec<(usize, usize)> = encoded
            .encoding_map
            .iter()
            .map(|(symbol, code)| (counts[symbol], code.len()))
            .collect();
        for &(count_a, len_a) in &lengths {
            for &(count_b, len_b) in &lengths {
                if count_a > count_b {
                    prop_assert!(len_a <= len_b);
                }
            }
        }
    }

    #[test]
    fn test_tokenizer_invertible(text in "\\PC{0,64}") {
        for mode in [TokenizeMode::PerCharacter, TokenizeMode::PerSyllable] {
            prop_assert_eq!(tokenize(&text, mode, &SpanishSyllabifier).concat(), text.clone());
        }
    }

    #[test]
    fn test_syllables_concatenate(word in "[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ]{1,20}") {
        let syllables = SpanishSyllabifier.syllabify(&word);
        prop_assert!(syllables.iter().all(|s| !s.is_empty()));
        prop_assert_eq!(syllables.concat(), word);
    }
}
