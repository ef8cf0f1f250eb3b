//! Property tests for word-bounded chunking.

use docrag::chunking::{Chunker, WordChunker, chunk_text};
use proptest::prelude::*;

fn arb_separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("  "), Just("\n"), Just("\t"), Just(" \r\n ")]
}

/// Words with the whitespace that separated them in the generated text.
fn arb_text() -> impl Strategy<Value = (Vec<String>, String)> {
    proptest::collection::vec(("[a-zA-Zé0-9.,]{1,15}", arb_separator()), 0..150).prop_map(|pairs| {
        let words: Vec<String> = pairs.iter().map(|(w, _)| w.clone()).collect();
        let text: String = pairs.iter().map(|(w, sep)| format!("{w}{sep}")).collect();
        (words, text)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chunks_rejoin_to_normalized_text((words, text) in arb_text(), max in 5usize..80) {
        let chunks = chunk_text(&text, 0, max);
        prop_assert_eq!(chunks.join(" "), words.join(" "));
    }

    #[test]
    fn chunks_respect_max_unless_single_word((_, text) in arb_text(), max in 5usize..80) {
        for chunk in chunk_text(&text, 0, max) {
            prop_assert!(!chunk.is_empty());
            let single_word = !chunk.contains(' ');
            prop_assert!(
                chunk.chars().count() <= max || single_word,
                "chunk of {} chars exceeds {max}: {chunk:?}",
                chunk.chars().count(),
            );
        }
    }

    #[test]
    fn coalescing_preserves_text((words, text) in arb_text(), max in 5usize..80) {
        let chunker = WordChunker::new(max / 2, max).with_coalesce_trailing(true);
        prop_assert_eq!(chunker.chunk(&text).join(" "), words.join(" "));
    }
}

#[test]
fn blank_inputs_yield_nothing() {
    assert!(chunk_text("", 700, 900).is_empty());
    assert!(chunk_text("   ", 700, 900).is_empty());
}
