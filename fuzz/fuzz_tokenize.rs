//! Fuzz target for the tokenizer and cursor resolver.
//!
//! Run with: cargo +nightly fuzz run fuzz_tokenize
//!
//! Checks that tokenizing never loses or invents input and that completion
//! accepts every character-boundary cursor.

#![no_main]

use aoi_core::{Catalogs, suggest, tokenize, word_at_cursor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalogs) = Catalogs::builtin() else {
        return;
    };

    let tokens = tokenize(source, &catalogs.vocabulary);
    let rebuilt: String = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(rebuilt, source);

    for (cursor, _) in source.char_indices().chain([(source.len(), ' ')]) {
        let word = word_at_cursor(source, cursor).unwrap();
        assert!(word.start <= cursor);
        assert!(suggest(&catalogs.completions, source, cursor).is_ok());
    }
});
