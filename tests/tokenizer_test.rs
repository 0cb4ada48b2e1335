//! Integration tests for the fold and word-break tokenizers

use lexifold::prelude::*;

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn test_fold_diacritics_with_original_offsets() -> Result<()> {
    let input = "Café, naïve";
    let tokens = FoldTokenizer::new().tokenize(input.as_bytes())?;

    assert_eq!(texts(&tokens), vec!["cafe", "naive"]);
    assert_eq!(&input[tokens[0].byte_span()], "Café");
    assert_eq!(&input[tokens[1].byte_span()], "naïve");
    assert_eq!(tokens[1].position, 1);
    Ok(())
}

#[test]
fn test_fold_stemming_english() -> Result<()> {
    let tokenizer = FoldTokenizer::from_args(&["stemmer=english"])?;
    let tokens = tokenizer.tokenize(b"running runs")?;

    assert_eq!(texts(&tokens), vec!["run", "run"]);
    assert_eq!(tokens[0].byte_span(), 0..7);
    assert_eq!(tokens[1].byte_span(), 8..12);
    Ok(())
}

#[test]
fn test_fold_tokenchars() -> Result<()> {
    let tokenizer = FoldTokenizer::from_args(&["tokenchars=-"])?;
    let tokens = tokenizer.tokenize(b"a well-known fact")?;
    assert_eq!(texts(&tokens), vec!["a", "well-known", "fact"]);

    let default = FoldTokenizer::new().tokenize(b"a well-known fact")?;
    assert_eq!(texts(&default), vec!["a", "well", "known", "fact"]);
    Ok(())
}

#[test]
fn test_empty_and_separator_only_input() -> Result<()> {
    let tokenizers: Vec<Box<dyn Tokenizer>> = vec![
        Box::new(FoldTokenizer::new()),
        Box::new(WordBreakTokenizer::new()),
    ];
    for tokenizer in &tokenizers {
        assert!(tokenizer.tokenize(b"")?.is_empty(), "{}", tokenizer.name());
        assert!(tokenizer.tokenize(b" \t\n,.;:!?")?.is_empty(), "{}", tokenizer.name());
    }
    Ok(())
}

#[test]
fn test_token_at_end_of_input() -> Result<()> {
    let input = "trailing wörd";
    for tokens in [
        FoldTokenizer::new().tokenize(input.as_bytes())?,
        WordBreakTokenizer::new().tokenize(input.as_bytes())?,
    ] {
        assert_eq!(tokens.last().map(|t| t.end_offset), Some(input.len()));
    }
    Ok(())
}

#[test]
fn test_malformed_utf8_terminates() -> Result<()> {
    let inputs: [&[u8]; 4] = [
        b"\xFF\xFF\xFF",
        b"abc\xE2\x82",
        b"\xC0\x80x\xED\xA0\x80y",
        b"\x80\x80\x80 word \xF4\x90\x80\x80",
    ];
    let fold = FoldTokenizer::new();
    let word_break = WordBreakTokenizer::new();
    for input in inputs {
        for tokens in [fold.tokenize(input)?, word_break.tokenize(input)?] {
            assert!(tokens.len() <= input.len());
            for token in &tokens {
                assert!(token.start_offset <= token.end_offset);
                assert!(token.end_offset <= input.len());
            }
        }
    }
    Ok(())
}

#[test]
fn test_positions_and_offsets_increase() -> Result<()> {
    let input = "Re: Ｆｗｄ — the Über-Meeting at 10:30, 東京 カタカナ ok?";
    let tokenizers: Vec<Box<dyn Tokenizer>> = vec![
        Box::new(FoldTokenizer::from_args(&["stemmer=german"])?),
        Box::new(WordBreakTokenizer::new()),
    ];
    for tokenizer in &tokenizers {
        let tokens = tokenizer.tokenize(input.as_bytes())?;
        assert!(!tokens.is_empty());
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, i);
            assert!(input.is_char_boundary(token.start_offset));
            assert!(input.is_char_boundary(token.end_offset));
        }
        assert!(tokens.windows(2).all(|w| w[0].end_offset <= w[1].start_offset));
    }
    Ok(())
}

#[test]
fn test_determinism() -> Result<()> {
    let input = "Déjà vu: the quick brown fox jumps over the lazy dog 3 times.".as_bytes();
    let tokenizer = FoldTokenizer::from_args(&["stemmer=porter", "separators=x"])?;
    assert_eq!(tokenizer.tokenize(input)?, tokenizer.tokenize(input)?);

    let word_break = WordBreakTokenizer::new();
    assert_eq!(word_break.tokenize(input)?, word_break.tokenize(input)?);
    Ok(())
}

#[test]
fn test_unstemmed_round_trip() -> Result<()> {
    // Re-tokenizing a token's own text yields that token again.
    let input = "ÉCOLE naïve résumé Straße ÅNGSTRÖM";
    let tokenizer = FoldTokenizer::new();
    for token in tokenizer.tokenize(input.as_bytes())? {
        let again = tokenizer.tokenize(token.text.as_bytes())?;
        assert_eq!(texts(&again), vec![token.text.as_str()]);
    }
    Ok(())
}

#[test]
fn test_concurrent_cursors_share_tokenizer() -> Result<()> {
    let tokenizer = std::sync::Arc::new(WordBreakTokenizer::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let tokenizer = std::sync::Arc::clone(&tokenizer);
            std::thread::spawn(move || {
                let text = format!("thread {i} says hello");
                tokenizer.tokenize(text.as_bytes()).map(|tokens| tokens.len())
            })
        })
        .collect();
    for handle in handles {
        // The thread number is not indexed.
        assert_eq!(handle.join().unwrap()?, 3);
    }
    Ok(())
}

#[test]
fn test_abandoned_cursor() -> Result<()> {
    let tokenizer = FoldTokenizer::from_args(&["stemmer=english"])?;
    {
        let mut cursor = tokenizer.open(b"first second third")?;
        assert_eq!(cursor.next_token()?.map(|t| t.text), Some("first".to_string()));
    }
    assert_eq!(tokenizer.tokenize(b"second")?.len(), 1);
    Ok(())
}
