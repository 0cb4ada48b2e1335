//! Integration tests for registration and match extraction through the host surface

use std::sync::Arc;

use lexifold::host::{AuxiliaryFunction, TokenizerModule};
use lexifold::prelude::*;

fn registry() -> InMemoryRegistry {
    let registry = InMemoryRegistry::new();
    assert_eq!(extension_init(&registry), StatusCode::Ok);
    registry
}

#[test]
fn test_snippet_through_registered_function() -> Result<()> {
    let registry = registry();
    let tokenizer = registry.create_tokenizer("unicode_fold", &[])?;

    let mut context = StaticMatchContext::new(tokenizer);
    let column = context.add_column("The quick brown fox jumps over");
    context.add_instance(column, 2);
    context.add_instance(column, 5);

    let matches = registry.function("matches")?;
    assert_eq!(matches.call(&context, &[])?.as_deref(), Some("brown,over"));
    Ok(())
}

#[test]
fn test_snippet_across_columns_with_stemming() -> Result<()> {
    let registry = registry();
    let tokenizer = registry.create_tokenizer("unicodesn", &["stemmer=english"])?;

    let mut context = StaticMatchContext::new(tokenizer);
    let subject = context.add_column("Re: Running late");
    let body = context.add_column("Sorry, the trains were running slowly.");
    context.add_instance(subject, 1);
    context.add_instance(body, 4);

    let snippet = MatchExtractor::new().extract(&context, &[])?;
    assert_eq!(snippet.as_deref(), Some("Running,running"));
    Ok(())
}

#[test]
fn test_snippet_errors_map_to_status() {
    let registry = registry();
    let matches = registry.function("matches").unwrap();

    let mut context = StaticMatchContext::new(Box::new(WordBreakTokenizer::new()));
    let column = context.add_column("only three words");
    context.add_instance(column, 3);

    let err = matches.call(&context, &[]).unwrap_err();
    assert_eq!(err.status(), StatusCode::Error);

    let err = matches
        .call(&context, &["a".to_string(), "b".to_string()])
        .unwrap_err();
    assert!(matches!(
        err,
        LexifoldError::InvalidArgumentCount {
            expected: 0,
            actual: 2
        }
    ));
}

#[test]
fn test_no_matches_is_null() -> Result<()> {
    let registry = registry();
    let matches = registry.function("matches")?;
    let context = StaticMatchContext::new(registry.create_tokenizer("word_break", &[])?);
    assert_eq!(matches.call(&context, &[])?, None);
    Ok(())
}

#[test]
fn test_construction_failures() {
    let registry = registry();
    for (name, args) in [
        ("unicode_fold", vec!["stemmer=English"]),
        ("unicode_fold", vec!["remove_diacritics=yes"]),
        ("unicode_fold", vec!["unknown=1"]),
        ("word_break", vec!["remove_diacritics=1"]),
    ] {
        let err = registry.create_tokenizer(name, &args).err().unwrap();
        assert!(err.is_construction_error(), "{name} {args:?}");
        assert_eq!(err.status(), StatusCode::Error);
    }

    let err = registry.create_tokenizer("simple", &[]).err().unwrap();
    assert_eq!(err.status(), StatusCode::NotFound);
}

#[test]
fn test_custom_module_registration() -> Result<()> {
    struct ShoutingModule;

    impl TokenizerModule for ShoutingModule {
        fn name(&self) -> &'static str {
            "shouting"
        }

        fn create(&self, _args: &[&str]) -> Result<Box<dyn Tokenizer>> {
            Ok(Box::new(FoldTokenizer::from_args(&["remove_diacritics=0"])?))
        }
    }

    let registry = registry();
    registry.register_tokenizer("shouting", Arc::new(ShoutingModule))?;
    assert_eq!(registry.tokenizer("shouting")?.name(), "shouting");

    let tokens = registry.create_tokenizer("shouting", &[])?.tokenize("CAFÉ".as_bytes())?;
    assert_eq!(tokens[0].text, "café");
    Ok(())
}

#[test]
fn test_all_stemmer_languages_construct() -> Result<()> {
    let registry = registry();
    for language in lexifold::analysis::stemmer::builtin().languages() {
        let arg = format!("stemmer={language}");
        let tokenizer = registry.create_tokenizer("unicode_fold", &[arg.as_str()])?;
        let tokens = tokenizer.tokenize("connections running".as_bytes())?;
        assert_eq!(tokens.len(), 2, "{language}");
        assert!(tokens.iter().all(|t| !t.text.is_empty()), "{language}");
    }
    Ok(())
}

#[test]
fn test_function_name() {
    assert_eq!(AuxiliaryFunction::name(&MatchExtractor::new()), "matches");
}
