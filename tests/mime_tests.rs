//! Integration tests for the MIME value model

use mimesniff::{CompareOptions, Mime, ParseRule};
use pretty_assertions::assert_eq;

#[test]
fn test_parse_normalizes_case_whitespace_and_quotes() {
    let mime = Mime::parse("  Text / HTML ;  Charset = \"UTF-8\" ; q=0.9").unwrap();
    assert_eq!(mime.type_(), "text");
    assert_eq!(mime.subtype(), "html");
    assert_eq!(mime.parameters().get("charset"), Some("UTF-8"));
    assert_eq!(mime.to_string(), "text/html; charset=UTF-8; q=0.9");
}

#[test]
fn test_parse_errors_carry_rule_and_expression() {
    let cases = [
        ("texthtml", ParseRule::MissingSeparator),
        ("te xt/html", ParseRule::InvalidType),
        ("text/ht(ml", ParseRule::InvalidSubtype),
        ("text/html; charset", ParseRule::MalformedParameter),
        ("text/html; ch@rset=utf-8", ParseRule::InvalidParameterKey),
        ("text/html; charset=ut f-8", ParseRule::InvalidParameterValue),
    ];

    for (expression, rule) in cases {
        let err = Mime::parse(expression).unwrap_err();
        assert_eq!(err.rule, rule, "{}", expression);
        assert_eq!(err.expression, expression);
        assert!(!err.format.is_empty());
    }
}

#[test]
fn test_equality_ignores_parameter_order() {
    let a = Mime::parse("text/plain; charset=utf-8; format=flowed").unwrap();
    let b = Mime::parse("TEXT/PLAIN; format=flowed; charset=utf-8").unwrap();
    assert!(a.equals(&b));
    assert_eq!(a, b);

    let c = Mime::parse("text/plain").unwrap();
    assert!(!a.equals(&c));
    assert!(a.equals_with(&c, CompareOptions::ignore_parameters()));
}

#[test]
fn test_wildcard_inclusion_is_directional() {
    let any = Mime::default();
    let images = Mime::parse("image/*").unwrap();
    let png = Mime::parse("image/png").unwrap();

    assert!(any.includes(&images));
    assert!(any.includes(&png));
    assert!(images.includes(&png));
    assert!(!png.includes(&images));
    assert!(!images.includes(&any));
}

#[test]
fn test_inclusion_requires_parameter_subset() {
    let accept = Mime::parse("text/*; charset=utf-8").unwrap();
    let with = Mime::parse("text/plain; charset=utf-8; format=flowed").unwrap();
    let without = Mime::parse("text/plain").unwrap();

    assert!(accept.includes(&with));
    assert!(!accept.includes(&without));
    assert!(accept.includes_with(&without, CompareOptions::ignore_parameters()));
}

#[test]
fn test_includes_any_over_lists() {
    let accepted = vec![
        Mime::parse("application/json").unwrap(),
        Mime::parse("image/*").unwrap(),
    ];
    let jpeg = vec![Mime::parse("image/jpeg").unwrap()];
    let html = vec![Mime::parse("text/html").unwrap()];

    assert!(Mime::includes_any(&accepted, &jpeg, CompareOptions::default()));
    assert!(!Mime::includes_any(&accepted, &html, CompareOptions::default()));
    assert!(!Mime::includes_any(&[], &jpeg, CompareOptions::default()));
}

#[test]
fn test_serde_uses_canonical_string() {
    let mime = Mime::parse("Application/JSON; Charset=utf-8").unwrap();
    let json = serde_json::to_string(&mime).unwrap();
    assert_eq!(json, "\"application/json; charset=utf-8\"");

    let back: Mime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mime);
    assert!(serde_json::from_str::<Mime>("\"nope\"").is_err());
}

#[test]
fn test_known_types_come_from_builtins() {
    let known: Vec<String> = Mime::known_types().iter().map(ToString::to_string).collect();
    assert_eq!(known.first().map(String::as_str), Some("image/jpeg"));
    assert!(known.contains(&"application/tar".to_string()));
    assert_eq!(known.iter().filter(|m| *m == "text/plain").count(), 1);
}
