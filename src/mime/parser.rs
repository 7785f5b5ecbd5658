//! Grammar for `type/subtype; key=value; key2="value2"` strings.

use super::{Mime, Parameters, WILDCARD};
use crate::errors::{MimeParseError, ParseRule};

/// Characters accepted in type, subtype, parameter keys and unquoted values,
/// as listed in parse failure hints.
pub const SUPPORTED_CHARS: &str = "*, A-Z, a-z, 0-9, !, #, $, &, ^, _, ., +, -";

const MEDIA_TYPE_FORMAT: &str = "type/subtype; parameters";
const PARAMETER_FORMAT: &str = "key=value";

/// Token charset `[A-Za-z0-9!#$&^_.+-]+`.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_byte)
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'!' | b'#' | b'$' | b'&' | b'^' | b'_' | b'.' | b'+' | b'-')
}

fn charset_hint() -> String {
    format!("Supported characters: {}", SUPPORTED_CHARS)
}

/// Parse a MIME type string.
///
/// Type and subtype are trimmed and lowercased, parameter keys are
/// lowercased, quoted parameter values are unquoted. Later duplicate keys
/// overwrite earlier ones.
pub fn parse_mime(expression: &str) -> Result<Mime, MimeParseError> {
    let mut segments = expression.split(';');
    let media_type = segments.next().unwrap_or_default().trim();

    let (type_, subtype) = parse_media_type(expression, media_type)?;

    let mut parameters = Parameters::new();
    for segment in segments {
        if let Some((key, value)) = parse_parameter(expression, segment)? {
            parameters.insert(key, value);
        }
    }

    Ok(Mime::from_parts(type_, subtype, parameters))
}

fn parse_media_type(expression: &str, media_type: &str) -> Result<(String, String), MimeParseError> {
    let Some((type_, subtype)) = media_type.split_once('/') else {
        return Err(MimeParseError::new(
            ParseRule::MissingSeparator,
            "Invalid MIME: missing type/subtype",
            expression,
            MEDIA_TYPE_FORMAT,
        ));
    };

    let type_ = type_.trim().to_lowercase();
    let subtype = subtype.trim().to_lowercase();

    if type_ != WILDCARD && !is_token(&type_) {
        return Err(MimeParseError::new(
            ParseRule::InvalidType,
            format!("Invalid MIME type: '{}'", type_),
            expression,
            charset_hint(),
        ));
    }
    // a second '/' ends up in the subtype and fails the token check
    if subtype != WILDCARD && !is_token(&subtype) {
        return Err(MimeParseError::new(
            ParseRule::InvalidSubtype,
            format!("Invalid MIME subtype: '{}'", subtype),
            expression,
            charset_hint(),
        ));
    }

    Ok((type_, subtype))
}

fn parse_parameter(
    expression: &str,
    segment: &str,
) -> Result<Option<(String, String)>, MimeParseError> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Ok(None);
    }

    let Some((key, value)) = segment.split_once('=') else {
        return Err(MimeParseError::new(
            ParseRule::MalformedParameter,
            format!("Invalid MIME parameter: '{}'", segment),
            expression,
            PARAMETER_FORMAT,
        ));
    };
    let key = key.trim();
    let value = value.trim();

    if !is_token(key) {
        return Err(MimeParseError::new(
            ParseRule::InvalidParameterKey,
            format!("Invalid MIME parameter key: '{}'", key),
            expression,
            charset_hint(),
        ));
    }

    let unquoted = unquote(value);
    if !unquoted.is_empty() && !is_token(unquoted) {
        return Err(MimeParseError::new(
            ParseRule::InvalidParameterValue,
            format!("Invalid MIME parameter value: '{}'", value),
            expression,
            charset_hint(),
        ));
    }

    Ok(Some((key.to_lowercase(), unquoted.to_string())))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_token() {
        assert!(is_token("vnd.ms-excel"));
        assert!(is_token("svg+xml"));
        assert!(is_token("x_y!#$&^"));
        assert!(!is_token(""));
        assert!(!is_token("*"));
        assert!(!is_token("a b"));
        assert!(!is_token("a/b"));
        assert!(!is_token("é"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"utf-8\""), "utf-8");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("utf-8"), "utf-8");
        assert_eq!(unquote("\"utf-8"), "\"utf-8");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn test_parse_trims_and_lowercases() {
        let mime = parse_mime("  Text / PLAIN  ").unwrap();
        assert_eq!(mime.type_(), "text");
        assert_eq!(mime.subtype(), "plain");
        assert!(!mime.has_parameters());
    }

    #[test]
    fn test_parse_wildcards() {
        let mime = parse_mime("*/*").unwrap();
        assert_eq!(mime.type_(), "*");
        assert_eq!(mime.subtype(), "*");

        // structurally permitted even though unusual
        let mime = parse_mime("*/plain").unwrap();
        assert_eq!(mime.subtype(), "plain");
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = parse_mime("textplain").unwrap_err();
        assert_eq!(err.rule, ParseRule::MissingSeparator);
        assert_eq!(err.message, "Invalid MIME: missing type/subtype");
        assert_eq!(err.format, "type/subtype; parameters");
    }

    #[test]
    fn test_parse_separator_only_in_parameters_is_missing() {
        let err = parse_mime("text; a=b/c").unwrap_err();
        assert_eq!(err.rule, ParseRule::MissingSeparator);
    }

    #[test]
    fn test_parse_invalid_type_names_side_and_charset() {
        let err = parse_mime("te xt/plain").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidType);
        assert_eq!(err.message, "Invalid MIME type: 'te xt'");
        assert!(err.format.contains(SUPPORTED_CHARS));

        let err = parse_mime("/plain").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidType);
    }

    #[test]
    fn test_parse_invalid_subtype() {
        let err = parse_mime("text/pl@in").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidSubtype);
        assert_eq!(err.message, "Invalid MIME subtype: 'pl@in'");

        let err = parse_mime("text/").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidSubtype);

        let err = parse_mime("a/b/c").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidSubtype);
        assert_eq!(err.message, "Invalid MIME subtype: 'b/c'");
    }

    #[test]
    fn test_parse_parameters() {
        let mime = parse_mime("text/plain; CHARSET=\"utf-8\"; format=flowed").unwrap();
        assert_eq!(mime.parameters().get("charset"), Some("utf-8"));
        assert_eq!(mime.parameters().get("format"), Some("flowed"));
        assert_eq!(mime.parameters().len(), 2);
    }

    #[test]
    fn test_parse_skips_blank_parameter_segments() {
        let mime = parse_mime("text/plain;; ;charset=utf-8;").unwrap();
        assert_eq!(mime.parameters().len(), 1);
    }

    #[test]
    fn test_parse_empty_parameter_value() {
        let mime = parse_mime("text/plain; charset=").unwrap();
        assert_eq!(mime.parameters().get("charset"), Some(""));

        let mime = parse_mime("text/plain; charset=\"\"").unwrap();
        assert_eq!(mime.parameters().get("charset"), Some(""));
    }

    #[test]
    fn test_parse_duplicate_keys_overwrite() {
        let mime = parse_mime("text/plain; a=1; b=2; A=3").unwrap();
        assert_eq!(mime.parameters().get("a"), Some("3"));
        assert_eq!(mime.to_string(), "text/plain; a=3; b=2");
    }

    #[test]
    fn test_parse_malformed_parameter() {
        let err = parse_mime("text/plain; bad").unwrap_err();
        assert_eq!(err.rule, ParseRule::MalformedParameter);
        assert_eq!(err.message, "Invalid MIME parameter: 'bad'");
        assert_eq!(err.format, "key=value");
        assert_eq!(err.expression, "text/plain; bad");
    }

    #[test]
    fn test_parse_invalid_parameter_key() {
        let err = parse_mime("text/plain; =utf-8").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidParameterKey);

        let err = parse_mime("text/plain; char set=utf-8").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidParameterKey);
        assert_eq!(err.message, "Invalid MIME parameter key: 'char set'");
    }

    #[test]
    fn test_parse_invalid_parameter_value() {
        let err = parse_mime("text/plain; charset=\"utf 8\"").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidParameterValue);
        assert_eq!(err.message, "Invalid MIME parameter value: '\"utf 8\"'");

        let err = parse_mime("text/plain; a=b=c").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidParameterValue);

        let err = parse_mime("text/plain; a=\"").unwrap_err();
        assert_eq!(err.rule, ParseRule::InvalidParameterValue);
    }
}
