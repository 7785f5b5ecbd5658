//! Catalog of well-known subtypes per top-level type.

/// Well-known subtypes grouped by their top-level type.
pub const KNOWN_SUBTYPES: &[(&str, &[&str])] = &[
    (
        "image",
        &["jpeg", "png", "gif", "tiff", "bmp", "x-icon", "webp", "svg+xml"],
    ),
    (
        "video",
        &["mp4", "quicktime", "x-msvideo", "x-matroska", "webm", "x-flv"],
    ),
    ("audio", &["mpeg", "ogg", "wav"]),
    (
        "application",
        &[
            // structured
            "x-www-form-urlencoded",
            "octet-stream",
            // compressed
            "pdf",
            "zip",
            "x-rar-compressed",
            "gzip",
            "x-7z-compressed",
            "x-tar",
            // office
            "vnd.msword",
            "vnd.ms-excel",
            "vnd.ms-powerpoint",
            "vnd.openxmlformats-officedocument.wordprocessingml.document",
            "vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "vnd.openxmlformats-officedocument.presentationml.presentation",
            // code
            "x-sh",
            "json",
            "xml",
            "javascript",
            "x-httpd-php",
            "x-yaml",
            "sql",
            "x-powershell",
            "x-bat",
            "x-pem-file",
            "x-latex",
            "rtf",
        ],
    ),
    (
        "text",
        &[
            "html",
            "x-ruby",
            "x-python",
            "x-java-source",
            "css",
            "csv",
            "x-go",
            "x-groovy",
            "x-kotlin",
            "x-rust",
            "x-typescript",
            "x-swift",
            "x-perl",
            "x-csrc",
            "x-c++src",
            "x-csharp",
            "x-vb",
            "x-chdr",
            "x-r-source",
            "markdown",
            "plain",
        ],
    ),
    ("multipart", &["form-data"]),
    ("font", &["woff", "woff2", "ttf", "otf"]),
];

/// Well-known subtypes of `type_`, if the type itself is known.
pub fn known_subtypes(type_: &str) -> Option<&'static [&'static str]> {
    KNOWN_SUBTYPES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(type_))
        .map(|(_, subtypes)| *subtypes)
}

/// Whether `type_/subtype` is listed in [`KNOWN_SUBTYPES`].
pub fn is_known_subtype(type_: &str, subtype: &str) -> bool {
    known_subtypes(type_)
        .map(|subtypes| subtypes.iter().any(|s| s.eq_ignore_ascii_case(subtype)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subtypes_lookup() {
        assert!(known_subtypes("font").unwrap().contains(&"woff2"));
        assert!(known_subtypes("chemical").is_none());
    }

    #[test]
    fn test_is_known_subtype_is_case_insensitive() {
        assert!(is_known_subtype("Image", "SVG+XML"));
        assert!(is_known_subtype("multipart", "form-data"));
        assert!(!is_known_subtype("image", "plain"));
    }

    #[test]
    fn test_every_known_subtype_is_a_token() {
        for (type_, subtypes) in KNOWN_SUBTYPES {
            assert!(super::super::is_token(type_));
            for subtype in *subtypes {
                assert!(super::super::is_token(subtype), "{}/{}", type_, subtype);
            }
        }
    }
}
