//! Catalog of common file extensions, grouped by category.
//!
//! Extensions are stored lowercase without the leading dot. Some extensions
//! (`bin`, `pkg`, `rom`, `tar`) belong to several categories.

/// Extension groups in display order.
pub const EXTENSION_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "text",
        &["doc", "docx", "eml", "msg", "odt", "pages", "rtf", "tex", "txt", "wpd"],
    ),
    (
        "data",
        &[
            "aae", "bin", "csv", "dat", "key", "log", "mpp", "obb", "ppt", "pptx", "rpt", "tar",
            "vcf", "xml",
        ],
    ),
    (
        "audio",
        &["aif", "flac", "m3u", "m4a", "mid", "mp3", "ogg", "wav", "wma"],
    ),
    (
        "video",
        &[
            "3gp", "asf", "avi", "flv", "m4v", "mov", "mp4", "mpg", "srt", "swf", "ts", "vob",
            "wmv",
        ],
    ),
    ("3d-image", &["3dm", "3ds", "blend", "dae", "fbx", "max", "obj"]),
    (
        "raster-image",
        &["bmp", "dcm", "dds", "djvu", "gif", "heic", "jpg", "png", "psd", "tga", "tif"],
    ),
    (
        "vector-image",
        &["ai", "cdr", "emf", "eps", "ps", "sketch", "svg", "vsdx"],
    ),
    ("page-layout", &["indd", "oxps", "pdf", "pmd", "pub", "qxp", "xps"]),
    ("spreadsheet", &["numbers", "ods", "xlr", "xls", "xlsx"]),
    (
        "database",
        &["accdb", "crypt14", "db", "mdb", "odb", "pdb", "sql", "sqlite"],
    ),
    (
        "executable",
        &["apk", "app", "bat", "bin", "cmd", "com", "exe", "ipa", "jar", "run", "sh"],
    ),
    (
        "game",
        &["bin", "dem", "gam", "gba", "nes", "pak", "pkg", "rom", "sav"],
    ),
    ("cad", &["dgn", "dwg", "dxf", "step", "stl", "stp"]),
    ("gis", &["gpx", "kml", "kmz", "osm"]),
    (
        "web",
        &[
            "asp", "aspx", "cer", "cfm", "csr", "css", "html", "js", "json", "jsp", "php", "xhtml",
        ],
    ),
    ("plugin", &["crx", "ecf", "plugin", "safariextz", "xpi"]),
    ("font", &["fnt", "otf", "ttf", "woff", "woff2"]),
    (
        "system",
        &[
            "ani", "cab", "cpl", "cur", "deskthemepack", "dll", "dmp", "drv", "icns", "ico", "lnk",
            "reg", "sys",
        ],
    ),
    ("settings", &["cfg", "ini", "pkg", "set"]),
    ("encoded", &["asc", "bin", "enc", "mim", "uue"]),
    (
        "compressed",
        &["7z", "cbr", "deb", "gz", "pkg", "rar", "rpm", "tar.gz", "xapk", "zip", "zipx"],
    ),
    (
        "disk-image",
        &["bin", "dmg", "img", "iso", "mdf", "rom", "vcd"],
    ),
    (
        "developer",
        &[
            "appx", "c", "class", "config", "cpp", "cs", "h", "java", "kt", "lua", "m", "md", "pl",
            "py", "sb3", "sln", "swift", "unity", "vb", "vcxproj", "xcodeproj", "yml",
        ],
    ),
    ("backup", &["abk", "arc", "bak", "tmp"]),
    (
        "misc",
        &["crdownload", "ics", "msi", "nomedia", "part", "pkpass", "torrent"],
    ),
];

fn normalize(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Every known extension once, in catalog order.
pub fn known_extensions() -> Vec<&'static str> {
    let all = EXTENSION_CATEGORIES
        .iter()
        .flat_map(|(_, extensions)| extensions.iter().copied());
    crate::common::unique_by(all, |ext| *ext)
}

/// Whether `extension` (with or without a leading dot) is in the catalog.
pub fn is_known_extension(extension: &str) -> bool {
    !extension_categories(extension).is_empty()
}

/// Categories listing `extension`.
pub fn extension_categories(extension: &str) -> Vec<&'static str> {
    let extension = normalize(extension);
    EXTENSION_CATEGORIES
        .iter()
        .filter(|(_, extensions)| extensions.contains(&extension.as_str()))
        .map(|(category, _)| *category)
        .collect()
}
