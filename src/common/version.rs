use once_cell::sync::Lazy;
use regex::Regex;

static SEMVER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^v?(?P<segments>[0-9]+(?:\.[0-9]+){0,2})(?:-(?P<pre>[0-9A-Za-z\-~]+(?:\.[0-9A-Za-z\-~]+)*))?(?:\+(?P<meta>[0-9A-Za-z\-~]+(?:\.[0-9A-Za-z\-~]+)*))?$",
    )
    .expect("semver pattern is valid")
});

/// Parses a semantic version and returns its canonical string form.
///
/// Accepts one to three numeric segments, each fitting an `i64`, and no
/// surrounding whitespace. Versions are padded to three segments and lose
/// any leading `v` or leading zeros, so `v1.2` becomes `1.2.0`. Returns
/// `None` when the input is not a version.
pub fn normalize_semver(input: &str) -> Option<String> {
    let captures = SEMVER_REGEX.captures(input)?;

    let mut segments = captures["segments"]
        .split('.')
        .map(|segment| segment.parse::<i64>().ok())
        .collect::<Option<Vec<_>>>()?;
    while segments.len() < 3 {
        segments.push(0);
    }

    let mut normalized = segments
        .iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join(".");

    if let Some(pre) = captures.name("pre") {
        normalized.push('-');
        normalized.push_str(pre.as_str());
    }
    if let Some(meta) = captures.name("meta") {
        normalized.push('+');
        normalized.push_str(meta.as_str());
    }

    Some(normalized)
}
