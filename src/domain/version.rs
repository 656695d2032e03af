use crate::domain::tag::strip_v_prefix;

/// Version reported when the working tree has no version-control identity
pub const UNKNOWN_VERSION: &str = "unknown";

/// Extract the stable channel version from registry info output.
///
/// Finds the first whitespace-separated token equal to `label` and returns
/// the token after it, truncated at the first `+` so that registry revision
/// or build suffixes are discarded (e.g., "1.10+git123" -> "1.10").
/// Returns `None` when the label is missing or nothing usable follows it.
pub fn parse_stable_version(info: &str, label: &str) -> Option<String> {
    info.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        tokens.find(|token| *token == label)?;
        let token = tokens.next()?;
        let version = token.split('+').next().unwrap_or_default();
        if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        }
    })
}

/// Turn a describe string into the version reported to the build controller
pub fn compute_version(describe: Option<&str>) -> String {
    match describe {
        Some(describe) => strip_v_prefix(describe).to_string(),
        None => UNKNOWN_VERSION.to_string(),
    }
}
