//! "Evolves To" cell parsing

use regex::Regex;
use std::sync::LazyLock;

/// Digivolution Point requirement, e.g. " (DP 50)" or " (DP 30+, Vaccine)"
static DP_REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(DP.*?\)").expect("valid DP regex"));

/// Split a comma-separated evolution cell into target names.
///
/// DP requirement annotations are stripped; any other parenthesized text
/// (DNA notes and the like) is kept as part of the name.
pub fn parse_evolutions(cell: &str) -> Vec<String> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "-" {
        return Vec::new();
    }

    cell.split(',')
        .map(|part| DP_REQUIREMENT_RE.replace_all(part, "").trim().to_string())
        .filter(|name| !name.is_empty() && name != "-")
        .collect()
}
