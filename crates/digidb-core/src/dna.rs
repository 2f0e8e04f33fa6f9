//! DNA component cell parsing for Ultra-tier rows

/// Partner named in a "+"-joined component cell such as `Wargreymon + Metalgarurumon`.
///
/// The first component is the row's own Digimon; only the second is
/// returned. Anything after the second component is ignored.
pub fn parse_dna_partner(cell: &str) -> String {
    if !cell.contains('+') {
        return String::new();
    }
    cell.split('+')
        .nth(1)
        .map(|partner| partner.trim().to_string())
        .unwrap_or_default()
}
