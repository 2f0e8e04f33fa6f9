//! Per-tier column parsers for the stats tables
//!
//! Each tier's table layout is described by a [`TierSchema`]: a map from
//! field to cell index. Cell 0 is always the empty string in front of the
//! leading `|`. A row that is structurally broken is skipped and reported as
//! a [`RowDiagnostic`]; it never fails the table.

use crate::dna::parse_dna_partner;
use crate::effect::classify_effect;
use crate::error::RowError;
use crate::evolution::parse_evolutions;
use crate::record::{Attribute, DigimonRecord, Family, Stage};
use std::fmt;
use tracing::warn;

/// Header label of the name column; also used to spot header rows
pub const NAME_HEADER: &str = "Digimon";

/// Ultra tables have no family column. Most Ultras are Virus Busters, but
/// not all of them; every Ultra record gets this placeholder.
pub const ULTRA_FAMILY: Family = Family::VirusBusters;

/// Attribute given to Ultra rows whose attribute cell is unrecognized
pub const ULTRA_FALLBACK_ATTRIBUTE: Attribute = Attribute::Free;

/// Where a row's grouping tag comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    /// Family label; attribute comes from the enclosing section
    Family(usize),
    /// Attribute label; family is [`ULTRA_FAMILY`]
    Attribute(usize),
}

/// Column layout of one tier's table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSchema {
    /// Minimum number of `|`-split cells for a row to be considered
    pub min_cells: usize,
    pub name: usize,
    pub group: GroupColumn,
    pub damage: usize,
    pub speed: usize,
    pub range: usize,
    pub effect: usize,
    pub chance: usize,
    /// Details / notes text, scanned for the effect duration
    pub details: usize,
    pub evolutions: Option<usize>,
    pub dna_components: Option<usize>,
}

/// `| Digimon | Family | DMG | SPD | RNG | Effect | Chance | Priority | Notes |`
pub const IN_TRAINING_SCHEMA: TierSchema = TierSchema {
    min_cells: 8,
    name: 1,
    group: GroupColumn::Family(2),
    damage: 3,
    speed: 4,
    range: 5,
    effect: 6,
    chance: 7,
    details: 9,
    evolutions: None,
    dna_components: None,
};

/// `| Digimon | Family | DMG | SPD | RNG | Effect | Chance | Priority | Details | Evolves To |`
pub const ROOKIE_SCHEMA: TierSchema = TierSchema {
    min_cells: 10,
    evolutions: Some(10),
    ..IN_TRAINING_SCHEMA
};

/// `| Digimon | Family | DMG | SPD | RNG | Effect | Chance | Priority | Details | DP Req | Evolves To |`
pub const CHAMPION_ULTIMATE_SCHEMA: TierSchema = TierSchema {
    min_cells: 11,
    evolutions: Some(11),
    ..IN_TRAINING_SCHEMA
};

/// `| Digimon | Family | DMG | SPD | RNG | Effect | Chance | Priority | Details | DP Req |`
pub const MEGA_SCHEMA: TierSchema = TierSchema {
    min_cells: 10,
    ..IN_TRAINING_SCHEMA
};

/// `| Digimon | Attribute | DMG | SPD | RNG | Effect | Chance | Priority | Details | DNA Components |`
pub const ULTRA_SCHEMA: TierSchema = TierSchema {
    min_cells: 10,
    group: GroupColumn::Attribute(2),
    dna_components: Some(10),
    ..IN_TRAINING_SCHEMA
};

impl TierSchema {
    /// Schema used by a tier's tables
    pub fn for_stage(stage: Stage) -> &'static TierSchema {
        match stage {
            Stage::InTraining => &IN_TRAINING_SCHEMA,
            Stage::Rookie => &ROOKIE_SCHEMA,
            Stage::Champion | Stage::Ultimate => &CHAMPION_ULTIMATE_SCHEMA,
            Stage::Mega => &MEGA_SCHEMA,
            Stage::Ultra => &ULTRA_SCHEMA,
        }
    }
}

/// A raw table line with its 1-based position in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow<'a> {
    pub line_no: usize,
    pub text: &'a str,
}

impl<'a> TableRow<'a> {
    pub fn new(line_no: usize, text: &'a str) -> Self {
        Self { line_no, text }
    }
}

/// A row that was skipped, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    pub stage: Stage,
    pub line_no: usize,
    pub line: String,
    pub error: RowError,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} ({} table): {}: {}",
            self.line_no,
            self.stage,
            self.error,
            self.line.trim()
        )
    }
}

/// Records and diagnostics produced from one or more tables
#[derive(Debug, Clone, Default)]
pub struct TableOutcome {
    pub records: Vec<DigimonRecord>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl TableOutcome {
    /// Append another outcome, keeping document order
    pub fn extend(&mut self, other: TableOutcome) {
        self.records.extend(other.records);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// True for lines that start with the `|` row delimiter
pub fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// True for header and `---` separator rows
pub fn is_table_chrome(line: &str) -> bool {
    line.contains(NAME_HEADER) || line.contains("---")
}

/// Parse the rows of one table belonging to `stage`.
///
/// `attribute` is the enclosing section's attribute; Ultra rows ignore it
/// and read their own attribute cell.
pub fn parse_table(stage: Stage, rows: &[TableRow<'_>], attribute: Attribute) -> TableOutcome {
    let schema = TierSchema::for_stage(stage);
    let mut outcome = TableOutcome::default();

    for row in rows {
        if !is_table_row(row.text) || is_table_chrome(row.text) {
            continue;
        }

        match parse_row(schema, stage, attribute, row.text) {
            Ok(Some(record)) => outcome.records.push(record),
            Ok(None) => {}
            Err(error) => {
                warn!(line = row.line_no, %stage, %error, "skipping row: {}", row.text.trim());
                outcome.diagnostics.push(RowDiagnostic {
                    stage,
                    line_no: row.line_no,
                    line: row.text.to_string(),
                    error,
                });
            }
        }
    }

    outcome
}

/// Parse a single row. `Ok(None)` means the row has no usable name.
fn parse_row(
    schema: &TierSchema,
    stage: Stage,
    attribute: Attribute,
    line: &str,
) -> Result<Option<DigimonRecord>, RowError> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.len() < schema.min_cells {
        return Err(RowError::TooFewCells {
            expected: schema.min_cells,
            found: cells.len(),
        });
    }

    let cell = |index: usize| cells.get(index).copied().unwrap_or("");

    let name = cell(schema.name);
    if name.is_empty() || name.eq_ignore_ascii_case(NAME_HEADER) {
        return Ok(None);
    }

    let base_damage = parse_count("DMG", cell(schema.damage))?;
    let attack_speed = parse_stat("SPD", cell(schema.speed))?;
    let attack_range = parse_stat("RNG", cell(schema.range))?;

    let (attribute, family) = match schema.group {
        GroupColumn::Family(index) => (attribute, Family::from_label(cell(index))),
        GroupColumn::Attribute(index) => (
            Attribute::from_label(cell(index)).unwrap_or(ULTRA_FALLBACK_ATTRIBUTE),
            ULTRA_FAMILY,
        ),
    };

    let mut record = DigimonRecord::new(name, stage, attribute, family);
    record.base_damage = base_damage;
    record.attack_speed = attack_speed;
    record.attack_range = attack_range;
    record.status_effect = classify_effect(
        cell(schema.effect),
        cell(schema.chance),
        cell(schema.details),
    );
    if let Some(index) = schema.evolutions {
        record.evolution_targets = parse_evolutions(cell(index));
    }
    if let Some(index) = schema.dna_components {
        record.dna_partner = parse_dna_partner(cell(index));
    }

    Ok(Some(record))
}

fn parse_count(column: &'static str, value: &str) -> Result<u32, RowError> {
    value.parse().map_err(|_| RowError::InvalidInteger {
        column,
        value: value.to_string(),
    })
}

fn parse_stat(column: &'static str, value: &str) -> Result<f64, RowError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(RowError::InvalidFloat {
            column,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows<'a>(lines: &[&'a str]) -> Vec<TableRow<'a>> {
        lines
            .iter()
            .enumerate()
            .map(|(i, text)| TableRow::new(i + 1, text))
            .collect()
    }

    #[test]
    fn test_rookie_row() {
        let table = rows(&[
            "| Digimon | Family | DMG | SPD | RNG | Effect | Chance | Priority | Details | Evolves To |",
            "|---------|--------|-----|-----|-----|--------|--------|----------|---------|------------|",
            "| Agumon | Dragon's Roar | 10 | 1.0 | 1.0 | Burn | 25% | First | 3s | Greymon |",
        ]);
        let outcome = parse_table(Stage::Rookie, &table, Attribute::Data);

        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.records.len(), 1);
        let agumon = &outcome.records[0];
        assert_eq!(agumon.name, "Agumon");
        assert_eq!(agumon.stage, Stage::Rookie);
        assert_eq!(agumon.attribute, Attribute::Data);
        assert_eq!(agumon.family, Family::DragonsRoar);
        assert_eq!(agumon.base_damage, 10);
        assert_eq!(agumon.attack_speed, 1.0);
        assert_eq!(agumon.attack_range, 1.0);
        assert_eq!(agumon.status_effect.kind, "Burn");
        assert_eq!(agumon.status_effect.chance, 0.25);
        assert_eq!(agumon.status_effect.duration, 3.0);
        assert_eq!(agumon.evolution_targets, vec!["Greymon"]);
        assert_eq!(agumon.dna_partner, "");
    }

    #[test]
    fn test_in_training_without_notes() {
        let table = rows(&["| Koromon | Dragon's Roar | 3 | 0.8 | 1.5 | - | - |"]);
        let outcome = parse_table(Stage::InTraining, &table, Attribute::Vaccine);

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].status_effect.is_none());
        assert!(outcome.records[0].evolution_targets.is_empty());
    }

    #[test]
    fn test_numeric_values_are_exact() {
        let table = rows(&["| Tanemon | Nature Spirits | 7 | 1.35 | 2.75 | Slow | 15% | Low | 1.5s slow |"]);
        let outcome = parse_table(Stage::InTraining, &table, Attribute::Data);
        let tanemon = &outcome.records[0];

        assert_eq!(tanemon.base_damage, 7);
        assert_eq!(tanemon.attack_speed, 1.35);
        assert_eq!(tanemon.attack_range, 2.75);
        assert_eq!(tanemon.status_effect.duration, 1.5);
    }

    #[test]
    fn test_champion_and_ultimate_share_schema() {
        let line = "| Greymon | Dragon's Roar | 25 | 1.0 | 1.5 | Burn | 30% | Strong | 4s burn | 100 | MetalGreymon (DP 0-10), SkullGreymon |";
        let champion = parse_table(Stage::Champion, &rows(&[line]), Attribute::Vaccine);
        let ultimate = parse_table(Stage::Ultimate, &rows(&[line]), Attribute::Vaccine);

        assert_eq!(champion.records[0].stage, Stage::Champion);
        assert_eq!(ultimate.records[0].stage, Stage::Ultimate);
        assert_eq!(
            champion.records[0].evolution_targets,
            vec!["MetalGreymon", "SkullGreymon"]
        );
        assert_eq!(champion.records[0].status_effect.duration, 4.0);
    }

    #[test]
    fn test_mega_has_no_evolutions() {
        let line = "| WarGreymon | Dragon's Roar | 80 | 1.2 | 2.0 | Armor Break | 20% | High | 5s | 150 |";
        let outcome = parse_table(Stage::Mega, &rows(&[line]), Attribute::Vaccine);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].status_effect.kind, "Armor Break");
        assert!(outcome.records[0].evolution_targets.is_empty());
    }

    #[test]
    fn test_ultra_reads_attribute_cell() {
        let table = rows(&[
            "| Omnimon | Vaccine | 150 | 1.0 | 3.0 | Holy | 100% | Max | 2s stun | WarGreymon + MetalGarurumon |",
            "| Chaosmon | Chaos | 140 | 1.0 | 3.0 | - | - | Max | - | BanchoLeomon + Darkdramon |",
        ]);
        let outcome = parse_table(Stage::Ultra, &table, Attribute::Data);

        assert_eq!(outcome.records.len(), 2);
        let omnimon = &outcome.records[0];
        assert_eq!(omnimon.stage, Stage::Ultra);
        assert_eq!(omnimon.attribute, Attribute::Vaccine);
        assert_eq!(omnimon.family, ULTRA_FAMILY);
        assert_eq!(omnimon.dna_partner, "MetalGarurumon");
        assert_eq!(outcome.records[1].attribute, Attribute::Free);
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let line = "| Patamon | Holy Knights | 8 | 1.0 | 2.0 | Holy | 10% | Low | - | Angemon |";
        let outcome = parse_table(Stage::Rookie, &rows(&[line]), Attribute::Data);

        assert_eq!(outcome.records[0].family, Family::Unknown);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_bad_rows_are_reported_and_skipped() {
        let table = rows(&[
            "| Gabumon | Nature Spirits | ten | 1.0 | 1.0 | Freeze | 20% | Mid | 2s | Garurumon |",
            "| Short | row |",
            "| Palmon | Jungle Troopers | 9 | fast | 1.0 | Poison | 20% | Mid | 3s | Togemon |",
            "| Tentomon | Jungle Troopers | 9 | 1.1 | 1.0 | Stun | 10% | Mid | 1s | Kabuterimon |",
        ]);
        let outcome = parse_table(Stage::Rookie, &table, Attribute::Vaccine);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].name, "Tentomon");
        assert_eq!(outcome.diagnostics.len(), 3);
        assert_eq!(
            outcome.diagnostics[0].error,
            RowError::InvalidInteger {
                column: "DMG",
                value: "ten".to_string()
            }
        );
        assert_eq!(
            outcome.diagnostics[1].error,
            RowError::TooFewCells {
                expected: 10,
                found: 4
            }
        );
        assert_eq!(outcome.diagnostics[2].line_no, 3);
    }

    #[test]
    fn test_negative_values_rejected() {
        let line = "| Betamon | Deep Savers | -4 | 1.0 | 1.0 | - | - | Low | - | Seadramon |";
        let outcome = parse_table(Stage::Rookie, &rows(&[line]), Attribute::Virus);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_name_skipped_silently() {
        let line = "|  | Deep Savers | 4 | 1.0 | 1.0 | - | - | Low | - | Seadramon |";
        let outcome = parse_table(Stage::Rookie, &rows(&[line]), Attribute::Virus);
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_chrome_detection() {
        assert!(is_table_chrome("| Digimon | Family |"));
        assert!(is_table_chrome("|---|---|"));
        assert!(!is_table_chrome("| Agumon | Dragon's Roar |"));
        assert!(is_table_row("   | Agumon |"));
        assert!(!is_table_row("Agumon |"));
    }
}
