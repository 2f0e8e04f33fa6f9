//! Export parsed records as CSV or JSON

use crate::error::{Error, Result};
use crate::record::DigimonRecord;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// One flattened CSV line
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    stage: &'static str,
    attribute: &'static str,
    family: &'static str,
    base_damage: u32,
    attack_speed: f64,
    attack_range: f64,
    effect_type: &'a str,
    effect_chance: f64,
    effect_duration: f64,
    evolutions: String,
    dna_partner: &'a str,
}

impl<'a> From<&'a DigimonRecord> for CsvRow<'a> {
    fn from(record: &'a DigimonRecord) -> Self {
        Self {
            name: &record.name,
            stage: record.stage.label(),
            attribute: record.attribute.label(),
            family: record.family.label(),
            base_damage: record.base_damage,
            attack_speed: record.attack_speed,
            attack_range: record.attack_range,
            effect_type: &record.status_effect.kind,
            effect_chance: record.status_effect.chance,
            effect_duration: record.status_effect.duration,
            evolutions: record.evolution_targets.join(";"),
            dna_partner: &record.dna_partner,
        }
    }
}

/// Write records in the given format
pub fn export_records<W: Write>(
    records: &[DigimonRecord],
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(CsvRow::from(record))?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Attribute, Family, Stage, StatusEffect};

    fn records() -> Vec<DigimonRecord> {
        let mut agumon =
            DigimonRecord::new("Agumon", Stage::Rookie, Attribute::Data, Family::DragonsRoar);
        agumon.base_damage = 10;
        agumon.attack_speed = 1.0;
        agumon.attack_range = 1.5;
        agumon.status_effect = StatusEffect::new("Burn", 0.25, 3.0);
        agumon.evolution_targets = vec!["Greymon".to_string(), "Geo Greymon".to_string()];
        vec![agumon]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_export_csv() {
        let mut buf = Vec::new();
        export_records(&records(), ExportFormat::Csv, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "name,stage,attribute,family,base_damage,attack_speed,attack_range,\
             effect_type,effect_chance,effect_duration,evolutions,dna_partner"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Agumon,Rookie,Data,Dragon's Roar,10,1.0,1.5,Burn,0.25,3.0,Greymon;Geo Greymon,"
        );
    }

    #[test]
    fn test_export_json() {
        let mut buf = Vec::new();
        export_records(&records(), ExportFormat::Json, &mut buf).unwrap();
        let parsed: Vec<DigimonRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, records());
    }
}
