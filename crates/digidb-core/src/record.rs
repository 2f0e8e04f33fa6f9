//! Core record types for representing parsed Digimon stats

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Evolutionary stage. Also selects which table schema a tier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    InTraining,
    Rookie,
    Champion,
    Ultimate,
    Mega,
    Ultra,
}

impl Stage {
    /// All stages in evolutionary order
    pub const ALL: [Stage; 6] = [
        Stage::InTraining,
        Stage::Rookie,
        Stage::Champion,
        Stage::Ultimate,
        Stage::Mega,
        Stage::Ultra,
    ];

    /// Integer index used by the engine's enum
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Output folder the stage's resources are written to
    pub fn folder_name(self) -> &'static str {
        match self {
            Stage::InTraining => "in_training",
            Stage::Rookie => "rookie",
            Stage::Champion => "champion",
            Stage::Ultimate => "ultimate",
            Stage::Mega => "mega",
            Stage::Ultra => "ultra",
        }
    }

    /// Display label as written in the database headings
    pub fn label(self) -> &'static str {
        match self {
            Stage::InTraining => "In-Training",
            Stage::Rookie => "Rookie",
            Stage::Champion => "Champion",
            Stage::Ultimate => "Ultimate",
            Stage::Mega => "Mega",
            Stage::Ultra => "Ultra",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Digimon attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Vaccine,
    Data,
    Virus,
    Free,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Vaccine,
        Attribute::Data,
        Attribute::Virus,
        Attribute::Free,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Vaccine => "Vaccine",
            Attribute::Data => "Data",
            Attribute::Virus => "Virus",
            Attribute::Free => "Free",
        }
    }

    /// Exact label lookup, `None` for anything unrecognized
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// In-universe affiliation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    DragonsRoar,
    NatureSpirits,
    VirusBusters,
    NightmareSoldiers,
    MetalEmpire,
    DeepSavers,
    WindGuardians,
    JungleTroopers,
    Unknown,
}

impl Family {
    pub const ALL: [Family; 9] = [
        Family::DragonsRoar,
        Family::NatureSpirits,
        Family::VirusBusters,
        Family::NightmareSoldiers,
        Family::MetalEmpire,
        Family::DeepSavers,
        Family::WindGuardians,
        Family::JungleTroopers,
        Family::Unknown,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Family::DragonsRoar => "Dragon's Roar",
            Family::NatureSpirits => "Nature Spirits",
            Family::VirusBusters => "Virus Busters",
            Family::NightmareSoldiers => "Nightmare Soldiers",
            Family::MetalEmpire => "Metal Empire",
            Family::DeepSavers => "Deep Savers",
            Family::WindGuardians => "Wind Guardians",
            Family::JungleTroopers => "Jungle Troopers",
            Family::Unknown => "Unknown",
        }
    }

    /// Exact label lookup falling back to [`Family::Unknown`]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.label() == label)
            .unwrap_or(Family::Unknown)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A secondary combat effect. An empty `kind` means no effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Canonical effect name (e.g., "Burn", "Armor Break")
    pub kind: String,
    /// Proc chance in 0.0..=1.0
    pub chance: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl StatusEffect {
    pub fn new(kind: impl Into<String>, chance: f64, duration: f64) -> Self {
        Self {
            kind: kind.into(),
            chance,
            duration,
        }
    }

    /// True when no effect applies
    pub fn is_none(&self) -> bool {
        self.kind.is_empty()
    }
}

/// One Digimon parsed from a tier table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigimonRecord {
    pub name: String,
    pub stage: Stage,
    pub attribute: Attribute,
    pub family: Family,
    pub base_damage: u32,
    pub attack_speed: f64,
    pub attack_range: f64,
    pub status_effect: StatusEffect,
    /// Targets in document order; only filled below Mega
    pub evolution_targets: Vec<String>,
    /// Only filled for Ultra rows
    pub dna_partner: String,

    // Not sourced from the stats tables; filled by later tooling.
    pub special_ability_name: String,
    pub special_ability_description: String,
    pub special_cooldown: f64,
    pub evolves_from: String,
    pub dna_result: String,
}

impl DigimonRecord {
    /// Create a record with every optional field at its empty default
    pub fn new(name: impl Into<String>, stage: Stage, attribute: Attribute, family: Family) -> Self {
        Self {
            name: name.into(),
            stage,
            attribute,
            family,
            base_damage: 0,
            attack_speed: 0.0,
            attack_range: 0.0,
            status_effect: StatusEffect::default(),
            evolution_targets: Vec::new(),
            dna_partner: String::new(),
            special_ability_name: String::new(),
            special_ability_description: String::new(),
            special_cooldown: 0.0,
            evolves_from: String::new(),
            dna_result: String::new(),
        }
    }
}

/// Count records per stage, in stage order
pub fn stage_counts(records: &[DigimonRecord]) -> BTreeMap<Stage, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.stage).or_default() += 1;
    }
    counts
}
