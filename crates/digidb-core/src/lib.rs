//! digidb-core: Core library for turning the Digimon stats database into
//! engine resource files
//!
//! This library provides functionality to:
//! - Walk the database markdown, tracking tier and attribute sections
//! - Parse each tier's stats table into structured records
//! - Classify free-text effect, evolution and DNA cells
//! - Render records as `.tres` resources and write them per stage
//! - Index generated resources and record a generation manifest

pub mod config;
pub mod dna;
pub mod effect;
pub mod emitter;
pub mod error;
pub mod evolution;
pub mod export;
pub mod manifest;
pub mod record;
pub mod scanner;
pub mod sectioner;
pub mod tiers;

pub use config::GeneratorConfig;
pub use dna::parse_dna_partner;
pub use effect::{classify_effect, EffectKind};
pub use emitter::{output_path, render_resource, slugify, write_resources, EmitOptions, EmitResult};
pub use error::{Error, Result, RowError};
pub use evolution::parse_evolutions;
pub use export::{export_records, ExportFormat};
pub use manifest::GenerationManifest;
pub use record::{stage_counts, Attribute, DigimonRecord, Family, Stage, StatusEffect};
pub use scanner::{scan_resources, ResourceIndex, StageFolder};
pub use sectioner::{parse_database, parse_document, SectionContext};
pub use tiers::{parse_table, RowDiagnostic, TableOutcome, TableRow, TierSchema};
