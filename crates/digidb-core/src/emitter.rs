//! Resource emitter: renders records as Godot `.tres` text and writes them
//! into per-stage folders.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::record::{DigimonRecord, Stage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings that shape the emitted resources
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOptions {
    /// Root under which the stage folders are created
    pub output_dir: PathBuf,
    /// File extension without the dot
    pub extension: String,
    /// `res://` path of the script backing the resource
    pub script_path: String,
    /// Script class name declared in the resource header
    pub script_class: String,
}

impl From<&GeneratorConfig> for EmitOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            extension: config.extension.clone(),
            script_path: config.script_path.clone(),
            script_class: config.script_class.clone(),
        }
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

/// Result of writing a batch of resources
#[derive(Debug, Clone, Default)]
pub struct EmitResult {
    /// Files that were written, in record order
    pub files_written: Vec<PathBuf>,
    /// Files that failed (path, error message)
    pub errors: Vec<(PathBuf, String)>,
}

/// Filesystem-safe identifier for a display name.
///
/// `"Dragon's Roar (X)"` becomes `"dragons_roar_x"`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '\''))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Path a record is written to: `<root>/<stage folder>/<slug>.<ext>`.
///
/// Two names with the same slug in one stage map to the same path; the
/// later record overwrites the earlier one.
pub fn output_path(record: &DigimonRecord, root: &Path, extension: &str) -> PathBuf {
    root.join(record.stage.folder_name())
        .join(format!("{}.{}", slugify(&record.name), extension))
}

/// Render a record in the engine's text resource format
pub fn render_resource(record: &DigimonRecord, options: &EmitOptions) -> String {
    let effect = &record.status_effect;

    // `evolutions` stays empty; the engine links evolution resources later.
    format!(
        "[gd_resource type=\"Resource\" script_class=\"{class}\" load_steps=2 format=3]\n\
         \n\
         [ext_resource type=\"Script\" path=\"{script}\" id=\"1\"]\n\
         \n\
         [resource]\n\
         script = ExtResource(\"1\")\n\
         digimon_name = \"{name}\"\n\
         stage = {stage}\n\
         attribute = {attribute}\n\
         family = {family}\n\
         base_damage = {damage}\n\
         attack_speed = {speed}\n\
         attack_range = {range}\n\
         effect_type = \"{effect_type}\"\n\
         effect_chance = {effect_chance}\n\
         effect_duration = {effect_duration}\n\
         special_ability_name = \"{ability_name}\"\n\
         special_ability_description = \"{ability_description}\"\n\
         special_cooldown = {cooldown}\n\
         evolutions = []\n\
         evolves_from = \"{evolves_from}\"\n\
         dna_partner = \"{dna_partner}\"\n\
         dna_result = \"{dna_result}\"\n",
        class = options.script_class,
        script = options.script_path,
        name = escape_string(&record.name),
        stage = record.stage.index(),
        attribute = record.attribute.index(),
        family = record.family.index(),
        damage = record.base_damage,
        speed = format_float(record.attack_speed),
        range = format_float(record.attack_range),
        effect_type = escape_string(&effect.kind),
        effect_chance = format_float(effect.chance),
        effect_duration = format_float(effect.duration),
        ability_name = escape_string(&record.special_ability_name),
        ability_description = escape_string(&record.special_ability_description),
        cooldown = format_float(record.special_cooldown),
        evolves_from = escape_string(&record.evolves_from),
        dna_partner = escape_string(&record.dna_partner),
        dna_result = escape_string(&record.dna_result),
    )
}

/// Create every stage folder and write one resource per record.
///
/// Failing to create the folders is fatal; a failed file write is recorded
/// and the remaining records are still written.
pub fn write_resources(records: &[DigimonRecord], options: &EmitOptions) -> Result<EmitResult> {
    for stage in Stage::ALL {
        let dir = options.output_dir.join(stage.folder_name());
        fs::create_dir_all(&dir).map_err(|e| Error::FileWrite {
            path: dir.clone(),
            source: e,
        })?;
    }

    let mut result = EmitResult::default();
    for record in records {
        if slugify(&record.name).is_empty() {
            warn!(name = %record.name, "name produces an empty file name");
        }
        let path = output_path(record, &options.output_dir, &options.extension);
        match fs::write(&path, render_resource(record, options)) {
            Ok(()) => result.files_written.push(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write resource");
                result.errors.push((path, e.to_string()));
            }
        }
    }

    info!(
        written = result.files_written.len(),
        failed = result.errors.len(),
        root = %options.output_dir.display(),
        "wrote resources"
    );
    Ok(result)
}

/// Floats always carry a fractional part (`1.0`, not `1`)
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
