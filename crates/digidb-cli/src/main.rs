//! digidb CLI
//!
//! Command-line tool for turning the Digimon stats database into engine
//! resource files.

use clap::{Parser, Subcommand};
use digidb_core::{
    classify_effect, export_records, parse_database, scan_resources, stage_counts,
    write_resources, EmitOptions, ExportFormat, GenerationManifest, GeneratorConfig,
    TableOutcome,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "digidb")]
#[command(about = "Digimon stats database resource generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads the database
#[derive(clap::Args)]
struct SourceArgs {
    /// Config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stats database markdown file
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the database and write one resource file per Digimon
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output root for the stage folders
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parse and report without writing files
        #[arg(long)]
        dry_run: bool,

        /// Do not write manifest.json
        #[arg(long)]
        no_manifest: bool,
    },

    /// Parse the database and print the records
    Parse {
        #[command(flatten)]
        source: SourceArgs,

        /// Maximum number of records to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export parsed records to a file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List generated resources per stage folder
    List {
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output root to scan
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify an effect label the way table rows are classified
    Classify {
        /// Effect label (e.g. "Pierce, Burn")
        effect: String,

        /// Chance label (e.g. "25%")
        #[arg(long, default_value = "")]
        chance: String,

        /// Details text (e.g. "3s burn")
        #[arg(long, default_value = "")]
        details: String,
    },

    /// Create a config file with the default settings
    InitConfig {
        /// Output path for the config file
        #[arg(short, long, default_value = "digidb.json")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> digidb_core::Result<()> {
    match command {
        Commands::Generate {
            source,
            output,
            dry_run,
            no_manifest,
        } => cmd_generate(&source, output, dry_run, no_manifest),
        Commands::Parse { source, limit } => cmd_parse(&source, limit),
        Commands::Export {
            source,
            format,
            output,
        } => cmd_export(&source, &format, output.as_deref()),
        Commands::List { config, output } => cmd_list(config.as_deref(), output),
        Commands::Classify {
            effect,
            chance,
            details,
        } => cmd_classify(&effect, &chance, &details),
        Commands::InitConfig { output } => cmd_init_config(&output),
    }
}

/// Config file (or defaults) with CLI overrides applied
fn load_config(config: Option<&Path>) -> digidb_core::Result<GeneratorConfig> {
    match config {
        Some(path) => GeneratorConfig::load(path),
        None => Ok(GeneratorConfig::default()),
    }
}

fn load_source(source: &SourceArgs) -> digidb_core::Result<(GeneratorConfig, TableOutcome)> {
    let mut config = load_config(source.config.as_deref())?;
    if let Some(database) = &source.database {
        config.database = database.clone();
    }
    let outcome = parse_database(&config.database)?;
    Ok((config, outcome))
}

fn print_summary(outcome: &TableOutcome) {
    println!("Parsed {} Digimon", outcome.records.len());
    println!();
    println!("Digimon per stage:");
    for (stage, count) in stage_counts(&outcome.records) {
        println!("  {}: {}", stage.folder_name(), count);
    }

    if !outcome.diagnostics.is_empty() {
        println!();
        println!("Skipped rows ({}):", outcome.diagnostics.len());
        for diagnostic in &outcome.diagnostics {
            println!("  {}", diagnostic);
        }
    }
}

fn cmd_generate(
    source: &SourceArgs,
    output: Option<PathBuf>,
    dry_run: bool,
    no_manifest: bool,
) -> digidb_core::Result<()> {
    let (mut config, outcome) = load_source(source)?;
    if let Some(output) = output {
        config.output_dir = output;
    }

    println!("Parsing database from: {}", config.database.display());
    print_summary(&outcome);

    if dry_run {
        println!();
        println!("Dry run: no files written");
        return Ok(());
    }

    let options = EmitOptions::from(&config);
    let result = write_resources(&outcome.records, &options)?;

    println!();
    println!(
        "Generated {} .{} files under {}",
        result.files_written.len(),
        config.extension,
        config.output_dir.display()
    );

    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        for (path, err) in &result.errors {
            println!("  {}: {}", path.display(), err);
        }
    }

    if config.write_manifest && !no_manifest {
        let manifest = GenerationManifest::new(
            config.database.clone(),
            config.output_dir.clone(),
            &outcome.records,
            result.files_written,
            outcome.diagnostics.len(),
        );
        let manifest_path = config.manifest_path();
        manifest.save(&manifest_path)?;
        println!("Manifest: {}", manifest_path.display());
    }

    print_index(&config.output_dir, &config.extension)
}

fn cmd_parse(source: &SourceArgs, limit: Option<usize>) -> digidb_core::Result<()> {
    let (_, outcome) = load_source(source)?;

    let header = [
        "Name", "Stage", "Attribute", "Family", "DMG", "SPD", "RNG", "Effect", "Chance", "Dur",
        "Evolves To", "DNA",
    ];
    println!("{}", header.join("\t"));
    println!("{}", "-".repeat(header.len() * 12));

    let row_limit = limit.unwrap_or(outcome.records.len());
    for record in outcome.records.iter().take(row_limit) {
        let effect = &record.status_effect;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.name,
            record.stage,
            record.attribute,
            record.family,
            record.base_damage,
            record.attack_speed,
            record.attack_range,
            effect.kind,
            effect.chance,
            effect.duration,
            record.evolution_targets.join(", "),
            record.dna_partner
        );
    }

    if outcome.records.len() > row_limit {
        println!("... ({} more records)", outcome.records.len() - row_limit);
    }

    println!();
    print_summary(&outcome);
    Ok(())
}

fn cmd_export(source: &SourceArgs, format: &str, output: Option<&Path>) -> digidb_core::Result<()> {
    let format: ExportFormat = format.parse()?;
    let (_, outcome) = load_source(source)?;

    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            export_records(&outcome.records, format, writer)?;
            eprintln!(
                "Exported {} records to {}",
                outcome.records.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            export_records(&outcome.records, format, stdout.lock())?;
        }
    }

    Ok(())
}

fn cmd_list(config: Option<&Path>, output: Option<PathBuf>) -> digidb_core::Result<()> {
    let mut config = load_config(config)?;
    if let Some(output) = output {
        config.output_dir = output;
    }
    print_index(&config.output_dir, &config.extension)
}

fn print_index(root: &Path, extension: &str) -> digidb_core::Result<()> {
    let index = scan_resources(root, extension)?;

    println!();
    println!("Generated files by folder ({} total):", index.total_files());
    for folder in &index.folders {
        println!();
        println!("{}/ ({} files):", folder.stage.folder_name(), folder.files.len());
        for file in &folder.files {
            if let Some(name) = file.file_name() {
                println!("  - {}", name.to_string_lossy());
            }
        }
    }

    Ok(())
}

fn cmd_classify(effect: &str, chance: &str, details: &str) -> digidb_core::Result<()> {
    let classified = classify_effect(effect, chance, details);

    if classified.is_none() {
        println!("Effect:   (none)");
    } else {
        println!("Effect:   {}", classified.kind);
    }
    println!("Chance:   {}", classified.chance);
    println!("Duration: {}s", classified.duration);

    Ok(())
}

fn cmd_init_config(output: &Path) -> digidb_core::Result<()> {
    let config = GeneratorConfig::default();
    config.save(output)?;

    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the file to point at your database, then run:");
    println!("  digidb generate --config {}", output.display());

    Ok(())
}
