use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reqschema_core::{CompileError, Config, Diagnostic, Report, RequestDefinition};
use reqschema_engine::{RequestCompiler, RuleRegistry};
use reqschema_i18n::LocaleCatalog;

/// reqschema - Compile request schemas into validation rules and labels
#[derive(Parser)]
#[command(name = "reqschema")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: reqschema.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile request definitions into rules and labels
    Compile {
        /// JSON file with one request definition or an array of them
        file: PathBuf,

        /// Write the compiled output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Locale for labels (overrides the config)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Check field declarations against their schemas
    Check {
        /// Request definition files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file for report.json
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,
    },

    /// Write a default config file
    InitConfig {
        /// Where to write the config
        #[arg(short, long, default_value = "reqschema.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("reqschema.toml").exists() {
        Config::from_file(Path::new("reqschema.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    if cli.verbose {
        eprintln!(
            "{} locale: {} (fallback {})",
            "Using".cyan(),
            config.locale,
            config.fallback_locale
        );
    }

    match cli.command {
        Commands::Compile { file, output, locale } => {
            compile_command(&config, &file, output.as_deref(), locale, cli.verbose)
        }
        Commands::Check { files, output } => {
            check_command(&config, &files, &output, cli.verbose)
        }
        Commands::InitConfig { path } => init_config_command(&path, cli.verbose),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_definitions(path: &Path) -> Result<Vec<RequestDefinition>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    RequestDefinition::from_json(&json)
        .with_context(|| format!("Failed to parse request definitions in {}", path.display()))
}

/// Compile command - emit rules and labels per request
fn compile_command(
    config: &Config,
    file: &Path,
    output: Option<&Path>,
    locale: Option<String>,
    verbose: bool,
) -> Result<()> {
    let definitions = load_definitions(file)?;

    let registry = RuleRegistry::from_config(&config.rules);
    let mut catalog = LocaleCatalog::from_config(config);
    if let Some(locale) = locale {
        catalog = catalog.with_locale(locale);
    }
    let compiler = RequestCompiler::new(&registry, &catalog);

    let mut compiled = serde_json::Map::new();
    let mut failed = 0;

    for definition in &definitions {
        if verbose {
            eprintln!("  {} {}...", "Compiling".cyan(), definition.name);
        }

        match compiler.compile(definition) {
            Ok(request) => {
                compiled.insert(definition.name.clone(), serde_json::to_value(request)?);
            }
            Err(CompileError::InconsistentSchemaDeclaration { request, diagnostics }) => {
                failed += 1;
                eprintln!("{} {}", "Invalid schema definition in".red().bold(), request);
                for diag in &diagnostics {
                    eprintln!("  [{}] {}", diag.code.to_string().red().bold(), diag.message);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "Failed to compile".red().bold(), definition.name, e);
            }
        }
    }

    let json = serde_json::to_string_pretty(&compiled)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            if verbose {
                eprintln!("{} {}", "Output saved to:".green(), path.display());
            }
        }
        None => println!("{}", json),
    }

    if failed > 0 {
        eprintln!("{} of {} requests failed to compile", failed, definitions.len());
        std::process::exit(1);
    }

    Ok(())
}

/// Check command - consistency checks over every definition
fn check_command(config: &Config, files: &[PathBuf], output: &Path, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("{}", "Running schema declaration checks...".cyan());
    }

    let registry = RuleRegistry::from_config(&config.rules);
    let catalog = LocaleCatalog::from_config(config);
    let compiler = RequestCompiler::new(&registry, &catalog);

    let mut report = Report::new();

    for file in files {
        for definition in load_definitions(file)? {
            if verbose {
                eprintln!("  {} {}...", "Checking".cyan(), definition.name);
            }

            let diagnostics = compiler.check(&definition);
            if verbose && diagnostics.is_empty() {
                eprintln!("    {}", "✓ OK".green());
            } else if verbose {
                eprintln!("    {} diagnostics found", diagnostics.len().to_string().red());
            }

            report.add_request(definition.fields.len(), diagnostics);
        }
    }

    report.save_to_file(output)?;

    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), output.display());
    }

    print_report_summary(&report);

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Init-config command - write the default configuration
fn init_config_command(path: &Path, verbose: bool) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    Config::default().save_to_file(path)?;

    if verbose {
        eprintln!("{} {}", "Config written to:".green(), path.display());
    }
    println!("Created {}", path.display());

    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        println!("  [{}] {}", diag.code.to_string().red().bold(), diag.message);

        if let Some(request) = &diag.request {
            println!("    in {}", request);
        }
        if let Some(exp) = &diag.expected {
            println!("    Expected: {}", exp);
        }
        if let Some(act) = &diag.actual {
            println!("    Actual:   {}", act);
        }
    }
}

/// Print report summary to stdout
fn print_report_summary(report: &Report) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Schema Declaration Check Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Version: {}", report.version);
    println!("Timestamp: {}", report.timestamp);
    println!();

    println!("{}", "Summary:".bold());
    println!("  Requests checked: {}", report.summary.requests_checked);
    println!("  Fields checked:   {}", report.summary.fields_checked);

    if report.summary.total > 0 {
        println!("  Diagnostics:      {}", report.summary.total.to_string().red().bold());
        println!("  Failed requests:  {}", report.summary.requests_failed.to_string().red());
    } else {
        println!("  Diagnostics:      {}", report.summary.total.to_string().green());
    }
    println!();

    if report.diagnostics.is_empty() {
        println!("{}", "✓ No issues found!".green().bold());
    } else {
        println!("{}", "Diagnostics:".bold());
        print_diagnostics(&report.diagnostics);
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn check_requires_files() {
        assert!(Cli::try_parse_from(["reqschema", "check"]).is_err());

        let args = ["reqschema", "check", "a.json", "b.json", "-o", "out.json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Check { files, output } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output, PathBuf::from("out.json"));
            }
            _ => panic!("expected check command"),
        }
    }
}
