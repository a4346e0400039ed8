//! casegen CLI - generate API test cases from an OpenAPI/Swagger spec

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use casegen_core::export::ExportFormat;
use casegen_core::{Config, export, generate_schema};
use casegen_engine::{Assembler, SpecDocument};

#[derive(Parser)]
#[command(name = "casegen")]
#[command(about = "Generate API test cases from an OpenAPI/Swagger spec")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test cases and export them
    Generate {
        #[command(flatten)]
        options: GenerateOptions,
    },

    /// Show what would be generated without writing any files
    Plan {
        #[command(flatten)]
        options: GenerateOptions,
    },

    /// Initialize config file
    Init,

    /// Export JSON Schema for the generated suite format
    Schema,
}

#[derive(clap::Args)]
struct GenerateOptions {
    /// Spec source: local file path or http(s) URL (overrides config)
    #[arg(short, long)]
    spec: Option<String>,

    /// Config file (default: .casegen.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Export formats, comma-separated (overrides config)
    #[arg(short, long, value_delimiter = ',')]
    format: Vec<ExportFormatArg>,

    /// Base URL for the Postman collection (overrides spec-derived URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Synthesize required object properties only
    #[arg(long)]
    required_only: bool,

    /// Add an extra-field negative variant per operation
    #[arg(long)]
    extra_field: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormatArg {
    Json,
    Csv,
    Postman,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Postman => ExportFormat::Postman,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(options: &GenerateOptions) -> Result<Config> {
    let mut cfg = if let Some(path) = &options.config {
        Config::load(std::path::Path::new(path))?
    } else {
        Config::load_default()?
    };

    if let Some(spec) = &options.spec {
        cfg.spec = spec.clone();
    }
    if let Some(dir) = &options.output_dir {
        cfg.output_dir = dir.clone();
    }
    if !options.format.is_empty() {
        cfg.formats = options.format.iter().map(|f| (*f).into()).collect();
    }
    if let Some(url) = &options.base_url {
        cfg.base_url = Some(url.clone());
    }
    if options.required_only {
        cfg.property_policy = casegen_core::PropertyPolicy::RequiredOnly;
    }
    if options.extra_field {
        cfg.extra_field = true;
    }

    Ok(cfg)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Generate { options } => {
            let cfg = load_config(&options)?;
            let doc = SpecDocument::load(&cfg.spec)?;
            let assembler = Assembler::new(&doc, &cfg);
            let suite = assembler.assemble();

            if suite.cases.is_empty() {
                eprintln!("Error: No operations found in spec. Check the paths section.");
                return Ok(1);
            }

            // Per-operation warnings (degraded $ref resolutions etc.)
            if cli.output != OutputFormat::Silent {
                for case in &suite.cases {
                    for warning in &case.warnings {
                        eprintln!("Warning: {} {}: {warning}", case.method, case.path);
                    }
                }
            }

            match cli.output {
                OutputFormat::Terminal => {
                    println!(
                        "Generated {} test cases ({} negative) from {} operations",
                        suite.operations + suite.negative_count,
                        suite.negative_count,
                        suite.operations,
                    );
                    for case in &suite.cases {
                        println!(
                            "  {} {} -> {} ({} negatives)",
                            case.method,
                            case.path,
                            case.expected_status,
                            case.negatives.len(),
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&suite)?);
                }
                OutputFormat::Silent => {}
            }

            let base_url = cfg.base_url.clone().unwrap_or_else(|| doc.base_url());
            let written = export::write_suite(&suite, &cfg.output_dir, &cfg.formats, &base_url)?;

            if cli.output == OutputFormat::Terminal {
                for path in &written {
                    println!("Exported: {}", path.display());
                }
            }

            Ok(0)
        }

        Commands::Plan { options } => {
            let cfg = load_config(&options)?;
            let doc = SpecDocument::load(&cfg.spec)?;
            let plan = Assembler::new(&doc, &cfg).plan();

            match cli.output {
                OutputFormat::Terminal => println!("{}", plan.to_terminal()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                OutputFormat::Silent => {}
            }

            Ok(if plan.has_errors() { 1 } else { 0 })
        }

        Commands::Init => {
            let config_path = ".casegen.toml";
            if std::path::Path::new(config_path).exists() {
                eprintln!("{config_path} already exists");
                return Ok(1);
            }

            std::fs::write(config_path, Config::example())?;
            println!("Created {config_path}");
            println!("\nEdit the file to configure:");
            println!("  - spec: path or URL of your OpenAPI/Swagger spec");
            println!("  - output_dir: where exports are written");
            println!("  - formats: json, csv, postman");
            Ok(0)
        }

        Commands::Schema => {
            println!("{}", generate_schema());
            Ok(0)
        }
    }
}
