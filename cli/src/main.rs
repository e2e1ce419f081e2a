use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use blueprint::{
    fixtures, generate, generate_strict, language_by_name, languages, to_json, BlueprintError, GoOptions, Golang,
    Language, LANGUAGE_NAMES,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Generate TypeScript, Go or Rust code from the bundled Blueprint schemas", long_about = None)]
struct Cli {
    /// Log generation steps to stderr (same as `RUST_LOG=debug`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code for one fixture in one language
    Generate {
        /// Fixture name, see `blueprint list`
        #[arg(short, long)]
        fixture: String,

        /// Target language: typescript (ts), go (golang) or rust (rs)
        #[arg(short, long, default_value = "typescript")]
        language: String,

        /// Output file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reject redeclared items and unresolved references before generating
        #[arg(long)]
        strict: bool,

        /// Package clause for Go output
        #[arg(long)]
        go_package: Option<String>,
    },

    /// Write `<fixture>/code_generated.<ext>` for every fixture and language
    GenerateAll {
        /// Directory that receives one subdirectory per fixture
        #[arg(short, long)]
        dir: PathBuf,

        /// Package clause for Go output
        #[arg(long)]
        go_package: Option<String>,
    },

    /// List fixtures and languages
    List,

    /// Print a fixture's registry as JSON
    Inspect {
        #[arg(short, long)]
        fixture: String,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if asked for
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}

/// Looks up a backend, applying `--go-package` when it is the Go one.
fn resolve_language(name: &str, go_package: Option<&str>) -> Result<Box<dyn Language>, BlueprintError> {
    let language = language_by_name(name)?;
    match go_package {
        Some(package) if language.name() == "go" => Ok(Box::new(Golang::with_options(GoOptions {
            package: package.to_string(),
        }))),
        _ => Ok(language),
    }
}

fn main() -> Result<(), BlueprintError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Generate { fixture, language, output, strict, go_package } => {
            let blueprint = fixtures::by_name(fixture)?;
            let language = resolve_language(language, go_package.as_deref())?;

            let code = if *strict {
                generate_strict(&blueprint, language.as_ref())?
            } else {
                generate(&blueprint, language.as_ref())?
            };

            if let Some(out_path) = output {
                fs::write(out_path, &code)?;
                println!("Generated {} code written to {}", language.name(), out_path.display());
            } else {
                print!("{}", code);
            }
            Ok(())
        }

        Commands::GenerateAll { dir, go_package } => {
            let targets: Vec<Box<dyn Language>> = languages()
                .iter()
                .map(|language| resolve_language(language.name(), go_package.as_deref()))
                .collect::<Result<_, _>>()?;

            for fixture in fixtures::names() {
                let blueprint = fixtures::by_name(fixture)?;
                let fixture_dir = dir.join(fixture);
                fs::create_dir_all(&fixture_dir)?;

                for language in &targets {
                    let code = generate(&blueprint, language.as_ref())?;
                    let out_path = fixture_dir.join(format!("code_generated.{}", language.extension()));
                    fs::write(&out_path, &code)?;
                    info!(path = %out_path.display(), "wrote");
                }
            }
            println!("Generated {} fixtures × {} languages into {}", fixtures::names().len(), targets.len(), dir.display());
            Ok(())
        }

        Commands::List => {
            println!("fixtures:");
            for fixture in fixtures::names() {
                println!("  {}", fixture);
            }
            println!("languages:");
            for language in LANGUAGE_NAMES {
                println!("  {}", language);
            }
            Ok(())
        }

        Commands::Inspect { fixture } => {
            let blueprint = fixtures::by_name(fixture)?;
            println!("{}", to_json(&blueprint)?);
            Ok(())
        }
    }
}
