//! template-generator CLI - generate CRUD slices from an entity schema, or
//! serve the generator over HTTP.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use template_generator::codegen::{read_schema_file, Generator};
use template_generator::{server, GeneratorConfig};

#[derive(Parser)]
#[command(name = "template-generator")]
#[command(version, about = "Schema-driven CRUD slice generator for Next.js projects", long_about = None)]
struct Cli {
    /// Path to a YAML config file (default: ./template-generator.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one slice from a schema file
    Generate {
        /// Path to the schema JSON
        #[arg(short, long)]
        schema: PathBuf,

        /// Project directory containing src/app (overrides config and env)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Parse and resolve a schema without writing anything
    Validate {
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Print the files a generation would write
    ListArtifacts {
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("template_generator=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { schema, root } => {
            if let Some(root) = root {
                config.project_root = root;
            }
            generate(&config, &schema)
        }
        Commands::Validate { schema } => validate(&config, &schema),
        Commands::ListArtifacts { schema } => list_artifacts(&config, &schema),
        Commands::Serve { host, port, root } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(root) = root {
                config.project_root = root;
            }
            server::serve(&config).await.context("HTTP service stopped")
        }
    }
}

fn generate(config: &GeneratorConfig, schema: &Path) -> anyhow::Result<()> {
    println!("🔧 Generating slice from {}...", schema.display());

    let report = Generator::from_config(config).generate(&read_schema_file(schema)?)?;

    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    println!(
        "  ✓ Wrote {} files to {}",
        report.files.len(),
        config
            .project_root
            .join("src/app")
            .join(&report.root)
            .join(&report.folder_name)
            .display()
    );
    println!("✨ Generation complete!");
    Ok(())
}

fn validate(config: &GeneratorConfig, schema: &Path) -> anyhow::Result<()> {
    println!("🔍 Validating {}...", schema.display());

    let (ctx, warnings) = Generator::from_config(config).prepare(&read_schema_file(schema)?)?;
    let naming = ctx.naming();

    println!("  ✓ Entity: {} / {}", naming.plural_pascal, naming.singular_pascal);
    println!("  ✓ Folder: src/app/{}/{}", ctx.root(), naming.folder_name);
    println!("  ✓ Page: {}", ctx.page_route());
    println!("  ✓ Fields: {}", ctx.fields().len());
    for warning in &warnings {
        println!("  ⚠ {}", warning);
    }
    println!("✨ Schema is valid");
    Ok(())
}

fn list_artifacts(config: &GeneratorConfig, schema: &Path) -> anyhow::Result<()> {
    let plan = Generator::from_config(config).plan(&read_schema_file(schema)?)?;
    for path in plan.paths() {
        println!("{}", path.display());
    }
    Ok(())
}
