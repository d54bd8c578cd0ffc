use chrono::Datelike;
use clap::{Parser, Subcommand};
use school_directory::{config, generate, load, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "school-directory")]
#[command(about = "Static site generator for a verified schools directory")]
#[command(long_about = "\
Static site generator for a verified schools directory

The SQLite `schools` table is the data source. Every row with is_active = 1
and is_verified = 1 is published; everything else is left out.

Output structure:

  <output>/
  ├── index.html                      # Homepage: first 12 schools + filters
  ├── sitemap.xml
  ├── schools/
  │   ├── all.html                    # Every school, with stats and sorting
  │   └── <school_id>.html            # One profile per school
  └── assets/
      ├── style.css
      ├── schools.json                # Compact summary
      ├── schools_data.json           # Full export, image URLs
      ├── schools_data_base64.json    # Full export, embedded images
      └── images/                     # Placeholders (never overwritten)

Every build is a full rebuild. Profile pages of schools that are no longer
published are removed.

Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostic logging on stderr.

Run 'school-directory gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file (optional; stock defaults when missing)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// SQLite database (overrides database.path from the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the database and write the whole site
    Build,
    /// Load the database and list what would be published
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let build_date = chrono::Local::now().date_naive();

    match &cli.command {
        Command::Build => {
            let (site_config, db_path) = resolve_settings(&cli)?;
            println!("==> Stage 1: Loading {}", db_path.display());
            let outcome = load::load_schools(&db_path, build_date.year())?;
            if let load::LoadOutcome::NoEligibleRecords = outcome {
                tracing::warn!(db = %db_path.display(), "no eligible schools; building an empty directory");
            }
            output::print_load_output(&outcome, &db_path);

            println!("==> Stage 2: Generating site \u{2192} {}", cli.output.display());
            init_thread_pool(&site_config.processing);
            let records = outcome.records();
            let report = generate::generate(records, &site_config, &cli.output, build_date)?;
            output::print_generate_output(&report, records);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let (_, db_path) = resolve_settings(&cli)?;
            println!("==> Checking {}", db_path.display());
            let outcome = load::load_schools(&db_path, build_date.year())?;
            output::print_load_output(&outcome, &db_path);
            println!("==> Database is readable");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `--config` and pick the database: `--db` wins over `database.path`,
/// which is relative to the config file's directory.
fn resolve_settings(cli: &Cli) -> Result<(config::SiteConfig, PathBuf), config::ConfigError> {
    let site_config = config::load_config(&cli.config)?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| site_config.database.resolve(&cli.config));
    Ok((site_config, db_path))
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. User can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
