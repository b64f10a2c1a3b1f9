use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mysql_add_schema::config::Config;
use mysql_add_schema::{generate, list_schemas, parser, GenerateOptions};

#[derive(Parser)]
#[command(name = "mysql-add-schema")]
#[command(author, version, about = "Prefix table names in MySQL scripts with schema names")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one copy of a script per schema, with table names qualified
    Generate {
        /// Path to the source .sql file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Schema to generate for (repeatable)
        #[arg(short, long = "schema")]
        schemas: Vec<String>,

        /// Generate for every schema in the schema list
        #[arg(short, long)]
        all: bool,

        /// Schema list file, one name per line, `#` starts a comment line (defaults to ~/schemas.conf)
        #[arg(long)]
        schemas_file: Option<PathBuf>,

        /// Output path (defaults to <input>_generated.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Encoding to try when the input is not UTF-8 (e.g. gbk, windows-1252)
        #[arg(long)]
        encoding: Option<String>,
    },

    /// List the schemas available in the schema list
    ///
    /// The schema list holds one schema name per line. Surrounding whitespace
    /// is trimmed; blank lines and lines starting with `#` are ignored.
    Schemas {
        /// Schema list file, one name per line, `#` starts a comment line (defaults to ~/schemas.conf)
        #[arg(long)]
        schemas_file: Option<PathBuf>,
    },

    /// Print the statements a script splits into
    Split {
        /// Path to the .sql file
        input: PathBuf,

        /// Encoding to try when the input is not UTF-8
        #[arg(long)]
        encoding: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env().context("Failed to load configuration from environment")?;

    match cli.command {
        Commands::Generate {
            input,
            schemas,
            all,
            schemas_file,
            output,
            encoding,
        } => {
            let options = GenerateOptions {
                input,
                schemas,
                all_schemas: all,
                schemas_file: schemas_file.or(config.schemas_file),
                output,
                fallback_encoding: encoding.or(Some(config.fallback_encoding)),
            };

            let report = generate(options)?;
            println!(
                "Generated {} statement(s) for {} schema(s): {}",
                report.statement_count,
                report.schemas.len(),
                report.output_path.display()
            );
        }
        Commands::Schemas { schemas_file } => {
            let catalog = list_schemas(schemas_file.or(config.schemas_file).as_deref())?;
            for schema in catalog.schemas() {
                println!("{}", schema);
            }
        }
        Commands::Split { input, encoding } => {
            let label = encoding.unwrap_or(config.fallback_encoding);
            let encoding = parser::resolve_encoding(Some(&label))?;
            let content = parser::read_script(&input, encoding)?;
            for statement in parser::split_statements(&content) {
                println!("{};\n", statement);
            }
        }
    }

    Ok(())
}
