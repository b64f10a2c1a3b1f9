//! mysql-add-schema: prefix bare table references in MySQL scripts with schema names
//!
//! A script is split into statements once, then every statement is rewritten
//! once per selected schema. The output holds one copy of the whole script
//! per schema.

pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod rewrite;
pub mod schemas;
pub mod util;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

pub use error::SchemaError;
pub use parser::split_statements;
pub use rewrite::{qualify, QualifyRule};
pub use schemas::{SchemaCatalog, SchemaName};

/// Options for generating a schema-qualified script
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Path to the source .sql file
    pub input: Option<PathBuf>,
    /// Schemas named explicitly, in the order given
    pub schemas: Vec<String>,
    /// Select every schema from the schema list
    pub all_schemas: bool,
    /// Schema list file (defaults to ~/schemas.conf)
    pub schemas_file: Option<PathBuf>,
    /// Output path (defaults to the input name with `_generated.sql`)
    pub output: Option<PathBuf>,
    /// Encoding label used when the input is not valid UTF-8
    pub fallback_encoding: Option<String>,
}

/// Summary of a finished generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub statement_count: usize,
    pub schemas: Vec<SchemaName>,
}

/// Load the schema list, from `path` or the default location
pub fn list_schemas(path: Option<&Path>) -> Result<SchemaCatalog> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(SchemaCatalog::default_path);
    Ok(SchemaCatalog::load(&path)?)
}

/// Read, split, qualify and write one script
pub fn generate(options: GenerateOptions) -> Result<GenerationReport> {
    // Step 1: An input file must be chosen
    let input = options.input.ok_or(SchemaError::NoInputSelected)?;

    // Step 2: Resolve the schemas to generate for
    let catalog = if options.all_schemas || options.schemas_file.is_some() {
        list_schemas(options.schemas_file.as_deref())?
    } else {
        SchemaCatalog::default()
    };
    let schemas = schemas::resolve_selection(&catalog, &options.schemas, options.all_schemas)?;

    // Step 3: Read and split the script
    let encoding = parser::resolve_encoding(options.fallback_encoding.as_deref())?;
    let content = parser::read_script(&input, encoding)?;
    let statements = split_statements(&content);
    info!(
        input = %input.display(),
        statements = statements.len(),
        schemas = schemas.len(),
        "parsed script"
    );

    // Step 4: Render every statement once per schema and write it out
    let text = output::render(&statements, &schemas);
    let output_path = options
        .output
        .unwrap_or_else(|| output::generated_path(&input));
    output::write_output(&output_path, &text)?;

    info!(output = %output_path.display(), "generated script");

    Ok(GenerationReport {
        output_path,
        statement_count: statements.len(),
        schemas,
    })
}
