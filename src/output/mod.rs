//! Rendering and writing the generated script

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SchemaError;
use crate::rewrite::qualify;
use crate::schemas::SchemaName;

/// Suffix inserted in place of `.sql` in the output file name
pub const GENERATED_SUFFIX: &str = "_generated.sql";

/// Render every statement once per schema.
///
/// Schemas form the outer loop and statements the inner one. Each rewritten
/// statement is followed by `;` and a blank line.
pub fn render<S: AsRef<str>>(statements: &[S], schemas: &[SchemaName]) -> String {
    let total: usize = statements.iter().map(|s| s.as_ref().len() + 3).sum();
    let mut out = String::with_capacity(total * schemas.len());

    for schema in schemas {
        for statement in statements {
            let statement = statement.as_ref().trim();
            if statement.is_empty() {
                continue;
            }
            out.push_str(&qualify(statement, schema.as_str()));
            out.push_str(";\n\n");
        }
    }

    out
}

/// Derive the output path from the input path.
///
/// The first `.sql` in the file name becomes `_generated.sql`
/// (`dump.sql` → `dump_generated.sql`, `a.sql.bak` → `a_generated.sql.bak`).
/// A file name without `.sql` gets `_generated.sql` appended to its stem.
/// The directory part is never touched.
pub fn generated_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let new_name = if file_name.contains(".sql") {
        file_name.replacen(".sql", GENERATED_SUFFIX, 1)
    } else {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        format!("{}{}", stem, GENERATED_SUFFIX)
    };

    input.with_file_name(new_name)
}

/// Write `text` to `path` in one piece.
///
/// The content goes to a temporary file beside `path` which is then renamed
/// over it, so a failed write never leaves a truncated output behind.
pub fn write_output(path: &Path, text: &str) -> Result<(), SchemaError> {
    let to_error = |source| SchemaError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(to_error)?;
    file.write_all(text.as_bytes()).map_err(to_error)?;
    file.flush().map_err(to_error)?;
    file.persist(path).map_err(|err| to_error(err.error))?;

    debug!(path = %path.display(), bytes = text.len(), "wrote generated script");
    Ok(())
}
