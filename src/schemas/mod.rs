//! Schema names, the schema list file, and schema selection

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::SchemaError;

/// File name of the schema list in the user's home directory
pub const DEFAULT_SCHEMAS_FILE: &str = "schemas.conf";

/// A validated schema identifier (no `.`, whitespace, or backticks)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(String);

impl SchemaName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SchemaName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.contains('.') {
            Some("name must not contain '.'")
        } else if name.contains('`') {
            Some("name must not contain backticks")
        } else if name.chars().any(char::is_whitespace) {
            Some("name must not contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SchemaError::InvalidSchemaName {
                name: s.to_string(),
                reason,
            }),
            None => Ok(SchemaName(name.to_string())),
        }
    }
}

impl TryFrom<&str> for SchemaName {
    type Error = SchemaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of schemas a user may pick from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    schemas: Vec<SchemaName>,
}

impl SchemaCatalog {
    /// Parse a newline-delimited schema list
    ///
    /// Lines are trimmed; blank lines and `#` comment lines are ignored.
    /// Invalid names are skipped with a warning and duplicates keep their
    /// first position.
    pub fn parse(content: &str) -> Self {
        let mut schemas: Vec<SchemaName> = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.parse::<SchemaName>() {
                Ok(name) if !schemas.contains(&name) => schemas.push(name),
                Ok(name) => debug!(line = idx + 1, schema = %name, "duplicate schema ignored"),
                Err(err) => warn!(line = idx + 1, "{}", err),
            }
        }
        Self { schemas }
    }

    /// Load the schema list from `path`
    ///
    /// A missing file yields an empty catalog; any other I/O failure is an error.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let catalog = Self::parse(&content);
                debug!(path = %path.display(), count = catalog.len(), "loaded schema list");
                Ok(catalog)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "schema list not found, no schemas available");
                Ok(Self::default())
            }
            Err(source) => Err(SchemaError::SchemaListUnreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// `~/schemas.conf`, or `./schemas.conf` when no home directory is known
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_SCHEMAS_FILE)
    }

    pub fn schemas(&self) -> &[SchemaName] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn contains(&self, name: &SchemaName) -> bool {
        self.schemas.contains(name)
    }
}

/// Resolve the schemas to generate for.
///
/// With `all` set, every catalog schema comes first in catalog order; the
/// explicitly named schemas follow in the order given. Duplicates are
/// dropped. Names that are not in the catalog are accepted but logged.
pub fn resolve_selection(
    catalog: &SchemaCatalog,
    explicit: &[String],
    all: bool,
) -> Result<Vec<SchemaName>, SchemaError> {
    let mut selected: Vec<SchemaName> = Vec::new();

    if all {
        selected.extend(catalog.schemas().iter().cloned());
    }

    for raw in explicit {
        let name: SchemaName = raw.parse()?;
        if !catalog.is_empty() && !catalog.contains(&name) {
            warn!(schema = %name, "schema is not listed in the schema list");
        }
        if !selected.contains(&name) {
            selected.push(name);
        }
    }

    if selected.is_empty() {
        return Err(SchemaError::NoSchemaSelected);
    }
    Ok(selected)
}
