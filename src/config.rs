//! Environment-backed defaults for the command-line tool

use std::path::PathBuf;

use confique::Config as _;

#[derive(Debug, confique::Config)]
pub struct Config {
    /// Schema list location; `~/schemas.conf` when unset
    #[config(env = "MYSQL_ADD_SCHEMA_SCHEMAS_FILE")]
    pub schemas_file: Option<PathBuf>,

    /// Encoding label tried when an input file is not valid UTF-8
    #[config(env = "MYSQL_ADD_SCHEMA_ENCODING", default = "windows-1252")]
    pub fallback_encoding: String,
}

impl Config {
    pub fn from_env() -> Result<Self, confique::Error> {
        Config::builder().env().load()
    }
}
