use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct CliOptions {
    /// Path to the YAML configuration file. Can also be set via env. var..
    #[clap(long, env = "BLOGQL_CONFIG")]
    pub config: PathBuf,
}
