use std::io::Read as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use strata_conf::{Config, ParseError};

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Configuration file to read, `-` for stdin.
    #[arg(long, global = true, value_name = "PATH", default_value = "-")]
    pub input: PathBuf,

    /// Section name to parse as an ordered list (repeatable).
    #[arg(long = "list", global = true, value_name = "NAME")]
    pub list_sections: Vec<String>,
}

impl InputArgs {
    pub fn read(&self) -> Result<Vec<u8>> {
        if self.input.as_os_str() == "-" {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        } else {
            std::fs::read(&self.input)
                .with_context(|| format!("read: {}", self.input.display()))
        }
    }

    pub fn parse(&self, src: &[u8]) -> Result<Config, ParseError> {
        let names: Vec<&str> = self.list_sections.iter().map(String::as_str).collect();
        Config::parse(src, &names)
    }

    pub fn shown(&self) -> String {
        self.input.display().to_string()
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
