use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::util::{print_json, InputArgs};

#[derive(Debug, Serialize)]
struct SectionsReport {
    ok: bool,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    sections: Vec<String>,
}

pub fn cmd_sections(input: &InputArgs) -> Result<ExitCode> {
    let src = input.read()?;

    let config = match input.parse(&src) {
        Ok(config) => config,
        Err(err) => {
            print_json(&SectionsReport {
                ok: false,
                input: input.shown(),
                error: Some(err.to_string()),
                sections: Vec::new(),
            })?;
            return Ok(ExitCode::from(20));
        }
    };

    print_json(&SectionsReport {
        ok: true,
        input: input.shown(),
        error: None,
        sections: config.sections(),
    })?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    #[arg(long, value_name = "NAME")]
    pub section: String,
}

#[derive(Debug, Serialize)]
struct KeysReport {
    ok: bool,
    input: String,
    section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    keys: Vec<String>,
}

pub fn cmd_keys(input: &InputArgs, args: KeysArgs) -> Result<ExitCode> {
    let src = input.read()?;

    let config = match input.parse(&src) {
        Ok(config) => config,
        Err(err) => {
            print_json(&KeysReport {
                ok: false,
                input: input.shown(),
                section: args.section,
                error: Some(err.to_string()),
                keys: Vec::new(),
            })?;
            return Ok(ExitCode::from(20));
        }
    };

    let Some(keys) = config.keys(&args.section) else {
        print_json(&KeysReport {
            ok: false,
            input: input.shown(),
            section: args.section.clone(),
            error: Some(format!("no such map section: {}", args.section)),
            keys: Vec::new(),
        })?;
        return Ok(ExitCode::from(20));
    };

    print_json(&KeysReport {
        ok: true,
        input: input.shown(),
        section: args.section,
        error: None,
        keys,
    })?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    #[arg(long, value_name = "NAME")]
    pub section: String,

    #[arg(long, value_name = "KEY")]
    pub key: String,

    /// Value reported when the key is absent.
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetReport {
    ok: bool,
    input: String,
    section: String,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

pub fn cmd_get(input: &InputArgs, args: GetArgs) -> Result<ExitCode> {
    let src = input.read()?;

    let config = match input.parse(&src) {
        Ok(config) => config,
        Err(err) => {
            print_json(&GetReport {
                ok: false,
                input: input.shown(),
                section: args.section,
                key: args.key,
                error: Some(err.to_string()),
                value: None,
            })?;
            return Ok(ExitCode::from(20));
        }
    };

    let value = match config.get(&args.section, &args.key) {
        Some(value) => value.to_string(),
        None => match args.default {
            Some(default) => default,
            None => {
                print_json(&GetReport {
                    ok: false,
                    input: input.shown(),
                    section: args.section.clone(),
                    key: args.key.clone(),
                    error: Some(format!(
                        "no value for key: {}.{}",
                        args.section, args.key
                    )),
                    value: None,
                })?;
                return Ok(ExitCode::from(20));
            }
        },
    };

    print_json(&GetReport {
        ok: true,
        input: input.shown(),
        section: args.section,
        key: args.key,
        error: None,
        value: Some(value),
    })?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Clone, Args)]
pub struct ItemsArgs {
    #[arg(long, value_name = "NAME")]
    pub section: String,
}

#[derive(Debug, Serialize)]
struct ItemsReport {
    ok: bool,
    input: String,
    section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    items: Vec<String>,
}

pub fn cmd_items(input: &InputArgs, args: ItemsArgs) -> Result<ExitCode> {
    let src = input.read()?;

    let config = match input.parse(&src) {
        Ok(config) => config,
        Err(err) => {
            print_json(&ItemsReport {
                ok: false,
                input: input.shown(),
                section: args.section,
                error: Some(err.to_string()),
                items: Vec::new(),
            })?;
            return Ok(ExitCode::from(20));
        }
    };

    let Some(items) = config.get_list(&args.section) else {
        print_json(&ItemsReport {
            ok: false,
            input: input.shown(),
            section: args.section.clone(),
            error: Some(format!("no such list section: {}", args.section)),
            items: Vec::new(),
        })?;
        return Ok(ExitCode::from(20));
    };

    print_json(&ItemsReport {
        ok: true,
        input: input.shown(),
        section: args.section.clone(),
        error: None,
        items: items.to_vec(),
    })?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Serialize)]
struct DumpReport {
    ok: bool,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    config: Value,
}

pub fn cmd_dump(input: &InputArgs) -> Result<ExitCode> {
    let src = input.read()?;

    let config = match input.parse(&src) {
        Ok(config) => config,
        Err(err) => {
            print_json(&DumpReport {
                ok: false,
                input: input.shown(),
                error: Some(err.to_string()),
                config: Value::Null,
            })?;
            return Ok(ExitCode::from(20));
        }
    };

    let mut doc = serde_json::Map::new();
    for name in config.sections() {
        if let Some(keys) = config.keys(&name) {
            let mut map = serde_json::Map::new();
            for key in keys {
                if let Some(value) = config.get(&name, &key) {
                    map.insert(key, Value::String(value.to_string()));
                }
            }
            doc.insert(name, Value::Object(map));
        } else if let Some(items) = config.get_list(&name) {
            doc.insert(
                name,
                Value::Array(items.iter().cloned().map(Value::String).collect()),
            );
        }
    }

    print_json(&DumpReport {
        ok: true,
        input: input.shown(),
        error: None,
        config: Value::Object(doc),
    })?;
    Ok(ExitCode::SUCCESS)
}
