use std::process::ExitCode;

use clap::Parser;

mod check;
mod query;
mod util;

#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(about = "Query INI-style configuration files.", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    input: util::InputArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List section names in file order.
    Sections,
    /// List the keys of a map section.
    Keys(query::KeysArgs),
    /// Print the value stored under a section/key pair.
    Get(query::GetArgs),
    /// Print the items of a list section.
    Items(query::ItemsArgs),
    /// Print the whole configuration as one JSON object.
    Dump,
    /// Parse only, reporting diagnostics.
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Sections => query::cmd_sections(&cli.input),
        Command::Keys(args) => query::cmd_keys(&cli.input, args),
        Command::Get(args) => query::cmd_get(&cli.input, args),
        Command::Items(args) => query::cmd_items(&cli.input, args),
        Command::Dump => query::cmd_dump(&cli.input),
        Command::Check => check::cmd_check(&cli.input),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("strata: {err:#}");
            ExitCode::from(2)
        }
    }
}
