use clap::Parser;
use clap::error::ErrorKind;
use meggy_cli::cli::{Cli, collect_overrides};
use meggy_cli::logging::init_logging;
use meggy_core::Meggy;
use meggy_core::config::{Config, expand_alias, load_config_with_fallback, merge_overrides};
use meggy_core::messages;
use meggy_core::storage::{LineStore, data_path};
use std::collections::HashMap;
use std::io::{self, BufRead};

const DIVIDER: &str = "____________________________________________________________";

fn print_block(text: &str) {
    println!("{DIVIDER}");
    println!("{text}");
    println!("{DIVIDER}");
}

fn normalize_parse_error(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string()
}

fn resolve_config(cli: &Cli) -> Result<Config, String> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: {err}");
    }
    let overrides = collect_overrides(&cli.config_override)?;
    Ok(merge_overrides(&loaded.config, &overrides))
}

fn run_interactive(meggy: &mut Meggy, aliases: &HashMap<String, String>) -> io::Result<()> {
    print_block(meggy.greeting());

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            println!("{}", messages::END_OF_INPUT);
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line == "help" || line == "?" {
            print_block(&messages::command_help());
            continue;
        }

        let reply = meggy.reply(&expand_alias(line, aliases));
        print_block(&reply.text);
        if reply.exit {
            break;
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(&err));
            std::process::exit(1);
        }
    };

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };
    init_logging(config.log.as_deref());

    let path = match cli.data_file.clone() {
        Some(path) => path,
        None => match data_path(config.data_file.as_deref()) {
            Ok(path) => path,
            Err(err) => {
                eprintln!("ERROR: {err}");
                std::process::exit(1);
            }
        },
    };
    tracing::debug!(path = %path.display(), "using data file");
    let mut meggy = Meggy::with_line_store(LineStore::new(path));

    if let Some(line) = cli.command_line() {
        println!("{}", meggy.submit(&expand_alias(&line, &config.aliases)));
        return;
    }

    if let Err(err) = run_interactive(&mut meggy, &config.aliases) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
