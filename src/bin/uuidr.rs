use std::collections::HashMap;
use std::io::{self, BufRead, IsTerminal};

use anstream::{eprintln, println};
use clap::{arg, command, value_parser, ArgMatches, Command};
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid_rows::{Engine, Operation, Row};

fn with_rows(cmd: Command) -> Command {
    cmd.arg(arg!([rows]... "Input rows, STDIN lines (tab separated cells) are read if none"))
}

fn time_based(cmd: Command) -> Command {
    with_rows(cmd)
        .arg(arg!(--node <NODE> "Node as hex bytes, like 01:23:45:67:89:AB"))
        .arg(arg!(--"clock-seq" <CLOCK_SEQ> "Clock sequence, a 14 bit decimal number"))
}

fn name_based(cmd: Command) -> Command {
    with_rows(cmd)
        .arg(
            arg!(--namespace <NAMESPACE> "namespace_url, namespace_dns, namespace_oid, namespace_x500, empty_value or any string")
                .default_value("namespace_url"),
        )
        .arg(arg!(--"namespace-as-uuid" "Read the namespace as a UUID"))
}

fn cli() -> Command {
    command!()
        .subcommand_required(true)
        .arg(
            arg!(--seed <SEED> "Seed the pseudorandom generator")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            arg!(--color <WHEN> "Controls when to use color")
                .default_value("auto")
                .value_parser(clap::builder::EnumValueParser::<clap::ColorChoice>::new())
                .global(true),
        )
        .subcommand(time_based(Command::new("uuid1").about("Time based")))
        .subcommand(name_based(Command::new("uuid3").about("Name based, MD5")))
        .subcommand(with_rows(Command::new("uuid4").about("Random")))
        .subcommand(name_based(Command::new("uuid5").about("Name based, SHA-1")))
        .subcommand(time_based(Command::new("uuid6").about("Reordered time based")))
        .subcommand(with_rows(Command::new("uuid7").about("UNIX time based")))
        .subcommand(with_rows(Command::new("uuid8").about("Custom, sub-millisecond time")))
        .subcommand(with_rows(
            Command::new("uuid1-to-uuid6").about("Convert version 1 UUIDs to version 6"),
        ))
        .subcommand(
            with_rows(Command::new("convert").about("Convert between UUID formats"))
                .arg(
                    arg!(--from <FORMAT> "Input format: uuid_hex, int or urn")
                        .default_value("uuid_hex"),
                )
                .arg(arg!(--to <FORMAT> "Output format: uuid, hex, int or urn").default_value("uuid")),
        )
        .subcommand(with_rows(
            Command::new("version").about("Print the version of UUIDs"),
        ))
}

fn params(matches: &ArgMatches) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let mut copy = |id: &str, key: &str| {
        if let Ok(Some(value)) = matches.try_get_one::<String>(id) {
            params.insert(key.to_string(), value.clone());
        }
    };
    copy("node", "node");
    copy("clock-seq", "clock_seq");
    copy("namespace", "namespace");
    copy("from", "from_format");
    copy("to", "to_format");
    if let Ok(Some(&as_uuid)) = matches.try_get_one::<bool>("namespace-as-uuid") {
        params.insert("namespace_as_uuid".to_string(), as_uuid.to_string());
    }
    params
}

fn read_rows(matches: &ArgMatches) -> io::Result<Vec<Row>> {
    if let Some(values) = matches.get_many::<String>("rows") {
        return Ok(values.map(|v| vec![v.clone()]).collect());
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    let mut rows = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(line.split('\t').map(str::to_string).collect());
    }
    Ok(rows)
}

/// `RUST_LOG` directives when set and valid, library warnings otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("uuid_rows=warn"))
}

pub fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let color = match matches
        .get_one::<clap::ColorChoice>("color")
        .expect("default color value")
    {
        clap::ColorChoice::Auto => anstream::ColorChoice::Auto,
        clap::ColorChoice::Always => anstream::ColorChoice::Always,
        clap::ColorChoice::Never => anstream::ColorChoice::Never,
    };
    color.write_global();

    tracing_subscriber::registry()
        .with(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let seed = matches.get_one::<u64>("seed").copied();
    let mut engine = if let Some(seed) = seed {
        Engine::with_seed(seed)
    } else {
        Engine::new()
    };

    let (name, sub) = matches.subcommand().expect("subcommand is required");
    let rows = read_rows(sub)?;

    let result = Operation::from_params(name, &params(sub)).and_then(|op| engine.run(&op, &rows));
    match result {
        Ok(output) => {
            for value in &output {
                println!("{value}");
            }
        }
        Err(err) => {
            eprintln!("{}: {err}", "error".red());
            std::process::exit(1);
        }
    }

    Ok(())
}
