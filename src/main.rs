//! fastfs - command-line front end for the fastfs primitives.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use fastfs::{Config, LineReader, MissingPolicy, MtimeFormat, Opened};
use std::io::{self, Write};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("fastfs")
        .version(fastfs::VERSION)
        .about("Fast path normalization, joining and file reading")
        .subcommand_required(true)
        .subcommand(
            Command::new("normalize")
                .about("Normalize each path lexically")
                .arg(Arg::new("path").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("join")
                .about("Join path segments")
                .arg(Arg::new("segment").required(true).num_args(1..)),
        )
        .subcommand(
            Command::new("cat")
                .about("Write a whole file to stdout")
                .arg(Arg::new("file").required(true).index(1))
                .arg(
                    Arg::new("ignore-missing")
                        .long("ignore-missing")
                        .action(ArgAction::SetTrue)
                        .help("Print nothing for a missing file"),
                ),
        )
        .subcommand(
            Command::new("lines")
                .about("Print a file line by line")
                .arg(Arg::new("file").required(true).index(1))
                .arg(
                    Arg::new("keep-newlines")
                        .long("keep-newlines")
                        .action(ArgAction::SetTrue)
                        .help("Keep the newline on each record instead of re-adding one"),
                )
                .arg(
                    Arg::new("missing")
                        .long("missing")
                        .value_parser(["raise", "empty", "absent"])
                        .default_value("raise")
                        .help("What to do when the file does not exist"),
                )
                .arg(
                    Arg::new("mtime")
                        .long("mtime")
                        .value_parser(["integer", "fractional"])
                        .help("Timestamp rendering for --show-mtime"),
                )
                .arg(
                    Arg::new("show-mtime")
                        .long("show-mtime")
                        .action(ArgAction::SetTrue)
                        .help("Print the modification time captured at open first"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("Read defaults from a TOML configuration file"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let matches = cli().get_matches();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("normalize", sub)) => {
            for path in sub.get_many::<String>("path").into_iter().flatten() {
                out.write_all(&fastfs::normalize(path))?;
                out.write_all(b"\n")?;
            }
        }
        Some(("join", sub)) => {
            let segments: Vec<&String> = sub.get_many::<String>("segment").into_iter().flatten().collect();
            out.write_all(&fastfs::join(&segments)?)?;
            out.write_all(b"\n")?;
        }
        Some(("cat", sub)) => {
            let file = required_path(sub, "file")?;
            let ignore_missing = sub.get_flag("ignore-missing");
            let data = fastfs::read_whole_file_async(file.clone(), ignore_missing)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            if let Some(data) = data {
                out.write_all(&data)?;
            }
        }
        Some(("lines", sub)) => run_lines(sub, &mut out).await?,
        _ => unreachable!("subcommand_required is set"),
    }

    out.flush()?;
    Ok(())
}

async fn run_lines(sub: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let file = required_path(sub, "file")?;
    let config = load_config(sub.get_one::<String>("config"))?;

    let preferences = config.preferences();
    if let Some(format) = sub.get_one::<String>("mtime") {
        preferences.set_mtime_format(match format.as_str() {
            "integer" => MtimeFormat::Integer,
            _ => MtimeFormat::Fractional,
        });
    }

    let missing = match sub.get_one::<String>("missing").map(String::as_str) {
        Some("empty") => MissingPolicy::Empty,
        Some("absent") => MissingPolicy::Absent,
        _ => MissingPolicy::Raise,
    };
    let keep_newlines = sub.get_flag("keep-newlines");
    let options = config
        .line_source_options(&preferences)
        .strip_newlines(!keep_newlines)
        .missing(missing);

    let mut opened = fastfs::open_line_source_async(file.clone(), options)
        .await
        .with_context(|| format!("opening {}", file.display()))?;

    let reader: &mut dyn LineReader = match opened.as_reader() {
        Some(reader) => reader,
        None => {
            log::info!("{} is absent", file.display());
            return Ok(());
        }
    };

    if sub.get_flag("show-mtime") {
        match reader.mtime() {
            Some(mtime) => writeln!(out, "# mtime {}", mtime)?,
            None => writeln!(out, "# mtime none")?,
        }
    }

    while let Some(line) = reader.next_line() {
        out.write_all(line)?;
        if !keep_newlines {
            out.write_all(b"\n")?;
        }
    }

    if let Opened::Source(source) = opened {
        source.release();
    }
    Ok(())
}

fn required_path(sub: &ArgMatches, name: &str) -> Result<PathBuf> {
    sub.get_one::<String>(name)
        .map(PathBuf::from)
        .with_context(|| format!("missing <{}> argument", name))
}

#[cfg(feature = "config")]
fn load_config(path: Option<&String>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(std::path::Path::new(path))?,
        None => Config::load_default()?,
    };
    Ok(config)
}

#[cfg(not(feature = "config"))]
fn load_config(path: Option<&String>) -> Result<Config> {
    if path.is_some() {
        anyhow::bail!("--config requires fastfs to be built with the `config` feature");
    }
    Ok(Config::default())
}
