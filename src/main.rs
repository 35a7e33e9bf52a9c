use log::{error, info, LevelFilter};
use radix_trie::perf::{self, Dictionary};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;
use std::process;

const USAGE: &str = "usage: radix-trie [-v | --verbose] <word-list>";

fn main() {
    let mut verbose = false;
    let mut path = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("{}", USAGE);
                process::exit(2);
            },
        }
    }
    let path = match path {
        Some(path) => path,
        None => {
            eprintln!("{}", USAGE);
            process::exit(2);
        },
    };

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        eprintln!("failed to initialize logger");
    }

    let report = Dictionary::load(&path).and_then(|dictionary| perf::run(&dictionary));
    match report {
        Ok(report) => info!(
            "{} words ({} distinct) in {}ms",
            report.words,
            report.distinct,
            (report.insert + report.contains + report.remove).as_millis(),
        ),
        Err(err) => {
            error!("{}: {}", path, err);
            process::exit(1);
        },
    }
}
