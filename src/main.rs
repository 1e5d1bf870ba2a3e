use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use qfilter::{eval::eval, Filter, FilterConfig};
use slog::{info, o, Drain, Level, Logger};

/// Filter JSON lines with a compact filter expression
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// filter expression, e.g. `(last==jones & first==joe) | age>50`
    #[clap(short, long)]
    expr: String,
    /// namespace every field under this related record
    #[clap(short, long)]
    relation: Option<String>,
    /// parse with the strict grammar instead of the permissive resolver
    #[clap(long)]
    strict: bool,
    /// print the translated predicate and exit
    #[clap(long)]
    explain: bool,
    /// log verbosity (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// JSON lines to filter, stdin if omitted
    input: Option<PathBuf>,
}

fn logger(verbose: u8) -> Logger {
    let level = match verbose {
        0 => Level::Warning,
        1 => Level::Info,
        _ => Level::Debug,
    };
    let decorator = slog_term::PlainSyncDecorator::new(io::stderr());
    let drain = slog_term::FullFormat::new(decorator)
        .build()
        .filter_level(level)
        .fuse();
    Logger::root(drain, o!())
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let logger = logger(args.verbose);

    let config = FilterConfig {
        relation: args.relation.clone(),
    };
    let filter = Filter::new(config).with_logger(logger.new(o!("component" => "resolver")));

    let translated = if args.strict {
        filter.parse(&args.expr)
    } else {
        filter.resolve(&args.expr)
    };
    let q = match translated {
        Ok(q) => q,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };
    info!(logger, "translated filter"; "predicate" => %q);

    if args.explain {
        println!("{}", q);
        return Ok(());
    }

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut matched = 0usize;

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("line {}: not a JSON record", n + 1))?;

        if eval(&logger, &q, &record) {
            matched += 1;
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        }
    }

    info!(logger, "done"; "matched" => matched);
    Ok(())
}
