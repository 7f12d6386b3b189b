//! Command-line interface for rng2doc

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::io::Write;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use rng2doc::error::{EXIT_INVOCATION, EXIT_SUCCESS};
#[cfg(feature = "cli")]
use rng2doc::{render, Config, DiagramMode, DocumentationBuilder, Loader, Location, OutputFormat, Result};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "rng2doc")]
#[command(author, version, about = "Converts a RELAX NG schema into documentation", long_about = None)]
struct Cli {
    /// Raise verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output file (defaults to stdout; HTML goes to ./html/index.html)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format: xml, html or json
    #[arg(short, long, default_value = "xml")]
    format: String,

    /// Indent XML and JSON output
    #[arg(long)]
    pretty: bool,

    /// Report the time spent in each phase on stderr
    #[arg(long)]
    timing: bool,

    /// Check the structure of the grammar before documenting it
    #[arg(long)]
    validate: bool,

    /// Diagram detail for HTML output: full or simple
    #[arg(long, default_value = "full")]
    diagram: String,

    /// RELAX NG grammar in XML syntax
    #[arg(value_name = "RNGFILE")]
    rngfile: String,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_INVOCATION,
            };
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;
    let diagram_mode: DiagramMode = cli.diagram.parse()?;
    let location = Location::from_arg(&cli.rngfile)?;

    let mut config = Config::new(format)
        .with_diagram_mode(diagram_mode)
        .with_pretty(cli.pretty)
        .with_timing(cli.timing)
        .with_loader(Loader::new().with_validate(cli.validate));
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }

    let mut timer = PhaseTimer::new(config.timing);

    let grammar = config.loader.load(&location)?;
    timer.lap("load");

    let builder = DocumentationBuilder::new(&grammar);
    let documentation = builder.build();
    timer.lap("document");

    let rendered = render(&documentation, &grammar, builder.index(), &config)?;
    timer.lap("render");

    rendered.write()?;
    timer.lap("write");
    timer.total();

    Ok(())
}

/// Wall-clock time per phase, printed on stderr when enabled
#[cfg(feature = "cli")]
struct PhaseTimer {
    enabled: bool,
    start: Instant,
    last: Instant,
}

#[cfg(feature = "cli")]
impl PhaseTimer {
    fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            start: now,
            last: now,
        }
    }

    fn lap(&mut self, phase: &str) {
        let now = Instant::now();
        if self.enabled {
            report(phase, now - self.last);
        }
        self.last = now;
    }

    fn total(&self) {
        if self.enabled {
            report("total", self.start.elapsed());
        }
    }
}

#[cfg(feature = "cli")]
fn report(phase: &str, elapsed: Duration) {
    eprintln!("[timing] {:<8} {:>10.3} ms", phase, elapsed.as_secs_f64() * 1000.0);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
