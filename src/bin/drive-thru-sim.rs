use drive_thru_sim::analysis::compare_scenarios;
use drive_thru_sim::config::{self, Command, FormatArg};
use drive_thru_sim::engine;
use drive_thru_sim::error::Result;
use drive_thru_sim::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing::Level;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => {
            let config = config::build_config(&args.scenario)?;
            let result = engine::run_simulation(&config)?;
            print!("{}", formatter_for(&args.format).write(&result));
        }
        Command::Compare(args) => {
            let (baseline, candidate) = config::build_comparison(&args)?;
            let comparison = compare_scenarios(&baseline, &candidate)?;
            print!("{}", formatter_for(&args.format).write_comparison(&comparison));
        }
        Command::ShowConfig(args) => {
            let config = config::build_config(&args)?;
            let mut out = String::new();
            output::write_config(&mut out, &config);
            print!("{}", out);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
