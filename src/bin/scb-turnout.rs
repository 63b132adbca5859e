use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use scb_turnout::config::Settings;
use scb_turnout::report::ConsoleReport;
use scb_turnout::{Client, ElectionKind, pipeline, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scb-turnout",
    version,
    about = "Report the regions with the highest election turnout per year (SCB data)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch turnout, print the top region(s) per year, and optionally save them.
    Top(TopArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Election {
    Parliament,
    County,
    Municipal,
}

impl From<Election> for ElectionKind {
    fn from(e: Election) -> Self {
        match e {
            Election::Parliament => ElectionKind::Parliament,
            Election::County => ElectionKind::County,
            Election::Municipal => ElectionKind::Municipal,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct TopArgs {
    /// Which election's turnout to use.
    #[arg(short, long, value_enum, default_value_t = Election::Parliament)]
    election: Election,
    /// Raw ContentsCode (overrides --election).
    #[arg(long)]
    contents_code: Option<String>,
    /// Region name left out of the maximum (the nationwide total).
    #[arg(long)]
    exclude: Option<String>,
    /// API base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Table path below the base URL.
    #[arg(long)]
    table: Option<String>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Do not print the report to stdout.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl TopArgs {
    fn settings(&self) -> Settings {
        let mut s = Settings::default().with_election(self.election.into());
        if let Some(code) = &self.contents_code {
            s.contents_code = code.clone();
        }
        if let Some(name) = &self.exclude {
            s.excluded_region = name.clone();
        }
        if let Some(url) = &self.base_url {
            s.base_url = url.clone();
        }
        if let Some(table) = &self.table {
            s.table_path = table.clone();
        }
        s
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Top(args) => cmd_top(args),
    }
}

fn cmd_top(args: TopArgs) -> Result<()> {
    let settings = args.settings();
    info!("using {:?}", settings);
    let client = Client::new(&settings.base_url, &settings.table_path);

    let winners =
        pipeline::yearly_winners(&client, &settings.contents_code, &settings.excluded_region)?;

    if !args.quiet {
        print!("{}", ConsoleReport(&winners));
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&winners, path)?,
            "json" => storage::save_json(&winners, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} years to {}", winners.len(), path.display());
    }

    Ok(())
}
