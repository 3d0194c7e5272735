//! tabletalk - Entry Point
//!
//! Loads a CSV file, then maps free-text commands ("show statistics",
//! "plot histogram") to data-exploration operations. Runs the commands given
//! with --command, or an interactive prompt when there are none.

use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use tabletalk::command::params::parse_assignment;
use tabletalk::command::{Outcome, ParamKey, SuppliedParams};
use tabletalk::core::config::{set_config, AssistantConfig};
use tabletalk::core::error::{AssistantError, Result};
use tabletalk::intent::builtin_table;
use tabletalk::session::{Interaction, Session};
use tabletalk::table::load_path;
use tabletalk::ui::prompt::collect_answers;
use tabletalk::ui::render::render_history;
use tabletalk::ui::{banner, render_outcome, Banner, RenderOptions};

/// Keyword-driven data exploration for CSV files
#[derive(Parser, Debug)]
#[command(name = "tabletalk")]
#[command(about = "Ask questions about a CSV file in plain words")]
struct Args {
    /// CSV file to load
    file: PathBuf,

    /// Command to run non-interactively (repeatable)
    #[arg(long, short = 'c')]
    command: Vec<String>,

    /// Parameter answer as KEY=VALUE, e.g. column=age (repeatable)
    #[arg(long, short = 'p', value_parser = parse_assignment)]
    param: Vec<(ParamKey, String)>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write charts into as PNG
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// Output format for --command runs: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "tabletalk=debug" } else { "tabletalk=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None => AssistantConfig::default(),
    };
    if set_config(config.clone()).is_err() {
        tracing::warn!("configuration was already initialized");
    }

    let color = !args.no_color && io::stdout().is_terminal();
    let opts = RenderOptions::from_config(&config, color);

    // A file that cannot be decoded ends this run; nothing else does
    let table = match load_path(&args.file, &config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", banner(Banner::Error, &e.to_string(), color));
            std::process::exit(1);
        }
    };
    println!(
        "{}",
        banner(
            Banner::Success,
            &format!(
                "File loaded successfully! Rows: {}, Columns: {}",
                table.row_count(),
                table.column_count()
            ),
            color,
        )
    );

    let mut session = Session::new(table, &config);
    let mut exporter = ChartExporter::new(args.plot_dir.clone(), &config);

    if args.command.is_empty() {
        run_interactive(&mut session, &opts, &mut exporter)?;
    } else {
        let mut params = SuppliedParams::new();
        for (key, value) in &args.param {
            params.set(*key, value.clone());
        }
        for command in &args.command {
            let interaction = session.run(command, &params);
            exporter.export(&interaction.outcome, color);
            if args.format == "json" {
                println!("{}", serde_json::to_string_pretty(&interaction)?);
            } else {
                print_interaction(&interaction, &opts);
                if matches!(interaction.outcome, Outcome::NeedsInput(_)) {
                    if params.is_empty() {
                        println!("Supply the missing values with --param KEY=VALUE.");
                    } else {
                        println!("Some --param values were missing or not valid choices.");
                    }
                }
            }
        }
    }

    Ok(())
}

/// Prompt loop: one command per line, parameters collected on demand
fn run_interactive(session: &mut Session, opts: &RenderOptions, exporter: &mut ChartExporter) -> Result<()> {
    println!();
    println!("Ask something about your data (e.g. 'show statistics', 'plot histogram').");
    println!("Type 'help' for example commands, 'history' for past commands, 'quit' to exit.");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        print!("\n> ");
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim();

        if command.is_empty() {
            continue;
        }
        if command == "quit" || command == "q" {
            break;
        }
        if command == "help" {
            print_help();
            continue;
        }
        if command == "history" {
            for line in render_history(session.log()) {
                println!("{}", line);
            }
            continue;
        }

        // Re-run from scratch until every required parameter is answered
        let mut params = SuppliedParams::new();
        loop {
            let interaction = session.run(command, &params);
            if let Outcome::NeedsInput(requests) = &interaction.outcome {
                println!("Detected intent: `{}`", interaction.intent);
                if !collect_answers(requests, &mut input, &mut stdout, &mut params)? {
                    return Ok(());
                }
                continue;
            }
            exporter.export(&interaction.outcome, opts.color);
            print_interaction(&interaction, opts);
            break;
        }
    }

    println!("\nGoodbye! {} command(s) answered.", session.log().len());
    Ok(())
}

fn print_interaction(interaction: &Interaction, opts: &RenderOptions) {
    println!("Detected intent: `{}`", interaction.intent);
    for line in render_outcome(&interaction.outcome, opts) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("Commands are matched by the phrases they contain:");
    for rule in builtin_table().rules() {
        println!("  {:<20} {}", rule.intent.name(), rule.phrases.join(" | "));
    }
}

/// Writes chart outcomes to numbered PNG files when a directory is set
struct ChartExporter {
    dir: Option<PathBuf>,
    width: u32,
    height: u32,
    written: usize,
}

impl ChartExporter {
    fn new(dir: Option<PathBuf>, config: &AssistantConfig) -> Self {
        Self {
            dir,
            width: config.png_width,
            height: config.png_height,
            written: 0,
        }
    }

    fn export(&mut self, outcome: &Outcome, color: bool) {
        let (Some(dir), Outcome::Chart(chart)) = (&self.dir, outcome) else {
            return;
        };
        self.written += 1;
        let path = chart_path(dir, chart.kind(), self.written);
        let result = std::fs::create_dir_all(dir)
            .map_err(AssistantError::from)
            .and_then(|_| tabletalk::chart::png::export(chart, &path, self.width, self.height));
        match result {
            Ok(()) => println!("{}", banner(Banner::Info, &format!("Chart saved to {}", path.display()), color)),
            Err(e) => println!("{}", banner(Banner::Warning, &format!("Could not save chart: {}", e), color)),
        }
    }
}

fn chart_path(dir: &Path, kind: &str, n: usize) -> PathBuf {
    dir.join(format!("{}-{:03}.png", kind, n))
}
