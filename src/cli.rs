use crate::config::AppConfig;
use crate::costing::export::export_to_path;
use crate::costing::report::{Cell, ReportTable, RowKind, Table};
use crate::costing::{calculate_scenario, CostReport, Proposal, RaiseTiming, Scenario, StepLayout};
use crate::error::AppError;
use crate::server;
use crate::telemetry::{self, LogTarget};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets, Cell as TextCell, CellAlignment, Table as TextTable};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Contract Cost Calculator",
    about = "Project multi-year labor contract costs for union, management, and last-contract raises",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a JSON scenario and print the cost and step progression tables
    Calculate(CalculateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Scenario file (JSON) describing contract parameters and groups
    #[arg(long)]
    scenario: PathBuf,
    /// Append a grand-total section to the cost table
    #[arg(long)]
    grand_total: bool,
    /// Year that receives the first raise (first-year or second-year)
    #[arg(long, value_parser = parse_raise_timing)]
    raise_timing: Option<RaiseTiming>,
    /// Step rows carry a leading step-number column
    #[arg(long)]
    numbered_steps: bool,
    /// Write the selected table as CSV to this path
    #[arg(long)]
    csv_out: Option<PathBuf>,
    /// Table written by --csv-out (cost or steps)
    #[arg(long, value_parser = parse_report_table, default_value = "cost")]
    table: ReportTable,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
    }
}

fn parse_raise_timing(raw: &str) -> Result<RaiseTiming, String> {
    RaiseTiming::parse(raw).ok_or_else(|| format!("'{raw}' must be first-year or second-year"))
}

fn parse_report_table(raw: &str) -> Result<ReportTable, String> {
    ReportTable::parse(raw).ok_or_else(|| format!("'{raw}' must be cost or steps"))
}

fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogTarget::Stderr)?;

    let scenario = load_scenario(&args)?;
    let report = calculate_scenario(scenario, config.costing.report_defaults())?;

    render_report(&report);

    if let Some(path) = &args.csv_out {
        export_to_path(args.table.select(&report), path)?;
        info!(path = %path.display(), table = ?args.table, "exported report table");
        println!("\nWrote {}", path.display());
    }

    Ok(())
}

fn load_scenario(args: &CalculateArgs) -> Result<Scenario, AppError> {
    let raw = std::fs::read_to_string(&args.scenario)?;
    let mut scenario = Scenario::from_json(&raw)?;

    let base_dir = args.scenario.parent().unwrap_or_else(|| Path::new("."));
    scenario.load_step_files(base_dir)?;

    if args.grand_total {
        scenario.include_grand_total = Some(true);
    }
    if let Some(timing) = args.raise_timing {
        scenario.raise_timing = Some(timing);
    }
    if args.numbered_steps {
        scenario.step_layout = Some(StepLayout::Numbered);
    }

    Ok(scenario)
}

fn render_report(report: &CostReport) {
    println!("Contract cost projection ({} years)", report.years);

    println!("\nContract totals");
    for proposal in Proposal::ordered() {
        println!(
            "- {}: {:.2}",
            proposal.label(),
            report.grand_total.contract_total(proposal)
        );
    }

    let skipped: usize = report.groups.iter().map(|group| group.dropped_rows).sum();
    if skipped > 0 {
        println!("\nSkipped {skipped} malformed step rows");
    }

    println!("\nCost comparison");
    print!("{}", render_table(&report.cost_comparison));

    println!("\nStep progression");
    print!("{}", render_table(&report.step_progression));
}

/// Renders each section as its own block, money right-aligned.
pub(crate) fn render_table(table: &Table) -> String {
    let mut out = String::new();
    let mut block: Option<TextTable> = None;

    for row in &table.rows {
        match row.kind {
            RowKind::SectionHeader => {
                flush_block(&mut out, block.take());
                out.push_str(&format!("== {} ==\n", row.display_cells().join(" ")));
            }
            RowKind::ColumnHeader => {
                block
                    .get_or_insert_with(new_block)
                    .set_header(row.display_cells());
            }
            RowKind::Data => {
                let cells: Vec<TextCell> = row.cells.iter().map(text_cell).collect();
                block.get_or_insert_with(new_block).add_row(cells);
            }
        }
    }

    flush_block(&mut out, block);
    out
}

fn new_block() -> TextTable {
    let mut block = TextTable::new();
    block.load_preset(presets::NOTHING);
    block
}

fn text_cell(cell: &Cell) -> TextCell {
    let text = TextCell::new(cell.display());
    if cell.as_money().is_some() {
        text.set_alignment(CellAlignment::Right)
    } else {
        text
    }
}

fn flush_block(out: &mut String, block: Option<TextTable>) {
    if let Some(block) = block {
        out.push_str(&block.to_string());
        out.push('\n');
    }
}
