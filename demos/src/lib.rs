//! Command-line driver shared by the `gridpath` binary and its tests.
//!
//! Builds a grid from the built-in delivery district, a JSON layout file or
//! a random scatter, runs one search and prints the result.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use gridpath_core::{CellKind, Grid, Layout, Pos};
use gridpath_crossterm::{TerminalView, render_plain};
use gridpath_search::{NoObserver, Outcome, SearchReport, run_search};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Output format for the final report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "A* hop-count search on a square grid")]
pub struct Cli {
    /// Load the grid from a JSON layout file.
    #[arg(long, conflicts_with = "random")]
    pub layout: Option<PathBuf>,

    /// Scatter random barriers instead of using the built-in district.
    #[arg(long)]
    pub random: bool,

    /// Side length of a random grid.
    #[arg(long, default_value_t = 16)]
    pub size: i32,

    /// Barrier probability of a random grid.
    #[arg(long, default_value_t = 0.3)]
    pub density: f64,

    /// Seed for the random grid; drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as `row,col`; defaults to the layout's designated start.
    #[arg(long)]
    pub start: Option<Pos>,

    /// Goal cell as `row,col`; defaults to the layout's designated goal.
    #[arg(long)]
    pub goal: Option<Pos>,

    /// Redraw the grid after every expansion (q or Esc to stop).
    #[arg(long)]
    pub animate: bool,

    /// Pause between animation frames, in milliseconds.
    #[arg(long, default_value_t = 40)]
    pub delay_ms: u64,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Resolve the layout requested on the command line.
pub fn load_layout(cli: &Cli) -> Result<Layout> {
    if let Some(path) = &cli.layout {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout from {}", path.display()))?;
        let layout = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse layout in {}", path.display()))?;
        return Ok(layout);
    }
    if cli.random {
        let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("random layout seed {seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        return Ok(Layout::scatter(cli.size, cli.density, &mut rng));
    }
    Ok(Layout::delivery_district())
}

/// Build the grid and pick the endpoints, command-line overrides first.
///
/// An overridden endpoint is labelled on the grid when passable, and every
/// other cell of the same role goes back to `Normal`, so the picture shows
/// exactly the pair that was searched. Barriers are left for the search to
/// reject.
pub fn prepare(cli: &Cli, layout: &Layout) -> Result<(Grid, Pos, Pos)> {
    let mut grid = layout.build()?;
    if let Some(p) = cli.start {
        demote_others(&mut grid, &CellKind::Start, p)?;
        if grid.is_passable(p) {
            grid.mark_start(p)?;
        }
    }
    if let Some(p) = cli.goal {
        demote_others(&mut grid, &CellKind::Goal, p)?;
        if grid.is_passable(p) {
            grid.mark_goal(p)?;
        }
    }
    let start = match cli.start.or(grid.start()) {
        Some(p) => p,
        None => bail!("no start cell: pass --start row,col or list one in the layout"),
    };
    let goal = match cli.goal.or(grid.goal()) {
        Some(p) => p,
        None => bail!("no goal cell: pass --goal row,col or list one in the layout"),
    };
    Ok((grid, start, goal))
}

fn demote_others(grid: &mut Grid, kind: &CellKind, keep: Pos) -> Result<()> {
    let stale: Vec<Pos> = grid
        .positions()
        .filter(|&q| q != keep && grid.kind(q) == Some(kind))
        .collect();
    for q in stale {
        log::debug!("{q} is no longer a {kind:?}");
        grid.mark_normal(q)?;
    }
    Ok(())
}

/// Run one search as configured and write the report to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<SearchReport> {
    let layout = load_layout(cli)?;
    let (mut grid, start, goal) = prepare(cli, &layout)?;

    let report = if cli.animate {
        let mut view = TerminalView::stdout()
            .with_delay(Duration::from_millis(cli.delay_ms))
            .with_keys(true);
        view.enter().context("failed to set up the terminal")?;
        let report = run_search(&mut grid, start, goal, &mut view);
        view.leave();
        report?
    } else {
        run_search(&mut grid, start, goal, &mut NoObserver)?
    };

    match cli.format {
        Format::Text => write_text(out, &grid, start, goal, &report)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(report)
}

fn write_text(
    out: &mut impl Write,
    grid: &Grid,
    start: Pos,
    goal: Pos,
    report: &SearchReport,
) -> Result<()> {
    write!(out, "{}", render_plain(grid))?;
    writeln!(out, "search {start} -> {goal}")?;
    writeln!(out, "expanded {} cells", report.expansions.len())?;
    match &report.outcome {
        Outcome::Succeeded(path) => {
            writeln!(out, "path of {} hops:", path.hops())?;
            let route: Vec<String> = path.start_to_goal().iter().map(Pos::to_string).collect();
            writeln!(out, "  {}", route.join(" "))?;
        }
        Outcome::Failed => writeln!(out, "no path exists")?,
        Outcome::Cancelled => writeln!(out, "search cancelled")?,
    }
    Ok(())
}

/// Process exit status for a finished search: 0 on success, 2 when no path
/// exists, 130 when cancelled.
pub fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Succeeded(_) => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::from(2),
        Outcome::Cancelled => ExitCode::from(130),
    }
}
