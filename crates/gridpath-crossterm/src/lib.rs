//! Crossterm terminal viewer for gridpath.
//!
//! Provides a [`TerminalView`] that implements
//! [`gridpath_search::StepObserver`], redrawing the grid after every
//! expansion, plus [`render_plain`] for uncoloured snapshots.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{Cell, CellKind, CellState, Grid};
use gridpath_search::{Step, StepObserver};

const WHITE: CtColor = CtColor::Rgb { r: 255, g: 255, b: 255 };
const BLACK: CtColor = CtColor::Rgb { r: 0, g: 0, b: 0 };
const ORANGE: CtColor = CtColor::Rgb { r: 255, g: 165, b: 0 };
const TURQUOISE: CtColor = CtColor::Rgb { r: 64, g: 224, b: 208 };
const GREY: CtColor = CtColor::Rgb { r: 128, g: 128, b: 128 };
const GREEN: CtColor = CtColor::Rgb { r: 0, g: 255, b: 0 };
const RED: CtColor = CtColor::Rgb { r: 255, g: 0, b: 0 };
const PURPLE: CtColor = CtColor::Rgb { r: 128, g: 0, b: 128 };

/// Maps a cell to its display colour.
///
/// Barrier, start and goal always show their kind; other cells show their
/// search state once they have one.
fn to_ct_color(cell: &Cell) -> CtColor {
    match (&cell.kind, cell.state) {
        (CellKind::Barrier, _) => BLACK,
        (CellKind::Start, _) => ORANGE,
        (CellKind::Goal, _) => TURQUOISE,
        (_, CellState::Open) => GREEN,
        (_, CellState::Closed) => RED,
        (_, CellState::OnPath) => PURPLE,
        (CellKind::Auxiliary(_), CellState::Unvisited) => GREY,
        (CellKind::Normal, CellState::Unvisited) => WHITE,
    }
}

/// Maps a cell to a single ASCII glyph, with the same precedence as the
/// colour mapping.
fn to_glyph(cell: &Cell) -> char {
    match (&cell.kind, cell.state) {
        (CellKind::Barrier, _) => '#',
        (CellKind::Start, _) => 'S',
        (CellKind::Goal, _) => 'G',
        (_, CellState::Open) => 'o',
        (_, CellState::Closed) => 'x',
        (_, CellState::OnPath) => '*',
        (CellKind::Auxiliary(_), CellState::Unvisited) => 'A',
        (CellKind::Normal, CellState::Unvisited) => '.',
    }
}

/// Render the grid as text, one line per row.
pub fn render_plain(grid: &Grid) -> String {
    let n = grid.size() as usize;
    let mut out = String::with_capacity(grid.len() + n);
    for (p, cell) in grid.iter() {
        out.push(to_glyph(cell));
        if p.col as usize == n - 1 {
            out.push('\n');
        }
    }
    out
}

/// A terminal viewer that redraws the grid after each search step.
pub struct TerminalView<W: Write> {
    out: W,
    delay: Duration,
    keys_enabled: bool,
    active: bool,
}

impl TerminalView<io::Stdout> {
    /// A viewer drawing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    /// Create a viewer drawing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            delay: Duration::ZERO,
            keys_enabled: false,
            active: false,
        }
    }

    /// Pause for `delay` after every redraw.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Configure whether `q`/`Esc` cancel the search between steps. Needs a
    /// real terminal, since it switches to raw mode.
    pub fn with_keys(mut self, enabled: bool) -> Self {
        self.keys_enabled = enabled;
        self
    }

    /// Switch to the alternate screen.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.keys_enabled {
            terminal::enable_raw_mode()?;
        }
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn leave(&mut self) {
        if !self.active {
            return;
        }
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        if self.keys_enabled {
            let _ = terminal::disable_raw_mode();
        }
        self.active = false;
    }

    /// Draw every cell, two columns wide, from the top-left corner.
    pub fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        let n = grid.size();
        for (p, cell) in grid.iter() {
            queue!(
                self.out,
                SetBackgroundColor(to_ct_color(cell)),
                Print("  ")
            )?;
            if p.col == n - 1 {
                queue!(self.out, ResetColor, Print("\r\n"))?;
            }
        }
        self.out.flush()
    }

    /// Give back the underlying writer.
    pub fn into_inner(mut self) -> W
    where
        W: Default,
    {
        self.leave();
        std::mem::take(&mut self.out)
    }

    fn quit_requested(&self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }) = event::read()?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<W: Write> StepObserver for TerminalView<W> {
    fn on_step(&mut self, step: &Step, grid: &Grid) -> ControlFlow<()> {
        if let Err(e) = self.draw(grid) {
            log::warn!("redraw failed at step {}: {e}", step.index);
            return ControlFlow::Break(());
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if self.keys_enabled {
            match self.quit_requested() {
                Ok(true) => return ControlFlow::Break(()),
                Ok(false) => {}
                Err(e) => log::warn!("key poll failed: {e}"),
            }
        }
        ControlFlow::Continue(())
    }
}

impl<W: Write> Drop for TerminalView<W> {
    fn drop(&mut self) {
        self.leave();
    }
}
