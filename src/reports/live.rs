//! In-place session screen drawn while the terminal is in raw mode.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};
use drillforge::engine::accuracy::StepMark;
use drillforge::engine::{InputOutcome, PracticeEngine};
use drillforge::error::{DrResult, DrillError};
use drillforge::keybinds::{KeybindTable, Role};
use drillforge::store::Store;
use std::io::{stdout, Stdout, Write};

pub struct LiveScreen {
    out: Stdout,
}

fn term_err(e: std::io::Error) -> DrillError {
    DrillError::Terminal(e.to_string())
}

impl LiveScreen {
    pub fn new() -> Self {
        Self { out: stdout() }
    }

    pub fn draw<S: Store>(
        &mut self,
        engine: &PracticeEngine<S>,
        outcome: Option<&InputOutcome>,
    ) -> DrResult<()> {
        self.render(engine, outcome).map_err(term_err)
    }

    fn render<S: Store>(
        &mut self,
        engine: &PracticeEngine<S>,
        outcome: Option<&InputOutcome>,
    ) -> std::io::Result<()> {
        let Some(sequence) = engine.selected() else {
            return Ok(());
        };
        let out = &mut self.out;

        queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        let status = match engine.mode() {
            Some(mode) => format!("armed, {}", mode),
            None => "stopped".to_string(),
        };
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("🎯 {} ", sequence.name)),
            ResetColor,
            Print(format!("({})", status))
        )?;

        // Current attempt first; fall back to the last completion's marks.
        let mut marks = engine.marks();
        if marks.iter().all(|m| m.input.is_none()) {
            if let Some(last) = engine.last_report() {
                marks = last.marks.clone();
            }
        }

        queue!(out, cursor::MoveTo(0, 2), Print("Sequence: "))?;
        for (i, step) in sequence.steps.iter().enumerate() {
            if i > 0 {
                queue!(out, Print(" > "))?;
            }
            queue!(out, SetForegroundColor(step_color(marks.get(i))), Print(step), ResetColor)?;
        }

        let inputs: Vec<&str> = marks.iter().filter_map(|m| m.input.as_deref()).collect();
        queue!(
            out,
            cursor::MoveTo(0, 3),
            Print(format!("Input:    {}", inputs.join(" > ")))
        )?;

        if let Some(report) = engine.last_report() {
            let (color, banner) = if report.is_perfect() {
                (Color::Green, "🎉")
            } else {
                (Color::Red, "❌")
            };
            let time = report
                .elapsed_sec()
                .map(|s| format!("{:.2}s", s))
                .unwrap_or_else(|| "-".to_string());
            queue!(
                out,
                cursor::MoveTo(0, 5),
                Print(format!("Completion Time: {}  Accuracy: {}%  ", time, report.accuracy)),
                SetForegroundColor(color),
                Print(format!("{} {}", banner, report.verdict())),
                ResetColor
            )?;
        }

        if let Some(d) = engine.derive(&sequence.name) {
            let best = d
                .best_time_sec
                .map(|s| format!("{:.2}s", s))
                .unwrap_or_else(|| "-".to_string());
            queue!(
                out,
                cursor::MoveTo(0, 7),
                Print(format!(
                    "Attempts {} | Avg {:.2}s | Avg Acc {}% | Perfect {} | Best {}",
                    d.attempts, d.avg_time_sec, d.avg_accuracy, d.perfect_attempts, best
                ))
            )?;
        }

        queue!(
            out,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::DarkGrey),
            Print(help_line(engine.catalog().keybinds())),
            ResetColor
        )?;

        if let Some(InputOutcome::Accepted { count, of }) = outcome {
            queue!(out, cursor::MoveTo(0, 11), Print(format!("{}/{}", count, of)))?;
        }

        out.flush()
    }

    /// Leaves the cursor below the drawn area so later output is readable.
    pub fn finish(&mut self) -> DrResult<()> {
        queue!(self.out, cursor::MoveTo(0, 12), Print("\n"))
            .and_then(|_| self.out.flush())
            .map_err(term_err)
    }
}

/// Key hints for the running session. The session ends once the engine goes
/// idle, so play keys only restart an attempt in progress.
fn help_line(keybinds: &KeybindTable) -> String {
    let key = |role: Role| match keybinds.get(role).map(|t| t.as_str()) {
        Some(" ") => "Space".to_string(),
        Some(t) => t.to_string(),
        None => "-".to_string(),
    };
    format!(
        "[{}] reset  [{}] restart  [{}] restart looping  [{}] end session  [Ctrl+C] quit",
        key(Role::Reset),
        key(Role::Play),
        key(Role::PlayLoop),
        key(Role::Stop)
    )
}

fn step_color(mark: Option<&StepMark>) -> Color {
    match mark {
        Some(m) if m.input.is_some() && m.correct => Color::Green,
        Some(m) if m.input.is_some() => Color::Red,
        _ => Color::Grey,
    }
}
