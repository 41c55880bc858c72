pub mod live;

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use drillforge::engine::attempt::AttemptReport;
use drillforge::keybinds::{KeybindTable, Role};
use drillforge::sequences::SequenceBook;
use drillforge::stats::DisplayStats;
use strum::IntoEnumIterator;

fn secs(v: Option<f64>) -> String {
    v.map(|s| format!("{:.2}s", s)).unwrap_or_else(|| "-".to_string())
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_stats_table(rows: &[(String, DisplayStats)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Sequence").add_attribute(Attribute::Bold),
        Cell::new("Attempts"),
        Cell::new("Avg Time"),
        Cell::new("Avg Acc"),
        Cell::new("Perfect").fg(Color::Green),
        Cell::new("Avg Perfect"),
        Cell::new("Best").fg(Color::Cyan),
    ]);
    right_align(&mut table, 1..=6);

    for (name, d) in rows {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(d.attempts),
            Cell::new(format!("{:.2}s", d.avg_time_sec)),
            Cell::new(format!("{}%", d.avg_accuracy)),
            Cell::new(d.perfect_attempts).fg(Color::Green),
            Cell::new(secs(d.avg_perfect_time_sec)),
            Cell::new(secs(d.best_time_sec)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_sequences(book: &SequenceBook) {
    if book.is_empty() {
        println!("You have no recorded sequences.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Sequence").add_attribute(Attribute::Bold),
        Cell::new("Steps"),
        Cell::new("Len"),
    ]);
    right_align(&mut table, 2..=2);

    for seq in book.iter() {
        table.add_row(vec![
            Cell::new(&seq.name).add_attribute(Attribute::Bold),
            Cell::new(seq.steps.join(" > ")),
            Cell::new(seq.len()),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_keybinds(keybinds: &KeybindTable) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Role").add_attribute(Attribute::Bold),
        Cell::new("Bound To"),
    ]);

    for role in Role::iter() {
        let bound = keybinds.get(role).map(|t| t.to_string());
        let cell = match bound {
            Some(t) => Cell::new(t),
            None => Cell::new("(unbound)").fg(Color::DarkGrey),
        };
        let role_cell = if role.is_control() {
            Cell::new(role).fg(Color::Yellow)
        } else {
            Cell::new(role)
        };
        table.add_row(vec![role_cell, cell]);
    }

    let ignored: Vec<String> = keybinds.ignored().map(|t| t.to_string()).collect();
    table.add_row(vec![
        Cell::new("ignored").fg(Color::DarkGrey),
        Cell::new(ignored.join(", ")),
    ]);
    println!("\n{}", table);

    for (token, roles) in keybinds.conflicts() {
        let names: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        println!("⚠️  '{}' is bound to several roles: {}", token, names.join(", "));
    }
}

pub fn print_report(report: &AttemptReport) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Expected").add_attribute(Attribute::Bold),
        Cell::new("Input"),
    ]);

    for (i, mark) in report.marks.iter().enumerate() {
        let color = if mark.correct { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&mark.expected),
            Cell::new(mark.input.as_deref().unwrap_or("-")).fg(color),
        ]);
    }
    println!("\n{}", table);

    let icon = if report.is_perfect() { "🎉" } else { "❌" };
    println!(
        "{} {}  Completion Time: {}  Accuracy: {}%",
        icon,
        report.verdict(),
        secs(report.elapsed_sec()),
        report.accuracy
    );
}
