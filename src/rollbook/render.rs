use colored::*;
use rollbook::api::{CmdMessage, MessageLevel};
use rollbook::model::Record;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const NAME_HEADER: &str = "Name";
const ROLL_HEADER: &str = "Roll Number";
const GRADE_HEADER: &str = "Grade";

// Minimum column widths, matching the classic layout
const MIN_NAME_WIDTH: usize = 20;
const MIN_ROLL_WIDTH: usize = 12;
const MIN_GRADE_WIDTH: usize = 10;

pub fn write_messages(out: &mut impl Write, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn write_records(out: &mut impl Write, records: &[Record]) -> io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    write!(out, "{}", render_table(records))
}

/// Bordered table, one row per record, columns sized to the widest cell.
pub fn render_table(records: &[Record]) -> String {
    let roll_strings: Vec<String> = records.iter().map(|r| r.roll().to_string()).collect();

    let name_w = column_width(MIN_NAME_WIDTH, records.iter().map(|r| r.name()));
    let roll_w = column_width(MIN_ROLL_WIDTH, roll_strings.iter().map(String::as_str));
    let grade_w = column_width(MIN_GRADE_WIDTH, records.iter().map(|r| r.grade()));

    let border = format!(
        "+{}+{}+{}+\n",
        "-".repeat(name_w + 2),
        "-".repeat(roll_w + 2),
        "-".repeat(grade_w + 2)
    );

    let mut table = String::new();
    table.push_str(&border);
    table.push_str(&row(
        [NAME_HEADER, ROLL_HEADER, GRADE_HEADER],
        [name_w, roll_w, grade_w],
    ));
    table.push_str(&border);
    for (record, roll) in records.iter().zip(&roll_strings) {
        table.push_str(&row(
            [record.name(), roll, record.grade()],
            [name_w, roll_w, grade_w],
        ));
    }
    table.push_str(&border);
    table
}

fn column_width<'a>(min: usize, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|c| c.width()).fold(min, usize::max)
}

fn row(cells: [&str; 3], widths: [usize; 3]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        // format! pads by char count, not display width
        let pad = width.saturating_sub(cell.width());
        line.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
    }
    line.push('\n');
    line
}
