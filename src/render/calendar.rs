use super::levels::ShadeLevels;
use super::RenderOptions;
use crate::model::ContributionReport;
use crate::util::week_start;
use chrono::{Datelike, Days, NaiveDate};
use console::Style;

const LABEL_WIDTH: usize = 4;
const CELL_WIDTH: usize = 2;
const SHADES: [&str; 5] = ["  ", "░░", "▒▒", "▓▓", "██"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Seven rows (Sunday first) by one column per week, preceded by month
/// labels and followed by a legend. Days outside the report are blank.
pub fn render_calendar(report: &ContributionReport, opts: &RenderOptions) -> String {
    let grid_start = week_start(report.window.start);
    let weeks = ((report.window.end - grid_start).num_days() / 7 + 1) as usize;
    let levels = ShadeLevels::from_counts(
        report.days.iter().map(|d| d.commit_count),
        &opts.percentiles,
    );

    let mut out = month_header(grid_start, report.window.start, weeks);
    out.push('\n');

    for weekday in 0..7u64 {
        let label = match weekday {
            1 => "Mon",
            3 => "Wed",
            5 => "Fri",
            _ => "   ",
        };
        out.push_str(label);
        out.push(' ');
        for week in 0..weeks as u64 {
            let day = grid_start
                .checked_add_days(Days::new(week * 7 + weekday))
                .and_then(|date| report.day(date));
            match day {
                Some(day) => out.push_str(&shade(levels.level(day.commit_count), opts)),
                None => out.push_str(SHADES[0]),
            }
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&legend(opts));
    out.push('\n');
    out
}

fn month_header(grid_start: NaiveDate, first_day: NaiveDate, weeks: usize) -> String {
    let mut marks: Vec<(usize, u32)> = Vec::new();
    for week in 0..weeks {
        let Some(sunday) = grid_start.checked_add_days(Days::new(week as u64 * 7)) else {
            break;
        };
        let month = sunday.max(first_day).month0();
        if marks.last().map_or(true, |&(_, m)| m != month) {
            marks.push((week, month));
        }
    }

    // a leading partial month too narrow for its label gives way to the next
    if marks.len() > 1 && marks[1].0 - marks[0].0 < 2 {
        marks.remove(0);
    }

    let width = LABEL_WIDTH + weeks * CELL_WIDTH;
    let mut header = " ".repeat(LABEL_WIDTH);
    for (week, month) in marks {
        let col = LABEL_WIDTH + week * CELL_WIDTH;
        let name = MONTHS[month as usize];
        if header.len() > col || col + name.len() > width {
            continue;
        }
        header.push_str(&" ".repeat(col - header.len()));
        header.push_str(name);
    }
    header
}

fn shade(level: usize, opts: &RenderOptions) -> String {
    if level == 0 {
        return SHADES[0].to_string();
    }
    Style::new()
        .color256(opts.palette.levels[level - 1])
        .force_styling(opts.color)
        .apply_to(SHADES[level])
        .to_string()
}

fn legend(opts: &RenderOptions) -> String {
    let shades: Vec<String> = (1..SHADES.len()).map(|level| shade(level, opts)).collect();
    format!("Less {} More", shades.join(" "))
}
