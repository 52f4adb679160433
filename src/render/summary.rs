use super::{Heading, RenderOptions};
use crate::model::ContributionReport;
use crate::util::pluralize;
use console::Style;

pub fn render_summary(report: &ContributionReport, heading: &Heading, opts: &RenderOptions) -> String {
    let info = Style::new()
        .color256(opts.palette.info)
        .bold()
        .force_styling(opts.color);
    let s = &report.summary;

    let mut out = format!(
        "{}@{}\n",
        info.apply_to(&heading.who),
        info.apply_to(&heading.period)
    );

    let rows = [
        ("Total contributions", s.total_commits.to_string()),
        ("Longest Streak", pluralize(s.longest_streak, "day")),
        ("Current Streak", pluralize(s.current_streak, "day")),
        ("Most Contributions in a Day", s.max_commits_in_day.to_string()),
        ("Lines changed", format!("+{} / -{}", s.lines_added, s.lines_removed)),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{}: {}\n", info.apply_to(label), value));
    }

    if report.is_empty() {
        out.push_str("No commits found in this window\n");
    }
    out
}
