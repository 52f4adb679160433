use crate::config::Config;
use crate::contrib::{collect_report, ReportRequest};
use crate::error::GitfetchError;
use crate::git::GitRepo;
use crate::model::{AuthorFilter, ContributionReport, ReportOutput, SCHEMA_VERSION};
use crate::render::{render_report, to_json, to_ndjson, Heading, RenderOptions};
use crate::util::display_name;
use crate::window::{resolve_window, DateWindow};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{ArgAction, Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "gitfetch")]
#[command(about = "Fetch and display Git contribution information")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Only count commits whose author name or email contains this text")]
    pub author: Option<String>,

    #[arg(long, value_name = "DATE", help = "Start date (YYYY-MM-DD, RFC3339, or a duration such as 90d)")]
    pub since: Option<String>,

    #[arg(long, value_name = "DATE", help = "End date (YYYY-MM-DD, RFC3339, or a duration such as 90d)")]
    pub until: Option<String>,

    #[arg(long, conflicts_with_all = ["since", "until"], help = "Show a single calendar year")]
    pub year: Option<i32>,

    #[arg(long, value_name = "REPO", help = "Path to git repository (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    #[arg(long, help = "Include merge commits")]
    pub include_merges: bool,

    #[arg(long, conflicts_with = "ndjson", help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON, one day per line")]
    pub ndjson: bool,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto, value_name = "MODE", help = "Enable or disable colored output")]
    pub color: ColorMode,

    #[arg(long, value_name = "FILE", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "Enable verbose output (repeat for more)")]
    pub verbose: u8,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl Cli {
    pub fn parse() -> Self {
        let mut cli = <Self as Parser>::parse();

        // https://no-color.org/
        if std::env::var_os("NO_COLOR").is_some() {
            cli.color = ColorMode::Never;
        }
        cli
    }

    pub fn use_color(&self) -> bool {
        match self.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => console::colors_enabled(),
        }
    }

    pub fn use_color_stderr(&self) -> bool {
        match self.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => console::colors_enabled_stderr(),
        }
    }

    pub fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        let today = Local::now().date_naive();

        let window = resolve_window(
            self.since.as_deref(),
            self.until.as_deref(),
            self.year,
            today,
        )
        .context("Failed to resolve date range")?;

        let repo = GitRepo::open(self.path.as_ref()).context("Failed to open git repository")?;

        let author = self.author.clone().or_else(|| config.author.clone());
        let request = ReportRequest {
            window,
            author: author.as_deref().map(AuthorFilter::new),
            include_merges: self.include_merges || config.include_merges,
        };
        debug!("Collecting {:?}", request);

        let pb = self.progress_bar();
        let report = collect_report(&repo, &request, today, Local, &pb)
            .context("Failed to collect commits from repository")?;

        if self.json {
            self.output_json(&report, &repo, author)?;
        } else if self.ndjson {
            write_stdout(&to_ndjson(&report.days)?)?;
        } else {
            let heading = Heading {
                who: author.unwrap_or_else(|| display_name(repo.path())),
                period: self.period(&report.window, today),
            };
            let opts = RenderOptions::from_config(&config, self.use_color());
            write_stdout(&render_report(&report, &heading, &opts))?;
        }

        Ok(())
    }

    fn progress_bar(&self) -> ProgressBar {
        if self.json || self.ndjson || self.quiet || !console::Term::stderr().is_term() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    }

    fn period(&self, window: &DateWindow, today: NaiveDate) -> String {
        match self.year {
            Some(year) => year.to_string(),
            None if self.since.is_none() && self.until.is_none() && window.end == today => {
                "last year".to_string()
            }
            None => format!("{}..{}", window.start, window.end),
        }
    }

    fn output_json(
        &self,
        report: &ContributionReport,
        repo: &GitRepo,
        author: Option<String>,
    ) -> Result<()> {
        let output = ReportOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository_path: repo.path().to_string_lossy().to_string(),
            author,
            since: self.since.clone(),
            until: self.until.clone(),
            report: report.clone(),
        };
        write_stdout(&format!("{}\n", to_json(&output)?))
    }
}

/// Writes `text` to stdout, holding the lock for the whole report.
fn write_stdout(text: &str) -> Result<()> {
    let stdout = std::io::stdout();
    write_output(&mut stdout.lock(), text).context("Failed to write output")
}

fn write_output<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        // Ignore SIGPIPE errors, like those that can come from piping to `head`
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

/// Process exit code for a failed run: 2 for usage errors, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<GitfetchError>() {
        Some(e) if e.is_usage() => 2,
        _ => 1,
    }
}
