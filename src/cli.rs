use crate::changes::{self, ReleaseNotesArgs};
use crate::common::CommonParams;
use crate::log_debug;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, crate_version};

const LOG_FILE: &str = "release-notes-debug.log";

/// CLI structure defining the release and global arguments
#[derive(Parser, Debug)]
#[command(
    name = "release-notes",
    author,
    version = crate_version!(),
    about = "Generate release notes and a changelog from merged pull requests",
    long_about = "Collects the pull requests merged between two Git references, groups them by their 'Type:' and 'Component:' labels and writes Markdown release notes and a changelog.",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    #[command(flatten)]
    pub release: ReleaseNotesArgs,

    #[command(flatten)]
    pub common: CommonParams,

    /// Log debug messages to a file
    #[arg(short = 'l', long = "log", help = "Log debug messages to a file")]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", help = "Specify a custom log file path")]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, success messages)
    #[arg(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.log || cli.log_file.is_some() {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;

        if let Ok(config) = crate::config::Config::load() {
            crate::logger::request_verbose_logging(config.verbose_logging);
        }
    } else {
        crate::logger::disable_logging();
    }

    // --print owns stdout
    if cli.quiet || cli.release.print {
        crate::ui::set_quiet_mode(true);
    }

    log_debug!(
        "Handling release notes with common: {:?}, version: {}, from: {:?}, to: {}, pr_file: {:?}",
        cli.common,
        cli.release.version,
        cli.release.from,
        cli.release.to,
        cli.release.pr_file
    );

    changes::handle_release_notes_command(cli.common, cli.release).await
}
