use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Config;
use crate::error::Result;
use crate::query::SortColumn;
use crate::types::{AlertType, Selection, SendedFilter, TimeWindow, Version};

#[derive(Parser)]
#[command(name = "alertdesk")]
#[command(about = "Browse backend alerts and trigger processing and dispatch")]
#[command(version)]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file and ALERTDESK_URL
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List alerts matching the filters, one page at a time
    #[command(visible_alias = "ls")]
    List {
        /// Version: 1, 2 or all
        #[arg(long, default_value = "1", value_parser = parse_version)]
        version: Selection<Version>,

        /// Type: alta, media, baja or all
        #[arg(short = 't', long = "type", default_value = "all", value_parser = parse_alert_type)]
        alert_type: Selection<AlertType>,

        /// Sent status: si, no or todos
        #[arg(short, long, default_value = "todos", value_parser = parse_sended)]
        sended: SendedFilter,

        /// Column to sort by: datetime, value, version, type, sended
        #[arg(long, value_parser = parse_sort_column)]
        sort: Option<SortColumn>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page to show (1-based, clamped into range)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reprocess recent measurements into alerts
    Process {
        /// Version: 1 or 2 (all is rejected)
        #[arg(long, default_value = "1", value_parser = parse_version)]
        version: Selection<Version>,

        /// Look-back window, e.g. 90m, 12h, 30d (default: from config)
        #[arg(short, long, value_parser = parse_window)]
        window: Option<TimeWindow>,

        /// Schedule the run in the background and print its job id
        #[arg(long = "async")]
        background: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dispatch pending alerts of one version and type
    Send {
        /// Version: 1 or 2
        #[arg(long, value_parser = parse_version)]
        version: Selection<Version>,

        /// Type: alta, media or baja
        #[arg(short = 't', long = "type", value_parser = parse_alert_type)]
        alert_type: Selection<AlertType>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the status of a background processing job
    Job {
        /// Job id printed by `process --async`
        job_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Config file, environment, then `--url`
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(url) = &self.url {
            config.set_base_url(url.trim());
        }
        Ok(config)
    }

    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> Result<()> {
        use crate::commands::{ListOptions, cmd_job, cmd_list, cmd_process, cmd_send};

        if let Commands::Completions { shell } = &self.command {
            generate_completions(*shell);
            return Ok(());
        }

        let config = self.load_config()?;

        match self.command {
            Commands::List {
                version,
                alert_type,
                sended,
                sort,
                desc,
                page,
                json,
            } => {
                cmd_list(
                    &config,
                    ListOptions {
                        version,
                        alert_type,
                        sended,
                        sort,
                        descending: desc,
                        page,
                        json,
                    },
                )
                .await
            }

            Commands::Process {
                version,
                window,
                background,
                json,
            } => cmd_process(&config, version, window, background, json).await,

            Commands::Send {
                version,
                alert_type,
                json,
            } => cmd_send(&config, version, alert_type, json).await,

            Commands::Job { job_id, json } => cmd_job(&config, &job_id, json).await,

            Commands::Completions { .. } => Ok(()),
        }
    }
}

fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> std::result::Result<T, String>
where
    F: FnOnce(&str) -> Result<T>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_version(s: &str) -> std::result::Result<Selection<Version>, String> {
    parse_with_validation(s, Selection::from_str, "version", &["1", "2", "all"])
}

fn parse_alert_type(s: &str) -> std::result::Result<Selection<AlertType>, String> {
    parse_with_validation(
        s,
        Selection::from_str,
        "type",
        &["alta", "media", "baja", "all"],
    )
}

fn parse_sended(s: &str) -> std::result::Result<SendedFilter, String> {
    parse_with_validation(s, SendedFilter::from_str, "sended", &["si", "no", "todos"])
}

fn parse_sort_column(s: &str) -> std::result::Result<SortColumn, String> {
    parse_with_validation(s, SortColumn::from_str, "sort column", SortColumn::ALL_STRINGS)
}

fn parse_window(s: &str) -> std::result::Result<TimeWindow, String> {
    TimeWindow::from_str(s).map_err(|e| e.to_string())
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "alertdesk", &mut io::stdout());
}
