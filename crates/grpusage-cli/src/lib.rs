//! CLI argument parsing for grpusage.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use grpusage_parsers::parse_report_date;
use grpusage_quota::{DEFAULT_QUOTA_ROOT, quota_report_path};
use grpusage_report::{DEFAULT_CONCURRENCY, ReportRequest};
use grpusage_slurm::{DEFAULT_SACCT, UsageWindow};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "grpusage")]
#[command(about = "Generate a cluster resource usage report for a group")]
pub struct Args {
    /// Name of group to create report for
    pub groupname: String,

    /// Beginning of report period, formatted as YYYY-MM-DD
    #[arg(short = 'S', long = "start")]
    pub start: Option<String>,

    /// End of report period, formatted as YYYY-MM-DD
    #[arg(short = 'E', long = "end")]
    pub end: Option<String>,

    /// Directory holding <group>-quota-report.txt files
    #[arg(long, env = "GRPUSAGE_QUOTA_ROOT", default_value = DEFAULT_QUOTA_ROOT)]
    pub quota_root: Utf8PathBuf,

    /// Path to the sacct binary
    #[arg(long, env = "GRPUSAGE_SACCT", default_value = DEFAULT_SACCT)]
    pub sacct: String,

    /// Number of users resolved concurrently
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub jobs: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Read accounts from a passwd-format file instead of getent
    #[arg(long, requires = "group_file")]
    pub passwd_file: Option<Utf8PathBuf>,

    /// Read groups from a group-format file instead of getent
    #[arg(long, requires = "passwd_file")]
    pub group_file: Option<Utf8PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("{0}")]
    InvalidDate(String),
    #[error("Start date {start} is after end date {end}")]
    InvertedWindow { start: String, end: String },
    #[error("--jobs must be at least 1")]
    ZeroJobs,
}

/// Where identity records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    Getent,
    Files {
        passwd: Utf8PathBuf,
        group: Utf8PathBuf,
    },
}

impl Args {
    /// Validate arguments and derive the report request.
    ///
    /// Dates are only checked; the strings are passed to sacct unchanged.
    pub fn report_request(&self) -> Result<ReportRequest, ArgsError> {
        let start = self.start.as_deref().map(checked_date).transpose()?;
        let end = self.end.as_deref().map(checked_date).transpose()?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ArgsError::InvertedWindow {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }

        if self.jobs == 0 {
            return Err(ArgsError::ZeroJobs);
        }

        Ok(ReportRequest {
            group: self.groupname.clone(),
            quota_path: quota_report_path(&self.quota_root, &self.groupname),
            window: UsageWindow::new(self.start.clone(), self.end.clone()),
            concurrency: self.jobs,
        })
    }

    pub fn directory_source(&self) -> DirectorySource {
        match (&self.passwd_file, &self.group_file) {
            (Some(passwd), Some(group)) => DirectorySource::Files {
                passwd: passwd.clone(),
                group: group.clone(),
            },
            _ => DirectorySource::Getent,
        }
    }

    /// Log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn checked_date(s: &str) -> Result<NaiveDate, ArgsError> {
    parse_report_date(s).map_err(ArgsError::InvalidDate)
}
