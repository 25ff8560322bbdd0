//! grpusage - per-group resource usage report for the cluster.

mod logging;

use clap::Parser;
use grpusage_cli::{Args, DirectorySource, OutputFormat};
use grpusage_identity::{
    GetentDirectory, GroupMembershipProvider, IdGroupsProvider, IdentityDirectory, StaticDirectory,
};
use grpusage_report::{
    GroupReport, ReportError, ReportRequest, ReportSources, build_report, render_json,
    render_table,
};
use grpusage_slurm::SacctCommand;
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_level(), args.verbose);

    let request = args.report_request().into_diagnostic()?;
    tracing::info!(
        group = %request.group,
        quota = %request.quota_path,
        start = ?request.window.start,
        end = ?request.window.end,
        "building usage report"
    );

    let report = match args.directory_source() {
        DirectorySource::Getent => {
            run(GetentDirectory::default(), IdGroupsProvider::default(), &args, &request).await
        }
        DirectorySource::Files { passwd, group } => {
            let directory = StaticDirectory::from_files(&passwd, &group).into_diagnostic()?;
            run(directory.clone(), directory, &args, &request).await
        }
    }
    .inspect_err(|e| {
        if let Some(stage) = e.stage() {
            tracing::error!(%stage, "report aborted");
        }
    })
    .into_diagnostic()?;

    tracing::info!("{}", report.summary());
    if !report.warnings.is_empty() {
        tracing::warn!(
            "{} user(s) reported with incomplete data",
            report.warnings.len()
        );
    }

    let output = match args.format {
        OutputFormat::Table => render_table(&report.rows),
        OutputFormat::Json => render_json(&report.rows).into_diagnostic()?,
    };
    println!("{}", output);

    Ok(())
}

/// Build the report with the given identity adapters and real sacct.
async fn run<D, G>(
    directory: D,
    groups: G,
    args: &Args,
    request: &ReportRequest,
) -> std::result::Result<GroupReport, ReportError>
where
    D: IdentityDirectory + 'static,
    G: GroupMembershipProvider + 'static,
{
    let sources = Arc::new(ReportSources {
        directory,
        groups,
        accounting: SacctCommand::new(args.sacct.as_str()),
    });

    build_report(sources, request).await
}
