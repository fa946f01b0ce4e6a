//! Sync command - reconcile the feature files with the directory.

use std::path::PathBuf;

use clap::Args;
use console::style;
use sitesync::config::{ConfigError, ConfigFile, ConfigKey};
use sitesync::directory::ReqwestDirectoryClient;
use sitesync::logging::init_logging;
use sitesync::source::{SpatialSource, Tier};
use sitesync::sync::{SyncReport, SyncRunner};
use sitesync::SyncError;

use crate::error::CliError;

/// Arguments for the sync command.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Directory collection URL
    #[arg(long)]
    pub url: Option<String>,

    /// Basic auth user
    #[arg(long)]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long)]
    pub password: Option<String>,

    /// Site (facility) GeoJSON file
    #[arg(long)]
    pub sites: Option<PathBuf>,

    /// Level GeoJSON file
    #[arg(long)]
    pub levels: Option<PathBuf>,

    /// Unit GeoJSON file
    #[arg(long)]
    pub units: Option<PathBuf>,

    /// Path placed above every site
    #[arg(long)]
    pub root_prefix: Option<String>,

    /// Separator between path segments
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Maximum number of directory nodes fetched per tier
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Always create nodes, even when one with the same path exists
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Decide and log every change without writing to the directory
    #[arg(long)]
    pub dry_run: bool,

    /// Also write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log every record decision
    #[arg(short, long)]
    pub verbose: bool,
}

impl SyncArgs {
    /// Applies CLI overrides on top of the config file.
    fn apply(&self, config: &mut ConfigFile) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            config.directory.url = url.clone();
        }
        if let Some(username) = &self.username {
            config.directory.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.directory.password = password.clone();
        }
        if let Some(max) = self.max_records {
            ConfigKey::DirectoryMaxRecords.set(config, &max.to_string())?;
        }
        if let Some(path) = &self.sites {
            config.source.sites = Some(path.clone());
        }
        if let Some(path) = &self.levels {
            config.source.levels = Some(path.clone());
        }
        if let Some(path) = &self.units {
            config.source.units = Some(path.clone());
        }
        if let Some(prefix) = &self.root_prefix {
            config.sync.root_prefix = prefix.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            ConfigKey::SyncDelimiter.set(config, delimiter)?;
        }
        if self.keep_duplicates {
            config.sync.keep_duplicates = true;
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
        Ok(())
    }
}

/// Run the sync command.
pub fn run(args: SyncArgs) -> Result<(), CliError> {
    let mut config = ConfigFile::load()?;
    args.apply(&mut config)?;

    let _logging = init_logging(config.logging.file.as_deref(), args.verbose)
        .map_err(CliError::Logging)?;

    let directory = config.directory_config().map_err(SyncError::from)?;
    let options = config.sync_options().with_dry_run(args.dry_run);
    let source = config.geojson_source();

    println!("SiteSync v{}", sitesync::VERSION);
    println!("==============");
    println!();
    println!("Directory: {}", directory.base_url);
    for tier in Tier::ALL {
        println!("Source:    {}", source.describe(tier));
    }
    if !options.root_prefix.is_empty() {
        println!("Root:      {}", options.root_prefix);
    }
    if options.keep_duplicates {
        println!("Mode:      keep duplicates (create only)");
    }
    if options.dry_run {
        println!("Mode:      dry run (no changes written)");
    }
    println!();

    let client = ReqwestDirectoryClient::new(directory).map_err(SyncError::Client)?;
    let report = SyncRunner::new(source, client, options).run()?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &SyncReport) {
    println!();
    if report.dry_run {
        println!("{}", style("Sync Plan (dry run)").bold());
    } else {
        println!("{}", style("Sync Summary").bold());
    }
    println!("───────────────");
    for tier in &report.tiers {
        println!(
            "  {:<6} {} created, {} updated, {} warnings",
            tier.tier.to_string(),
            tier.created(),
            tier.updated(),
            tier.warnings().count()
        );
    }

    let warnings = report.total_warnings();
    if warnings > 0 {
        println!();
        println!(
            "{} {} records synced without their parent:",
            style("warning:").yellow().bold(),
            warnings
        );
        for warning in report.tiers.iter().flat_map(|t| t.warnings()) {
            println!("  {}", warning);
        }
    }
}
