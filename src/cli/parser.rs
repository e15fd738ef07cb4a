use crate::core::Dimension;
use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line interface definition for kousu
/// CLI application to aggregate work hours from timesheet workbooks
#[derive(Parser)]
#[command(
    name = "kousu",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract, accumulate and summarize work hours from monthly timesheet workbooks",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or shared setups)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Workbooks to extract plus an optional previously exported dataset.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Timesheet workbooks (.xlsx, .xlsm, .xls, .ods)
    #[arg(value_name = "WORKBOOK")]
    pub files: Vec<PathBuf>,

    /// Previously exported CSV to accumulate onto
    #[arg(long, value_name = "CSV")]
    pub saved: Option<PathBuf>,
}

/// Filter overrides; an omitted dimension keeps its default selection.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long = "month", value_name = "YYYY_MM", help = "Keep only these months (repeatable)")]
    pub months: Vec<String>,

    #[arg(long = "staff", value_name = "ID", help = "Keep only these staff ids (repeatable)")]
    pub staff: Vec<String>,

    #[arg(long = "branch", value_name = "NAME", help = "Keep only these branches (repeatable)")]
    pub branches: Vec<String>,

    #[arg(
        long = "content",
        value_name = "LABEL",
        help = "Keep only these work-content classes (repeatable)"
    )]
    pub contents: Vec<String>,

    #[arg(
        long = "all-contents",
        conflicts_with = "contents",
        help = "Select every work-content class, including those without hours"
    )]
    pub all_contents: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SummaryView {
    /// Hours per work-content class with shares
    Content,
    Staff,
    Branch,
    Month,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init {
        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the merged and filtered dataset
    List {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the available filter values
    Facets {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Summarize hours of the filtered dataset
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, default_value = "content")]
        by: SummaryView,

        #[arg(
            long = "staff-of",
            value_name = "LABEL",
            help = "Hours per staff for one work-content class"
        )]
        staff_of: Option<String>,

        #[arg(
            long = "for-staff",
            value_name = "ID",
            help = "Hours per work-content class for one staff id"
        )]
        for_staff: Option<String>,

        #[arg(long, value_enum, help = "Cross-tabulate work content by this dimension")]
        cross: Option<Dimension>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Export the filtered dataset
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, value_enum, help = "Output format (default: from extension, else csv)")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE")]
        file: PathBuf,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },
}
