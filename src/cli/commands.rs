use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bathsched", about = concat!("bathsched v", env!("CARGO_PKG_VERSION"), " - monthly bathing schedules for care facilities"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different project directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a schedule in the current directory
    Init(InitArgs),
    /// Show the resolved calendar for a month
    Show(MonthArg),
    /// Show or edit one day
    Day(DayArgs),
    /// Show or edit a week footer
    Week(WeekArgs),
    /// View or edit the weekly master pattern
    Master(MasterCmd),
    /// Manage the resident list
    Residents(ResidentsCmd),
    /// Report residents scheduled too rarely in any week of a month
    Check(MonthArg),
    /// Undo the last schedule change
    Undo,
    /// Redo the last undone schedule change
    Redo,
    /// Write a backup of everything as JSON
    Export(ExportArgs),
    /// Restore from a backup
    Import(ImportArgs),
    /// Show or set the sheet labels
    Label(LabelCmd),
    /// Edit bathsched.toml
    Settings(SettingsCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Facility name (default: "2F South Wing")
    #[arg(long)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MonthArg {
    /// Month as YYYY-MM (default: current month)
    pub month: Option<String>,
}

// ---------------------------------------------------------------------------
// Edit command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DayArgs {
    /// Date as YYYY-MM-DD
    pub date: String,
    /// Slot to edit: upper/middle/lower or 1-3
    pub slot: Option<String>,
    /// New content; use "\n" or <br> for line breaks
    pub text: Option<String>,
    /// Background color (pink, blue, yellow, white, gray)
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct WeekArgs {
    /// Month as YYYY-MM
    pub month: String,
    /// Week row within the month, starting at 1
    pub row: usize,
    /// New footer content
    pub text: Option<String>,
    /// Background color
    #[arg(long)]
    pub color: Option<String>,
    /// Also make this the default footer for this row in every month
    #[arg(long)]
    pub propagate: bool,
}

#[derive(Args)]
pub struct MasterCmd {
    #[command(subcommand)]
    pub action: Option<MasterAction>,
}

#[derive(Subcommand)]
pub enum MasterAction {
    /// Print the weekly pattern and footers
    Show,
    /// Set a weekday slot
    Set(MasterSetArgs),
    /// Set the recurring footer for a week row
    Footer(MasterFooterArgs),
    /// Set the footer used when a row has none
    DefaultFooter(MasterDefaultFooterArgs),
    /// Append a resident's name to a weekday slot
    Append(MasterAppendArgs),
}

#[derive(Args)]
pub struct MasterSetArgs {
    /// Weekday: 0-6 (0 = Sunday) or a day name
    pub weekday: String,
    /// Slot: upper/middle/lower or 1-3
    pub slot: String,
    /// Content; omit to keep the current text
    pub text: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct MasterFooterArgs {
    /// Week row, starting at 1
    pub row: u8,
    pub text: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct MasterDefaultFooterArgs {
    pub text: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct MasterAppendArgs {
    pub weekday: String,
    pub slot: String,
    /// Resident name
    pub name: String,
}

#[derive(Args)]
pub struct ResidentsCmd {
    #[command(subcommand)]
    pub action: Option<ResidentsAction>,
}

#[derive(Subcommand)]
pub enum ResidentsAction {
    /// List residents
    List,
    /// Add one or more residents
    Add(ResidentNamesArgs),
    /// Remove residents
    Rm(ResidentNamesArgs),
}

#[derive(Args)]
pub struct ResidentNamesArgs {
    #[arg(required = true)]
    pub names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Backup args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Backup file to read
    pub file: PathBuf,
}

// ---------------------------------------------------------------------------
// Labels and settings
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LabelCmd {
    #[command(subcommand)]
    pub action: Option<LabelAction>,
}

#[derive(Subcommand)]
pub enum LabelAction {
    /// Set the "updated on" label
    Updated { text: String },
    /// Set the facility name
    Facility { name: String },
}

#[derive(Args)]
pub struct SettingsCmd {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Set a key such as history.limit or editor.debounce_ms
    Set { key: String, value: String },
}
