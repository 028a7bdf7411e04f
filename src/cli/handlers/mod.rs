mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc, Weekday};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::history_io::{read_history, write_history};
use crate::io::project_io::{self, ProjectPaths};
use crate::io::settings_io::{load_settings, read_settings, set_setting, write_settings};
use crate::io::store::DirStore;
use crate::model::{ColorTag, SlotId, parse_weekday};
use crate::ops::apply::EditTarget;
use crate::ops::calendar::{MAX_GRID_ROWS, YearMonth, month_weeks};
use crate::ops::config_panel::{ConfigField, ConfigSession};
use crate::ops::resolve::resolve_day_schedule;
use crate::ops::workspace::Workspace;
use crate::util::markup::plain_to_markup;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let project_dir = cli.project_dir.as_deref();

    match cli.command {
        None => Err("no command given (try `bathsched --help`)".into()),
        Some(cmd) => match cmd {
            // Init is normally handled in main.rs before project discovery
            Commands::Init(args) => cmd_init(args, project_dir),

            // Read commands
            Commands::Show(args) => cmd_show(project_dir, args, json),
            Commands::Check(args) => cmd_check(project_dir, args, json),

            // Edit commands
            Commands::Day(args) => cmd_day(project_dir, args, json),
            Commands::Week(args) => cmd_week(project_dir, args, json),
            Commands::Master(args) => cmd_master(project_dir, args, json),
            Commands::Residents(args) => cmd_residents(project_dir, args, json),
            Commands::Undo => cmd_undo(project_dir, true),
            Commands::Redo => cmd_undo(project_dir, false),

            // Backup
            Commands::Export(args) => cmd_export(project_dir, args),
            Commands::Import(args) => cmd_import(project_dir, args),

            // Labels and settings
            Commands::Label(args) => cmd_label(project_dir, args, json),
            Commands::Settings(args) => cmd_settings(project_dir, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Find the project from `-C` or the current directory
pub fn find_project(project_dir: Option<&str>) -> Result<ProjectPaths, Box<dyn std::error::Error>> {
    let start = match project_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    Ok(project_io::discover_project(&start)?)
}

/// Open the project's workspace, continuing the persisted undo history if there is one
pub fn open_workspace(
    project_dir: Option<&str>,
) -> Result<(ProjectPaths, Workspace<DirStore>), Box<dyn std::error::Error>> {
    let paths = find_project(project_dir)?;
    let settings = load_settings(&paths.data_dir)?;
    let mut ws = Workspace::open(DirStore::new(paths.data_dir.clone()), settings, today());
    if let Some(history) = read_history(&paths.data_dir, ws.settings().history.limit) {
        ws.adopt_history(history);
    }
    Ok((paths, ws))
}

fn save_history(paths: &ProjectPaths, ws: &Workspace<DirStore>) -> CmdResult {
    write_history(&paths.data_dir, ws.history())?;
    Ok(())
}

fn parse_month(arg: Option<&str>) -> Result<YearMonth, String> {
    match arg {
        None => Ok(YearMonth::of(today())),
        Some(s) => {
            YearMonth::parse(s).ok_or_else(|| format!("invalid month '{}': expected YYYY-MM", s))
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}': expected YYYY-MM-DD", s))
}

fn parse_slot_arg(s: &str) -> Result<SlotId, String> {
    SlotId::parse_slot(s)
        .ok_or_else(|| format!("invalid slot '{}': expected upper, middle, lower or 1-3", s))
}

fn parse_weekday_arg(s: &str) -> Result<Weekday, String> {
    parse_weekday(s).ok_or_else(|| format!("invalid weekday '{}': expected 0-6 or a day name", s))
}

fn parse_color_arg(s: Option<&str>) -> Result<Option<ColorTag>, String> {
    s.map(|s| {
        ColorTag::parse_color(s).ok_or_else(|| {
            let names: Vec<&str> = ColorTag::ALL.iter().map(|c| c.as_str()).collect();
            format!("invalid color '{}': expected one of {}", s, names.join(", "))
        })
    })
    .transpose()
}

/// Command-line text as edit-box text: a literal `\n` is a line break
fn cli_text(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(project_dir: Option<&str>, args: MonthArg, json: bool) -> CmdResult {
    let (_, ws) = open_workspace(project_dir)?;
    let month = parse_month(args.month.as_deref())?;
    if json {
        print_json(&month_json(ws.board(), month))
    } else {
        print!("{}", format_month_text(ws.board(), month));
        Ok(())
    }
}

fn cmd_check(project_dir: Option<&str>, args: MonthArg, json: bool) -> CmdResult {
    let (_, ws) = open_workspace(project_dir)?;
    let month = parse_month(args.month.as_deref())?;
    let reports = ws.check(month);
    if json {
        print_json(&CheckJson {
            month: month.to_string(),
            weeks: &reports,
        })
    } else {
        print!("{}", format_check_text(month, &reports));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Edit commands
// ---------------------------------------------------------------------------

/// Run one edit through an editor session and apply it
fn run_edit(
    ws: &mut Workspace<DirStore>,
    target: EditTarget,
    text: Option<&str>,
    color: Option<ColorTag>,
    propagate: bool,
) -> CmdResult {
    let mut session = ws.edit(target);
    if let Some(text) = text {
        session.input(plain_to_markup(&cli_text(text)), Instant::now());
    }
    if let Some(color) = color {
        session.set_color(color);
    }
    if propagate {
        session.toggle_propagate();
    }
    ws.apply_edit(&session.finish())?;
    Ok(())
}

fn cmd_day(project_dir: Option<&str>, args: DayArgs, json: bool) -> CmdResult {
    let date = parse_date(&args.date)?;
    let color = parse_color_arg(args.color.as_deref())?;
    let (paths, mut ws) = open_workspace(project_dir)?;

    let Some(slot_arg) = args.slot.as_deref() else {
        if args.text.is_some() || color.is_some() {
            return Err("a slot is required to edit a day".into());
        }
        let day = resolve_day_schedule(ws.layers(), date);
        if json {
            return print_json(&DayJson::new(date, &day));
        }
        print!("{}", format_day_text(date, &day));
        return Ok(());
    };
    let slot = parse_slot_arg(slot_arg)?;
    let target = EditTarget::Day { date, slot };

    if args.text.is_some() || color.is_some() {
        run_edit(&mut ws, target, args.text.as_deref(), color, false)?;
        save_history(&paths, &ws)?;
    }

    let current = target.resolve(ws.layers());
    if json {
        print_json(&SlotJson::from(&current))
    } else {
        println!("{}: {}", target, slot_summary(&current));
        Ok(())
    }
}

fn cmd_week(project_dir: Option<&str>, args: WeekArgs, json: bool) -> CmdResult {
    let month = parse_month(Some(&args.month))?;
    let color = parse_color_arg(args.color.as_deref())?;
    let weeks = month_weeks(month);
    let week = args
        .row
        .checked_sub(1)
        .and_then(|i| weeks.get(i))
        .ok_or_else(|| format!("{} has weeks 1-{}", month, weeks.len()))?;
    let target = EditTarget::Week {
        sunday: week.sunday,
        week_index: week.index,
    };

    let (paths, mut ws) = open_workspace(project_dir)?;
    if args.text.is_some() || color.is_some() || args.propagate {
        run_edit(&mut ws, target, args.text.as_deref(), color, args.propagate)?;
        save_history(&paths, &ws)?;
    }

    let footer = footer_json(ws.layers(), week);
    if json {
        print_json(&footer)
    } else {
        let current = target.resolve(ws.layers());
        println!("{}: {} ({})", target, slot_summary(&current), footer.source);
        Ok(())
    }
}

fn cmd_master(project_dir: Option<&str>, args: MasterCmd, json: bool) -> CmdResult {
    let (paths, mut ws) = open_workspace(project_dir)?;
    let action = args.action.unwrap_or(MasterAction::Show);

    let mut config = ws.open_config();
    let field = match action {
        MasterAction::Show => {
            let master = &ws.layers().master_schedule;
            if json {
                return print_json(&master_json(master));
            }
            print!("{}", format_master_text(master));
            return Ok(());
        }
        MasterAction::Set(a) => {
            let field = ConfigField::Slot {
                weekday: parse_weekday_arg(&a.weekday)?,
                slot: parse_slot_arg(&a.slot)?,
            };
            edit_field(&mut config, field, a.text.as_deref(), a.color.as_deref())?;
            field
        }
        MasterAction::Footer(a) => {
            if a.row == 0 || a.row > MAX_GRID_ROWS {
                return Err(format!("week row must be 1-{}", MAX_GRID_ROWS).into());
            }
            let field = ConfigField::Footer { row: a.row - 1 };
            edit_field(&mut config, field, a.text.as_deref(), a.color.as_deref())?;
            field
        }
        MasterAction::DefaultFooter(a) => {
            let field = ConfigField::DefaultFooter;
            edit_field(&mut config, field, a.text.as_deref(), a.color.as_deref())?;
            field
        }
        MasterAction::Append(a) => {
            let name = a.name.trim();
            if name.is_empty() {
                return Err("resident name cannot be empty".into());
            }
            let field = ConfigField::Slot {
                weekday: parse_weekday_arg(&a.weekday)?,
                slot: parse_slot_arg(&a.slot)?,
            };
            config.append_resident(field, name);
            field
        }
    };

    let value = config.field(field).cloned();
    ws.save_config(config)?;
    save_history(&paths, &ws)?;

    match value {
        Some(slot) if json => print_json(&SlotJson::from(&slot)),
        Some(slot) => {
            println!("{}: {}", field, slot_summary(&slot));
            Ok(())
        }
        None => Ok(()),
    }
}

fn edit_field(
    config: &mut ConfigSession,
    field: ConfigField,
    text: Option<&str>,
    color: Option<&str>,
) -> CmdResult {
    let color = parse_color_arg(color)?;
    if text.is_none() && color.is_none() {
        return Err("nothing to change: give text and/or --color".into());
    }
    if let Some(text) = text {
        config.edit_text(field, &cli_text(text));
        config.blur();
    }
    if let Some(color) = color {
        config.set_color(field, color);
    }
    Ok(())
}

fn cmd_residents(project_dir: Option<&str>, args: ResidentsCmd, json: bool) -> CmdResult {
    let (paths, mut ws) = open_workspace(project_dir)?;
    let action = args.action.unwrap_or(ResidentsAction::List);

    let mut config = ws.open_config();
    match action {
        ResidentsAction::List => {
            let names: Vec<&str> = ws.residents().iter().collect();
            if json {
                return print_json(&names);
            }
            if names.is_empty() {
                println!("no residents");
            }
            for name in names {
                println!("{}", name);
            }
            return Ok(());
        }
        ResidentsAction::Add(a) => {
            for name in &a.names {
                if !config.add_resident(name) {
                    println!("skipped '{}' (blank or already listed)", name.trim());
                }
            }
        }
        ResidentsAction::Rm(a) => {
            for name in &a.names {
                if !config.remove_resident(name.trim()) {
                    println!("not listed: {}", name.trim());
                }
            }
        }
    }

    ws.save_config(config)?;
    save_history(&paths, &ws)?;
    println!("{} residents", ws.residents().len());
    Ok(())
}

fn cmd_undo(project_dir: Option<&str>, undo: bool) -> CmdResult {
    let (paths, mut ws) = open_workspace(project_dir)?;
    let moved = if undo { ws.undo()? } else { ws.redo()? };
    if !moved {
        println!("nothing to {}", if undo { "undo" } else { "redo" });
        return Ok(());
    }
    save_history(&paths, &ws)?;
    println!(
        "{} ({}/{})",
        if undo { "undone" } else { "redone" },
        ws.history().cursor() + 1,
        ws.history().len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

fn cmd_export(project_dir: Option<&str>, args: ExportArgs) -> CmdResult {
    let (_, ws) = open_workspace(project_dir)?;
    let doc = ws.export(Utc::now());
    let content = doc.to_json()?;

    let Some(output) = args.output else {
        println!("{}", content);
        return Ok(());
    };
    let path: PathBuf = if output.is_dir() {
        output.join(doc.file_name())
    } else {
        output
    };
    std::fs::write(&path, content)
        .map_err(|e| format!("could not write {}: {}", path.display(), e))?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(project_dir: Option<&str>, args: ImportArgs) -> CmdResult {
    let json = read_file(&args.file)?;
    let (paths, mut ws) = open_workspace(project_dir)?;
    let summary = ws.import_json(&json)?;
    save_history(&paths, &ws)?;

    if summary.replaced.is_empty() {
        println!("nothing to import");
    } else {
        let keys: Vec<&str> = summary.replaced.iter().map(|k| k.as_str()).collect();
        println!("imported {}", keys.join(", "));
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("could not read {}: {}", path.display(), e))
}

// ---------------------------------------------------------------------------
// Labels and settings
// ---------------------------------------------------------------------------

fn cmd_label(project_dir: Option<&str>, args: LabelCmd, json: bool) -> CmdResult {
    let (_, mut ws) = open_workspace(project_dir)?;
    match args.action {
        None => {
            let board = ws.board();
            if json {
                return print_json(&serde_json::json!({
                    "facility": board.facility_name,
                    "updated": board.update_label,
                }));
            }
            println!("facility: {}", board.facility_name);
            println!("updated:  {}", board.update_label);
        }
        Some(LabelAction::Updated { text }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err("label cannot be empty".into());
            }
            ws.set_update_label(text)?;
            println!("updated: {}", text);
        }
        Some(LabelAction::Facility { name }) => {
            let name = name.trim();
            if name.is_empty() {
                return Err("facility name cannot be empty".into());
            }
            ws.set_facility_name(name)?;
            println!("facility: {}", name);
        }
    }
    Ok(())
}

fn cmd_settings(project_dir: Option<&str>, args: SettingsCmd) -> CmdResult {
    let paths = find_project(project_dir)?;
    match args.action {
        SettingsAction::Show => {
            let settings = load_settings(&paths.data_dir)?;
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        SettingsAction::Set { key, value } => {
            let (_, mut doc) = read_settings(&paths.data_dir)?;
            set_setting(&mut doc, &key, &value)?;
            write_settings(&paths.data_dir, &doc)?;
            println!("{} = {}", key, value.trim());
        }
    }
    Ok(())
}
