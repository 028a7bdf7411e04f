use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::project_io;
use crate::model::FacilitySettings;

pub fn cmd_init(args: InitArgs, project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match project_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let name = match args.name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        Some(_) => return Err("facility name cannot be empty".into()),
        None => FacilitySettings::default().name,
    };

    let paths = project_io::init_project(&root, &name)?;
    println!("initialized schedule for \"{}\" in {}", name, paths.data_dir.display());
    Ok(())
}
