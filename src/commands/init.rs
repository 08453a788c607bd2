use crate::config::PresetLevel;
use crate::io;
use anyhow::Result;
use std::path::Path;

/// Pure function: the document `init` writes for a preset
pub fn render_config(preset: PresetLevel) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&preset.to_config())?;
    json.push('\n');
    Ok(json)
}

pub fn init_config(path: &Path, preset: PresetLevel, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    io::write_file(path, &render_config(preset)?)?;
    println!("Created {} ({:?} preset)", path.display(), preset);

    Ok(())
}
