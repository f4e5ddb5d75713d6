use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings file: {}", settings_path().display());
    println!("  keywords:   {}", settings.keyword_file);
    println!("  template:   {}", settings.template_file);
    println!("  output-dir: {}", settings.output_dir);
    Ok(())
}

pub fn set(
    keywords: Option<String>,
    template: Option<String>,
    output_dir: Option<String>,
) -> Result<()> {
    if keywords.is_none() && template.is_none() && output_dir.is_none() {
        println!("Nothing to change. Pass --keywords, --template or --output-dir.");
        return Ok(());
    }
    let settings = load_settings().with_overrides(keywords, template, output_dir);
    save_settings(&settings)?;
    println!("Saved {}", settings_path().display());
    Ok(())
}
