use anyhow::Result;
use calendario_core::config::CalendarioConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CalendarioConfig) -> Result<()> {
    let path = CalendarioConfig::config_path()?;

    println!("{}", format!("# {}", path.display()).dimmed());
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
