use crate::core::{config::HubConfig, error::Result, print_key_value, print_section_header};

/// Print the effective configuration and where it lives.
pub fn execute_config() -> Result<()> {
    let path = HubConfig::config_path()?;
    let config = HubConfig::load_or_create()?;

    print_section_header("Configuration");
    print_key_value("File", &path.display().to_string());
    println!("\n{}\n", serde_json::to_string_pretty(&config)?);
    Ok(())
}
