use crate::config::{CONFIG_FILE_NAME, PostboardConfig};
use crate::error::PostboardError;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Err(
            PostboardError::AlreadyInitialized(config_path.display().to_string()).into(),
        );
    }

    let mut config = PostboardConfig::default();
    config.store.data_file = Some("postboard.json".into());
    config.save(&config_path)?;

    println!(
        "{} postboard project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    if let Some(data_file) = config.data_file(&cwd) {
        println!("  Data:   {}", data_file.display());
    }

    Ok(())
}
