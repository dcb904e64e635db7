use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load_or_default();
            let yaml = serde_yaml::to_string(&config)?;
            match Config::path() {
                Ok(path) => println!("{} {}", "Config file:".bold(), path.display()),
                Err(_) => println!("{}", "Config file: <unavailable>".bold()),
            }
            println!("{yaml}");
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!(
                "{} {key} = {value} ({})",
                "Saved".green().bold(),
                path.display()
            );
            Ok(())
        }
    }
}
