use anyhow::Result;

use super::Command;
use crate::config::DocsignConfig;

pub struct ConfigCommand;

impl Command for ConfigCommand {
    async fn execute(&self, config: &DocsignConfig) -> Result<()> {
        print!("{}", toml::to_string_pretty(config)?);
        Ok(())
    }
}
