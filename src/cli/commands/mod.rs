pub mod check;
pub mod edit;
pub mod show;

pub use check::{CheckCommands, check_command};
pub use edit::{EditCommands, edit_command};
pub use show::{ShowCommands, show_command};

use anyhow::{Context, Result};
use clap::Args;
use propsheet::config::{SheetDefinition, apply_values, load_values};
use propsheet::{BundleLocalizer, ObservableOption};
use std::path::PathBuf;

/// Inputs shared by every command
#[derive(Args, Debug)]
pub struct SheetInput {
    /// Sheet definition file
    pub sheet: PathBuf,

    /// Locale file with labels
    #[arg(short, long)]
    pub locale: Option<PathBuf>,

    /// Values file applied after the sheet is built
    #[arg(long)]
    pub values: Option<PathBuf>,
}

impl SheetInput {
    pub fn load_options(&self) -> Result<Vec<ObservableOption>> {
        let definition = SheetDefinition::load(&self.sheet)?;
        definition
            .instantiate()
            .with_context(|| format!("Failed to create options from {}", self.sheet.display()))
    }

    pub fn load_localizer(&self) -> Result<BundleLocalizer> {
        match &self.locale {
            Some(path) => BundleLocalizer::load(path),
            None => Ok(BundleLocalizer::new()),
        }
    }

    /// Apply the values file, if any, to options already bound to a sheet
    pub fn apply_values(&self, options: &[ObservableOption]) -> Result<()> {
        if let Some(path) = &self.values {
            let table = load_values(path)?;
            apply_values(&table, options)
                .with_context(|| format!("Failed to apply values from {}", path.display()))?;
        }
        Ok(())
    }
}
