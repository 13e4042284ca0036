use super::SheetInput;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use propsheet::PropertySheetBuilder;
use propsheet::tui::TuiToolkit;

#[derive(Args, Debug)]
pub struct CheckCommands {
    #[command(flatten)]
    pub input: SheetInput,
}

/// Returns false when the sheet holds validation errors
pub fn check_command(args: CheckCommands) -> Result<bool> {
    let options = args.input.load_options()?;
    let localizer = args.input.load_localizer()?;
    let toolkit = TuiToolkit::new();

    let sheet = PropertySheetBuilder::new(&toolkit, &localizer).create_property_sheet(&options)?;
    args.input.apply_values(&options)?;

    let errors = sheet.validation_errors().snapshot();
    if errors.is_empty() {
        println!("{} {} options valid", "✓".green(), options.len());
        return Ok(true);
    }

    for (id, message) in &errors {
        println!("{} {}: {}", "✗".bright_red().bold(), id.as_str().bold(), message.red());
    }
    println!("\n{}", format!("{} of {} options invalid", errors.len(), options.len()).yellow());
    Ok(false)
}
