use super::SheetInput;
use anyhow::Result;
use clap::Args;
use propsheet::tui::{Theme, render_to_string};
use propsheet::{PropertySheetBuilder, tui::TuiToolkit};

#[derive(Args, Debug)]
pub struct ShowCommands {
    #[command(flatten)]
    pub input: SheetInput,

    /// Output width in columns
    #[arg(short, long, default_value_t = 60)]
    pub width: u16,
}

pub fn show_command(args: ShowCommands) -> Result<()> {
    let options = args.input.load_options()?;
    let localizer = args.input.load_localizer()?;
    let toolkit = TuiToolkit::new();

    let sheet = PropertySheetBuilder::new(&toolkit, &localizer).create_property_sheet(&options)?;
    args.input.apply_values(&options)?;

    println!("{}", render_to_string(&sheet, &Theme::default(), args.width));
    Ok(())
}
