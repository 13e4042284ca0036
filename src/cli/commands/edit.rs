use super::SheetInput;
use anyhow::Result;
use clap::Args;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use propsheet::config::export_values;
use propsheet::tui::{SheetView, Theme, ThemeVariant, TuiToolkit};
use propsheet::{PropertySheet, PropertySheetBuilder};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

#[derive(Args, Debug)]
pub struct EditCommands {
    #[command(flatten)]
    pub input: SheetInput,

    #[arg(long, value_enum, default_value_t = ThemeVariant::Mocha)]
    pub theme: ThemeVariant,
}

enum Outcome {
    Saved,
    Cancelled,
}

pub fn edit_command(args: EditCommands) -> Result<()> {
    let options = args.input.load_options()?;
    let localizer = args.input.load_localizer()?;
    let toolkit = TuiToolkit::new();

    let sheet = PropertySheetBuilder::new(&toolkit, &localizer).create_property_sheet(&options)?;
    args.input.apply_values(&options)?;
    let theme = Theme::new(args.theme);
    let title = format!(" {} ", args.input.sheet.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_editor(&mut terminal, &sheet, &toolkit, &theme, &title);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result? {
        Outcome::Saved => {
            let values = export_values(sheet.options())?;
            print!("{}", toml::to_string(&values)?);
        }
        Outcome::Cancelled => eprintln!("Edit cancelled, nothing written"),
    }
    Ok(())
}

fn run_editor<B: Backend>(
    terminal: &mut Terminal<B>,
    sheet: &PropertySheet,
    toolkit: &TuiToolkit,
    theme: &Theme,
    title: &str,
) -> Result<Outcome> {
    sheet.request_focus();
    let mut status: Option<String> = None;

    loop {
        terminal.draw(|frame| draw(frame, sheet, toolkit, theme, title, status.as_deref()))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => {
                let errors = sheet.validation_errors().len();
                if errors == 0 {
                    log::info!("Saving sheet values");
                    return Ok(Outcome::Saved);
                }
                status = Some(format!("Cannot save: {} invalid field(s)", errors));
            }
            KeyCode::Char('d') if ctrl => {
                sheet.set_disabled(!sheet.is_disabled());
                status = sheet.is_disabled().then(|| "Sheet locked".to_string());
            }
            KeyCode::Esc => {
                if !toolkit.handle_key(key) {
                    return Ok(Outcome::Cancelled);
                }
            }
            _ => {
                if !toolkit.handle_key(key) {
                    log::debug!("Unhandled key {:?}", key.code);
                }
                status = None;
            }
        }
    }
}

fn draw(frame: &mut Frame, sheet: &PropertySheet, toolkit: &TuiToolkit, theme: &Theme, title: &str, status: Option<&str>) {
    let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title);
    let inner = block.inner(body);
    frame.render_widget(block, body);
    frame.render_widget(SheetView::new(sheet, theme).toolkit(toolkit), inner);

    let hints = Span::styled(
        "Tab/Shift+Tab move  Space/Enter toggle or open  Ctrl+D lock  Ctrl+S save  Esc quit",
        theme.hint_style(),
    );
    let line = match status {
        Some(status) => Line::from(vec![Span::styled(status, theme.message_style()), Span::raw("  "), hints]),
        None => Line::from(hints),
    };
    frame.render_widget(Paragraph::new(line), footer);
}
