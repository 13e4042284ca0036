//! Terminal front end: widgets, focus handling and rendering

pub mod render;
pub mod theme;
pub mod toolkit;
pub mod widgets;

pub use render::{SheetView, buffer_lines, render_to_string};
pub use theme::{Theme, ThemeVariant};
pub use toolkit::{TuiHandle, TuiToolkit};
