pub mod checkbox;
pub mod select;
pub mod text_input;

pub use checkbox::CheckboxState;
pub use select::SelectState;
pub use text_input::TextInputState;
