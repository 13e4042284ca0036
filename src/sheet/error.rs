use thiserror::Error;

/// Fatal errors raised while building a property sheet
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The option variant has no editor; the whole sheet is rejected
    #[error("Can't create editor for object option '{id}'")]
    UnsupportedOption { id: String },
}
