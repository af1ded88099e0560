use thiserror::Error;

use crate::variants::StateName;

/// Errors raised while registering or resolving animation variants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariantError {
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("Variant {variant} has no {missing} state")]
    MissingState {
        variant: &'static str,
        missing: StateName,
    },

    #[error("Variant already registered: {0}")]
    Duplicate(&'static str),
}

/// Synchronous rejections of a contact form submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("A submission is already in flight")]
    AlreadySubmitting,
}

/// Top-level error for page composition, layout and configuration.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Layout failed: {0}")]
    Layout(String),

    #[error(transparent)]
    Variant(#[from] VariantError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Unknown node: {0}")]
    UnknownNode(usize),
}

impl From<taffy::TaffyError> for FolioError {
    fn from(err: taffy::TaffyError) -> Self {
        FolioError::Layout(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
