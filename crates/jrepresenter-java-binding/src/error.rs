use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to render document: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendered source is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Core(#[from] jrepresenter_core::Error),
}
