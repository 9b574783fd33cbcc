use thiserror::Error;

/// All errors that the crate can generate. Layout runs themselves never fail;
/// these only arise while setting up fonts and the layout worker.
#[derive(Error, Debug)]
pub enum TagWallError {
    #[error(transparent)]
    /// An I/O error occurred, typically while spawning the layout worker
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("the layout worker has shut down")]
    /// A relayout was requested after the layout worker stopped
    SchedulerClosed,
}
