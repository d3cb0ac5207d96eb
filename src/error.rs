use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate.
///
/// Layout itself never fails: overflowing content turns pages, malformed rows
/// and undecodable images are skipped. Errors are reserved for setup problems
/// and for the output sink.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error(transparent)]
    /// An I/O error occurred while writing the output
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The report content feed was not valid JSON for a [Report](crate::Report)
    Json(#[from] serde_json::Error),

    #[error("invalid page geometry: {0}")]
    /// The page size or margins leave no paintable area
    InvalidGeometry(String),

    #[error("can't open {} for writing", .path.display())]
    /// The output sink could not be opened; nothing was produced
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a page in the page order is missing from the document")]
    /// A page id in the document's page order no longer resolves
    PageMissing,
}
