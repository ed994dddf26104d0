use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures inside a single field extractor.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `content="..."` match carried no delimiter to split label from value.
    #[error("specification marker {marker:?} does not contain the delimiter {delimiter:?}")]
    MalformedSpecMarker { marker: String, delimiter: char },

    /// Crumb markup yielded zero anchors, so there is no root crumb to drop.
    #[error("crumb markup contains no anchor elements")]
    EmptyCrumbTrail,
}

/// Failures that abort an entire normalization pass. Row-level variants
/// identify the failing operation and data row while preserving the cause.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("data read error: {path}")]
    RowRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing crumb (row {row})")]
    Crumb {
        row: usize,
        #[source]
        source: ParseError,
    },

    #[error("error parsing specifications (row {row})")]
    Specs {
        row: usize,
        #[source]
        source: ParseError,
    },
}
