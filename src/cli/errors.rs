use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid map size: {value}. Expected per-axis extents such as 8x8 or 4x4x4")]
    InvalidMapSize { value: String },

    #[error("Invalid radius: {value}. Expected per-axis radii such as 3x3")]
    InvalidRadius { value: String },

    #[error("Invalid init vector: {value}. Expected comma-separated numbers such as 0.5,0.5,0.5")]
    InvalidInitVector { value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SOM error: {0}")]
    Som(#[from] sompro::Error),
}
