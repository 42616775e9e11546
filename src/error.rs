use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read scene file {}", path.display())]
    SceneRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse scene")]
    SceneParse(#[from] serde_json::Error),
    #[error("unable to write image {}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unable to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid render options: {0}")]
    InvalidOptions(String),
}
