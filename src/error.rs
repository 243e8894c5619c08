//! Error taxonomy for a generation run.
//!
//! Configuration and connection failures are fatal and come with a hint telling
//! the operator how to fix their setup. Geometry invariant violations indicate a
//! programming error and are never retried.

use std::fmt;

#[derive(Debug)]
pub enum GenerationError {
    /// The operator has not designated a build area.
    NotConfigured(String),
    /// The world interface could not be reached.
    Connection(String),
    /// Invalid orientation tag, or a cross-structure relation that cannot hold.
    GeometryInvariant(String),
    /// The world interface answered, but with something we cannot use.
    Interface(String),
    Io(std::io::Error),
    Image(image::ImageError),
}

impl GenerationError {
    /// User-facing remediation hint for the fatal setup errors.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            GenerationError::NotConfigured(_) => Some(
                "Make sure to set the build area with the /setbuildarea command in-game.\n\
                 For example: /setbuildarea ~0 ~0 ~0 ~100 ~100 ~100",
            ),
            GenerationError::Connection(_) => Some(
                "You need a backend that provides the GDMC HTTP interface,\n\
                 for example Minecraft running with the GDMC HTTP mod installed.",
            ),
            _ => None,
        }
    }

    pub fn geometry(message: impl Into<String>) -> Self {
        GenerationError::GeometryInvariant(message.into())
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::NotConfigured(msg) => {
                write!(f, "Failed to get the build area: {msg}")
            }
            GenerationError::Connection(msg) => {
                write!(f, "Could not connect to the world interface: {msg}")
            }
            GenerationError::GeometryInvariant(msg) => write!(f, "Invalid geometry: {msg}"),
            GenerationError::Interface(msg) => write!(f, "World interface error: {msg}"),
            GenerationError::Io(err) => write!(f, "I/O error: {err}"),
            GenerationError::Image(err) => write!(f, "Failed to write overview image: {err}"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        GenerationError::Io(err)
    }
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        GenerationError::Image(err)
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Interface(format!("malformed JSON: {err}"))
    }
}
