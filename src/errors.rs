/*!
 * Error types for the subburn application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the external ASR/MT collaborators
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The collaborator call itself failed (process, file, network)
    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    /// The collaborator returned output that could not be reshaped into segments
    #[error("Malformed provider output: {0}")]
    MalformedOutput(String),

    /// The collaborator is not reachable or not configured
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Terminal per-job failures of the rendering pipeline.
///
/// Per-segment translation failures are absorbed with a sentinel caption and
/// never surface here; everything in this enum aborts the job.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing/corrupt source media or an empty caption track where one is required
    #[error("Input error: {0}")]
    Input(String),

    /// A frame could not be decoded or encoded; resuming mid-stream risks
    /// audio/video desync, so the whole job aborts
    #[error("Frame I/O error: {0}")]
    FrameIo(String),

    /// The ffmpeg/ffprobe invocation exited non-zero; diagnostic output is
    /// carried verbatim (after banner filtering)
    #[error("External process failed (exit status {status}): {detail}")]
    ExternalProcess {
        /// Exit status of the external tool, -1 if killed by a signal
        status: i32,
        /// Filtered stderr of the external tool
        detail: String,
    },
}

impl PipelineError {
    /// Machine-readable failure kind, stable across releases
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::FrameIo(_) => "frame-io",
            Self::ExternalProcess { .. } => "external-process",
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an ASR/MT provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Terminal pipeline failure
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
