//! # greeting-image-mcp-inference
//!
//! Text-to-image generation for the Greeting/Image MCP Server.
//!
//! This crate provides:
//! - The [`TextToImageBackend`] seam and an HTTP implementation for the
//!   Hugging Face inference router
//! - Normalization of every upstream response shape into raw image bytes
//! - The [`ImageGenerator`] that turns a prompt into annotated tool output
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on greeting-image-mcp-core
//! for settings and the output model.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod client;
pub mod error;
pub mod generator;
pub mod mock;
pub mod payload;

// Re-export commonly used types
pub use backend::{TextToImageBackend, TextToImageRequest, UpstreamResponse};
pub use client::HfRouterClient;
pub use error::{InferenceError, Result};
pub use generator::{error_output, GeneratedImage, ImageGenerator};
pub use mock::MockBackend;
pub use payload::{decode, decode_base64, encode_base64, ImagePayload};
