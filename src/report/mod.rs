//! Report pipeline: metadata extraction, tree transforms, segmentation,
//! payload encoding, and assembly.

pub mod assemble;
pub mod encode;
pub mod meta;
pub mod rewrite;
pub mod segment;

/// A JSON object map for storing arbitrary report fields.
///
/// `serde_json` is built with `preserve_order`, so header keys survive in
/// declaration order all the way to the emitted JSON.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
