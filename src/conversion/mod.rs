//! Conversion between relay prompts and Messages API payloads

pub mod request_builder;
pub mod response_extractor;
