//! Fetch a pretrained model file from an ordered list of mirrors.

pub mod asset;
pub mod config;
pub mod console;
pub mod fetcher;
pub mod inspect;
pub mod logging;
pub mod progress;
pub mod storage;
pub mod transfer;

pub use asset::ModelAsset;
pub use fetcher::{FetchOutcome, ModelFetcher};
