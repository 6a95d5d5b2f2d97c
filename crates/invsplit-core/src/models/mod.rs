//! Data models shared by the pipeline and its front ends.

pub mod config;
pub mod fields;
pub mod report;

pub use config::{
    ArchiveConfig, ClientStrategy, ExtractionConfig, MissingFieldPolicy, NamingConfig,
    SpacePolicy, SplitterConfig,
};
pub use fields::{ExtractedFields, Field, NO_DATE, UNKNOWN_CLIENT, UNKNOWN_INVOICE};
pub use report::{PageReport, PageStatus, SplitReport};
