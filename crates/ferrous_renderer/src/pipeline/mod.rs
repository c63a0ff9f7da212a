pub mod composite;
pub mod coverage;
pub mod layout;

pub use composite::CompositePipeline;
pub use coverage::CoveragePipeline;
pub use layout::PipelineLayouts;
