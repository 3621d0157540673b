mod pipeline;
#[cfg(test)]
mod tests;

pub use pipeline::{PipelineConfig, ScreeningPipeline};
