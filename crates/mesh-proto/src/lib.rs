pub mod error;
pub mod node;
pub mod point;

pub use error::{PipelineError, ToolFailure, WriteFailure};
pub use node::{DeviceMetrics, NodeRecord, NodeTable, NormalizedNode, User};
pub use point::MetricPoint;
