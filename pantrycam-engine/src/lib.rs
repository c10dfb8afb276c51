pub mod backoff;
pub mod encoder;
pub mod health;
pub mod pipeline;
pub mod session;
pub mod traits;

pub use pipeline::{EngineError, PipelineController};
pub use session::{BusyFlag, PipelineError, PipelineState};
pub use traits::{HttpTransport, OutputSurface, ReqwestTransport};
