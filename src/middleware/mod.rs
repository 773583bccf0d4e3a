pub mod request_id;

pub use request_id::{CorrelationId, RequestId, RequestIdExt, RequestIdService};
