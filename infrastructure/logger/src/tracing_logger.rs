use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// Forwards domain log messages to `tracing` under the `image_gateway` target.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "image_gateway", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "image_gateway", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "image_gateway", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "image_gateway", "{}", message);
    }
}
