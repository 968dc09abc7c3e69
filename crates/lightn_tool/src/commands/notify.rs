use crate::{config::PipelineConfig, notify::notify_runtime};
use clap::Args;
use lightn_utils::{ok, AnyResult};

#[derive(Args)]
pub struct NotifyCommand {
    /// Message to send.
    pub message: String,
}

impl crate::Command for NotifyCommand {
    fn run(self, config: &PipelineConfig) -> AnyResult {
        // An unreachable runtime is only worth a warning
        notify_runtime(&config.runtime, &self.message);
        ok()
    }
}
