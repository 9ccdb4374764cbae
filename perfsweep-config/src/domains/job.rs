//! Load-generating job configuration

use crate::error::ConfigResult;
use crate::validation::{validate_placeholders, validate_positive, Validatable};
use perfsweep_core::placeholders;
use serde::{Deserialize, Serialize};

/// Messages the writer generates per run
pub const DEFAULT_MESSAGE_COUNT: u64 = 100_000;

/// How the job container's command is built
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Shell prefix; the rendered command template is appended as the last argument
    #[serde(default = "default_shell")]
    pub shell: Vec<String>,

    /// Command run inside the job container, with `{message_count}` and `{scenario_size}`
    #[serde(default = "default_command_template")]
    pub command_template: String,

    #[serde(default = "default_message_count")]
    pub message_count: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            command_template: default_command_template(),
            message_count: DEFAULT_MESSAGE_COUNT,
        }
    }
}

impl Validatable for JobConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        if self.shell.is_empty() {
            return Err(self.validation_error("shell cannot be empty"));
        }
        validate_positive(self.message_count, "message_count", domain)?;
        validate_placeholders(
            &self.command_template,
            &[
                placeholders::MESSAGE_COUNT,
                placeholders::SCENARIO_SIZE,
            ],
            "command_template",
            domain,
        )
    }

    fn domain_name(&self) -> &'static str {
        "job"
    }
}

fn default_shell() -> Vec<String> {
    vec!["/bin/bash".to_string(), "-c".to_string()]
}

fn default_command_template() -> String {
    concat!(
        "/usr/local/bin/mbei-testdata-writer -n={message_count} -o=msgs.yaml complex-factory ",
        "-s={scenario_size} &> writer.txt && ",
        "/usr/local/bin/mbei-testdata-file-producer -i=msgs.yaml -u=/etc/config/names-url-map.yaml"
    )
    .to_string()
}

fn default_message_count() -> u64 {
    DEFAULT_MESSAGE_COUNT
}
