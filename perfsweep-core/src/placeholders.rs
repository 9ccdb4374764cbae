//! Template placeholders shared by the generator arguments and the job command

/// Replica count of the current coordinate
pub const CLUSTER_SIZE: &str = "{cluster_size}";

/// Scenario size of the current coordinate
pub const SCENARIO_SIZE: &str = "{scenario_size}";

/// Folder the generator writes component configuration into
pub const CONFIG_FOLDER: &str = "{config_folder}";

/// Named generation strategy
pub const STRATEGY: &str = "{strategy}";

/// Messages the job's writer generates
pub const MESSAGE_COUNT: &str = "{message_count}";
