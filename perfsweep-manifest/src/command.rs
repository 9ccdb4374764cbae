//! Job command rendering

use perfsweep_core::placeholders;

/// Render the job container command: `shell` followed by the filled-in template.
///
/// `{message_count}` and `{scenario_size}` are substituted; any other text
/// is passed through verbatim.
pub fn render_job_command(
    shell: &[String],
    template: &str,
    message_count: u64,
    scenario_size: u32,
) -> Vec<String> {
    let script = template
        .replace(placeholders::MESSAGE_COUNT, &message_count.to_string())
        .replace(placeholders::SCENARIO_SIZE, &scenario_size.to_string());

    let mut command = shell.to_vec();
    command.push(script);
    command
}
