/// Subscriber settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingConfig {
    pub json_format: bool,
}

impl TracingConfig {
    /// JSON output when requested explicitly or via `LOG_FORMAT=json`
    pub fn new(json_requested: bool) -> Self {
        Self {
            json_format: json_requested || log_format_is_json(std::env::var("LOG_FORMAT").ok()),
        }
    }
}

fn log_format_is_json(value: Option<String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}
