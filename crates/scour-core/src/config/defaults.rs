//! Default values for configuration fields.

pub fn default_domain() -> String {
    "Default".to_string()
}

pub fn default_poll_timeout_secs() -> u64 {
    10
}

pub fn default_poll_interval_secs() -> u64 {
    1
}
