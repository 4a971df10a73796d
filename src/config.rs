use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub data_file: PathBuf,
    pub session_ttl_days: i64,
    pub simulated_latency_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_file: env::var("DAILYTASKS_DATA_FILE")
                .unwrap_or_else(|_| "dailytasks.json".to_string())
                .into(),
            session_ttl_days: env::var("DAILYTASKS_SESSION_TTL_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("DAILYTASKS_SESSION_TTL_DAYS must be a number"),
            simulated_latency_ms: env::var("DAILYTASKS_LATENCY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("DAILYTASKS_LATENCY_MS must be a number"),
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}
