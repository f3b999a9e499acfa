use std::env;
use std::path::PathBuf;

use crate::persist;

/// Runtime settings read from the environment (`.env` files are loaded by the
/// binaries before this runs).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub demo: bool,
    pub max_logs: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_file = env::var("COMPARADOR_DATA_FILE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .or_else(persist::default_data_path);
        let export_dir = env::var("COMPARADOR_EXPORT_DIR")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let demo = env::var("COMPARADOR_DEMO")
            .map(|val| parse_flag(&val))
            .unwrap_or(false);
        let max_logs = env::var("COMPARADOR_MAX_LOGS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(200)
            .clamp(20, 2000);
        Self {
            data_file,
            export_dir,
            demo,
            max_logs,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
