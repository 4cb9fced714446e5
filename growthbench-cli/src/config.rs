//! Configuration loading from growthbench.toml
//!
//! GrowthBench configuration can be specified in a `growthbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use growthbench_core::{Concurrency, DEFAULT_ITERATIONS, DEFAULT_SIZES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`GrowthConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "growthbench.toml";

/// GrowthBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GrowthConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Chunk size setting: `"auto"` or a fixed number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkSizeSetting {
    /// Fixed number of concurrent invocations
    Fixed(usize),
    /// Keyword form, only `"auto"` is accepted
    Keyword(String),
}

impl Default for ChunkSizeSetting {
    fn default() -> Self {
        ChunkSizeSetting::Keyword("auto".to_string())
    }
}

impl ChunkSizeSetting {
    /// Resolve to the engine's concurrency setting
    pub fn to_concurrency(&self) -> anyhow::Result<Concurrency> {
        match self {
            ChunkSizeSetting::Fixed(n) => Ok(Concurrency::Fixed((*n).max(1))),
            ChunkSizeSetting::Keyword(s) => {
                s.parse::<Concurrency>().map_err(anyhow::Error::msg)
            }
        }
    }
}

/// Runner configuration for measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Input sizes, in measurement order
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Invocations per size
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Drop the leading quarter of samples at each size
    #[serde(default = "default_warmup_discard")]
    pub warmup_discard: bool,
    /// Wall-clock budget for the whole run (e.g., "30s", "2m")
    #[serde(default = "default_time_budget")]
    pub time_budget: String,
    /// Concurrent invocations per chunk: "auto" or a number
    #[serde(default)]
    pub chunk_size: ChunkSizeSetting,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            iterations: default_iterations(),
            warmup_discard: default_warmup_discard(),
            time_budget: default_time_budget(),
            chunk_size: ChunkSizeSetting::default(),
        }
    }
}

fn default_sizes() -> Vec<usize> {
    DEFAULT_SIZES.to_vec()
}
fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
fn default_warmup_discard() -> bool {
    true
}
fn default_time_budget() -> String {
    "30s".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl GrowthConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        Self::discover_from(std::env::current_dir().ok()?)
    }

    /// Search `dir` and its ancestors for a config file
    pub fn discover_from(mut dir: PathBuf) -> Option<Self> {
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring invalid config file"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# GrowthBench Configuration

[runner]
# Input sizes, measured in this order (at least 2 for a growth rate)
sizes = [1, 2, 5, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 150, 200, 300, 400, 500, 600, 700, 800, 900, 1000]
# Invocations per size
iterations = 100
# Drop the first quarter of samples at each size
warmup_discard = true
# Wall-clock budget for the whole run
time_budget = "30s"
# Concurrent invocations per chunk: "auto" or a number
chunk_size = "auto"

[output]
# Default output format: human, json, csv
format = "human"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if value < 0.0 {
            return Err(anyhow::anyhow!("Negative duration: {}", s));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GrowthConfig::default();
        assert_eq!(config.runner.sizes.len(), 23);
        assert_eq!(config.runner.iterations, 100);
        assert!(config.runner.warmup_discard);
        assert_eq!(config.runner.time_budget, "30s");
        assert_eq!(
            config.runner.chunk_size.to_concurrency().unwrap(),
            Concurrency::Auto
        );
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(GrowthConfig::parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(GrowthConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(GrowthConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(GrowthConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(GrowthConfig::parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(GrowthConfig::parse_duration("1min").unwrap(), 60_000_000_000);
        assert_eq!(GrowthConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
        assert_eq!(GrowthConfig::parse_duration("2").unwrap(), 2_000_000_000);
        assert!(GrowthConfig::parse_duration("").is_err());
        assert!(GrowthConfig::parse_duration("5h").is_err());
        assert!(GrowthConfig::parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            sizes = [1, 10, 100]
            iterations = 20
            chunk_size = 5
        "#;

        let config = GrowthConfig::parse(toml_str).unwrap();
        assert_eq!(config.runner.sizes, vec![1, 10, 100]);
        assert_eq!(config.runner.iterations, 20);
        assert_eq!(
            config.runner.chunk_size.to_concurrency().unwrap(),
            Concurrency::Fixed(5)
        );
        // Defaults should still apply
        assert_eq!(config.runner.time_budget, "30s");
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_bad_chunk_keyword() {
        let config = GrowthConfig::parse("[runner]\nchunk_size = \"lots\"\n").unwrap();
        assert!(config.runner.chunk_size.to_concurrency().is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = GrowthConfig::default_toml();
        let config = GrowthConfig::parse(&default_toml).unwrap();
        assert_eq!(config.runner.sizes, DEFAULT_SIZES.to_vec());
        assert_eq!(config.runner.time_budget, "30s");
        assert_eq!(
            config.runner.chunk_size.to_concurrency().unwrap(),
            Concurrency::Auto
        );
    }

    fn temp_config_dir(name: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!(
            "growthbench-test-{}-{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_micros()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_discover_from_nested_dir() {
        let root = temp_config_dir("nested");
        std::fs::write(root.join(CONFIG_FILE_NAME), "[runner]\niterations = 7\n").unwrap();
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = GrowthConfig::discover_from(nested).unwrap();
        assert_eq!(config.runner.iterations, 7);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_invalid_config_file_is_logged() {
        let root = temp_config_dir("invalid");
        std::fs::write(root.join(CONFIG_FILE_NAME), "[runner\n").unwrap();

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = tracing::subscriber::with_default(subscriber, || {
            GrowthConfig::discover_from(root.clone())
        });
        assert!(config.is_none());

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("ignoring invalid config file"), "{output}");

        std::fs::remove_dir_all(&root).unwrap();
    }
}
