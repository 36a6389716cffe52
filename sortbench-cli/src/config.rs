//! Configuration loading from sortbench.toml
//!
//! Sortbench configuration can be specified in a `sortbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "sortbench.toml";

/// Sortbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SortbenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Benchmark option overrides
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which algorithms and benchmark to run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Seed for reproducible workloads and validation fixtures
    #[serde(default)]
    pub seed: Option<u64>,
    /// Benchmark run when none is named on the command line
    #[serde(default)]
    pub benchmark: Option<String>,
    /// Regex selecting which registered algorithms are pooled
    #[serde(default)]
    pub algorithms: Option<String>,
}

/// Option overrides for the selected benchmark
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchmarkConfig {
    /// Option name to value
    #[serde(default)]
    pub options: BTreeMap<String, f64>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for exported results
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Export results after each run
    #[serde(default)]
    pub export: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
            export: false,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    sortbench_report::DEFAULT_EXPORT_DIR.to_string()
}

impl SortbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `sortbench.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path)
                    .inspect_err(|e| {
                        tracing::warn!(path = %config_path.display(), "ignoring config: {e}")
                    })
                    .ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Sortbench Configuration

[runner]
# Seed for reproducible workloads and fixtures (uncomment to enable)
# seed = 42
# Benchmark run by default
benchmark = "Deviation Benchmark"
# Only pool algorithms whose name matches this regex (uncomment to enable)
# algorithms = "Merge|Quick"

[benchmark.options]
# Elements in the random workload
array-size = 500000
# Timed sorts per algorithm
iterations = 50

[output]
# Output format: human, json, csv
format = "human"
# Directory for exported results
directory = "exports"
# Export results after each run
export = false
"#
        .to_string()
    }
}
