//! Run Planner
//!
//! Decides what a session runs before anything is instantiated:
//! - Algorithm selection by regex on the registered name
//! - Benchmark option overrides layered from sortbench.toml and `-o name=value`
//!
//! Ordering: algorithms are pooled alphabetically for deterministic execution.

use anyhow::Context;
use regex::Regex;
use std::collections::BTreeMap;

/// Registered names matching `filter`, sorted
pub fn select_algorithms<'a>(
    registered: impl IntoIterator<Item = &'a str>,
    filter: Option<&Regex>,
) -> Vec<String> {
    let mut selected: Vec<String> = registered
        .into_iter()
        .filter(|name| filter.is_none_or(|re| re.is_match(name)))
        .map(str::to_string)
        .collect();
    selected.sort();
    selected
}

/// Compile an optional algorithm filter
pub fn compile_filter(pattern: Option<&str>) -> anyhow::Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).with_context(|| format!("invalid algorithm filter '{}'", p)))
        .transpose()
}

/// Parse one `name=value` override
pub fn parse_override(raw: &str) -> anyhow::Result<(String, f64)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("missing option name in '{}'", raw);
    }
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("option '{}' needs a number, got '{}'", name, value.trim()))?;
    Ok((name.to_string(), value))
}

/// Merge config-file overrides with command-line ones; the command line wins
pub fn resolve_overrides(
    configured: &BTreeMap<String, f64>,
    cli: &[String],
) -> anyhow::Result<Vec<(String, f64)>> {
    let mut merged = configured.clone();
    for raw in cli {
        let (name, value) = parse_override(raw)?;
        merged.insert(name, value);
    }
    Ok(merged.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_sorted() {
        let selected = select_algorithms(["StdSort", "HeapSort", "MergeSort"], None);
        assert_eq!(selected, vec!["HeapSort", "MergeSort", "StdSort"]);
    }

    #[test]
    fn test_select_with_filter() {
        let re = compile_filter(Some("^(Heap|Merge)")).unwrap();
        let selected = select_algorithms(["StdSort", "HeapSort", "MergeSort"], re.as_ref());
        assert_eq!(selected, vec!["HeapSort", "MergeSort"]);
    }

    #[test]
    fn test_invalid_filter() {
        assert!(compile_filter(Some("(")).is_err());
        assert!(compile_filter(None).unwrap().is_none());
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("iterations=5").unwrap(),
            ("iterations".to_string(), 5.0)
        );
        assert_eq!(
            parse_override(" array-size = 100 ").unwrap(),
            ("array-size".to_string(), 100.0)
        );
        assert!(parse_override("iterations").is_err());
        assert!(parse_override("=5").is_err());
        assert!(parse_override("iterations=many").is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut configured = BTreeMap::new();
        configured.insert("iterations".to_string(), 10.0);
        configured.insert("array-size".to_string(), 1000.0);

        let merged = resolve_overrides(&configured, &["iterations=3".to_string()]).unwrap();
        assert_eq!(
            merged,
            vec![
                ("array-size".to_string(), 1000.0),
                ("iterations".to_string(), 3.0)
            ]
        );
    }
}
