use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::BlockWeights;

/// Application configuration.
///
/// Everything is optional; a missing config file means built-in defaults
/// (equal block weights, store under the user data directory).
///
/// Example YAML:
/// ```yaml
/// data_path: /var/lib/sci-index/evaluations.json
/// weights:
///   r: 0.4
///   p: 0.2
///   o: 0.3
///   i: 0.1
/// ```
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Store file location, overriding the default under the data directory
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Default block weights for requests that omit `block_weights`
    #[serde(default)]
    pub weights: Option<BlockWeights>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.data_path.is_none());
        assert!(config.weights.is_none());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
data_path: /tmp/evals.json
weights:
  r: 0.4
  p: 0.2
  o: 0.3
  i: 0.1
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/evals.json")));
        let weights = config.weights.unwrap();
        assert_eq!(weights.r, 0.4);
        assert_eq!(weights.i, 0.1);
    }

    #[test]
    fn test_partial_weights_fill_defaults() {
        let yaml = r#"
weights:
  r: 0.5
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let weights = config.weights.unwrap();
        assert_eq!(weights.r, 0.5);
        assert_eq!(weights.p, 0.25);
    }
}
