use std::{convert::TryFrom, path::Path};
use toml::{map::Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub show_notation: bool,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            show_notation: true,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>) -> Config {
        let config_path = match config_path {
            Some(p) => p,
            None => {
                log::debug!("no config file given, using defaults");
                return Config::default();
            }
        };
        let config: Map<String, Value> = match std::fs::read(config_path) {
            Ok(content) => match toml::from_slice(&content) {
                Ok(a) => a,
                Err(e) => {
                    log::warn!("Unable to parse config: {}", e);
                    Map::new()
                }
            },
            Err(e) => {
                log::warn!("Unable to read config file {:?}: {}", config_path, e);
                Map::new()
            }
        };
        Config::from_map(&config)
    }

    pub fn from_map(config: &Map<String, Value>) -> Config {
        let default = Config::default();

        let seed = match config.get("seed") {
            None => None,
            Some(s) => match s.as_integer().and_then(|s| u64::try_from(s).ok()) {
                Some(s) => Some(s),
                None => {
                    log::warn!("unable to read seed, rolling with an entropy seeded rng");
                    None
                }
            },
        };

        let show_notation = match config.get("show_notation") {
            None => default.show_notation,
            Some(s) => s.as_bool().unwrap_or_else(|| {
                log::warn!(
                    "unable to read show_notation, overwriting with {}",
                    default.show_notation
                );
                default.show_notation
            }),
        };

        let prompt = match config.get("prompt") {
            None => default.prompt,
            Some(p) => match p.as_str() {
                Some(p) => p.to_string(),
                None => {
                    log::warn!("unable to read prompt, overwriting with {:?}", default.prompt);
                    default.prompt
                }
            },
        };

        Config {
            seed,
            show_notation,
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn from_str(content: &str) -> Config {
        Config::from_map(&toml::from_str(content).unwrap())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(from_str(""), Config::default());
        assert_eq!(Config::load(None), Config::default());
    }

    #[test]
    fn test_all_keys() {
        assert_eq!(
            from_str("seed = 42\nshow_notation = false\nprompt = \"roll: \""),
            Config {
                seed: Some(42),
                show_notation: false,
                prompt: "roll: ".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_keys_fall_back() {
        assert_eq!(
            from_str("seed = -1\nshow_notation = \"yes\"\nprompt = 3"),
            Config::default()
        );
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert_eq!(
            Config::load(Some(Path::new("/nonexistent/jdice.toml"))),
            Config::default()
        );
    }
}
