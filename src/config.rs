use serde::{Deserialize, Serialize};

use crate::params::solinas::{
    DEFAULT_COFACTOR_ATTEMPTS, DEFAULT_MAX_ITERATIONS, DEFAULT_PRIMALITY_ROUNDS,
};
use crate::params::SearchConfig;

/// Parameter generation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Bit length of the group order `r`.
    pub rbits: u32,
    /// Bit length of the field characteristic `q`.
    pub qbits: u32,
    /// Seed of the deterministic search stream.
    pub seed: u64,
    /// Miller-Rabin rounds per primality test.
    pub rounds: usize,
    /// Cofactor draws per prime `r`.
    pub cofactor_attempts: u32,
    /// Bound on the number of `r` candidates.
    pub max_iterations: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rbits: 160,
            qbits: 512,
            seed: 1,
            rounds: DEFAULT_PRIMALITY_ROUNDS,
            cofactor_attempts: DEFAULT_COFACTOR_ATTEMPTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `PAIRING_` prefix (e.g., `PAIRING_RBITS=512`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `PAIRING_CONFIG_PATH`. If not set, defaults
    /// to `./config/pairing.toml`. A missing file is skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// PAIRING_RBITS=512
    /// PAIRING_QBITS=1024
    /// PAIRING_SEED=7
    /// PAIRING_MAX_ITERATIONS=50000
    /// ```
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed or contains invalid values.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        let _ = dotenvy::dotenv();

        let config_path = std::env::var("PAIRING_CONFIG_PATH")
            .unwrap_or_else(|_| "config/pairing.toml".to_string());

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("PAIRING_").ignore(&["config_path"]))
            .extract()
    }

    /// Validates bit sizes and search bounds.
    ///
    /// # Errors
    /// Returns an error message describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.rbits < 3 {
            return Err(format!("rbits must be at least 3, got {}", self.rbits));
        }
        if self.qbits <= self.rbits {
            return Err(format!(
                "qbits ({}) must exceed rbits ({})",
                self.qbits, self.rbits
            ));
        }
        if self.rounds == 0 {
            return Err("Primality rounds cannot be zero".to_string());
        }
        if self.cofactor_attempts == 0 {
            return Err("Cofactor attempts cannot be zero".to_string());
        }
        if self.max_iterations == 0 {
            return Err("Max iterations cannot be zero".to_string());
        }
        Ok(())
    }

    /// Search knobs for [`SolinasGenerator`](crate::params::SolinasGenerator).
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            rounds: self.rounds,
            cofactor_attempts: self.cofactor_attempts,
            max_iterations: self.max_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search_config(), SearchConfig::default());
    }

    #[test]
    fn rejects_bad_sizes_and_bounds() {
        let base = GeneratorConfig::default();

        let config = GeneratorConfig { rbits: 2, ..base.clone() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { qbits: 160, ..base.clone() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { rounds: 0, ..base.clone() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { max_iterations: 0, ..base };
        assert!(config.validate().is_err());
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PAIRING_CONFIG_PATH", "pairing.toml");
            jail.create_file("pairing.toml", "rbits = 100\nqbits = 200\n")?;
            jail.set_env("PAIRING_SEED", "9");

            let config = GeneratorConfig::from_env()?;
            assert_eq!(config.rbits, 100);
            assert_eq!(config.qbits, 200);
            assert_eq!(config.seed, 9);
            assert_eq!(config.rounds, DEFAULT_PRIMALITY_ROUNDS);
            Ok(())
        });
    }
}
