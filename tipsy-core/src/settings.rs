use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub sim_tick_ms: u64,
    // 0 keeps the loop running until interrupted
    pub sim_ticks: u64,
    pub player_amount: usize,

    pub speed_step: f32,
    pub turn_step: f32,

    pub drunkenness_initial_delay_s: f64,
    pub drunkenness_interval_s: f64,
    pub drunk_speed_min: f32,
    pub drunk_speed_max: f32,
    pub drunk_turn_min: f32,
    pub drunk_turn_max: f32,

    pub transition_delay_s: f64,
    pub collision_nudge: f32,
    pub max_speed: f32,

    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let config = Self::with_defaults()?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        Self::finish(config)
    }

    pub fn from_file(path: &str) -> Result<Settings, ConfigError> {
        let config = Self::with_defaults()?
            .add_source(File::with_name(path))
            .build()?;

        Self::finish(config)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("sim_tick_ms", 16)?
            .set_default("sim_ticks", 0)?
            .set_default("player_amount", 1)?
            .set_default("speed_step", 0.25)?
            .set_default("turn_step", 10.0)?
            .set_default("drunkenness_initial_delay_s", 10.0)?
            .set_default("drunkenness_interval_s", 20.0)?
            .set_default("drunk_speed_min", -0.2)?
            .set_default("drunk_speed_max", 0.2)?
            .set_default("drunk_turn_min", -45.0)?
            .set_default("drunk_turn_max", 45.0)?
            .set_default("transition_delay_s", 2.0)?
            .set_default("collision_nudge", 0.5)?
            .set_default("max_speed", 6.0)
    }

    fn finish(config: Config) -> Result<Settings, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects tunings that would let a drunken target push speed out of
    /// [-1, 1] or make a uniform draw impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drunk_speed_min > self.drunk_speed_max {
            return Err(ConfigError::Message(
                "drunk_speed_min must not exceed drunk_speed_max".to_string(),
            ));
        }
        if self.drunk_speed_min < -1.0 || self.drunk_speed_max > 1.0 {
            return Err(ConfigError::Message(
                "drunk speed range must lie within [-1, 1]".to_string(),
            ));
        }
        if self.drunk_turn_min > self.drunk_turn_max {
            return Err(ConfigError::Message(
                "drunk_turn_min must not exceed drunk_turn_max".to_string(),
            ));
        }
        if self.drunkenness_interval_s <= 0.0 {
            return Err(ConfigError::Message(
                "drunkenness_interval_s must be positive".to_string(),
            ));
        }
        if self.drunkenness_initial_delay_s < 0.0 || self.transition_delay_s < 0.0 {
            return Err(ConfigError::Message("delays must not be negative".to_string()));
        }
        if self.max_speed < 0.0 {
            return Err(ConfigError::Message("max_speed must not be negative".to_string()));
        }
        if self.sim_tick_ms == 0 {
            return Err(ConfigError::Message("sim_tick_ms must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sim_tick_ms: 16,
            sim_ticks: 0,
            player_amount: 1,
            speed_step: 0.25,
            turn_step: 10.0,
            drunkenness_initial_delay_s: 10.0,
            drunkenness_interval_s: 20.0,
            drunk_speed_min: -0.2,
            drunk_speed_max: 0.2,
            drunk_turn_min: -45.0,
            drunk_turn_max: 45.0,
            transition_delay_s: 2.0,
            collision_nudge: 0.5,
            max_speed: 6.0,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn builder_defaults_match_struct_defaults() {
        let config = Settings::with_defaults().unwrap().build().unwrap();
        let settings = Settings::finish(config).unwrap();
        let expected = Settings::default();

        assert_eq!(settings.sim_tick_ms, expected.sim_tick_ms);
        assert_eq!(settings.speed_step, expected.speed_step);
        assert_eq!(settings.turn_step, expected.turn_step);
        assert_eq!(settings.drunk_turn_min, expected.drunk_turn_min);
        assert_eq!(settings.drunkenness_interval_s, expected.drunkenness_interval_s);
        assert_eq!(settings.rng_seed, None);
    }

    #[test]
    fn missing_config_yaml_is_not_an_error() {
        let settings = Settings::new().unwrap();
        assert_eq!(settings.max_speed, 6.0);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("tipsy-core-settings-{}.yaml", std::process::id()));
        std::fs::write(&path, "drunkenness_interval_s: 0.0\n").unwrap();

        let result = Settings::from_file(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let settings = Settings {
            drunk_speed_min: 0.5,
            drunk_speed_max: 0.1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn speed_range_outside_unit_interval_is_rejected() {
        let settings = Settings {
            drunk_speed_max: 1.5,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let settings = Settings {
            drunkenness_interval_s: 0.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
