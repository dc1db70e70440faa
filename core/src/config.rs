//! TOML Configuration File Support
//!
//! Parlor reads an optional TOML file at `~/.config/parlor/parlor.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [timing]
//! reply_delay_ms = 1500
//! selection_delay_ms = 200
//!
//! [personas]
//! fallback = "alex"
//!
//! [[persona]]
//! id = "sage"
//! name = "Sage"
//! personality = "Calm & Curious"
//! description = "Asks good questions."
//! greeting = "Hello, I'm Sage."
//! initials = "S"
//! replies = ["Tell me more...", "Why do you think that is?"]
//! ```
//!
//! Declaring any `[[persona]]` table replaces the built-in roster.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persona::{
    builtin_personas, Avatar, Persona, PersonaId, PersonaRegistry, RegistryError, BUILTIN_FALLBACK,
};
use crate::route::Route;

/// Default simulated typing delay
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Default selection feedback delay
pub const DEFAULT_SELECTION_DELAY: Duration = Duration::from_millis(200);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The configured personas do not form a valid registry
    #[error("Invalid persona roster: {0}")]
    Registry(#[from] RegistryError),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Timing section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingToml {
    /// Simulated typing delay before a persona replies
    pub reply_delay_ms: Option<u64>,

    /// How long a chosen card stays highlighted before the chat opens
    pub selection_delay_ms: Option<u64>,
}

/// Persona roster settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonasToml {
    /// Persona whose replies stand in for an empty pool
    pub fallback: Option<String>,
}

/// One `[[persona]]` table
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaToml {
    /// Lookup key
    pub id: String,
    /// Display name
    pub name: String,
    /// Personality label
    pub personality: String,
    /// Card description
    pub description: String,
    /// Opening message
    pub greeting: String,
    /// Avatar image path
    pub avatar: Option<String>,
    /// Initials drawn instead of the image
    pub initials: Option<String>,
    /// Canned replies
    pub replies: Vec<String>,
}

impl PersonaToml {
    /// Convert into a [`Persona`]
    #[must_use]
    pub fn to_persona(&self) -> Persona {
        let mut persona = Persona::new(self.id.clone(), self.name.clone())
            .with_personality(self.personality.clone())
            .with_description(self.description.clone())
            .with_greeting(self.greeting.clone())
            .with_replies(self.replies.iter().cloned());

        if let Some(asset) = &self.avatar {
            persona.avatar.asset.clone_from(asset);
        }
        if let Some(initials) = &self.initials {
            persona.avatar = Avatar::new(persona.avatar.asset.clone(), initials.clone());
        }
        persona
    }
}

/// Complete TOML configuration file structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParlorToml {
    /// Timing configuration
    pub timing: TimingToml,
    /// Roster settings
    pub personas: PersonasToml,
    /// Custom personas (replace the built-in roster when present)
    pub persona: Vec<PersonaToml>,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Effective configuration after all sources are merged
#[derive(Clone, Debug)]
pub struct ParlorConfig {
    /// Simulated typing delay
    pub reply_delay: Duration,
    /// Selection feedback delay
    pub selection_delay: Duration,
    /// Persona whose replies back up empty pools (built-in roster: Alex)
    pub fallback_persona: Option<PersonaId>,
    /// Custom roster (empty = built-in personas)
    pub personas: Vec<PersonaToml>,
    /// View to open on start
    pub initial_route: Route,
    /// Seed for reply selection (random when unset)
    pub seed: Option<u64>,
    /// Path of the loaded config file, if any
    pub config_file_path: Option<PathBuf>,
    /// Where the configuration came from
    source: ConfigSource,
}

impl Default for ParlorConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            selection_delay: DEFAULT_SELECTION_DELAY,
            fallback_persona: None,
            personas: Vec::new(),
            initial_route: Route::Selection,
            seed: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ParlorConfig {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Build the persona registry this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] if the roster is invalid (duplicate
    /// ids, missing greetings, unusable fallback, ...).
    pub fn build_registry(&self) -> Result<PersonaRegistry, ConfigError> {
        let personas: Vec<Persona> = if self.personas.is_empty() {
            builtin_personas()
        } else {
            self.personas.iter().map(PersonaToml::to_persona).collect()
        };

        let fallback = if self.personas.is_empty() {
            // Built-in personas all have replies, so an unknown fallback is harmless here
            let id = self
                .fallback_persona
                .clone()
                .unwrap_or_else(|| PersonaId::from(BUILTIN_FALLBACK));
            if personas.iter().any(|p| p.id == id) {
                Some(id)
            } else {
                tracing::warn!(fallback = %id, "Fallback persona is not built in, ignoring");
                None
            }
        } else {
            self.fallback_persona.clone()
        };

        Ok(PersonaRegistry::new(personas, fallback)?)
    }

    /// Check values that TOML types alone cannot express
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay > Duration::from_secs(60) {
            return Err(ConfigError::ValidationError(format!(
                "reply_delay_ms must be at most 60000 (got {})",
                self.reply_delay.as_millis()
            )));
        }
        if self.selection_delay > Duration::from_secs(5) {
            return Err(ConfigError::ValidationError(format!(
                "selection_delay_ms must be at most 5000 (got {})",
                self.selection_delay.as_millis()
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/parlor/parlor.toml` or
/// `~/.config/parlor/parlor.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("parlor").join("parlor.toml"))
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the merged values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ParlorConfig, ConfigError> {
    // Start with defaults
    let mut config = ParlorConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ParlorToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config);

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ParlorConfig, toml: ParlorToml) {
    if let Some(ms) = toml.timing.reply_delay_ms {
        config.reply_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.timing.selection_delay_ms {
        config.selection_delay = Duration::from_millis(ms);
    }
    if let Some(fallback) = toml.personas.fallback {
        config.fallback_persona = Some(PersonaId::new(fallback));
    }
    if !toml.persona.is_empty() {
        config.personas = toml.persona;
    }
}

/// Apply environment variable overrides
fn apply_env_config(config: &mut ParlorConfig) {
    let mut from_env = false;

    if let Some(ms) = env_millis("PARLOR_REPLY_DELAY_MS") {
        config.reply_delay = ms;
        from_env = true;
    }
    if let Some(ms) = env_millis("PARLOR_SELECTION_DELAY_MS") {
        config.selection_delay = ms;
        from_env = true;
    }
    if let Ok(fallback) = std::env::var("PARLOR_FALLBACK_PERSONA") {
        let fallback = fallback.trim();
        if !fallback.is_empty() {
            config.fallback_persona = Some(PersonaId::new(fallback));
            from_env = true;
        }
    }

    if from_env && config.source == ConfigSource::Default {
        config.source = ConfigSource::Env;
    }
}

/// Parse a millisecond value from the environment, warning on garbage
fn env_millis(var: &str) -> Option<Duration> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            tracing::warn!(var, value = %raw, "Ignoring non-numeric environment value");
            None
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Values from the command line, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    reply_delay_ms: Option<u64>,
    selection_delay_ms: Option<u64>,
    fallback_persona: Option<String>,
    initial_route: Option<Route>,
    seed: Option<u64>,
}

impl ConfigOverrides {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reply delay
    #[must_use]
    pub fn with_reply_delay_ms(mut self, ms: u64) -> Self {
        self.reply_delay_ms = Some(ms);
        self
    }

    /// Override the selection delay
    #[must_use]
    pub fn with_selection_delay_ms(mut self, ms: u64) -> Self {
        self.selection_delay_ms = Some(ms);
        self
    }

    /// Override the fallback persona
    #[must_use]
    pub fn with_fallback_persona(mut self, id: String) -> Self {
        self.fallback_persona = Some(id);
        self
    }

    /// Open this view on start
    #[must_use]
    pub fn with_initial_route(mut self, route: Route) -> Self {
        self.initial_route = Some(route);
        self
    }

    /// Seed reply selection
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reply_delay_ms.is_none()
            && self.selection_delay_ms.is_none()
            && self.fallback_persona.is_none()
            && self.initial_route.is_none()
            && self.seed.is_none()
    }

    /// Apply overrides to a loaded configuration
    pub fn apply(&self, config: &mut ParlorConfig) {
        if let Some(ms) = self.reply_delay_ms {
            config.reply_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.selection_delay_ms {
            config.selection_delay = Duration::from_millis(ms);
        }
        if let Some(ref id) = self.fallback_persona {
            config.fallback_persona = Some(PersonaId::new(id.clone()));
        }
        if let Some(ref route) = self.initial_route {
            config.initial_route = route.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
    }
}
