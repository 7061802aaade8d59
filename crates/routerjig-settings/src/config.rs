//! Configuration and settings management for RouterJig
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Units (measurement system, increments per unit)
//! - Router bit defaults (width, depth, angle)
//! - Board defaults (widths, insert thicknesses, woods)
//! - Spacing policy (default strategy, minimum finger width, caul trim, undo depth)
//! - Fit warning thresholds
//! - Layout margins
//!
//! Lengths are stored in the configured unit (inches or millimetres), never in
//! increments, so that changing `num_increments` keeps the physical geometry.

pub use routerjig_core::units::MeasurementSystem;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use routerjig_core::{ParameterResult, Units};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Unit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Measurement system (metric or imperial)
    pub measurement_system: MeasurementSystem,
    /// Increments per inch (imperial) or per millimetre (metric)
    pub num_increments: u32,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            measurement_system: MeasurementSystem::Imperial,
            num_increments: 32,
        }
    }
}

/// Router bit defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitSettings {
    /// Bit width
    pub width: f64,
    /// Cutting depth
    pub depth: f64,
    /// Dovetail angle in degrees (0 for a straight bit)
    pub angle: f64,
}

impl Default for BitSettings {
    fn default() -> Self {
        Self {
            width: 0.5,
            depth: 0.75,
            angle: 0.0,
        }
    }
}

/// Board defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Board width (the length of the routed edge)
    pub width: f64,
    /// Board height as drawn
    pub height: f64,
    /// Whether the double insert board is used
    #[serde(default)]
    pub double_active: bool,
    /// Extra thickness of the double insert
    #[serde(default)]
    pub double_thickness: f64,
    /// Whether the double-double insert board is used
    #[serde(default)]
    pub dd_active: bool,
    /// Extra thickness of the double-double insert
    #[serde(default)]
    pub dd_thickness: f64,
    /// Wood of the top board (A)
    pub top_wood: String,
    /// Wood of the bottom board (B)
    pub bottom_wood: String,
    /// Wood of the double insert
    pub double_wood: String,
    /// Wood of the double-double insert
    pub dd_wood: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: 7.5,
            height: 2.0,
            double_active: false,
            double_thickness: 0.0,
            dd_active: false,
            dd_thickness: 0.0,
            top_wood: "maple".to_string(),
            bottom_wood: "walnut".to_string(),
            double_wood: "cherry".to_string(),
            dd_wood: "oak".to_string(),
        }
    }
}

/// Spacing algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpacingKind {
    /// Equally spaced fingers
    #[default]
    Equal,
    /// Variable spaced fingers, widest at the centre
    Variable,
    /// Interactively edited cuts
    Edit,
}

impl std::fmt::Display for SpacingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "Equal"),
            Self::Variable => write!(f, "Variable"),
            Self::Edit => write!(f, "Edit"),
        }
    }
}

impl std::str::FromStr for SpacingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "variable" => Ok(Self::Variable),
            "edit" => Ok(Self::Edit),
            _ => Err(format!("Unknown spacing: {}", s)),
        }
    }
}

/// Spacing policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingSettings {
    /// Strategy used for new joints
    pub default_kind: SpacingKind,
    /// Narrowest finger an edge cut may leave
    pub min_finger_width: f64,
    /// Amount the caul template cuts are widened on each side
    pub caul_trim: f64,
    /// Number of edit snapshots kept for undo
    pub undo_depth: usize,
}

impl Default for SpacingSettings {
    fn default() -> Self {
        Self {
            default_kind: SpacingKind::Equal,
            min_finger_width: 0.0625,
            caul_trim: 0.03125,
            undo_depth: 100,
        }
    }
}

/// Fit warning thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSettings {
    /// Largest acceptable gap between mating fingers
    pub warn_gap: f64,
    /// Largest acceptable overlap between mating fingers
    pub warn_overlap: f64,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            warn_gap: 0.005,
            warn_overlap: 0.005,
        }
    }
}

/// Layout of the joint drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Space between stacked items and around the drawing
    pub margin: f64,
    /// Height of the template strip
    pub template_height: f64,
    /// Whether the caul template is laid out
    #[serde(default)]
    pub show_caul: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin: 0.25,
            template_height: 0.75,
            show_caul: false,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Unit settings
    pub units: UnitSettings,
    /// Router bit defaults
    pub bit: BitSettings,
    /// Board defaults
    pub boards: BoardSettings,
    /// Spacing policy
    pub spacing: SpacingSettings,
    /// Fit warning thresholds
    #[serde(default)]
    pub fit: FitSettings,
    /// Drawing layout
    #[serde(default)]
    pub layout: LayoutSettings,
}

/// Default location of the configuration file
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
    })?;
    Ok(dir.join("routerjig").join("config.toml"))
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.units.num_increments == 0 {
            return Err(SettingsError::invalid("units.num_increments", "must be > 0"));
        }

        // Bit geometry
        if self.bit.width <= 0.0 {
            return Err(SettingsError::invalid("bit.width", "must be > 0"));
        }
        if self.bit.depth <= 0.0 {
            return Err(SettingsError::invalid("bit.depth", "must be > 0"));
        }
        if !(0.0..90.0).contains(&self.bit.angle) {
            return Err(SettingsError::invalid(
                "bit.angle",
                "must be at least 0 and less than 90 degrees",
            ));
        }

        // Boards
        if self.boards.width <= 0.0 {
            return Err(SettingsError::invalid("boards.width", "must be > 0"));
        }
        if self.boards.height <= 0.0 {
            return Err(SettingsError::invalid("boards.height", "must be > 0"));
        }
        if self.boards.double_thickness < 0.0 || self.boards.dd_thickness < 0.0 {
            return Err(SettingsError::invalid(
                "boards.double_thickness",
                "insert thickness must be >= 0",
            ));
        }
        if self.boards.dd_active && !self.boards.double_active {
            return Err(SettingsError::invalid(
                "boards.dd_active",
                "the double-double board requires the double board",
            ));
        }

        // Spacing policy
        if self.spacing.min_finger_width < 0.0 {
            return Err(SettingsError::invalid(
                "spacing.min_finger_width",
                "must be >= 0",
            ));
        }
        if self.spacing.caul_trim < 0.0 {
            return Err(SettingsError::invalid("spacing.caul_trim", "must be >= 0"));
        }
        if self.spacing.undo_depth == 0 {
            return Err(SettingsError::invalid("spacing.undo_depth", "must be > 0"));
        }

        if self.fit.warn_gap < 0.0 || self.fit.warn_overlap < 0.0 {
            return Err(SettingsError::invalid("fit", "thresholds must be >= 0"));
        }
        if self.layout.margin < 0.0 || self.layout.template_height <= 0.0 {
            return Err(SettingsError::invalid(
                "layout",
                "margin must be >= 0 and template height > 0",
            ));
        }

        Ok(())
    }

    /// The unit model described by the `units` section
    pub fn units(&self) -> ParameterResult<Units> {
        Units::new(self.units.measurement_system, self.units.num_increments)
    }
}
