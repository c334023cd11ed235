//! WIF output configuration.

use std::fmt;
use std::str::FromStr;

/// Length unit for warp and weft thread spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Tenths of a point.
    Decipoints,
    /// Inches.
    Inches,
    /// Centimeters.
    #[default]
    Centimeters,
}

impl Units {
    /// The WIF spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decipoints => "decipoints",
            Self::Inches => "inches",
            Self::Centimeters => "centimeters",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decipoints" => Ok(Self::Decipoints),
            "inches" | "in" => Ok(Self::Inches),
            "centimeters" | "cm" => Ok(Self::Centimeters),
            other => Err(format!(
                "unknown units '{}' (expected decipoints, inches or centimeters)",
                other
            )),
        }
    }
}

/// Constants written into every WIF file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WifConfig {
    /// `[WIF] Version`.
    pub wif_version: &'static str,
    /// `[WIF] Date`: the date of the WIF specification.
    pub wif_date: &'static str,
    /// `[WIF] Developers`.
    pub developers: &'static str,
    /// `[WIF] Source Program`.
    pub source_program: &'static str,
    /// `[WIF] Source Version`.
    pub source_version: &'static str,
    /// Unit for spacing and thickness.
    pub units: Units,
    /// Distance between threads.
    pub spacing: f64,
    /// Thread thickness.
    pub thickness: f64,
    /// Whether the loom raises the tied shafts.
    pub rising_shed: bool,
}

impl WifConfig {
    /// WIF 1.1 with thread geometry suited to fine yarn.
    ///
    /// - Version 1.1, dated April 20, 1997
    /// - Centimeters, 0.212 spacing and thickness
    /// - Rising shed
    pub const DEFAULT: Self = Self {
        wif_version: "1.1",
        wif_date: "April 20, 1997",
        developers: "wif@mhsoft.com",
        source_program: "wmdf",
        source_version: env!("CARGO_PKG_VERSION"),
        units: Units::Centimeters,
        spacing: 0.212,
        thickness: 0.212,
        rising_shed: true,
    };

    /// Start from [`WifConfig::DEFAULT`].
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the thread units.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Set the thread spacing.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the thread thickness.
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the shed direction.
    pub fn with_rising_shed(mut self, rising_shed: bool) -> Self {
        self.rising_shed = rising_shed;
        self
    }
}

impl Default for WifConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render-time choices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvertOptions {
    /// Colorway to export, 0-based.
    pub colorway: usize,
    /// Header and geometry constants.
    pub config: WifConfig,
}

impl ConvertOptions {
    /// First colorway, default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a colorway (0-based).
    pub fn with_colorway(mut self, colorway: usize) -> Self {
        self.colorway = colorway;
        self
    }

    /// Replace the constants.
    pub fn with_config(mut self, config: WifConfig) -> Self {
        self.config = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WifConfig::DEFAULT;
        assert_eq!(config.wif_version, "1.1");
        assert_eq!(config.wif_date, "April 20, 1997");
        assert_eq!(config.units, Units::Centimeters);
        assert_eq!(config.spacing, 0.212);
        assert!(config.rising_shed);
        assert_eq!(WifConfig::default(), config);
    }

    #[test]
    fn test_setters() {
        let config = WifConfig::new()
            .with_units(Units::Inches)
            .with_spacing(0.05)
            .with_thickness(0.04)
            .with_rising_shed(false);
        assert_eq!(config.units, Units::Inches);
        assert_eq!(config.spacing, 0.05);
        assert_eq!(config.thickness, 0.04);
        assert!(!config.rising_shed);

        let options = ConvertOptions::new().with_colorway(2).with_config(config);
        assert_eq!(options.colorway, 2);
        assert_eq!(options.config.units, Units::Inches);
    }

    #[test]
    fn test_units_parse() {
        assert_eq!("cm".parse::<Units>(), Ok(Units::Centimeters));
        assert_eq!("Inches".parse::<Units>(), Ok(Units::Inches));
        assert_eq!("decipoints".parse::<Units>(), Ok(Units::Decipoints));
        assert!("furlongs".parse::<Units>().is_err());
        assert_eq!(Units::Decipoints.to_string(), "decipoints");
    }
}
