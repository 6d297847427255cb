use thiserror::Error;

pub const AZIMUTH_LIMITS: (f64, f64) = (0.0, 360.0);
pub const ELEVATION_LIMITS: (f64, f64) = (0.0, 90.0);

#[derive(Debug, Error, PartialEq)]
#[error("invalid angle range '{input}': {reason}")]
pub struct RangeError {
    pub input: String,
    pub reason: String,
}

/// Closed interval of angles, degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Parses `"min-max"` or a single value, clamped to the default bounds.
    /// Empty input selects the whole default interval. An empty side of
    /// `"min-max"` reads as 0, so `"-10"` is `[0, 10]`.
    pub fn parse(input: &str, default_min: f64, default_max: f64) -> Result<Self, RangeError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::new(default_min, default_max));
        }

        let bound = |text: &str| {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0.0);
            }
            text.parse::<f64>().map_err(|e| RangeError {
                input: input.to_string(),
                reason: e.to_string(),
            })
        };

        let (min, max) = match input.split_once('-') {
            Some((low, high)) => (bound(low)?, bound(high)?),
            None => {
                let value = bound(input)?;
                (value, value)
            }
        };

        if !min.is_finite() || !max.is_finite() {
            return Err(RangeError {
                input: input.to_string(),
                reason: "bounds must be finite".into(),
            });
        }

        Ok(Self::new(min.max(default_min), max.min(default_max)))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Requested look-angle constraints for the serviceable area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSpec {
    pub azimuth: AngleRange,
    pub elevation: AngleRange,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            azimuth: AngleRange::new(AZIMUTH_LIMITS.0, AZIMUTH_LIMITS.1),
            elevation: AngleRange::new(ELEVATION_LIMITS.0, ELEVATION_LIMITS.1),
        }
    }
}

impl TargetSpec {
    pub fn parse(azimuth: &str, elevation: &str) -> Result<Self, RangeError> {
        Ok(Self {
            azimuth: AngleRange::parse(azimuth, AZIMUTH_LIMITS.0, AZIMUTH_LIMITS.1)?,
            elevation: AngleRange::parse(elevation, ELEVATION_LIMITS.0, ELEVATION_LIMITS.1)?,
        })
    }

    /// The azimuth range leaves no bearing out
    pub fn covers_full_circle(&self) -> bool {
        self.azimuth.span() >= 360.0
    }
}
