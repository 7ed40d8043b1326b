use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which camera the acquisition request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing ("selfie") camera.
    User,
    /// Rear-facing camera.
    Environment,
}

/// Constraints passed to the platform device request.
///
/// Only the contract matters here: the backend maps these onto whatever
/// schema its platform uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConstraints {
    pub facing: FacingMode,
    /// Ideal (width, height); the platform may deliver something else.
    pub ideal_resolution: (u32, u32),
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            ideal_resolution: (1280, 720),
        }
    }
}

/// Configuration for a camera session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfiguration {
    pub constraints: VideoConstraints,

    /// Whether captures composite the weather band when data is available.
    pub overlay_enabled: bool,

    /// Place name used for the single conditions-fetch fallback when
    /// geolocation is unavailable or times out.
    pub default_place: String,

    /// Upper bound on the geolocation wait before falling back.
    pub geolocation_timeout: Duration,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        let (w, h) = self.constraints.ideal_resolution;
        if w == 0 || h == 0 {
            return Err(format!("ideal resolution must be non-zero: {}x{}", w, h));
        }
        if self.default_place.trim().is_empty() {
            return Err("default place name must not be empty".into());
        }
        if self.geolocation_timeout.is_zero() {
            return Err("geolocation timeout must be positive".into());
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            constraints: VideoConstraints::default(),
            overlay_enabled: true,
            default_place: "New York".into(),
            geolocation_timeout: Duration::from_secs(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(SessionConfiguration::default().validate().is_ok());
    }

    #[test]
    fn zero_resolution_rejected() {
        let mut config = SessionConfiguration::default();
        config.constraints.ideal_resolution = (0, 720);
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_place_rejected() {
        let mut config = SessionConfiguration::default();
        config.default_place = "  ".into();
        assert!(config.validate().is_err());
    }
}
