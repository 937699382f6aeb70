use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{HouseSystem, NodeKind};
use crate::error::ChartError;
use crate::sidereal::Ayanamsa;
use crate::vedic::dashas::DashaBounds;

/// Chart computation settings. Every field has a default, so a partial `[chart]` table is
/// enough.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Fixed ayanamsa in degrees.
    pub ayanamsa: Ayanamsa,
    pub house_system: HouseSystem,
    pub node: NodeKind,
    pub dasha: DashaBounds,
}

impl ChartSettings {
    pub fn validate(&self) -> Result<(), ChartError> {
        let ayanamsa = self.ayanamsa.degrees();
        if !ayanamsa.is_finite() || !(0.0..360.0).contains(&ayanamsa) {
            return Err(ChartError::InvalidSettings(format!(
                "ayanamsa must be a finite angle in [0, 360), got {ayanamsa}"
            )));
        }
        self.dasha.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidereal::CHITRAPAKSHA_AYANAMSA_DEG;

    #[test]
    fn test_defaults() {
        let settings = ChartSettings::default();
        assert_eq!(settings.ayanamsa.degrees(), CHITRAPAKSHA_AYANAMSA_DEG);
        assert_eq!(settings.house_system, HouseSystem::Placidus);
        assert_eq!(settings.node, NodeKind::Mean);
        assert_eq!(settings.dasha.max_periods, 30);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: ChartSettings =
            serde_json::from_str(r#"{"house_system": "koch", "dasha": {"max_periods": 12}}"#)
                .expect("parse");
        assert_eq!(settings.house_system, HouseSystem::Koch);
        assert_eq!(settings.dasha.max_periods, 12);
        assert_eq!(settings.dasha.horizon_years, 210.0);
        assert_eq!(settings.node, NodeKind::Mean);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut settings = ChartSettings::default();
        settings.ayanamsa = Ayanamsa(f64::NAN);
        assert!(settings.validate().is_err());

        let mut settings = ChartSettings::default();
        settings.dasha.horizon_years = 50.0;
        assert!(matches!(settings.validate(), Err(ChartError::InvalidSettings(_))));
    }
}
