pub mod advisor;
pub mod kicking;
pub mod passing;
pub mod running;

pub use advisor::ImpactAdvisor;

use crate::models::{ImpactFactor, ImpactFinding, ImpactSeverity, PlayType, WeatherSample};

/// Condition that fires a tier for a measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    AtLeast(f64),
    AtMost(f64),
}

impl Trigger {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Trigger::AtLeast(threshold) => value >= threshold,
            Trigger::AtMost(threshold) => value <= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub trigger: Trigger,
    pub severity: ImpactSeverity,
    pub score_delta: i32,
    pub description: &'static str,
}

/// Ordered tiers for one factor. The first matching tier wins, so a factor
/// yields at most one finding.
#[derive(Debug, Clone, Copy)]
pub struct FactorRule {
    pub factor: ImpactFactor,
    pub tiers: &'static [Tier],
}

impl FactorRule {
    pub fn evaluate(&self, sample: &WeatherSample) -> Option<ImpactFinding> {
        let value = measurement(self.factor, sample);
        self.tiers
            .iter()
            .find(|tier| tier.trigger.matches(value))
            .map(|tier| ImpactFinding {
                factor: self.factor,
                severity: tier.severity,
                score_delta: tier.score_delta,
                description: tier.description.to_string(),
            })
    }
}

/// Rule table for one play type, in evaluation order
#[derive(Debug, Clone, Copy)]
pub struct PlayRules {
    pub play_type: PlayType,
    pub factors: &'static [FactorRule],
}

pub fn measurement(factor: ImpactFactor, sample: &WeatherSample) -> f64 {
    match factor {
        ImpactFactor::Wind => sample.wind_speed_mph,
        ImpactFactor::Precipitation => sample.precipitation_in_per_hr,
        ImpactFactor::Temperature => sample.temperature_f,
    }
}
