use super::{kicking, passing, running, PlayRules};
use crate::error::Result;
use crate::models::{PlayImpacts, PlayTypeReport, WeatherSample};

/// Turns one weather sample into passing/running/kicking impact reports.
///
/// Play types are evaluated independently from their own rule tables.
pub struct ImpactAdvisor {
    passing: PlayRules,
    running: PlayRules,
    kicking: PlayRules,
}

impl ImpactAdvisor {
    pub fn new() -> Self {
        Self {
            passing: passing::RULES,
            running: running::RULES,
            kicking: kicking::RULES,
        }
    }

    pub fn evaluate(&self, sample: &WeatherSample) -> Result<PlayImpacts> {
        sample.validate()?;

        Ok(PlayImpacts {
            passing: evaluate_play(&self.passing, sample),
            running: evaluate_play(&self.running, sample),
            kicking: evaluate_play(&self.kicking, sample),
        })
    }

    pub fn list_rules(&self) -> Vec<&PlayRules> {
        vec![&self.passing, &self.running, &self.kicking]
    }
}

impl Default for ImpactAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate_play(rules: &PlayRules, sample: &WeatherSample) -> PlayTypeReport {
    let findings = rules
        .factors
        .iter()
        .filter_map(|rule| rule.evaluate(sample))
        .collect();
    PlayTypeReport::new(rules.play_type, findings)
}
