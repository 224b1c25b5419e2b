use super::{FactorRule, PlayRules, Tier, Trigger};
use crate::models::{ImpactFactor, ImpactSeverity, PlayType};

/// Passing game rules
///
/// - Wind: medium at 10 mph, high at 20 mph
/// - Precipitation: medium at 0.1 in/hr, high at 0.5 in/hr
/// - Temperature: cold at or below 32°F, heat at or above 90°F
pub const RULES: PlayRules = PlayRules {
    play_type: PlayType::Passing,
    factors: &[
        FactorRule {
            factor: ImpactFactor::Wind,
            tiers: &[
                Tier {
                    trigger: Trigger::AtLeast(20.0),
                    severity: ImpactSeverity::High,
                    score_delta: -3,
                    description: "Strong winds will significantly affect passing accuracy",
                },
                Tier {
                    trigger: Trigger::AtLeast(10.0),
                    severity: ImpactSeverity::Medium,
                    score_delta: -1,
                    description: "Moderate winds may affect deep passes",
                },
            ],
        },
        FactorRule {
            factor: ImpactFactor::Precipitation,
            tiers: &[
                Tier {
                    trigger: Trigger::AtLeast(0.5),
                    severity: ImpactSeverity::High,
                    score_delta: -3,
                    description: "Heavy precipitation will make ball handling difficult",
                },
                Tier {
                    trigger: Trigger::AtLeast(0.1),
                    severity: ImpactSeverity::Medium,
                    score_delta: -1,
                    description: "Light precipitation may affect grip",
                },
            ],
        },
        FactorRule {
            factor: ImpactFactor::Temperature,
            tiers: &[
                Tier {
                    trigger: Trigger::AtMost(32.0),
                    severity: ImpactSeverity::High,
                    score_delta: -2,
                    description: "Cold temperatures will affect ball grip and throwing",
                },
                Tier {
                    trigger: Trigger::AtLeast(90.0),
                    severity: ImpactSeverity::Medium,
                    score_delta: -1,
                    description: "High temperatures may affect player stamina",
                },
            ],
        },
    ],
};
