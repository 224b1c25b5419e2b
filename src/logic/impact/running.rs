use super::{FactorRule, PlayRules, Tier, Trigger};
use crate::models::{ImpactFactor, ImpactSeverity, PlayType};

/// Running game rules. Wind does not affect the ground game.
pub const RULES: PlayRules = PlayRules {
    play_type: PlayType::Running,
    factors: &[
        FactorRule {
            factor: ImpactFactor::Precipitation,
            tiers: &[
                Tier {
                    trigger: Trigger::AtLeast(1.0),
                    severity: ImpactSeverity::High,
                    score_delta: -2,
                    description: "Slippery conditions will affect cutting and acceleration",
                },
                Tier {
                    trigger: Trigger::AtLeast(0.25),
                    severity: ImpactSeverity::Low,
                    score_delta: -1,
                    description: "Slightly slick conditions may affect quick changes in direction",
                },
            ],
        },
        FactorRule {
            factor: ImpactFactor::Temperature,
            tiers: &[
                Tier {
                    trigger: Trigger::AtMost(20.0),
                    severity: ImpactSeverity::Medium,
                    score_delta: -2,
                    description: "Cold temperatures may affect muscle performance",
                },
                Tier {
                    trigger: Trigger::AtLeast(95.0),
                    severity: ImpactSeverity::High,
                    score_delta: -2,
                    description: "High temperatures will affect player endurance",
                },
            ],
        },
    ],
};
