use super::{FactorRule, PlayRules, Tier, Trigger};
use crate::models::{ImpactFactor, ImpactSeverity, PlayType};

/// Kicking game rules (field goals, punts, kickoffs)
///
/// Kickers tolerate more wind than quarterbacks before it matters, but a
/// strong wind costs the most here.
pub const RULES: PlayRules = PlayRules {
    play_type: PlayType::Kicking,
    factors: &[
        FactorRule {
            factor: ImpactFactor::Wind,
            tiers: &[
                Tier {
                    trigger: Trigger::AtLeast(25.0),
                    severity: ImpactSeverity::High,
                    score_delta: -3,
                    description: "Strong winds will severely limit field goal range and punt control",
                },
                Tier {
                    trigger: Trigger::AtLeast(15.0),
                    severity: ImpactSeverity::Medium,
                    score_delta: -1,
                    description: "Moderate winds may push long field goals and punts off line",
                },
            ],
        },
        FactorRule {
            factor: ImpactFactor::Precipitation,
            tiers: &[
                Tier {
                    trigger: Trigger::AtLeast(0.75),
                    severity: ImpactSeverity::High,
                    score_delta: -3,
                    description: "Heavy precipitation will disrupt snaps, holds and plant-foot footing",
                },
                Tier {
                    trigger: Trigger::AtLeast(0.2),
                    severity: ImpactSeverity::Medium,
                    score_delta: -1,
                    description: "A wet ball may affect the snap and hold",
                },
            ],
        },
        FactorRule {
            factor: ImpactFactor::Temperature,
            tiers: &[
                Tier {
                    trigger: Trigger::AtMost(25.0),
                    severity: ImpactSeverity::High,
                    score_delta: -2,
                    description: "Cold air and a hard ball will reduce kicking distance",
                },
                Tier {
                    trigger: Trigger::AtLeast(95.0),
                    severity: ImpactSeverity::Medium,
                    score_delta: -2,
                    description: "Extreme heat may wear down kicking leg strength late in the game",
                },
            ],
        },
    ],
};
