use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayType {
    Passing,
    Running,
    Kicking,
}

impl PlayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayType::Passing => "passing",
            PlayType::Running => "running",
            PlayType::Kicking => "kicking",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PlayType::Passing => "Passing Game",
            PlayType::Running => "Running Game",
            PlayType::Kicking => "Kicking Game",
        }
    }
}

impl std::fmt::Display for PlayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactFactor {
    Wind,
    Precipitation,
    Temperature,
}

impl ImpactFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactFactor::Wind => "wind",
            ImpactFactor::Precipitation => "precipitation",
            ImpactFactor::Temperature => "temperature",
        }
    }
}

impl std::fmt::Display for ImpactFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactSeverity {
    Low,
    Medium,
    High,
}

impl ImpactSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactSeverity::Low => "low",
            ImpactSeverity::Medium => "medium",
            ImpactSeverity::High => "high",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ImpactSeverity::Low => "·",
            ImpactSeverity::Medium => "⚠",
            ImpactSeverity::High => "!",
        }
    }
}

impl std::fmt::Display for ImpactSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One triggered rule outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactFinding {
    pub factor: ImpactFactor,
    pub severity: ImpactSeverity,
    pub score_delta: i32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Favorable,
    Challenging,
    Difficult,
}

impl Rating {
    /// Same thresholds for every play type
    pub fn from_score(total_score: i32) -> Self {
        if total_score >= -1 {
            Rating::Favorable
        } else if total_score >= -3 {
            Rating::Challenging
        } else {
            Rating::Difficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Favorable => "Favorable",
            Rating::Challenging => "Challenging",
            Rating::Difficult => "Difficult",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub rating: Rating,
    pub message: String,
}

impl Recommendation {
    pub fn for_score(play_type: PlayType, total_score: i32) -> Self {
        let rating = Rating::from_score(total_score);
        let message = match rating {
            Rating::Favorable => format!("Good conditions for {}", play_type),
            Rating::Challenging => format!("Exercise caution with {} plays", play_type),
            Rating::Difficult => format!("Consider limiting {} plays", play_type),
        };
        Self { rating, message }
    }
}

/// Aggregate impact for one play type. The score is always folded from the findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayTypeReport {
    play_type: PlayType,
    findings: Vec<ImpactFinding>,
}

impl PlayTypeReport {
    pub fn new(play_type: PlayType, findings: Vec<ImpactFinding>) -> Self {
        Self {
            play_type,
            findings,
        }
    }

    pub fn play_type(&self) -> PlayType {
        self.play_type
    }

    pub fn findings(&self) -> &[ImpactFinding] {
        &self.findings
    }

    pub fn total_score(&self) -> i32 {
        self.findings.iter().map(|f| f.score_delta).sum()
    }

    pub fn rating(&self) -> Rating {
        Rating::from_score(self.total_score())
    }

    pub fn recommendation(&self) -> Recommendation {
        Recommendation::for_score(self.play_type, self.total_score())
    }

    #[cfg(test)]
    pub fn finding_for(&self, factor: ImpactFactor) -> Option<&ImpactFinding> {
        self.findings.iter().find(|f| f.factor == factor)
    }
}

impl Serialize for PlayTypeReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PlayTypeReport", 4)?;
        state.serialize_field("play_type", &self.play_type)?;
        state.serialize_field("findings", &self.findings)?;
        state.serialize_field("total_score", &self.total_score())?;
        state.serialize_field("recommendation", &self.recommendation())?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayImpacts {
    pub passing: PlayTypeReport,
    pub running: PlayTypeReport,
    pub kicking: PlayTypeReport,
}

impl PlayImpacts {
    pub fn reports(&self) -> [&PlayTypeReport; 3] {
        [&self.passing, &self.running, &self.kicking]
    }
}
