// src/types.rs
use std::fmt;
/// Score at/above which the HUD switches to the high-alert band and the
/// "deepfake" status.
pub const ALERT_THRESHOLD: u8 = 60;
/// Score below which the HUD shows the low-alert band.
pub const CAUTION_THRESHOLD: u8 = 30;
// 每个 tick 引擎返回给渲染端的结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineOutput {
    /// Window still filling; percent of capacity reached, rounded down.
    Calibrating { percent: u8 },
    /// Window full and scored. `probability` is this window's raw estimate,
    /// `score` the smoothed value meant for display.
    Scored { probability: u8, score: u8 },
    /// No face this tick; nothing was buffered or scored.
    Obscured,
}
impl EngineOutput {
    pub fn score(&self) -> Option<u8> {
        match self {
            EngineOutput::Scored { score, .. } => Some(*score),
            _ => None,
        }
    }
    pub fn band(&self) -> Option<AlertBand> {
        self.score().map(AlertBand::from_score)
    }
    pub fn status(&self) -> Option<StatusLabel> {
        self.score().map(StatusLabel::from_score)
    }
    /// Big number on the HUD.
    pub fn headline(&self) -> String {
        match self {
            EngineOutput::Calibrating { percent } => format!("{percent}%"),
            EngineOutput::Scored { score, .. } => format!("{score}%"),
            EngineOutput::Obscured => "---".to_owned(),
        }
    }
    /// Status line under the headline.
    pub fn status_text(&self) -> &'static str {
        match self {
            EngineOutput::Calibrating { .. } => "CALIBRATING",
            EngineOutput::Scored { score, .. } => StatusLabel::from_score(*score).text(),
            EngineOutput::Obscured => "TARGET OBSCURED",
        }
    }
}
impl fmt::Display for EngineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}  {}", self.headline(), self.status_text())
    }
}
// 三档颜色
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertBand {
    Low,
    Caution,
    High,
}
impl AlertBand {
    pub fn from_score(score: u8) -> Self {
        if score < CAUTION_THRESHOLD {
            AlertBand::Low
        } else if score < ALERT_THRESHOLD {
            AlertBand::Caution
        } else {
            AlertBand::High
        }
    }
    /// HUD color as `#rrggbb`.
    pub fn hex_color(&self) -> &'static str {
        match self {
            AlertBand::Low => "#00ffcc",
            AlertBand::Caution => "#ffcc00",
            AlertBand::High => "#ff3300",
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLabel {
    Verified,
    Alert,
}
impl StatusLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= ALERT_THRESHOLD {
            StatusLabel::Alert
        } else {
            StatusLabel::Verified
        }
    }
    pub fn text(&self) -> &'static str {
        match self {
            StatusLabel::Verified => "TARGET: BIOMETRIC VERIFIED",
            StatusLabel::Alert => "THREAT: DEEPFAKE DETECTED",
        }
    }
}
