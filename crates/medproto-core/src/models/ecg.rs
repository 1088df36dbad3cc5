use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body position an ECG recording was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EcgPositionKind {
    Lying,
    Inhale,
    Standing,
    Exercise,
}

impl EcgPositionKind {
    pub fn label(&self) -> &'static str {
        match self {
            EcgPositionKind::Lying => "Лежа",
            EcgPositionKind::Inhale => "На вдохе",
            EcgPositionKind::Standing => "Стоя",
            EcgPositionKind::Exercise => "После физ. нагрузки",
        }
    }
}

/// Preset combination of positions recorded in one ECG study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EcgPositionType {
    Lying,
    LyingInhale,
    LyingStanding,
    LyingStandingExercise,
    Custom,
}

impl EcgPositionType {
    pub fn label(&self) -> &'static str {
        match self {
            EcgPositionType::Lying => "Лежа",
            EcgPositionType::LyingInhale => "Лежа + на вдохе",
            EcgPositionType::LyingStanding => "Лежа + Стоя",
            EcgPositionType::LyingStandingExercise => "Лежа + Стоя + физ. нагрузка",
            EcgPositionType::Custom => "Дополнительные позиции",
        }
    }

    /// Positions recorded for this preset. `Custom` starts from lying and
    /// the operator adds the rest by hand.
    pub fn positions(&self) -> Vec<EcgPositionKind> {
        use EcgPositionKind::*;
        match self {
            EcgPositionType::Lying | EcgPositionType::Custom => vec![Lying],
            EcgPositionType::LyingInhale => vec![Lying, Inhale],
            EcgPositionType::LyingStanding => vec![Lying, Standing],
            EcgPositionType::LyingStandingExercise => vec![Lying, Standing, Exercise],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EcgRhythm {
    Sinus,
    Migration,
    Atrial,
    AvNodal,
    AtrialFibrillation,
    Idioventricular,
    SupraventricularTachycardia,
    AvNodalTachycardia,
    VentricularTachycardia,
    Custom,
}

impl EcgRhythm {
    pub fn label(&self) -> &'static str {
        match self {
            EcgRhythm::Sinus => "синусовый",
            EcgRhythm::Migration => "миграция водителя ритма",
            EcgRhythm::Atrial => "предсердный",
            EcgRhythm::AvNodal => "АВ узловой",
            EcgRhythm::AtrialFibrillation => "фибрилляция предсердий",
            EcgRhythm::Idioventricular => "идиовентрикулярный",
            EcgRhythm::SupraventricularTachycardia => "наджелудочковая тахикардия",
            EcgRhythm::AvNodalTachycardia => "АВ узловая тахикардия",
            EcgRhythm::VentricularTachycardia => "желудочковая тахикардия",
            EcgRhythm::Custom => "Другое (ввести вручную)",
        }
    }
}

/// Electrical axis of the heart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EcgAxis {
    Normal,
    Vertical,
    Horizontal,
    Right,
    Left,
    SharpRight,
    SharpLeft,
    SType,
    Custom,
}

impl EcgAxis {
    pub fn label(&self) -> &'static str {
        match self {
            EcgAxis::Normal => "нормальное положение",
            EcgAxis::Vertical => "вертикальное положение",
            EcgAxis::Horizontal => "горизонтальное положение",
            EcgAxis::Right => "отклонена вправо",
            EcgAxis::Left => "отклонена влево",
            EcgAxis::SharpRight => "резко отклонена вправо",
            EcgAxis::SharpLeft => "резко отклонена влево",
            EcgAxis::SType => "S тип",
            EcgAxis::Custom => "Другое (ввести вручную)",
        }
    }
}

/// Measurements and rhythm description for one recording position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EcgPosition {
    pub position: EcgPositionKind,
    pub rhythm: EcgRhythm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhythm_custom: Option<String>,
    pub axis: EcgAxis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_custom: Option<String>,
    #[serde(default)]
    pub results: IndexMap<String, f64>,
}

impl EcgPosition {
    /// A blank position with sinus rhythm and a normal axis.
    pub fn new(position: EcgPositionKind) -> Self {
        Self {
            position,
            rhythm: EcgRhythm::Sinus,
            rhythm_custom: None,
            axis: EcgAxis::Normal,
            axis_custom: None,
            results: IndexMap::new(),
        }
    }

    /// Rhythm wording, preferring the free-text entry when `Custom` is
    /// selected and the text is non-empty.
    pub fn rhythm_text(&self) -> &str {
        match (self.rhythm, self.rhythm_custom.as_deref()) {
            (EcgRhythm::Custom, Some(text)) if !text.trim().is_empty() => text,
            (rhythm, _) => rhythm.label(),
        }
    }

    pub fn axis_text(&self) -> &str {
        match (self.axis, self.axis_custom.as_deref()) {
            (EcgAxis::Custom, Some(text)) if !text.trim().is_empty() => text,
            (axis, _) => axis.label(),
        }
    }
}
