use medproto_core::models::study::ParameterDefinition;

use crate::Study;

/// Resting electrocardiography. Recorded per body position; see
/// `EcgPositionType` for the position presets.
pub struct Ecg;

impl Study for Ecg {
    fn id(&self) -> &str {
        "ecg"
    }

    fn name(&self) -> &str {
        "ЭКГ"
    }

    fn description(&self) -> &str {
        "Электрокардиография"
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        static PARAMETERS: std::sync::LazyLock<Vec<ParameterDefinition>> =
            std::sync::LazyLock::new(|| {
                vec![
                    ParameterDefinition::new("hr", "ЧСС", "уд/мин", 60.0, 90.0),
                    ParameterDefinition::new("pq", "PQ интервал", "мс", 120.0, 200.0),
                    ParameterDefinition::new("qrs", "QRS комплекс", "мс", 60.0, 100.0),
                    ParameterDefinition::new("qt", "QT интервал", "мс", 340.0, 440.0),
                ]
            });
        &PARAMETERS
    }
}
