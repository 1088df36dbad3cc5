use medproto_core::models::study::ParameterDefinition;

use crate::Study;

/// Spirometry (external respiration function).
/// Volumes in litres, flow in l/s, FEV1/FVC as a percentage.
pub struct Spirometry;

impl Study for Spirometry {
    fn id(&self) -> &str {
        "spirometry"
    }

    fn name(&self) -> &str {
        "Спирометрия"
    }

    fn description(&self) -> &str {
        "Исследование функции внешнего дыхания"
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        static PARAMETERS: std::sync::LazyLock<Vec<ParameterDefinition>> =
            std::sync::LazyLock::new(|| {
                vec![
                    ParameterDefinition::new("fvc", "ФЖЕЛ", "л", 3.5, 5.5),
                    ParameterDefinition::new("fev1", "ОФВ1", "л", 2.8, 4.5),
                    ParameterDefinition::new("fev1_fvc", "ОФВ1/ФЖЕЛ", "%", 70.0, 85.0),
                    ParameterDefinition::new("pef", "ПСВ", "л/с", 5.0, 10.0),
                ]
            });
        &PARAMETERS
    }
}
