use medproto_core::models::study::ParameterDefinition;

use crate::Study;

/// Transthoracic echocardiography.
pub struct Echo;

impl Study for Echo {
    fn id(&self) -> &str {
        "echo"
    }

    fn name(&self) -> &str {
        "ЭхоКГ"
    }

    fn description(&self) -> &str {
        "Эхокардиография"
    }

    fn parameters(&self) -> &[ParameterDefinition] {
        static PARAMETERS: std::sync::LazyLock<Vec<ParameterDefinition>> =
            std::sync::LazyLock::new(|| {
                vec![
                    ParameterDefinition::new("lvef", "ФВ ЛЖ", "%", 55.0, 70.0),
                    ParameterDefinition::new("lv_edv", "КДО ЛЖ", "мл", 65.0, 195.0),
                    ParameterDefinition::new("lv_esv", "КСО ЛЖ", "мл", 18.0, 70.0),
                    ParameterDefinition::new("ivs", "МЖП", "мм", 7.0, 11.0),
                ]
            });
        &PARAMETERS
    }
}
