//! Registry of the twenty sensor variables.
//!
//! Every per-variable rule lives in [`DESCRIPTORS`]: display title, card
//! icon, tier boundaries, explanatory texts, badge severities and colours. The
//! classifier and the status mapper only read this table.

use std::fmt;

use crate::status::palette::{BLUE, GREEN, RED, YELLOW};
use crate::status::Severity;

// ---

/// Known variables, in the order the backend sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableId {
    Temperature,
    Humidity,
    WindSpeed,
    Pressure,
    Luminosity,
    SoilMoisture,
    Eto,
    TmaxC,
    TminC,
    Tmean,
    Rs,
    Rns,
    Ra,
    Rso,
    Rnl,
    Rn,
    Delta,
    Gamma,
    Es,
    Ea,
}

impl VariableId {
    pub const ALL: [VariableId; 20] = [
        VariableId::Temperature,
        VariableId::Humidity,
        VariableId::WindSpeed,
        VariableId::Pressure,
        VariableId::Luminosity,
        VariableId::SoilMoisture,
        VariableId::Eto,
        VariableId::TmaxC,
        VariableId::TminC,
        VariableId::Tmean,
        VariableId::Rs,
        VariableId::Rns,
        VariableId::Ra,
        VariableId::Rso,
        VariableId::Rnl,
        VariableId::Rn,
        VariableId::Delta,
        VariableId::Gamma,
        VariableId::Es,
        VariableId::Ea,
    ];

    /// Wire key as used in the `/sensors` payload.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn from_key(key: &str) -> Option<VariableId> {
        DESCRIPTORS.iter().find(|d| d.key == key).map(|d| d.id)
    }

    pub fn descriptor(self) -> &'static VariableDescriptor {
        &DESCRIPTORS[self as usize]
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Static description of one variable.
#[derive(Debug)]
pub struct VariableDescriptor {
    pub id: VariableId,
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub rating: Rating,
}

/// Whether a variable has agronomic tiers at all.
#[derive(Debug)]
pub enum Rating {
    Tiered(Bands),
    /// Physical-model intermediates: one fixed text whatever the value.
    Informational(&'static str),
}

/// Low when `value < low_below`, ideal up to and including `high_above`,
/// high beyond it. Each tier carries its severity and its badge colour.
#[derive(Debug)]
pub struct Bands {
    pub low_below: f64,
    pub high_above: f64,
    pub low_text: &'static str,
    pub ideal_text: &'static str,
    pub high_text: &'static str,
    pub low: Severity,
    pub ideal: Severity,
    pub high: Severity,
    pub low_color: &'static str,
    pub ideal_color: &'static str,
    pub high_color: &'static str,
}

use Severity::{Caution, Nominal, Warning};

/// Indexed by `VariableId as usize`.
pub static DESCRIPTORS: [VariableDescriptor; 20] = [
    VariableDescriptor {
        id: VariableId::Temperature,
        key: "temperature",
        title: "Temperatura",
        icon: "/images/temperature.png",
        rating: Rating::Tiered(Bands {
            low_below: 15.0,
            high_above: 25.0,
            low_text: "Baixa: A temperatura abaixo de 15°C pode retardar o crescimento da maioria das plantas, reduzindo a fotossíntese e a absorção de nutrientes.",
            ideal_text: "Ideal: Temperatura ótima para o desenvolvimento da maioria das culturas, favorecendo a fotossíntese e o crescimento equilibrado.",
            high_text: "Alta: Temperaturas acima de 25°C podem causar estresse térmico nas plantas, reduzindo a eficiência da fotossíntese e aumentando a demanda por água.",
            low: Caution,
            ideal: Nominal,
            high: Warning,
            low_color: BLUE,
            ideal_color: GREEN,
            high_color: RED,
        }),
    },
    VariableDescriptor {
        id: VariableId::Humidity,
        key: "humidity",
        title: "Umidade",
        icon: "/images/humidity.png",
        rating: Rating::Tiered(Bands {
            low_below: 30.0,
            high_above: 60.0,
            low_text: "Baixa: Umidade relativa baixa pode causar perda excessiva de água pelas plantas através da transpiração, levando ao murchamento e estresse hídrico.",
            ideal_text: "Ideal: Faixa adequada de umidade para a transpiração eficiente e troca gasosa nas folhas, sem causar estresse hídrico nas plantas.",
            high_text: "Alta: Umidade alta pode promover o desenvolvimento de doenças fúngicas nas plantas, além de reduzir a evapotranspiração.",
            low: Caution,
            ideal: Nominal,
            // fungal risk
            high: Warning,
            low_color: YELLOW,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::WindSpeed,
        key: "windSpeed",
        title: "Velocidade do Vento",
        icon: "/images/wind.png",
        rating: Rating::Tiered(Bands {
            low_below: 1.0,
            high_above: 5.0,
            low_text: "Baixa: Velocidades de vento muito baixas podem limitar a polinização natural de algumas culturas que dependem do vento.",
            ideal_text: "Ideal: Velocidades de vento moderadas ajudam na polinização, na dispersão de sementes e na circulação de ar, sem causar danos.",
            high_text: "Alta: Velocidades acima de 5 m/s podem causar danos físicos às plantas, como quebra de ramos, e aumentar a evapotranspiração, desidratando o solo.",
            low: Caution,
            ideal: Nominal,
            high: Warning,
            low_color: BLUE,
            ideal_color: GREEN,
            high_color: RED,
        }),
    },
    VariableDescriptor {
        id: VariableId::Pressure,
        key: "pressure",
        title: "Pressão",
        icon: "/images/pressure.png",
        rating: Rating::Tiered(Bands {
            low_below: 90.0,
            high_above: 105.0,
            low_text: "Baixa: Baixa pressão atmosférica pode indicar tempestades ou mudanças climáticas severas, afetando negativamente o desenvolvimento das culturas.",
            ideal_text: "Ideal: Pressão atmosférica normal, sem impacto direto negativo sobre as plantas ou o ambiente agrícola.",
            high_text: "Alta: Alta pressão pode estar associada a tempo seco e quente, o que pode aumentar a necessidade de irrigação.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Luminosity,
        key: "luminosity",
        title: "Luminosidade",
        icon: "/images/luminosity.png",
        rating: Rating::Tiered(Bands {
            low_below: 300.0,
            high_above: 800.0,
            low_text: "Baixa: Luminosidade insuficiente pode prejudicar a fotossíntese, resultando em crescimento reduzido e baixa produtividade das plantas.",
            ideal_text: "Ideal: Luminosidade adequada para a maioria das culturas, proporcionando energia suficiente para uma fotossíntese eficiente.",
            high_text: "Alta: Excesso de luz pode causar queimaduras nas folhas e frutos, além de aumentar a necessidade de água devido à maior evapotranspiração.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::SoilMoisture,
        key: "soilMoisture",
        title: "Umidade do Solo",
        icon: "/images/soil-moisture.png",
        rating: Rating::Tiered(Bands {
            low_below: 20.0,
            high_above: 50.0,
            low_text: "Baixa: Baixa umidade do solo indica seca, podendo causar murchamento e falhas no desenvolvimento radicular das plantas.",
            ideal_text: "Ideal: Umidade do solo suficiente para o desenvolvimento saudável das plantas e para suportar a evapotranspiração.",
            high_text: "Alta: Excesso de umidade no solo pode levar ao encharcamento, reduzindo a oxigenação das raízes e aumentando o risco de doenças.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Eto,
        key: "ETo",
        title: "Evapotranspiração (ETo)",
        icon: "/images/evapotranspiration.png",
        rating: Rating::Tiered(Bands {
            low_below: 2.0,
            high_above: 5.0,
            low_text: "Baixa: Baixa evapotranspiração indica baixa demanda de água pelas plantas, geralmente em condições úmidas e frias.",
            ideal_text: "Ideal: Nível adequado de evapotranspiração para a maioria das culturas, refletindo um equilíbrio hídrico saudável.",
            high_text: "Alta: Evapotranspiração alta indica alta demanda de água pelas plantas, podendo sinalizar a necessidade de irrigação adicional.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::TmaxC,
        key: "TmaxC",
        title: "Temperatura Máxima (Tmax)",
        icon: "/images/temperature-max.png",
        rating: Rating::Tiered(Bands {
            low_below: 20.0,
            high_above: 30.0,
            low_text: "Baixa: Temperatura máxima baixa pode resultar em baixo crescimento das plantas e reduzir a atividade metabólica.",
            ideal_text: "Ideal: Temperatura máxima dentro da faixa ideal para promover o crescimento e desenvolvimento saudável da maioria das culturas.",
            high_text: "Alta: Temperaturas máximas muito altas podem causar estresse térmico nas plantas, aumentando a evapotranspiração e a necessidade de irrigação.",
            low: Caution,
            ideal: Nominal,
            high: Warning,
            low_color: BLUE,
            ideal_color: GREEN,
            high_color: RED,
        }),
    },
    VariableDescriptor {
        id: VariableId::TminC,
        key: "TminC",
        title: "Temperatura Mínima (Tmin)",
        icon: "/images/temperature-min.png",
        rating: Rating::Tiered(Bands {
            low_below: 5.0,
            high_above: 15.0,
            low_text: "Baixa: Temperaturas mínimas muito baixas podem causar danos por geada nas plantas, afetando a qualidade e rendimento das culturas.",
            ideal_text: "Ideal: Temperaturas mínimas dentro de uma faixa segura para a maioria das culturas, sem risco de danos por geada.",
            high_text: "Alta: Temperaturas mínimas altas podem reduzir a respiração noturna das plantas, afetando o crescimento e acúmulo de nutrientes.",
            low: Caution,
            ideal: Nominal,
            high: Warning,
            low_color: BLUE,
            ideal_color: GREEN,
            high_color: RED,
        }),
    },
    VariableDescriptor {
        id: VariableId::Tmean,
        key: "Tmean",
        title: "Temperatura Média (Tmean)",
        icon: "/images/temperature-mean.png",
        rating: Rating::Tiered(Bands {
            low_below: 10.0,
            high_above: 25.0,
            low_text: "Baixa: Temperatura média baixa pode retardar o desenvolvimento das culturas e prolongar o ciclo de crescimento.",
            ideal_text: "Ideal: Temperatura média dentro de uma faixa ideal para o desenvolvimento equilibrado das culturas.",
            high_text: "Alta: Temperatura média elevada pode indicar estresse térmico nas plantas, exigindo maior manejo de irrigação e sombreamento.",
            low: Caution,
            ideal: Nominal,
            high: Warning,
            low_color: BLUE,
            ideal_color: GREEN,
            high_color: RED,
        }),
    },
    VariableDescriptor {
        id: VariableId::Rs,
        key: "Rs",
        title: "Radiação Solar (Rs)",
        icon: "/images/radiation-solar.png",
        rating: Rating::Tiered(Bands {
            low_below: 10.0,
            high_above: 20.0,
            low_text: "Baixa: Radiação solar baixa pode limitar a fotossíntese, afetando negativamente o crescimento das plantas e a produtividade.",
            ideal_text: "Ideal: Radiação solar adequada para promover a fotossíntese eficiente e o crescimento das culturas.",
            high_text: "Alta: Radiação solar excessiva pode causar superaquecimento das plantas, aumento da evapotranspiração e possíveis danos às folhas.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Rns,
        key: "Rns",
        title: "Radiação Solar Líquida (Rns)",
        icon: "/images/radiation-solar-net.png",
        rating: Rating::Tiered(Bands {
            low_below: 5.0,
            high_above: 15.0,
            low_text: "Baixa: Radiação solar líquida baixa pode indicar condições nubladas, reduzindo a eficiência da fotossíntese.",
            ideal_text: "Ideal: Radiação líquida dentro de uma faixa ideal para manter a fotossíntese equilibrada.",
            high_text: "Alta: Excesso de radiação líquida pode aumentar o estresse térmico nas plantas e elevar as necessidades de irrigação.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Ra,
        key: "Ra",
        title: "Radiação Extraterrestre (Ra)",
        icon: "/images/extraterrestrial-radiation.png",
        rating: Rating::Tiered(Bands {
            low_below: 5.0,
            high_above: 10.0,
            low_text: "Baixa: Radiação extraterrestre baixa pode indicar condições com baixa luminosidade, limitando a energia solar disponível para as plantas.",
            ideal_text: "Ideal: Radiação extraterrestre adequada para suportar a fotossíntese eficiente e o desenvolvimento das culturas.",
            high_text: "Alta: Radiação extraterrestre elevada pode levar a um excesso de radiação solar, aumentando a temperatura e a evapotranspiração.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Rso,
        key: "Rso",
        title: "Radiação de Céu Limpo (Rso)",
        icon: "/images/clear-sky-radiation.png",
        rating: Rating::Tiered(Bands {
            low_below: 5.0,
            high_above: 10.0,
            low_text: "Baixa: Radiação de céu limpo baixa pode indicar condições atmosféricas densas ou nubladas, reduzindo a fotossíntese.",
            ideal_text: "Ideal: Radiação de céu limpo adequada para garantir uma fotossíntese eficiente.",
            high_text: "Alta: Radiação de céu limpo elevada pode aumentar a carga térmica nas plantas, exigindo práticas de manejo para evitar superaquecimento.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Rnl,
        key: "Rnl",
        title: "Radiação de Onda Longa Líquida (Rnl)",
        icon: "/images/longwave-radiation.png",
        rating: Rating::Tiered(Bands {
            low_below: 2.0,
            high_above: 5.0,
            low_text: "Baixa: Radiação de onda longa líquida baixa pode indicar perda de calor à noite, podendo provocar geadas em algumas culturas.",
            ideal_text: "Ideal: Radiação de onda longa líquida dentro da faixa normal, mantendo o equilíbrio térmico.",
            high_text: "Alta: Radiação de onda longa elevada pode refletir condições de calor excessivo à noite, dificultando o resfriamento das plantas.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Rn,
        key: "Rn",
        title: "Radiação Líquida (Rn)",
        icon: "/images/net-radiation.png",
        rating: Rating::Tiered(Bands {
            low_below: 10.0,
            high_above: 20.0,
            low_text: "Baixa: Radiação líquida baixa pode indicar limitação na energia disponível para o crescimento das plantas.",
            ideal_text: "Ideal: Radiação líquida adequada para promover o desenvolvimento saudável das plantas.",
            high_text: "Alta: Excesso de radiação líquida pode aumentar a evapotranspiração e o estresse térmico.",
            low: Warning,
            ideal: Nominal,
            high: Caution,
            low_color: RED,
            ideal_color: GREEN,
            high_color: BLUE,
        }),
    },
    VariableDescriptor {
        id: VariableId::Delta,
        key: "delta",
        title: "Inclinação da Curva de Pressão de Vapor Saturado (Delta)",
        icon: "/images/evapotranspiration-delta.png",
        rating: Rating::Informational(
            "Delta representa a inclinação da curva de pressão de vapor saturado, usada no cálculo da evapotranspiração. Este valor influencia a estimativa da demanda hídrica das plantas.",
        ),
    },
    VariableDescriptor {
        id: VariableId::Gamma,
        key: "gamma",
        title: "Coeficiente Psicrométrico (Gamma)",
        icon: "/images/psychrometric-coefficient.png",
        rating: Rating::Informational(
            "Gamma é o coeficiente psicrométrico, utilizado no cálculo da evapotranspiração, e ajuda a determinar a demanda de água pela planta com base na temperatura e pressão do ar.",
        ),
    },
    VariableDescriptor {
        id: VariableId::Es,
        key: "es",
        title: "Pressão de Vapor Saturado (es)",
        icon: "/images/saturation-vapor-pressure.png",
        rating: Rating::Informational(
            "Es representa a pressão de vapor saturado, indicando a quantidade máxima de vapor d'água que o ar pode conter a uma determinada temperatura. Altos valores indicam potencial para maior transpiração das plantas.",
        ),
    },
    VariableDescriptor {
        id: VariableId::Ea,
        key: "ea",
        title: "Pressão Real de Vapor (ea)",
        icon: "/images/actual-vapor-pressure.png",
        rating: Rating::Informational(
            "Ea representa a pressão real de vapor, que é a quantidade atual de vapor d'água no ar. Diferenças entre es e ea indicam a demanda de evapotranspiração.",
        ),
    },
];

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_table_is_indexed_by_id() {
        // ---
        for id in VariableId::ALL {
            assert_eq!(id.descriptor().id, id, "descriptor out of place for {id:?}");
        }
    }

    #[test]
    fn test_keys_round_trip_and_are_unique() {
        // ---
        for id in VariableId::ALL {
            assert_eq!(VariableId::from_key(id.key()), Some(id));
            assert_eq!(id.to_string(), id.key());
        }
        assert_eq!(VariableId::from_key("Temperature"), None);
        assert_eq!(VariableId::from_key("co2"), None);
    }

    #[test]
    fn test_exactly_four_untiered() {
        // ---
        let untiered: Vec<_> = VariableId::ALL
            .iter()
            .filter(|id| matches!(id.descriptor().rating, Rating::Informational(_)))
            .map(|id| id.key())
            .collect();

        assert_eq!(untiered, vec!["delta", "gamma", "es", "ea"]);
    }

    #[test]
    fn test_bands_are_ordered() {
        // ---
        for d in &DESCRIPTORS {
            if let Rating::Tiered(b) = &d.rating {
                assert!(b.low_below < b.high_above, "{} bands inverted", d.key);
                assert!(b.low_text.starts_with("Baixa: "), "{}", d.key);
                assert!(b.ideal_text.starts_with("Ideal: "), "{}", d.key);
                assert!(b.high_text.starts_with("Alta: "), "{}", d.key);
                assert_eq!(b.ideal_color, GREEN, "{}", d.key);
                assert_ne!(b.low_color, b.high_color, "{}", d.key);
            }
        }
    }
}
