use serde::Serialize;

/// Which direction of a property's numeric magnitude counts as better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherBetter,
    LowerBetter,
    /// Never highlighted
    Unclassified,
}

/// Per-cell comparison outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Best,
    Worst,
    Neutral,
}

/// Keys absent from this table are unclassified.
const POLARITY_TABLE: &[(&str, Polarity)] = &[
    ("youngsModulus", Polarity::HigherBetter),
    ("uts", Polarity::HigherBetter),
    ("flexuralMod", Polarity::HigherBetter),
    ("impactCharpy", Polarity::HigherBetter),
    ("notchedImpactCharpy", Polarity::HigherBetter),
    ("meltingTemp", Polarity::HigherBetter),
    ("specificHeatCap", Polarity::HigherBetter),
    ("thermalConductivity", Polarity::HigherBetter),
    ("electricalResistance", Polarity::HigherBetter),
    ("resistivity", Polarity::HigherBetter),
    ("density", Polarity::LowerBetter),
    ("waterAbsorption", Polarity::LowerBetter),
    ("frictionCoef", Polarity::LowerBetter),
    ("costPerKg", Polarity::LowerBetter),
];

impl Polarity {
    pub fn of(key: &str) -> Self {
        POLARITY_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, polarity)| *polarity)
            .unwrap_or(Polarity::Unclassified)
    }

    pub(crate) fn at_max(self) -> Highlight {
        match self {
            Polarity::HigherBetter => Highlight::Best,
            Polarity::LowerBetter => Highlight::Worst,
            Polarity::Unclassified => Highlight::Neutral,
        }
    }

    pub(crate) fn at_min(self) -> Highlight {
        match self {
            Polarity::HigherBetter => Highlight::Worst,
            Polarity::LowerBetter => Highlight::Best,
            Polarity::Unclassified => Highlight::Neutral,
        }
    }
}
