use serde::{Deserialize, Serialize};

/// What the PI sheet receives. Row visibility is applied to it regardless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiFill {
    /// Same fields and goods rows as SC.
    #[default]
    Full,
    GoodsOnly,
    None,
}

/// Handling of values that are present in the payload but falsy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValues {
    /// Write them, clearing whatever the template held.
    #[default]
    Write,
    /// Leave the template cell alone for empty strings and zeros.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub sc_sheet: String,
    pub pi_sheet: String,
    pub pi_fill: PiFill,
    pub empty_values: EmptyValues,
    /// Strip bold from every cell the generator writes.
    pub never_bold: bool,
    /// Reject requests without `buyerName` and `contractNumber`.
    pub require_identity: bool,
    pub default_date_to_today: bool,
    pub dedupe_route_words: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sc_sheet: "SC".to_string(),
            pi_sheet: "PI".to_string(),
            pi_fill: PiFill::Full,
            empty_values: EmptyValues::Write,
            never_bold: false,
            require_identity: false,
            default_date_to_today: true,
            dedupe_route_words: false,
        }
    }
}

impl GeneratorConfig {
    pub fn pi_gets_fields(&self) -> bool {
        self.pi_fill == PiFill::Full
    }

    pub fn pi_gets_goods(&self) -> bool {
        self.pi_fill != PiFill::None
    }

    pub fn skip_falsy(&self) -> bool {
        self.empty_values == EmptyValues::Skip
    }
}
