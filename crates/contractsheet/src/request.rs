//! Inbound contract payload.
//!
//! Field names follow the camelCase JSON the order form posts. Every field is
//! optional; absence and explicit values are kept distinct so the filler can
//! skip untouched cells while still clearing cells the caller blanked.

use contractsheet_common::CellValue;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::mapping::{ContractField, GoodsField};

/// A scalar as sent by the form: either a JSON number or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Text rendering; whole numbers print without a trailing `.0`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            FieldValue::Number(n) => n.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    /// Convert for writing. Numeric columns coerce numeric strings such as
    /// `"100.00"`; anything that does not parse stays text.
    pub fn to_cell_value(&self, numeric: bool) -> CellValue {
        match self {
            FieldValue::Number(n) => CellValue::Number(*n),
            FieldValue::Text(s) if numeric => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Text(s.clone()),
            },
            FieldValue::Text(s) => CellValue::Text(s.clone()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// One goods line; its position in `goodsData` decides its row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoodsLine {
    #[serde(alias = "name")]
    pub model: Option<FieldValue>,
    #[serde(alias = "specification")]
    pub description: Option<FieldValue>,
    pub color: Option<FieldValue>,
    pub quantity: Option<FieldValue>,
    pub unit_price: Option<FieldValue>,
    #[serde(alias = "amount")]
    pub total_amount: Option<FieldValue>,
}

impl GoodsLine {
    pub fn get(&self, field: GoodsField) -> Option<&FieldValue> {
        match field {
            GoodsField::Model => self.model.as_ref(),
            GoodsField::Description => self.description.as_ref(),
            GoodsField::Color => self.color.as_ref(),
            GoodsField::Quantity => self.quantity.as_ref(),
            GoodsField::UnitPrice => self.unit_price.as_ref(),
            GoodsField::TotalAmount => self.total_amount.as_ref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractRequest {
    pub buyer_name: Option<FieldValue>,
    pub buyer_phone: Option<FieldValue>,
    pub buyer_address: Option<FieldValue>,
    pub seller_name: Option<FieldValue>,
    pub seller_phone: Option<FieldValue>,
    pub seller_address: Option<FieldValue>,
    pub contract_number: Option<FieldValue>,
    pub contract_date: Option<FieldValue>,
    pub contract_location: Option<FieldValue>,
    pub bank_info: Option<FieldValue>,
    pub goods_data: Option<Vec<GoodsLine>>,
    pub port_of_loading: Option<FieldValue>,
    pub final_destination: Option<FieldValue>,
    pub transport_route: Option<FieldValue>,
    pub mode_of_shipment: Option<FieldValue>,
    pub payment_terms: Option<FieldValue>,
    pub total_amount: Option<FieldValue>,
    pub amount_in_words: Option<FieldValue>,
    pub f22_value: Option<FieldValue>,
}

impl ContractRequest {
    /// Parse a raw request body.
    ///
    /// An empty body, `null`, a non-object, or an object with no keys is
    /// rejected the same way as malformed JSON.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ContractError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ContractError::invalid("no data received"));
        }
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ContractError::invalid(format!("malformed JSON: {e}")))?;
        match &value {
            serde_json::Value::Object(map) if map.is_empty() => {
                return Err(ContractError::invalid("no data received"));
            }
            serde_json::Value::Object(_) => {}
            _ => return Err(ContractError::invalid("request body must be a JSON object")),
        }
        serde_json::from_value(value)
            .map_err(|e| ContractError::invalid(format!("invalid contract data: {e}")))
    }

    pub fn get(&self, field: ContractField) -> Option<&FieldValue> {
        match field {
            ContractField::BuyerName => self.buyer_name.as_ref(),
            ContractField::BuyerPhone => self.buyer_phone.as_ref(),
            ContractField::BuyerAddress => self.buyer_address.as_ref(),
            ContractField::SellerName => self.seller_name.as_ref(),
            ContractField::SellerPhone => self.seller_phone.as_ref(),
            ContractField::SellerAddress => self.seller_address.as_ref(),
            ContractField::ContractNumber => self.contract_number.as_ref(),
            ContractField::ContractDate => self.contract_date.as_ref(),
            ContractField::ContractLocation => self.contract_location.as_ref(),
            ContractField::BankInfo => self.bank_info.as_ref(),
            ContractField::PortOfLoading => self.port_of_loading.as_ref(),
            ContractField::FinalDestination => self.final_destination.as_ref(),
            ContractField::TransportRoute => self.transport_route.as_ref(),
            ContractField::ModeOfShipment => self.mode_of_shipment.as_ref(),
            ContractField::PaymentTerms => self.payment_terms.as_ref(),
            ContractField::TotalAmount => self.total_amount.as_ref(),
            ContractField::AmountInWords => self.amount_in_words.as_ref(),
            ContractField::F22Value => self.f22_value.as_ref(),
        }
    }

    pub fn goods(&self) -> &[GoodsLine] {
        self.goods_data.as_deref().unwrap_or(&[])
    }

    /// Contract number as text, if present and not blank.
    pub fn contract_number_text(&self) -> Option<String> {
        self.contract_number
            .as_ref()
            .filter(|v| !v.is_blank())
            .map(FieldValue::to_text)
    }

    /// Identity fields that some deployments insist on, missing or blank.
    pub fn missing_identity(&self) -> Vec<&'static str> {
        [ContractField::BuyerName, ContractField::ContractNumber]
            .into_iter()
            .filter(|f| self.get(*f).is_none_or(FieldValue::is_blank))
            .map(ContractField::json_name)
            .collect()
    }
}
