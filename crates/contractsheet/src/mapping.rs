//! Declarative field → cell table shared by the SC and PI sheets.
//!
//! Both sheets use the same layout, so one table drives every field write
//! instead of a hand-written list per sheet.

use serde::Serialize;

/// A scalar field of the contract payload that has a home cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractField {
    BuyerName,
    BuyerPhone,
    BuyerAddress,
    SellerName,
    SellerPhone,
    SellerAddress,
    ContractNumber,
    ContractDate,
    ContractLocation,
    BankInfo,
    PortOfLoading,
    FinalDestination,
    TransportRoute,
    ModeOfShipment,
    PaymentTerms,
    TotalAmount,
    AmountInWords,
    #[serde(rename = "f22Value")]
    F22Value,
}

impl ContractField {
    pub const fn json_name(self) -> &'static str {
        match self {
            ContractField::BuyerName => "buyerName",
            ContractField::BuyerPhone => "buyerPhone",
            ContractField::BuyerAddress => "buyerAddress",
            ContractField::SellerName => "sellerName",
            ContractField::SellerPhone => "sellerPhone",
            ContractField::SellerAddress => "sellerAddress",
            ContractField::ContractNumber => "contractNumber",
            ContractField::ContractDate => "contractDate",
            ContractField::ContractLocation => "contractLocation",
            ContractField::BankInfo => "bankInfo",
            ContractField::PortOfLoading => "portOfLoading",
            ContractField::FinalDestination => "finalDestination",
            ContractField::TransportRoute => "transportRoute",
            ContractField::ModeOfShipment => "modeOfShipment",
            ContractField::PaymentTerms => "paymentTerms",
            ContractField::TotalAmount => "totalAmount",
            ContractField::AmountInWords => "amountInWords",
            ContractField::F22Value => "f22Value",
        }
    }

    /// Numeric strings are stored as numbers for these fields.
    pub const fn is_numeric(self) -> bool {
        matches!(self, ContractField::TotalAmount)
    }
}

/// When a field is written relative to the goods band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStage {
    /// Header block: parties, contract number, bank details.
    Parties,
    /// Footer block below the goods band: totals, shipment, payment.
    Terms,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub field: ContractField,
    pub cell: &'static str,
    pub stage: FillStage,
}

const fn bind(field: ContractField, cell: &'static str, stage: FillStage) -> FieldBinding {
    FieldBinding { field, cell, stage }
}

pub const CONTRACT_FIELDS: &[FieldBinding] = &[
    bind(ContractField::BuyerName, "C3", FillStage::Parties),
    bind(ContractField::BuyerAddress, "C4", FillStage::Parties),
    bind(ContractField::BuyerPhone, "C5", FillStage::Parties),
    bind(ContractField::SellerName, "C6", FillStage::Parties),
    bind(ContractField::SellerAddress, "C7", FillStage::Parties),
    bind(ContractField::SellerPhone, "C8", FillStage::Parties),
    bind(ContractField::ContractNumber, "G3", FillStage::Parties),
    bind(ContractField::ContractDate, "G4", FillStage::Parties),
    bind(ContractField::ContractLocation, "G5", FillStage::Parties),
    bind(ContractField::BankInfo, "E7", FillStage::Parties),
    bind(ContractField::TotalAmount, "G21", FillStage::Terms),
    bind(ContractField::PortOfLoading, "D21", FillStage::Terms),
    bind(ContractField::FinalDestination, "D22", FillStage::Terms),
    bind(ContractField::F22Value, "F22", FillStage::Terms),
    bind(ContractField::AmountInWords, "B23", FillStage::Terms),
    bind(ContractField::PaymentTerms, "D24", FillStage::Terms),
    bind(ContractField::TransportRoute, "D25", FillStage::Terms),
    bind(ContractField::ModeOfShipment, "D26", FillStage::Terms),
];

pub fn bindings_for(stage: FillStage) -> impl Iterator<Item = &'static FieldBinding> {
    CONTRACT_FIELDS.iter().filter(move |b| b.stage == stage)
}

pub fn cell_for(field: ContractField) -> Option<&'static str> {
    CONTRACT_FIELDS
        .iter()
        .find(|b| b.field == field)
        .map(|b| b.cell)
}

/// A per-line field of a goods entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GoodsField {
    Model,
    Description,
    Color,
    Quantity,
    UnitPrice,
    TotalAmount,
}

impl GoodsField {
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            GoodsField::Quantity | GoodsField::UnitPrice | GoodsField::TotalAmount
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GoodsColumn {
    pub field: GoodsField,
    pub column: &'static str,
}

pub const GOODS_COLUMNS: &[GoodsColumn] = &[
    GoodsColumn { field: GoodsField::Model, column: "B" },
    GoodsColumn { field: GoodsField::Description, column: "C" },
    GoodsColumn { field: GoodsField::Color, column: "D" },
    GoodsColumn { field: GoodsField::Quantity, column: "E" },
    GoodsColumn { field: GoodsField::UnitPrice, column: "F" },
    GoodsColumn { field: GoodsField::TotalAmount, column: "G" },
];
