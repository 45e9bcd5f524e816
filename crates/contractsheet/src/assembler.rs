//! Contract Document Assembler: request in, xlsx bytes out.

use chrono::{Local, NaiveDateTime};
use contractsheet_common::CellValue;
use contractsheet_workbook::WorkbookError;

use crate::config::GeneratorConfig;
use crate::error::ContractError;
use crate::filler::{FillOptions, FillReport, TemplateFiller};
use crate::goods::{GoodsTargets, apply_goods_rows};
use crate::mapping::{ContractField, FillStage, bindings_for};
use crate::request::{ContractRequest, FieldValue};
use crate::template::{TemplateInfo, TemplateSource, template_info};
use crate::transform::{
    contract_date_for, dedupe_route_words, format_contract_date, sanitize_filename_stem,
    shipment_mode_label,
};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A finished document ready to be sent.
#[derive(Clone, Debug)]
pub struct GeneratedContract {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub report: FillReport,
}

impl GeneratedContract {
    pub fn content_disposition(&self) -> String {
        content_disposition(&self.filename)
    }
}

#[derive(Clone, Debug)]
pub struct ContractAssembler {
    template: TemplateSource,
    config: GeneratorConfig,
}

impl ContractAssembler {
    pub fn new(template: TemplateSource, config: GeneratorConfig) -> Self {
        Self { template, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn template(&self) -> &TemplateSource {
        &self.template
    }

    pub fn template_info(&self) -> Result<TemplateInfo, ContractError> {
        template_info(&self.template)
    }

    /// Parse a raw body and generate from it.
    pub fn generate_from_slice(&self, body: &[u8]) -> Result<GeneratedContract, ContractError> {
        let request = ContractRequest::from_json_slice(body)?;
        self.generate(&request)
    }

    pub fn generate(&self, request: &ContractRequest) -> Result<GeneratedContract, ContractError> {
        self.generate_at(request, Local::now().naive_local())
    }

    /// Generate with an explicit clock, used for the date default and the
    /// fallback filename.
    pub fn generate_at(
        &self,
        request: &ContractRequest,
        now: NaiveDateTime,
    ) -> Result<GeneratedContract, ContractError> {
        let cfg = &self.config;
        if cfg.require_identity {
            let missing = request.missing_identity();
            if !missing.is_empty() {
                return Err(ContractError::invalid(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )));
            }
        }

        let mut workbook = self.template.open()?;
        let sc = cfg.sc_sheet.as_str();
        if !workbook.has_sheet(sc) {
            return Err(ContractError::generation(WorkbookError::SheetNotFound(
                sc.to_string(),
            )));
        }
        let pi = if workbook.has_sheet(&cfg.pi_sheet) {
            Some(cfg.pi_sheet.as_str())
        } else {
            tracing::warn!(sheet = %cfg.pi_sheet, "PI sheet missing from template; filling SC only");
            None
        };

        let field_sheets: Vec<&str> = std::iter::once(sc)
            .chain(pi.filter(|_| cfg.pi_gets_fields()))
            .collect();
        let goods = GoodsTargets {
            visibility: std::iter::once(sc).chain(pi).collect(),
            fill: std::iter::once(sc)
                .chain(pi.filter(|_| cfg.pi_gets_goods()))
                .collect(),
        };

        let mut filler = TemplateFiller::new(
            &mut workbook,
            FillOptions {
                clear_bold: cfg.never_bold,
                skip_falsy: cfg.skip_falsy(),
            },
        );
        self.write_stage(&mut filler, &field_sheets, request, FillStage::Parties, now);
        apply_goods_rows(&mut filler, &goods, request.goods()).map_err(ContractError::generation)?;
        self.write_stage(&mut filler, &field_sheets, request, FillStage::Terms, now);
        let report = filler.finish();

        let bytes = workbook
            .save_to_bytes()
            .map_err(ContractError::generation)?;
        let filename = derive_filename(request.contract_number_text().as_deref(), now);

        tracing::info!(
            filename = %filename,
            size = bytes.len(),
            cells_written = report.cells_written,
            cells_skipped = report.cells_skipped,
            cells_failed = report.cells_failed,
            goods_rows_visible = report.goods_rows_visible,
            "contract generated"
        );
        Ok(GeneratedContract {
            filename,
            bytes,
            report,
        })
    }

    fn write_stage(
        &self,
        filler: &mut TemplateFiller<'_>,
        sheets: &[&str],
        request: &ContractRequest,
        stage: FillStage,
        now: NaiveDateTime,
    ) {
        for binding in bindings_for(stage) {
            let value = self.field_value(request, binding.field, now);
            for sheet in sheets {
                filler.set_field(sheet, binding.cell, value.clone());
            }
        }
    }

    /// Cell value for a field after display transforms; `None` means skip.
    fn field_value(
        &self,
        request: &ContractRequest,
        field: ContractField,
        now: NaiveDateTime,
    ) -> Option<CellValue> {
        let raw = request.get(field);
        match field {
            ContractField::ContractDate => match raw {
                Some(v) if !v.is_blank() => Some(CellValue::Text(format_contract_date(&v.to_text()))),
                _ if self.config.default_date_to_today => {
                    Some(CellValue::Text(contract_date_for(now)))
                }
                _ => raw.map(|v| v.to_cell_value(false)),
            },
            ContractField::ModeOfShipment => raw.map(|v| match v {
                FieldValue::Text(s) => CellValue::Text(shipment_mode_label(s)),
                other => other.to_cell_value(false),
            }),
            ContractField::TransportRoute if self.config.dedupe_route_words => {
                raw.map(|v| match v {
                    FieldValue::Text(s) => CellValue::Text(dedupe_route_words(s)),
                    other => other.to_cell_value(false),
                })
            }
            _ => raw.map(|v| v.to_cell_value(field.is_numeric())),
        }
    }
}

/// `{contract}_Contract.xlsx`, or `contract_{timestamp}.xlsx` when the
/// contract number is absent or sanitises to nothing.
pub fn derive_filename(contract_number: Option<&str>, now: NaiveDateTime) -> String {
    let stem = contract_number.map(sanitize_filename_stem).unwrap_or_default();
    if stem.is_empty() {
        format!("contract_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
    } else {
        format!("{stem}_Contract.xlsx")
    }
}

/// Attachment header with an ASCII fallback and an RFC 5987 `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn filenames() {
        assert_eq!(
            derive_filename(Some("CT2025001"), at(0, 0, 0)),
            "CT2025001_Contract.xlsx"
        );
        assert_eq!(
            derive_filename(Some("CT 2025/001"), at(0, 0, 0)),
            "CT2025001_Contract.xlsx"
        );
        assert_eq!(
            derive_filename(None, at(13, 4, 5)),
            "contract_20250102_130405.xlsx"
        );
        assert_eq!(
            derive_filename(Some("///"), at(13, 4, 5)),
            "contract_20250102_130405.xlsx"
        );
    }

    #[test]
    fn disposition_ascii_and_unicode() {
        assert_eq!(
            content_disposition("CT1_Contract.xlsx"),
            "attachment; filename=\"CT1_Contract.xlsx\"; filename*=UTF-8''CT1_Contract.xlsx"
        );
        assert_eq!(
            content_disposition("合同1_Contract.xlsx"),
            "attachment; filename=\"__1_Contract.xlsx\"; \
             filename*=UTF-8''%E5%90%88%E5%90%8C1_Contract.xlsx"
        );
    }
}
