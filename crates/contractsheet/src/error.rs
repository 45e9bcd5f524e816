use contractsheet_common::AddressError;
use contractsheet_workbook::WorkbookError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ContractError {
    /// Empty, unparsable, or incomplete request body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("template not found at {path}: {reason}")]
    TemplateNotFound { path: String, reason: String },

    /// Anything else that stops a document from being produced.
    #[error("contract generation failed: {source}")]
    Generation {
        #[source]
        source: BoxError,
    },
}

impl ContractError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ContractError::InvalidRequest(msg.into())
    }

    pub fn generation(source: impl Into<BoxError>) -> Self {
        ContractError::Generation {
            source: source.into(),
        }
    }
}

/// Why a single cell could not be written. Never fatal to a generation run.
#[derive(Debug, Error)]
pub enum CellWriteCause {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

#[derive(Debug, Error)]
#[error("cannot write {sheet}!{address}: {cause}")]
pub struct CellWriteError {
    pub sheet: String,
    pub address: String,
    #[source]
    pub cause: CellWriteCause,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = ContractError::TemplateNotFound {
            path: "/srv/contract_template.xlsx".into(),
            reason: "no such file".into(),
        };
        assert_eq!(
            err.to_string(),
            "template not found at /srv/contract_template.xlsx: no such file"
        );

        let err = ContractError::generation("disk full");
        assert_eq!(err.to_string(), "contract generation failed: disk full");
    }

    #[test]
    fn cell_write_error_names_the_cell() {
        let cause = contractsheet_common::CellAddress::parse("c3").unwrap_err();
        let err = CellWriteError {
            sheet: "SC".into(),
            address: "c3".into(),
            cause: cause.into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cannot write SC!c3: "), "{msg}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
