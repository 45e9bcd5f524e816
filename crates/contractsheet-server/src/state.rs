use std::sync::Arc;

use contractsheet::ContractAssembler;

/// Shared per-process state. The assembler only holds read-only template
/// access and configuration; each request opens its own workbook.
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<ContractAssembler>,
}

impl AppState {
    pub fn new(assembler: ContractAssembler) -> Self {
        Self {
            assembler: Arc::new(assembler),
        }
    }
}
