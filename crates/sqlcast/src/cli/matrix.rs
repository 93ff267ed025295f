//! Matrix command: the routine table with its opcodes

use super::output::{self, OutputFormat};
use anyhow::Result;
use serde_json::{Value, json};
use sqlcast_eval::{DispatchCell, dispatch_table};
use sqlcast_types::LogicalType;
use std::path::PathBuf;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Configuration for matrix command
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Print the source × target opcode table
pub fn matrix(config: MatrixConfig) -> Result<()> {
    let content = match config.output_format {
        OutputFormat::Text => render_matrix(),
        OutputFormat::Json => output::format_json(&matrix_json(), false)?,
        OutputFormat::JsonPretty => output::format_json(&matrix_json(), true)?,
    };
    output::write_output(&content, config.output_file.as_deref())
}

fn cell_text(cell: DispatchCell) -> String {
    match cell {
        DispatchCell::Routine(sig) => format!("{:02}", sig.code()),
        DispatchCell::Unsupported => "-".to_string(),
    }
}

/// Rows are sources, columns targets
pub fn render_matrix() -> String {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(String::new())
            .chain(LogicalType::ALL.iter().map(|lt| lt.short_name().to_string())),
    );
    for (source, row) in LogicalType::ALL.iter().zip(dispatch_table()) {
        builder.push_record(
            std::iter::once(source.short_name().to_string())
                .chain(row.iter().map(|cell| cell_text(*cell))),
        );
    }
    builder.build().with(Style::modern()).to_string()
}

pub fn matrix_json() -> Value {
    let mut entries = Vec::new();
    for (source, row) in LogicalType::ALL.iter().zip(dispatch_table()) {
        for (target, cell) in LogicalType::ALL.iter().zip(row) {
            let (opcode, routine) = match cell {
                DispatchCell::Routine(sig) => (json!(sig.code()), json!(sig.name())),
                DispatchCell::Unsupported => (Value::Null, Value::Null),
            };
            entries.push(json!({
                "source": source.short_name(),
                "target": target.short_name(),
                "opcode": opcode,
                "routine": routine,
            }));
        }
    }
    Value::Array(entries)
}
