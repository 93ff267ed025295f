//! Cast command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use sqlcast_diagnostics::{Diagnostic, DiagnosticsPolicy};
use sqlcast_eval::{CastFunctionClass, CastSig, Constant, EvaluationContext, ExprRef};
use sqlcast_types::{FieldType, MAX_FSP, SqlDuration, SqlTime, SqlTypeTag, SqlValue, TargetSpecDraft};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// How the literal given on the command line is typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Int,
    Uint,
    Bool,
    Real,
    Decimal,
    String,
    Date,
    Datetime,
    Timestamp,
    Time,
    Json,
    /// Binary literal such as `0x4142`
    Hex,
    /// ENUM member as `number:text`
    Enum,
}

/// Configuration for cast command
#[derive(Debug, Clone)]
pub struct CastConfig {
    pub value: String,
    pub from: SourceKind,
    pub to: String,
    pub unsigned: bool,
    pub len: Option<u32>,
    pub scale: Option<u8>,
    pub binary: bool,
    pub strict: bool,
    /// `Some(true)` parses string sources as JSON text, `Some(false)` wraps
    /// them as a JSON string
    pub parse_json: Option<bool>,
    pub today: Option<NaiveDate>,
    pub verbose: bool,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Result of one command-line cast
#[derive(Debug, Clone)]
pub struct CastReport {
    pub sig: CastSig,
    pub target: FieldType,
    pub value: SqlValue,
    pub warnings: Vec<Diagnostic>,
}

impl CastReport {
    /// Value text; unsigned integer targets print their unsigned reading
    pub fn rendered_value(&self) -> String {
        match &self.value {
            SqlValue::Integer(v) if self.target.unsigned => (*v as u64).to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        let value = match &self.value {
            SqlValue::Null => Value::Null,
            SqlValue::Json(j) => j.clone(),
            _ => Value::String(self.rendered_value()),
        };
        json!({
            "value": value,
            "target": self.target.to_string(),
            "routine": self.sig.name(),
            "opcode": self.sig.code(),
            "warnings": self.warnings,
        })
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![
            output::format_field("value", &self.rendered_value().bold().to_string()),
            output::format_field("type", &self.target.to_string()),
            output::format_field(
                "routine",
                &format!("{} (opcode {:02})", self.sig.name(), self.sig.code()),
            ),
        ];
        lines.extend(self.warnings.iter().map(output::format_diagnostic));
        lines.join("\n")
    }
}

/// Cast a command-line literal
pub fn cast(config: CastConfig) -> Result<()> {
    let report = run(&config)?;
    let content = match config.output_format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => output::format_json(&report.to_json(), false)?,
        OutputFormat::JsonPretty => output::format_json(&report.to_json(), true)?,
    };
    output::write_output(&content, config.output_file.as_deref())
}

/// Build and evaluate the cast described by `config`
pub fn run(config: &CastConfig) -> Result<CastReport> {
    let arg: ExprRef = Arc::new(parse_source(config.from, &config.value)?);
    let draft = target_draft(config)?;

    let policy = if config.strict {
        DiagnosticsPolicy::strict()
    } else {
        DiagnosticsPolicy::lenient()
    };
    let mut builder = EvaluationContext::builder().policy(policy);
    if let Some(today) = config.today {
        builder = builder.current_date(today);
    }
    let mut ctx = builder.build();

    let func = CastFunctionClass::new(draft).get_function(&[arg])?;
    if config.verbose {
        eprintln!(
            "{} {} as {} via {}",
            "cast".dimmed(),
            config.value,
            func.spec(),
            func.sig()
        );
    }
    let outcome = func
        .evaluate(&mut ctx)
        .with_context(|| format!("CAST('{}' AS {})", config.value, func.spec()))?;
    Ok(CastReport {
        sig: func.sig(),
        target: func.spec().field_type().clone(),
        value: outcome.value,
        warnings: outcome.warnings,
    })
}

/// Target type from `--to` and the width, scale and charset flags
pub fn target_draft(config: &CastConfig) -> Result<TargetSpecDraft> {
    let tag = SqlTypeTag::from_name(&config.to)
        .ok_or_else(|| anyhow!("unknown target type '{}'", config.to))?;
    let unsigned = config.unsigned || config.to.eq_ignore_ascii_case("unsigned");
    let mut tp = FieldType::new(tag).with_unsigned(unsigned);
    if let Some(len) = config.len {
        tp = tp.with_flen(len);
    }
    if let Some(scale) = config.scale {
        tp = tp.with_decimal(scale);
    }
    if config.binary || config.to.eq_ignore_ascii_case("binary") {
        tp = tp.with_binary_charset();
    }
    let draft = TargetSpecDraft::new(tp);
    Ok(match config.parse_json {
        Some(parse) => draft.with_parse_to_json(parse),
        None => draft,
    })
}

/// Turn a command-line literal into a typed constant
pub fn parse_source(kind: SourceKind, text: &str) -> Result<Constant> {
    let invalid = || format!("invalid {kind:?} literal '{text}'");
    Ok(match kind {
        SourceKind::Int => Constant::int(text.trim().parse().with_context(invalid)?),
        SourceKind::Uint => Constant::uint(text.trim().parse().with_context(invalid)?),
        SourceKind::Bool => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Constant::boolean(true),
            "false" | "0" => Constant::boolean(false),
            _ => bail!(invalid()),
        },
        SourceKind::Real => Constant::real(text.trim().parse().with_context(invalid)?),
        SourceKind::Decimal => Constant::decimal(Decimal::from_str(text.trim()).with_context(invalid)?),
        SourceKind::String => Constant::string(text),
        SourceKind::Date => Constant::time(SqlTime::parse(text, SqlTypeTag::Date, 0)?),
        SourceKind::Datetime => {
            Constant::time(SqlTime::parse(text, SqlTypeTag::DateTime, fraction_digits(text))?)
        }
        SourceKind::Timestamp => {
            Constant::time(SqlTime::parse(text, SqlTypeTag::Timestamp, fraction_digits(text))?)
        }
        SourceKind::Time => {
            let parsed = SqlDuration::parse(text, fraction_digits(text));
            if parsed.warning.is_some() {
                bail!(invalid());
            }
            Constant::duration(parsed.value)
        }
        SourceKind::Json => Constant::json(serde_json::from_str(text).with_context(invalid)?),
        SourceKind::Hex => Constant::binary_literal(decode_hex(text).with_context(invalid)?),
        SourceKind::Enum => {
            let (number, label) = text.split_once(':').ok_or_else(|| anyhow!(invalid()))?;
            Constant::hybrid(SqlTypeTag::Enum, number.trim().parse().with_context(invalid)?, label)
        }
    })
}

/// Digits after the last `.`, capped at the maximum fsp
fn fraction_digits(text: &str) -> u8 {
    text.trim()
        .rsplit_once('.')
        .map_or(0, |(_, frac)| frac.bytes().take_while(u8::is_ascii_digit).count())
        .min(usize::from(MAX_FSP)) as u8
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    (0..padded.len())
        .step_by(2)
        .map(|i| {
            let pair = padded.get(i..i + 2).context("non-ASCII hex digit")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("bad hex digits '{pair}'"))
        })
        .collect()
}
