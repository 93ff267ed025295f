//! Typed expression interface consumed by cast functions
//!
//! Every operand a cast reads implements [`Expression`]: it declares a
//! [`FieldType`] and answers the per-class accessors (`eval_int`,
//! `eval_real`, ...). An accessor returns `Ok(None)` for SQL NULL.
//! [`Constant`] and [`Column`] are the leaf expressions; cast functions
//! themselves are expressions too, so casts nest.

use crate::context::EvaluationContext;
use crate::error::{EvalResult, mismatch};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlcast_diagnostics::{CastError, DiagnosticsSink};
use sqlcast_types::{
    FieldType, LogicalType, SqlDuration, SqlTime, SqlTypeTag, SqlValue, binary_literal_to_string,
    binary_literal_to_uint,
};
use std::fmt;
use std::sync::Arc;

/// Shared expression handle
pub type ExprRef = Arc<dyn Expression>;

/// An evaluable expression with a declared type
pub trait Expression: fmt::Debug + Send + Sync {
    /// Declared type
    fn field_type(&self) -> &FieldType;

    /// Whether the expression is a raw binary literal (`0x41`, `b'1'`)
    fn is_binary_literal(&self) -> bool {
        false
    }

    /// Whether the expression evaluates to the same value for every row
    fn is_constant(&self) -> bool {
        false
    }

    fn eval_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>>;

    fn eval_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>>;

    fn eval_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>>;

    fn eval_string(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<String>>;

    fn eval_time(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlTime>>;

    fn eval_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>>;

    fn eval_json(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Value>>;

    /// Evaluate through the accessor of the declared class
    fn eval(&self, ctx: &mut EvaluationContext) -> EvalResult<SqlValue> {
        Ok(match self.field_type().eval_type() {
            LogicalType::Integer => self.eval_int(ctx)?.into(),
            LogicalType::Real => self.eval_real(ctx)?.into(),
            LogicalType::Decimal => self.eval_decimal(ctx)?.into(),
            LogicalType::String => self.eval_string(ctx)?.into(),
            LogicalType::DateTime => self.eval_time(ctx)?.into(),
            LogicalType::Duration => self.eval_duration(ctx)?.into(),
            LogicalType::Json => self.eval_json(ctx)?.into(),
        })
    }
}

// ============================================================================
// Value accessors
// ============================================================================

fn binary_literal_uint(bytes: &[u8], ctx: &mut EvaluationContext) -> EvalResult<u64> {
    match binary_literal_to_uint(bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            ctx.handle_overflow(err.clone(), err)?;
            Ok(u64::MAX)
        }
    }
}

fn read_int(value: &SqlValue, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Integer(i) => Ok(Some(*i)),
        SqlValue::Hybrid(h) => Ok(Some(h.number as i64)),
        SqlValue::BinaryLiteral(bytes) => Ok(Some(binary_literal_uint(bytes, ctx)? as i64)),
        other => Err(mismatch("Integer", other)),
    }
}

fn read_real(value: &SqlValue, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Real(f) => Ok(Some(*f)),
        SqlValue::Hybrid(h) => Ok(Some(h.number as f64)),
        SqlValue::BinaryLiteral(bytes) => Ok(Some(binary_literal_uint(bytes, ctx)? as f64)),
        other => Err(mismatch("Real", other)),
    }
}

fn read_decimal(value: &SqlValue, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Decimal(d) => Ok(Some(*d)),
        SqlValue::Hybrid(h) => Ok(Some(Decimal::from(h.number))),
        SqlValue::BinaryLiteral(bytes) => Ok(Some(Decimal::from(binary_literal_uint(bytes, ctx)?))),
        other => Err(mismatch("Decimal", other)),
    }
}

fn read_string(value: &SqlValue) -> EvalResult<Option<String>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::String(s) => Ok(Some(s.clone())),
        SqlValue::Hybrid(h) => Ok(Some(h.text.clone())),
        SqlValue::BinaryLiteral(bytes) => Ok(Some(binary_literal_to_string(bytes))),
        other => Err(mismatch("String", other)),
    }
}

fn read_time(value: &SqlValue) -> EvalResult<Option<SqlTime>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Time(t) => Ok(Some(*t)),
        other => Err(mismatch("DateTime", other)),
    }
}

fn read_duration(value: &SqlValue) -> EvalResult<Option<SqlDuration>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Duration(d) => Ok(Some(*d)),
        other => Err(mismatch("Duration", other)),
    }
}

fn read_json(value: &SqlValue) -> EvalResult<Option<Value>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Json(j) => Ok(Some(j.clone())),
        other => Err(mismatch("Json", other)),
    }
}

// ============================================================================
// Constant
// ============================================================================

/// A literal value with its declared type
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: SqlValue,
    field_type: FieldType,
}

impl Constant {
    pub fn new(value: SqlValue, field_type: FieldType) -> Self {
        Self { value, field_type }
    }

    /// Typed NULL
    pub fn null(tp: SqlTypeTag) -> Self {
        Self::new(SqlValue::Null, FieldType::new(tp))
    }

    pub fn int(value: i64) -> Self {
        Self::new(SqlValue::int(value), FieldType::new(SqlTypeTag::BigInt))
    }

    pub fn uint(value: u64) -> Self {
        Self::new(
            SqlValue::uint(value),
            FieldType::new(SqlTypeTag::BigInt).with_unsigned(true),
        )
    }

    /// `TRUE`/`FALSE` literal, a `TINYINT(1)` flagged boolean
    pub fn boolean(value: bool) -> Self {
        Self::new(
            SqlValue::int(i64::from(value)),
            FieldType::new(SqlTypeTag::TinyInt)
                .with_flen(1)
                .with_boolean(true),
        )
    }

    pub fn real(value: f64) -> Self {
        Self::new(SqlValue::real(value), FieldType::new(SqlTypeTag::Double))
    }

    /// Decimal literal typed `DECIMAL(precision, scale)` after its digits
    pub fn decimal(value: Decimal) -> Self {
        let scale = value.scale();
        let digits = value.mantissa().unsigned_abs().to_string().len() as u32;
        let field_type = FieldType::new(SqlTypeTag::Decimal)
            .with_flen(digits.max(scale).max(1))
            .with_decimal(scale as u8);
        Self::new(SqlValue::decimal(value), field_type)
    }

    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        let field_type = FieldType::new(SqlTypeTag::VarString).with_flen(value.chars().count() as u32);
        Self::new(SqlValue::string(value), field_type)
    }

    pub fn time(value: SqlTime) -> Self {
        let field_type = FieldType::new(value.tp()).with_decimal(value.fsp());
        Self::new(SqlValue::time(value), field_type)
    }

    pub fn duration(value: SqlDuration) -> Self {
        let field_type = FieldType::new(SqlTypeTag::Time).with_decimal(value.fsp());
        Self::new(SqlValue::duration(value), field_type)
    }

    pub fn json(value: Value) -> Self {
        Self::new(SqlValue::json(value), FieldType::new(SqlTypeTag::Json))
    }

    /// ENUM, SET or BIT value carrying both views
    pub fn hybrid(tp: SqlTypeTag, number: u64, text: impl Into<String>) -> Self {
        Self::new(SqlValue::hybrid(number, text), FieldType::new(tp))
    }

    /// Raw binary literal typed as a binary string
    pub fn binary_literal(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let field_type = FieldType::new(SqlTypeTag::VarString)
            .with_flen(bytes.len() as u32)
            .with_binary_charset();
        Self::new(SqlValue::binary_literal(bytes), field_type)
    }

    pub fn value(&self) -> &SqlValue {
        &self.value
    }
}

impl Expression for Constant {
    fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    fn is_binary_literal(&self) -> bool {
        matches!(self.value, SqlValue::BinaryLiteral(_))
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn eval_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        read_int(&self.value, ctx)
    }

    fn eval_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        read_real(&self.value, ctx)
    }

    fn eval_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        read_decimal(&self.value, ctx)
    }

    fn eval_string(&self, _ctx: &mut EvaluationContext) -> EvalResult<Option<String>> {
        read_string(&self.value)
    }

    fn eval_time(&self, _ctx: &mut EvaluationContext) -> EvalResult<Option<SqlTime>> {
        read_time(&self.value)
    }

    fn eval_duration(&self, _ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        read_duration(&self.value)
    }

    fn eval_json(&self, _ctx: &mut EvaluationContext) -> EvalResult<Option<Value>> {
        read_json(&self.value)
    }

    fn eval(&self, _ctx: &mut EvaluationContext) -> EvalResult<SqlValue> {
        Ok(self.value.clone())
    }
}

// ============================================================================
// Column
// ============================================================================

/// Reference to a column of the row held by the [`EvaluationContext`]
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    index: usize,
    field_type: FieldType,
}

impl Column {
    pub fn new(index: usize, field_type: FieldType) -> Self {
        Self { index, field_type }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn value(&self, ctx: &EvaluationContext) -> EvalResult<SqlValue> {
        ctx.column(self.index).cloned().ok_or_else(|| {
            CastError::internal(format!("column {} is not in the current row", self.index))
        })
    }
}

impl Expression for Column {
    fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    fn eval_int(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<i64>> {
        let value = self.value(ctx)?;
        read_int(&value, ctx)
    }

    fn eval_real(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<f64>> {
        let value = self.value(ctx)?;
        read_real(&value, ctx)
    }

    fn eval_decimal(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Decimal>> {
        let value = self.value(ctx)?;
        read_decimal(&value, ctx)
    }

    fn eval_string(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<String>> {
        read_string(&self.value(ctx)?)
    }

    fn eval_time(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlTime>> {
        read_time(&self.value(ctx)?)
    }

    fn eval_duration(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<SqlDuration>> {
        read_duration(&self.value(ctx)?)
    }

    fn eval_json(&self, ctx: &mut EvaluationContext) -> EvalResult<Option<Value>> {
        read_json(&self.value(ctx)?)
    }

    fn eval(&self, ctx: &mut EvaluationContext) -> EvalResult<SqlValue> {
        self.value(ctx)
    }
}
