//! Declared types and cast target descriptors
//!
//! A [`FieldType`] describes the declared type of any expression. A cast
//! target is assembled as a [`TargetSpecDraft`], whose deferred flags are
//! resolved exactly once before [`TargetSpecDraft::freeze`] turns it into an
//! immutable [`TargetTypeSpec`].

use crate::type_system::{
    CHARSET_BIN, CHARSET_UTF8, CHARSET_UTF8MB4, COLLATION_BIN, COLLATION_UTF8, COLLATION_UTF8MB4,
    LogicalType, SqlTypeTag,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    /// Concrete type tag
    pub tp: SqlTypeTag,
    /// Display width; `None` when unspecified
    pub flen: Option<u32>,
    /// Scale for DECIMAL/FLOAT, fsp for temporal types; `None` when unspecified
    pub decimal: Option<u8>,
    pub unsigned: bool,
    pub is_boolean: bool,
    pub binary: bool,
    pub parse_to_json: bool,
    pub charset: String,
    pub collation: String,
}

impl FieldType {
    /// Create a field type with no width, scale or flags
    pub fn new(tp: SqlTypeTag) -> Self {
        let (charset, collation) = if tp.is_string() {
            (CHARSET_UTF8MB4, COLLATION_UTF8MB4)
        } else {
            (CHARSET_BIN, COLLATION_BIN)
        };
        Self {
            tp,
            flen: None,
            decimal: None,
            unsigned: false,
            is_boolean: false,
            binary: false,
            parse_to_json: false,
            charset: charset.to_string(),
            collation: collation.to_string(),
        }
    }

    pub fn with_flen(mut self, flen: u32) -> Self {
        self.flen = Some(flen);
        self
    }

    pub fn with_decimal(mut self, decimal: u8) -> Self {
        self.decimal = Some(decimal);
        self
    }

    pub fn with_unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = unsigned;
        self
    }

    pub fn with_boolean(mut self, is_boolean: bool) -> Self {
        self.is_boolean = is_boolean;
        self
    }

    pub fn with_parse_to_json(mut self, parse_to_json: bool) -> Self {
        self.parse_to_json = parse_to_json;
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>, collation: impl Into<String>) -> Self {
        self.charset = charset.into();
        self.collation = collation.into();
        self
    }

    /// Switch to the binary charset, binary collation and binary flag
    pub fn with_binary_charset(mut self) -> Self {
        self.charset = CHARSET_BIN.to_string();
        self.collation = COLLATION_BIN.to_string();
        self.binary = true;
        self
    }

    /// Switch to utf8 with its binary collation
    pub fn with_utf8(self) -> Self {
        self.with_charset(CHARSET_UTF8, COLLATION_UTF8)
    }

    /// Evaluation class of the declared type
    pub fn eval_type(&self) -> LogicalType {
        self.tp.eval_type()
    }

    pub fn is_hybrid(&self) -> bool {
        self.tp.is_hybrid()
    }

    /// Whether strings of this type count length in characters
    pub fn is_char_counted(&self) -> bool {
        self.charset == CHARSET_UTF8 || self.charset == CHARSET_UTF8MB4
    }

    /// Binary string type (binary charset)
    pub fn is_binary_string(&self) -> bool {
        self.tp.is_string() && self.charset == CHARSET_BIN
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tp)?;
        match (self.flen, self.decimal) {
            (Some(flen), Some(dec)) if !self.tp.is_temporal() && self.tp != SqlTypeTag::Time => {
                write!(f, "({flen},{dec})")?
            }
            (_, Some(fsp)) if self.tp.is_temporal() || self.tp == SqlTypeTag::Time => {
                write!(f, "({fsp})")?
            }
            (Some(flen), None) => write!(f, "({flen})")?,
            _ => {}
        }
        if self.unsigned {
            write!(f, " UNSIGNED")?;
        }
        Ok(())
    }
}

/// Cast target under construction.
///
/// The parse-as-JSON flag may be left unresolved until the source class is
/// known; [`freeze`](Self::freeze) settles it (unresolved means `false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpecDraft {
    field_type: FieldType,
    parse_to_json: Option<bool>,
}

impl TargetSpecDraft {
    pub fn new(field_type: FieldType) -> Self {
        let parse_to_json = field_type.parse_to_json.then_some(true);
        Self {
            field_type,
            parse_to_json,
        }
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Explicitly set the parse-as-JSON flag
    pub fn with_parse_to_json(mut self, parse: bool) -> Self {
        self.parse_to_json = Some(parse);
        self
    }

    /// The flag if it was resolved
    pub fn parse_to_json(&self) -> Option<bool> {
        self.parse_to_json
    }

    /// Resolve the flag to `default` unless already set
    pub fn resolve_parse_to_json(mut self, default: bool) -> Self {
        self.parse_to_json.get_or_insert(default);
        self
    }

    /// Finish construction
    pub fn freeze(self) -> TargetTypeSpec {
        let mut field_type = self.field_type;
        field_type.parse_to_json = self.parse_to_json.unwrap_or(false);
        TargetTypeSpec { field_type }
    }
}

impl From<FieldType> for TargetSpecDraft {
    fn from(field_type: FieldType) -> Self {
        Self::new(field_type)
    }
}

/// Immutable cast target descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetTypeSpec {
    field_type: FieldType,
}

impl TargetTypeSpec {
    pub fn logical_type(&self) -> LogicalType {
        self.field_type.eval_type()
    }

    pub fn tp(&self) -> SqlTypeTag {
        self.field_type.tp
    }

    pub fn flen(&self) -> Option<u32> {
        self.field_type.flen
    }

    pub fn decimal(&self) -> Option<u8> {
        self.field_type.decimal
    }

    pub fn unsigned(&self) -> bool {
        self.field_type.unsigned
    }

    pub fn is_boolean(&self) -> bool {
        self.field_type.is_boolean
    }

    pub fn parse_to_json(&self) -> bool {
        self.field_type.parse_to_json
    }

    pub fn charset(&self) -> &str {
        &self.field_type.charset
    }

    pub fn collation(&self) -> &str {
        &self.field_type.collation
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Reopen as a draft with every flag already resolved
    pub fn to_draft(&self) -> TargetSpecDraft {
        TargetSpecDraft {
            parse_to_json: Some(self.field_type.parse_to_json),
            field_type: self.field_type.clone(),
        }
    }
}

impl fmt::Display for TargetTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_type)
    }
}
