//! Property tests: lenient casts never fail on arbitrary text

use crate::common::{cast, ctx};
use proptest::prelude::*;
use sqlcast_eval::Constant;
use sqlcast_types::{FieldType, SqlTypeTag};

proptest! {
    #[test]
    fn prop_lenient_numeric_casts_never_fail(s in "\\PC{0,24}") {
        let mut ctx = ctx();
        for tp in [SqlTypeTag::BigInt, SqlTypeTag::Double, SqlTypeTag::Decimal] {
            let out = cast(&mut ctx, Constant::string(s.clone()), FieldType::new(tp));
            prop_assert!(out.is_ok(), "{s:?} as {tp}: {out:?}");
        }
    }

    #[test]
    fn prop_numeric_text_round_trips_through_bigint(n in any::<i64>()) {
        let mut ctx = ctx();
        let out = cast(&mut ctx, Constant::string(n.to_string()), FieldType::new(SqlTypeTag::BigInt)).unwrap();
        prop_assert_eq!(out.value.as_int(), Some(n));
        prop_assert!(out.warnings.is_empty());
    }

    #[test]
    fn prop_duration_text_stays_in_range(h in 0u32..1000, m in 0u32..60, s in 0u32..60) {
        let mut ctx = ctx();
        let text = format!("{h}:{m:02}:{s:02}");
        let out = cast(&mut ctx, Constant::string(text), FieldType::new(SqlTypeTag::Time)).unwrap();
        let value = out.value.as_duration().expect("never NULL for well-formed text");
        prop_assert!(value.micros().abs() <= sqlcast_types::MAX_DURATION_MICROS);
    }

    #[test]
    fn prop_varchar_width_is_respected(s in "\\PC{0,40}", width in 0u32..20) {
        let mut ctx = ctx();
        let tp = FieldType::new(SqlTypeTag::VarString).with_flen(width);
        let out = cast(&mut ctx, Constant::string(s), tp).unwrap();
        let text = out.value.as_str().expect("string result");
        prop_assert!(text.chars().count() <= width as usize);
    }
}
