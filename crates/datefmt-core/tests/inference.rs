//! Tests for pattern inference.
//!
//! Covers both dialects over the punctuated, Chinese-labelled, concatenated
//! and zoned shape families, plus the inputs that must produce no pattern.

use datefmt_core::{
    Dialect, Field, Rejection, ZoneSuffixKind, infer, infer_legacy, infer_modern, inspect,
};

fn both(text: &str) -> (Option<String>, Option<String>) {
    (infer_legacy(text), infer_modern(text))
}

fn some(legacy: &str, modern: &str) -> (Option<String>, Option<String>) {
    (Some(legacy.to_string()), Some(modern.to_string()))
}

// =========================================================================
// Punctuated Shapes
// =========================================================================

#[test]
fn test_dash_datetime_with_fraction() {
    assert_eq!(
        both("2020-1-2 6:6:6.6"),
        some("yyyy-MM-dd HH:mm:ss.SSS", "y-M-d H:m:s[.SSS][.SS][.S]")
    );
}

#[test]
fn test_padding_does_not_change_the_pattern() {
    assert_eq!(both("2020-01-02 06:06:06"), both("2020-1-2 6:6:6"));
    assert_eq!(both("0999-01-02"), both("999-1-2"));
}

#[test]
fn test_slash_and_dot_dates() {
    assert_eq!(both("2020/1/2"), some("yyyy/MM/dd", "y/M/d"));
    assert_eq!(both("2020.01.02 06:30"), some("yyyy.MM.dd HH:mm", "y.M.d H:m"));
    assert_eq!(both("2020/12"), some("yyyy/MM", "y/M"));
}

#[test]
fn test_t_joined_datetime() {
    assert_eq!(
        both("2020-01-02T06:30:15.25"),
        some("yyyy-MM-dd'T'HH:mm:ss.SSS", "y-M-d'T'H:m:s[.SSS][.SS][.S]")
    );
}

#[test]
fn test_mixed_separators_have_no_pattern() {
    assert_eq!(both("2020-01/02"), (None, None));
    assert_eq!(both("2020-01-02 06-30"), (None, None));
}

// =========================================================================
// Chinese-Labelled Shapes
// =========================================================================

#[test]
fn test_chinese_date() {
    assert_eq!(both("2020年1月2日"), some("yyyy年MM月dd日", "y年M月d日"));
    assert_eq!(both("2020年"), some("yyyy年", "y年"));
    assert_eq!(both("2020年12月"), some("yyyy年MM月", "y年M月"));
}

#[test]
fn test_chinese_datetime_with_millis() {
    assert_eq!(
        both("2020年1月2日 6时6分6秒60毫秒"),
        some("yyyy年MM月dd日 HH时mm分ss秒SSS毫秒", "y年M月d日 H时m分s秒[SSS毫秒]")
    );
}

#[test]
fn test_millis_count_width_does_not_change_the_pattern() {
    let expected = infer_modern("2020年1月2日 6时6分6秒600毫秒");
    assert_eq!(infer_modern("2020年1月2日 6时6分6秒6毫秒"), expected);
    assert_eq!(infer_modern("2020年1月2日 6时6分6秒60毫秒"), expected);
}

#[test]
fn test_chinese_date_with_colon_time() {
    assert_eq!(
        both("2020年01月02日06:30"),
        some("yyyy年MM月dd日HH:mm", "y年M月d日H:m")
    );
}

#[test]
fn test_colloquial_hour_marker() {
    assert_eq!(
        both("2020年1月2日6点30分"),
        some("yyyy年MM月dd日HH点mm分", "y年M月d日H点m分")
    );
}

// =========================================================================
// Concatenated Shapes
// =========================================================================

#[test]
fn test_bare_years() {
    assert_eq!(both("99"), (None, None));
    assert_eq!(both("999"), some("yyyy", "y"));
    assert_eq!(both("2020"), some("yyyy", "y"));
}

#[test]
fn test_digit_blocks_by_length() {
    assert_eq!(both("202001"), some("yyyyMM", "yyyyMM"));
    assert_eq!(both("20200102"), some("yyyyMMdd", "yyyyMMdd"));
    assert_eq!(both("2020010206"), some("yyyyMMddHH", "yyyyMMddHH"));
    assert_eq!(both("202001020630"), some("yyyyMMddHHmm", "yyyyMMddHHmm"));
    assert_eq!(both("20200102063015"), some("yyyyMMddHHmmss", "yyyyMMddHHmmss"));
    assert_eq!(
        both("20200102063015123"),
        some("yyyyMMddHHmmssSSS", "yyyyMMddHHmmssSSS")
    );
}

#[test]
fn test_t_split_blocks() {
    assert_eq!(
        both("20200102T063015"),
        some("yyyyMMdd'T'HHmmss", "yyyyMMdd'T'HHmmss")
    );
    assert_eq!(
        both("20200102T063015123"),
        some("yyyyMMdd'T'HHmmssSSS", "yyyyMMdd'T'HHmmssSSS")
    );
}

#[test]
fn test_unsupported_lengths_have_no_pattern() {
    assert_eq!(both("20201266665"), (None, None));
    assert_eq!(both("202012666650000"), (None, None));
    assert_eq!(both("123456789012345678"), (None, None));
}

#[test]
fn test_block_fields_are_range_checked() {
    assert_eq!(both("20201301"), (None, None));
    assert_eq!(both("20200100"), (None, None));
    assert_eq!(both("20200102T240000"), (None, None));
}

// =========================================================================
// Zone Suffixes
// =========================================================================

#[test]
fn test_bare_z() {
    assert_eq!(
        both("2020/01/2T6:16:6Z"),
        (None, Some("y/M/d'T'H:m:sVV".to_string()))
    );
}

#[test]
fn test_bare_offsets() {
    assert_eq!(
        infer_modern("2020-01-02T06:06:06+08:00").as_deref(),
        Some("y-M-d'T'H:m:sXXX")
    );
    assert_eq!(
        infer_modern("2020-01-02 06:06:06 -05:30:15").as_deref(),
        Some("y-M-d H:m:s XXXXX")
    );
    assert_eq!(
        infer_modern("20200102T063015+08:00").as_deref(),
        Some("yyyyMMdd'T'HHmmssXXX")
    );
}

#[test]
fn test_bracketed_zones() {
    assert_eq!(
        both("999-1-2 6:6:6 [GMT+04:00 +04:00]"),
        (None, Some("y-M-d H:m:s '['VV' 'XXX']'".to_string()))
    );
    assert_eq!(
        infer_modern("2020-01-02 06:06 [Asia/Shanghai +08:00]").as_deref(),
        Some("y-M-d H:m '['VV' 'XXX']'")
    );
}

#[test]
fn test_zone_kinds_are_reported() {
    let kind = |text: &str| inspect(text).map(|inference| inference.zone().kind);
    assert_eq!(kind("2020-01-02 06:06"), Ok(ZoneSuffixKind::None));
    assert_eq!(kind("2020-01-02 06:06Z"), Ok(ZoneSuffixKind::BareZ));
    assert_eq!(kind("2020-01-02 06:06+08:00"), Ok(ZoneSuffixKind::BareOffset));
    assert_eq!(
        kind("2020-01-02 06:06 [Asia/Shanghai +08:00]"),
        Ok(ZoneSuffixKind::BracketedIdAndOffset)
    );
    assert_eq!(
        kind("2020-01-02 06:06 [GMT+04:00 +04:00]"),
        Ok(ZoneSuffixKind::BracketedTextAndOffset)
    );
}

#[test]
fn test_bracket_labels_must_read_back_as_zone_ids() {
    assert!(inspect("2020-01-02 06:06 [GMT.x +01:00]").is_err());
    assert_eq!(infer_modern("2020-01-02 06:06 [GMT时 +01:00]"), None);
    assert_eq!(
        infer_modern("2020-01-02 06:06 [Etc/GMT-8 +08:00]").as_deref(),
        Some("y-M-d H:m '['VV' 'XXX']'")
    );
}

#[test]
fn test_zone_without_time_has_no_pattern() {
    assert_eq!(both("2020-01-02Z"), (None, None));
    assert_eq!(both("2020年1月2日+08:00"), (None, None));
}

// =========================================================================
// Rejections
// =========================================================================

#[test]
fn test_blank_and_foreign_input() {
    assert_eq!(inspect(""), Err(Rejection::Alphabet));
    assert_eq!(inspect("   "), Err(Rejection::Alphabet));
    assert_eq!(inspect("Jan 2, 2020"), Err(Rejection::Alphabet));
    assert_eq!(inspect("2020-01-02 06:06 UTC"), Err(Rejection::Alphabet));
}

#[test]
fn test_surrounding_whitespace_is_not_trimmed() {
    assert_eq!(both(" 2020-01-02"), (None, None));
    assert_eq!(both("2020-01-02 "), (None, None));
}

#[test]
fn test_out_of_range_fields() {
    assert_eq!(
        inspect("2020-01-02 06:60"),
        Err(Rejection::FieldOutOfRange {
            field: Field::Minute,
            value: 60
        })
    );
    assert_eq!(
        inspect("2020-01-02 06:06:06.1234"),
        Err(Rejection::FieldWidth {
            field: Field::Fraction,
            digits: 4
        })
    );
}

#[test]
fn test_infer_matches_dialect_entry_points() {
    for text in ["2020-1-2 6:6:6.6", "20200102", "2020/01/2T6:16:6Z", "99"] {
        assert_eq!(infer(text, Dialect::Legacy), infer_legacy(text));
        assert_eq!(infer(text, Dialect::Modern), infer_modern(text));
    }
}

// =========================================================================
// Snapshot
// =========================================================================

#[test]
fn test_inference_overview() {
    let inputs = [
        "2020-1-2 6:6:6.6",
        "999",
        "99",
        "2020/01/2T6:16:6Z",
        "999-1-2 6:6:6 [GMT+04:00 +04:00]",
        "2020年1月2日 6时6分6秒60毫秒",
        "20200102T063015",
        "20200102063015123",
    ];
    let report = inputs
        .iter()
        .map(|text| {
            let legacy = infer_legacy(text).unwrap_or_else(|| "-".to_string());
            let modern = infer_modern(text).unwrap_or_else(|| "-".to_string());
            format!("{text} | {legacy} | {modern}")
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(report, @r"
    2020-1-2 6:6:6.6 | yyyy-MM-dd HH:mm:ss.SSS | y-M-d H:m:s[.SSS][.SS][.S]
    999 | yyyy | y
    99 | - | -
    2020/01/2T6:16:6Z | - | y/M/d'T'H:m:sVV
    999-1-2 6:6:6 [GMT+04:00 +04:00] | - | y-M-d H:m:s '['VV' 'XXX']'
    2020年1月2日 6时6分6秒60毫秒 | yyyy年MM月dd日 HH时mm分ss秒SSS毫秒 | y年M月d日 H时m分s秒[SSS毫秒]
    20200102T063015 | yyyyMMdd'T'HHmmss | yyyyMMdd'T'HHmmss
    20200102063015123 | yyyyMMddHHmmssSSS | yyyyMMddHHmmssSSS
    ");
}
