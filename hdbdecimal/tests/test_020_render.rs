
use bigdecimal::BigDecimal;
use hdbdecimal::{
    format_wire_decimal, format_wire_decimal_with, HdbResult, Rendering, WireDecimal,
};
use log::info;
use std::str::FromStr;

// cargo test --test test_020_render -- --nocapture
#[test]
fn test_020_render() -> HdbResult<()> {
    let _log_handle = test_utils::init_logger();

    end_to_end()?;
    scaling()?;
    legacy_truncation()?;
    from_big_decimals()?;
    Ok(())
}

fn end_to_end() -> HdbResult<()> {
    info!("123.4500 as sent by the database");
    let raw = test_utils::wire_bytes(1_234_500, -4, false);
    assert_eq!(format_wire_decimal(&raw)?, "123.4500");
    assert_eq!(format_wire_decimal_with(&raw, Rendering::Exact)?, "123.4500");

    let raw = test_utils::wire_bytes(1_234_500, -4, true);
    assert_eq!(format_wire_decimal(&raw)?, "-123.4500");

    info!("NULL becomes an empty field, not zero");
    let mut raw = [0_u8; 16];
    raw[15] = 0x70;
    assert!(WireDecimal::new(raw).is_null());
    assert_eq!(format_wire_decimal(&raw)?, "");
    assert_eq!(format_wire_decimal_with(&raw, Rendering::Exact)?, "");

    info!("a zero with the NULL exponent bits but a set sign is a number");
    raw[15] |= 0x80;
    assert_eq!(format_wire_decimal(&raw)?, "0.0000");
    Ok(())
}

fn scaling() -> HdbResult<()> {
    info!("each step of the exponent scales by ten");
    let expected = [
        (-4, "0.0001"),
        (-3, "0.0010"),
        (-2, "0.0100"),
        (-1, "0.1000"),
        (0, "1.0000"),
        (1, "10.0000"),
        (2, "100.0000"),
        (3, "1000.0000"),
    ];
    for (exponent, text) in expected {
        let decoded = WireDecimal::new(test_utils::wire_bytes(1, exponent, false)).decode();
        assert_eq!(decoded.render(Rendering::Legacy), text);
        assert_eq!(decoded.render(Rendering::Exact), text);
    }

    let f = |exponent| {
        WireDecimal::new(test_utils::wire_bytes(1, exponent, false))
            .decode()
            .to_f64()
    };
    for exponent in -6..6 {
        let ratio = f(exponent + 1) / f(exponent);
        assert!((ratio - 10.0).abs() < 1e-12, "ratio {ratio} at {exponent}");
    }
    Ok(())
}

fn legacy_truncation() -> HdbResult<()> {
    info!("magnitudes beyond 64 bits are truncated by the legacy rendering only");
    // 2^64 + 42, scale 4
    let mantissa = (1_u128 << 64) + 42;
    let decoded = WireDecimal::new(test_utils::wire_bytes(mantissa, -4, false)).decode();
    assert_eq!(decoded.narrowed_magnitude(), 42);
    assert_eq!(decoded.render(Rendering::Legacy), "0.0042");
    assert_eq!(decoded.render(Rendering::Exact), "1844674407370955.1658");
    Ok(())
}

fn from_big_decimals() -> HdbResult<()> {
    info!("values encoded from BigDecimals render with four fractional digits");
    for (input, text) in [
        ("0", "0.0000"),
        ("1234.5678", "1234.5678"),
        ("-1234.5678", "-1234.5678"),
        ("1234.56780000", "1234.5678"),
        ("0.0001", "0.0001"),
        ("-0.5", "-0.5000"),
        ("987654321.12", "987654321.1200"),
    ] {
        let bigdec = BigDecimal::from_str(input).unwrap();
        let decoded = WireDecimal::from_big_decimal(&bigdec)?.decode();
        assert_eq!(decoded.to_big_decimal(), bigdec, "input: {input}");
        assert_eq!(decoded.render(Rendering::Exact), text, "input: {input}");
        assert_eq!(decoded.render(Rendering::Legacy), text, "input: {input}");
    }

    info!("beyond the f64 precision only the exact rendering keeps all digits");
    let bigdec = BigDecimal::from_str("12345678901234567.8901").unwrap();
    let decoded = WireDecimal::from_big_decimal(&bigdec)?.decode();
    assert_eq!(decoded.render(Rendering::Exact), "12345678901234567.8901");
    assert_ne!(decoded.render(Rendering::Legacy), "12345678901234567.8901");
    Ok(())
}
