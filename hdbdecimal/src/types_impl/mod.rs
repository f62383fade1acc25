pub(crate) mod decoded_decimal;
pub(crate) mod wire_decimal;

use crate::{HdbResult, Rendering, WireDecimal};

/// Turns the raw bytes of a DECIMAL column into the text of a CSV field,
/// using the [`Legacy`](Rendering::Legacy) rendering.
///
/// HANA's NULL representation becomes the empty field.
///
/// # Errors
///
/// `HdbError::WireLength` if `bytes` does not have exactly 16 bytes.
pub fn format_wire_decimal(bytes: &[u8]) -> HdbResult<String> {
    format_wire_decimal_with(bytes, Rendering::Legacy)
}

/// Like [`format_wire_decimal`], with a selectable rendering.
///
/// # Errors
///
/// `HdbError::WireLength` if `bytes` does not have exactly 16 bytes.
pub fn format_wire_decimal_with(bytes: &[u8], rendering: Rendering) -> HdbResult<String> {
    let wire = WireDecimal::from_slice(bytes)?;
    Ok(if wire.is_null() {
        String::new()
    } else {
        wire.decode().render(rendering)
    })
}
