//! Slot return value conversion.

use crate::error::BoxError;

/// Trait for converting a slot closure's return value into a slot result.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T`, or boxes the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a slot",
    label = "missing `IntoSlotResult` implementation",
    note = "Slots return `()` or `Result<(), E>` where `E` converts into a boxed error."
)]
pub trait IntoSlotResult {
    /// Convert the return value into success or a boxed error.
    fn into_slot_result(self) -> Result<(), BoxError>;
}

impl IntoSlotResult for () {
    fn into_slot_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoSlotResult for Result<T, E>
where
    T: IntoSlotResult,
    E: Into<BoxError>,
{
    fn into_slot_result(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_slot_result(),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_success() {
        assert!(().into_slot_result().is_ok());
    }

    #[test]
    fn test_result_error_is_boxed() {
        let ok: Result<(), std::io::Error> = Ok(());
        assert!(ok.into_slot_result().is_ok());

        let err: Result<(), &str> = Err("broken pipe");
        let boxed = err.into_slot_result().unwrap_err();
        assert_eq!(boxed.to_string(), "broken pipe");
    }
}
