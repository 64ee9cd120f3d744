use crate::{Error, Result};

use std::time::Duration;

pub(crate) fn validate_no_control(context: &'static str, input: &str) -> Result<()> {
    if input.contains('\0') {
        return Err(Error::invalid_input(format!(
            "{context} must not contain NUL"
        )));
    }
    if input.contains('\n') || input.contains('\r') {
        return Err(Error::invalid_input(format!(
            "{context} must not contain newlines"
        )));
    }
    if input.chars().any(|c| c.is_control()) {
        return Err(Error::invalid_input(format!(
            "{context} must not contain control characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_nonzero(context: &'static str, value: Duration) -> Result<()> {
    if value == Duration::from_secs(0) {
        return Err(Error::invalid_input(format!("{context} must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn validate_no_control_accepts_plain_strings() {
        validate_no_control("version", "1.2.3").expect("ok");
    }

    #[test]
    fn validate_no_control_rejects_newlines() {
        let err = validate_no_control("version", "1.2\n3").expect_err("must fail");
        let Error::InvalidInput { .. } = err;
    }

    #[test]
    fn validate_no_control_rejects_nul() {
        let err = validate_no_control("version", "1\0").expect_err("must fail");
        let Error::InvalidInput { .. } = err;
    }

    #[test]
    fn validate_nonzero_rejects_zero_duration() {
        let err = validate_nonzero("timeout", Duration::from_secs(0)).expect_err("must fail");
        let Error::InvalidInput { .. } = err;
    }

    #[test]
    fn validate_nonzero_accepts_positive_duration() {
        validate_nonzero("timeout", Duration::from_millis(1)).expect("ok");
    }
}
