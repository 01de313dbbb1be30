use crate::{errors::CanopyError, types::Result};

/// If the test condition is false, return an InvalidArgument error with
/// the given error message. Otherwise return Ok.
pub(crate) fn check_argument(test: bool, msg: &'static str) -> Result<()> {
    if test {
        Ok(())
    } else {
        Err(CanopyError::InvalidArgument { msg })
    }
}
