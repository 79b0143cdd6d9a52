use crate::{Error, Result};

/// Return value of an observed action.
///
/// Actions are plain closures. One that returns `()` can never fail; one
/// that returns a `Result` fails the evaluation with [`Error::Action`]
/// carrying the original error as its source. The recorder is detached
/// before the failure is reported.
///
/// ```rust
/// use herald::ActionResult;
///
/// assert!(().into_result().is_ok());
/// assert!(Ok::<_, std::io::Error>(42).into_result().is_ok());
/// assert!(Err::<(), _>(std::io::Error::other("nope")).into_result().is_err());
/// ```
pub trait ActionResult {
    fn into_result(self) -> Result;
}

impl ActionResult for () {
    fn into_result(self) -> Result {
        Ok(())
    }
}

impl<T, E> ActionResult for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_result(self) -> Result {
        self.map(|_| ()).map_err(Error::action)
    }
}
