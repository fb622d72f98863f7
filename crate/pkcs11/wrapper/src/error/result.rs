use super::WrapperError;

pub type WResult<R> = Result<R, WrapperError>;
