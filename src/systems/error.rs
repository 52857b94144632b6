use thiserror::Error;

/// Misuse of the system lifecycle: register, then set up, then run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SystemError {
	#[error("system `{0}` was already added to the current context")]
	AlreadyRegistered(&'static str),
	#[error("cannot add system `{0}` after initialization")]
	RegisteredAfterSetup(&'static str),
	#[error("systems have already been initialized")]
	AlreadyInitialized,
	#[error("systems must be initialized before they can run")]
	NotInitialized,
}
