use crate::error::ApiError;

/// Switch guarding the admin endpoints.
///
/// There is no per-user authentication; the gate is opened for the whole
/// process by `APP_ENV=development` or `ENABLE_ADMIN=true`.
#[derive(Debug, Clone, Copy)]
pub struct AdminGate {
    open: bool,
}

impl AdminGate {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn open() -> Self {
        Self::new(true)
    }

    pub fn closed() -> Self {
        Self::new(false)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn check(&self) -> Result<(), ApiError> {
        if self.open {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}
