use crate::HealthRes;

/// Health check shared by every transport.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Liveness only: reports whether the process is serving requests, not whether the
    /// providers or the log backend are reachable.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Heridas API is alive".into(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}
