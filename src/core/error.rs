//=========================================================================
// Fatal Errors
//=========================================================================
//
// The shell has exactly one failure channel: a fatal error is reported to
// the user's fail hook and the process aborts (see `Lifecycle::fail`).
//
// Everything else (unmapped keys, overflowing touch lists, oversized
// clipboard text, events after teardown) is normalized or absorbed and
// never surfaces as an error.
//
//=========================================================================

//=== FatalError ==========================================================

/// Unrecoverable configuration or platform error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalError {
    /// The application configuration is invalid.
    InvalidConfig(String),

    /// The native event loop could not be created or failed while running.
    EventLoop(String),

    /// The native window could not be created.
    WindowCreation(String),

    /// The rendering surface / context could not be created.
    SurfaceCreation(String),

    /// A worker thread could not be spawned.
    ThreadSpawn(String),
}

impl std::fmt::Display for FatalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "Invalid configuration: {}", e),
            Self::EventLoop(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::SurfaceCreation(e) => write!(f, "Surface creation failed: {}", e),
            Self::ThreadSpawn(e) => write!(f, "Thread spawn failed: {}", e),
        }
    }
}

impl std::error::Error for FatalError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_error_is_error_trait() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<FatalError>();
    }

    #[test]
    fn display_includes_detail() {
        let err = FatalError::InvalidConfig("sample_count must be a power of two".into());
        let text = err.to_string();
        assert!(text.starts_with("Invalid configuration"));
        assert!(text.contains("power of two"));
    }

    #[test]
    fn display_per_variant() {
        assert!(FatalError::EventLoop("x".into()).to_string().contains("Event loop"));
        assert!(FatalError::WindowCreation("x".into()).to_string().contains("Window"));
        assert!(FatalError::SurfaceCreation("x".into()).to_string().contains("Surface"));
        assert!(FatalError::ThreadSpawn("x".into()).to_string().contains("Thread"));
    }
}
