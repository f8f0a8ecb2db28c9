//=========================================================================
// Application Configuration
//=========================================================================
//
// Consumed once at startup. Zero width/height fall back to the defaults;
// everything else is validated by `AppConfig::validate` and a violation is
// a fatal error.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::error::FatalError;

//=== Defaults ============================================================

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_CLIPBOARD_SIZE: usize = 8192;
pub const DEFAULT_MAX_DROPPED_FILES: usize = 1;
pub const DEFAULT_MAX_DROPPED_FILE_PATH_LENGTH: usize = 2048;
pub const DEFAULT_WINDOW_TITLE: &str = "Aetheric";

//=== AppConfig ===========================================================

/// Startup configuration of the application shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Preferred logical window width (0 = default).
    pub width: u32,

    /// Preferred logical window height (0 = default).
    pub height: u32,

    /// MSAA sample count (power of two).
    pub sample_count: u32,

    /// Frames between buffer swaps (1 = vsync).
    pub swap_interval: u32,

    /// Start in fullscreen mode.
    pub fullscreen: bool,

    /// Render at native (physical pixel) resolution on high-DPI displays.
    pub high_dpi: bool,

    /// Enable clipboard support and the `ClipboardPasted` event.
    pub enable_clipboard: bool,

    /// Clipboard buffer size in bytes (including room for a terminator).
    pub clipboard_size: usize,

    /// Enable the `FilesDropped` event.
    pub enable_drag_and_drop: bool,

    /// Maximum number of files reported per drop.
    pub max_dropped_files: usize,

    /// Maximum path length in bytes; longer paths are skipped.
    pub max_dropped_file_path_length: usize,

    /// Emit `UpdateCursor` so user code can set the cursor image.
    pub user_cursor: bool,

    /// Initial window title.
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            sample_count: 1,
            swap_interval: 1,
            fullscreen: false,
            high_dpi: false,
            enable_clipboard: false,
            clipboard_size: DEFAULT_CLIPBOARD_SIZE,
            enable_drag_and_drop: false,
            max_dropped_files: DEFAULT_MAX_DROPPED_FILES,
            max_dropped_file_path_length: DEFAULT_MAX_DROPPED_FILE_PATH_LENGTH,
            user_cursor: false,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Logical window size with zero dimensions replaced by defaults.
    pub fn resolved_size(&self) -> (u32, u32) {
        let width = if self.width == 0 { DEFAULT_WIDTH } else { self.width };
        let height = if self.height == 0 { DEFAULT_HEIGHT } else { self.height };
        (width, height)
    }

    /// Checks the configuration for values no platform can honor.
    pub fn validate(&self) -> Result<(), FatalError> {
        if self.sample_count == 0 || !self.sample_count.is_power_of_two() {
            return Err(FatalError::InvalidConfig(format!(
                "sample_count must be a power of two, got {}",
                self.sample_count
            )));
        }
        if self.swap_interval == 0 {
            return Err(FatalError::InvalidConfig(
                "swap_interval must be at least 1".to_string(),
            ));
        }
        if self.enable_clipboard && self.clipboard_size == 0 {
            return Err(FatalError::InvalidConfig(
                "clipboard_size must be positive when the clipboard is enabled".to_string(),
            ));
        }
        if self.enable_drag_and_drop
            && (self.max_dropped_files == 0 || self.max_dropped_file_path_length == 0)
        {
            return Err(FatalError::InvalidConfig(
                "drag-and-drop limits must be positive when drag-and-drop is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.resolved_size(), (640, 480));
        assert_eq!(config.sample_count, 1);
        assert_eq!(config.swap_interval, 1);
        assert!(!config.high_dpi);
        assert!(!config.enable_clipboard);
        assert_eq!(config.clipboard_size, 8192);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_size_falls_back_to_defaults() {
        let config = AppConfig {
            width: 0,
            height: 300,
            ..AppConfig::default()
        };
        assert_eq!(config.resolved_size(), (640, 300));
    }

    #[test]
    fn rejects_non_power_of_two_sample_count() {
        for samples in [0, 3, 6] {
            let config = AppConfig {
                sample_count: samples,
                ..AppConfig::default()
            };
            assert!(matches!(config.validate(), Err(FatalError::InvalidConfig(_))));
        }
    }

    #[test]
    fn accepts_power_of_two_sample_count() {
        for samples in [1, 2, 4, 8] {
            let config = AppConfig {
                sample_count: samples,
                ..AppConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn rejects_zero_swap_interval() {
        let config = AppConfig {
            swap_interval: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_clipboard_only_when_enabled() {
        let disabled = AppConfig {
            clipboard_size: 0,
            ..AppConfig::default()
        };
        assert!(disabled.validate().is_ok());

        let enabled = AppConfig {
            enable_clipboard: true,
            clipboard_size: 0,
            ..AppConfig::default()
        };
        assert!(enabled.validate().is_err());
    }

    #[test]
    fn rejects_zero_drop_limits_when_enabled() {
        let config = AppConfig {
            enable_drag_and_drop: true,
            max_dropped_files: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
