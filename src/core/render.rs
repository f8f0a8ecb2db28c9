//=========================================================================
// Rendering Backend Interface
//=========================================================================
//
// The shell drives a rendering backend (GL / Metal / D3D11 / WebGPU
// context and swapchain) around its own lifecycle transitions, but does
// not implement one. `NullRenderer` is used when none is installed.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::error::FatalError;

//=== PixelFormat =========================================================

/// Pixel format of the default framebuffer attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba8,
    Bgra8,
    DepthStencil,
    None,
}

//=== RenderBackend =======================================================

/// Rendering context collaborator.
pub trait RenderBackend: Send {
    /// Creates the context / swapchain for a framebuffer of `size`.
    fn create(
        &mut self,
        size: (u32, u32),
        sample_count: u32,
        swap_interval: u32,
    ) -> Result<(), FatalError>;

    /// Resizes the swapchain after a framebuffer size change.
    fn resize(&mut self, size: (u32, u32));

    /// Presents the frame rendered by the frame callback.
    fn present(&mut self);

    /// Releases the context.
    fn destroy(&mut self);

    fn color_format(&self) -> PixelFormat {
        PixelFormat::Rgba8
    }

    fn depth_format(&self) -> PixelFormat {
        PixelFormat::DepthStencil
    }
}

//=== NullRenderer ========================================================

/// Backend that renders nothing; keeps the lifecycle running headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn create(
        &mut self,
        _size: (u32, u32),
        _sample_count: u32,
        _swap_interval: u32,
    ) -> Result<(), FatalError> {
        Ok(())
    }

    fn resize(&mut self, _size: (u32, u32)) {}

    fn present(&mut self) {}

    fn destroy(&mut self) {}
}
