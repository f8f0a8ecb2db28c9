//=========================================================================
// Basic Window
//
// Opens a window, logs lifecycle callbacks and input, and asks for
// confirmation before quitting: the first close request is cancelled,
// the second one goes through.
//
// Run with:
//   RUST_LOG=debug cargo run --example basic_window
//
//=========================================================================

use aetheric_shell::prelude::*;
use log::info;

struct Demo {
    close_attempts: u32,
}

impl AppHandler for Demo {
    fn init(&mut self, ctx: &mut AppContext) {
        info!(
            "init: window {:?}, framebuffer {:?}, dpi {}",
            ctx.window_size(),
            ctx.framebuffer_size(),
            ctx.dpi_scale()
        );
    }

    fn frame(&mut self, ctx: &mut AppContext) {
        if ctx.frame_count() % 600 == 0 {
            info!("frame {} ({:?} per frame)", ctx.frame_count(), ctx.frame_duration());
        }
    }

    fn cleanup(&mut self, ctx: &mut AppContext) {
        info!("cleanup after {} frames", ctx.frame_count());
    }

    fn event(&mut self, ctx: &mut AppContext, event: &Event) {
        match &event.kind {
            EventKind::QuitRequested => {
                self.close_attempts += 1;
                if self.close_attempts == 1 {
                    info!("close again to quit");
                    ctx.cancel_quit();
                }
            }
            EventKind::KeyDown { key: KeyCode::Escape, .. } => ctx.request_quit(),
            EventKind::KeyDown { key: KeyCode::KeyF, .. } => ctx.toggle_fullscreen(),
            EventKind::KeyDown { key, modifiers, .. } => info!("key {:?} {:?}", key, modifiers),
            EventKind::Char { ch, .. } => info!("char {:?}", ch),
            EventKind::MouseDown { button, x, y, .. } => info!("{:?} at ({}, {})", button, x, y),
            EventKind::Resized => info!("resized to {:?}", event.framebuffer_size),
            EventKind::FilesDropped { paths } => info!("dropped {:?}", paths),
            _ => {}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    AppBuilder::new()
        .with_title("Aetheric Shell")
        .with_size(800, 600)
        .with_high_dpi(true)
        .with_clipboard(4096)
        .with_drag_and_drop(4, 1024)
        .build(Demo { close_attempts: 0 })
        .run();
}
