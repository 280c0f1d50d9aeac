use std::sync::Arc;

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use pixview_engine::core::{App, AppControl, FrameCtx};
use pixview_engine::frame::{FrameSlot, SlotStats};
use pixview_engine::render::{PreviewConfig, PreviewRenderer, RenderCtx};
use pixview_engine::sink::Sink;

/// Keyboard:
/// - `R` turns the simulated device a quarter clockwise
/// - `F` switches between back and front camera
/// - `Esc` quits
pub struct PreviewApp {
    slot: Arc<FrameSlot>,
    config: PreviewConfig,
    renderer: Option<PreviewRenderer>,

    title_dirty: bool,
    last_stats: SlotStats,
    stats_timer: f32,
}

impl PreviewApp {
    pub fn new(slot: Arc<FrameSlot>, config: PreviewConfig) -> Self {
        Self {
            slot,
            config,
            renderer: None,
            title_dirty: true,
            last_stats: SlotStats::default(),
            stats_timer: 0.0,
        }
    }

    fn on_key(&mut self, event: &KeyEvent) -> AppControl {
        if event.state != ElementState::Pressed || event.repeat {
            return AppControl::Continue;
        }

        match event.logical_key.as_ref() {
            Key::Named(NamedKey::Escape) => return AppControl::Exit,
            Key::Character(c) if c.eq_ignore_ascii_case("r") => {
                let next = self.slot.display().device_orientation().rotate_cw();
                self.slot.set_device_orientation(next);
                log::info!("device orientation -> {next}");
            }
            Key::Character(c) if c.eq_ignore_ascii_case("f") => {
                let next = self.slot.display().facing().toggled();
                self.slot.set_facing(next);
                log::info!("camera facing -> {next}");
            }
            _ => return AppControl::Continue,
        }

        self.title_dirty = true;
        AppControl::Continue
    }

    fn log_stats(&mut self, dt: f32) {
        self.stats_timer += dt;
        if self.stats_timer < 1.0 {
            return;
        }
        self.stats_timer = 0.0;

        let stats = self.slot.stats();
        log::debug!(
            "slot: +{} submitted, +{} uploaded, +{} dropped",
            stats.submitted - self.last_stats.submitted,
            stats.uploaded - self.last_stats.uploaded,
            stats.dropped - self.last_stats.dropped,
        );
        self.last_stats = stats;
    }
}

impl App for PreviewApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event),
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        if self.renderer.is_none() {
            let rctx = RenderCtx::from_gpu(ctx.gpu);
            match PreviewRenderer::new(&rctx, self.config.clone()) {
                Ok(renderer) => {
                    log::debug!("frames routed to {}", renderer.native_class_id());
                    self.renderer = Some(renderer);
                }
                Err(e) => {
                    log::error!("failed to create preview renderer: {e}");
                    return AppControl::Exit;
                }
            }
        }

        self.slot.resize_viewport(viewport.width, viewport.height);

        if self.title_dirty {
            let display = self.slot.display();
            ctx.window.set_title(&format!(
                "pixview - {} camera, device {}",
                display.facing(),
                display.device_orientation(),
            ));
            self.title_dirty = false;
        }

        self.log_stats(ctx.time.dt);

        let slot = &self.slot;
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };
        ctx.render(|rctx, target| {
            renderer.sync(rctx, slot);
            renderer.render(target);
        })
    }
}
