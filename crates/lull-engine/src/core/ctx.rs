use lull_api::{Display, Inputs, Report};
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::sched::FrameScheduler;
use crate::time::FrameTime;

/// Context of the input pass.
pub struct ProcessCtx<'a> {
    /// Snapshot shared with the display pass of the same iteration.
    pub inputs: &'a Inputs,
    pub display: Display,
    pub time: FrameTime,
    pub scheduler: &'a FrameScheduler,
    /// Starts clean, or dirty when the window was resized.
    pub report: Report,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// Nothing reached the screen; the frame stays outstanding.
    Skipped,
    /// The surface cannot recover.
    Fatal,
}

/// Context of the display pass.
///
/// `'w` is the window borrow carried by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub inputs: &'a Inputs,
    pub display: Display,
    pub time: FrameTime,
    pub scheduler: &'a FrameScheduler,
}

impl FrameCtx<'_, '_> {
    /// Clears to `clear`, lets `draw` record into the frame, then presents.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> FrameOutcome
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("frame acquire failed: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => FrameOutcome::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        FrameOutcome::Skipped
                    }
                };
            }
        };

        {
            let _clear = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lull clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        {
            let (w, h) = frame.size_px();
            let rctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
                Viewport::new(w as f32, h as f32),
            );
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.gpu.submit(frame, self.window);
        FrameOutcome::Presented
    }
}
