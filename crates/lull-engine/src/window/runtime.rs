use anyhow::{anyhow, Context, Result};
use lull_api::{Display, Int2};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, FrameOutcome, ProcessCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState, SnapshotBuilder};
use crate::sched::{host_report, Decision, FrameScheduler};
use crate::time::HostClock;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lull".to_string(),
            initial_size: LogicalSize::new(1024.0, 640.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until it exits, the window closes, or a callback fails.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = LoopState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    snapshot: SnapshotBuilder,
    resized: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct LoopState<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    clock: HostClock,
    scheduler: FrameScheduler,
    window: Option<WindowEntry>,

    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A: App + 'static> LoopState<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        let clock = HostClock::new();
        let scheduler = FrameScheduler::new(clock.now_ms());
        Self {
            config,
            gpu_init,
            app,
            clock,
            scheduler,
            window: None,
            exit_requested: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            snapshot: SnapshotBuilder::new(),
            resized: false,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.window = Some(entry);
        Ok(())
    }

    /// One iteration: refresh, input pass, schedule, maybe display.
    fn iterate(&mut self) -> Result<ControlFlow> {
        let Self {
            app,
            clock,
            scheduler,
            window,
            exit_requested,
            ..
        } = self;
        let Some(entry) = window.as_mut() else {
            return Ok(ControlFlow::Wait);
        };

        let flow = entry.with_mut(|f| -> Result<ControlFlow> {
            let time = clock.tick();
            app.refresh(f.gpu);

            let size = f.gpu.size();
            let display = Display {
                resized: std::mem::take(f.resized),
                size_px: Int2::new(size.width as i32, size.height as i32),
            };
            let inputs = f
                .snapshot
                .build(time.now_ms, scheduler.frame_id(), f.input_state, f.input_frame);

            let mut pctx = ProcessCtx {
                inputs: &inputs,
                display,
                time,
                scheduler: &*scheduler,
                report: host_report(&display),
            };
            let control = app.process(&mut pctx)?;
            let report = pctx.report;
            f.input_frame.clear();

            if control == AppControl::Exit {
                *exit_requested = true;
                return Ok(ControlFlow::Wait);
            }

            match scheduler.plan(time.now_ms, &report) {
                Decision::Redraw if !f.gpu.is_drawable() => {
                    // Minimized: keep the frame outstanding until a resize.
                    scheduler.skipped();
                    Ok(ControlFlow::Wait)
                }
                Decision::Redraw => {
                    let mut fctx = FrameCtx {
                        window: f.window,
                        gpu: f.gpu,
                        inputs: &inputs,
                        display,
                        time,
                        scheduler: &*scheduler,
                    };
                    let outcome = app.display(&mut fctx)?;
                    match outcome {
                        FrameOutcome::Presented => scheduler.presented(),
                        FrameOutcome::Skipped => scheduler.skipped(),
                        FrameOutcome::Fatal => return Err(anyhow!("surface lost: out of memory")),
                    }
                    // Reports are re-collected right away so timers set the
                    // next deadline.
                    Ok(ControlFlow::Poll)
                }
                Decision::Wait { deadline_ms, .. } => {
                    let wake_ms = match app.wake_interval_ms() {
                        Some(interval) => deadline_ms.min(time.now_ms + interval),
                        None => deadline_ms,
                    };
                    Ok(match clock.instant_at(wake_ms) {
                        Some(at) => ControlFlow::WaitUntil(at),
                        None => ControlFlow::Wait,
                    })
                }
            }
        })?;

        Ok(flow)
    }
}

impl<A: App + 'static> ApplicationHandler for LoopState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match self.iterate() {
            Ok(flow) => event_loop.set_control_flow(flow),
            Err(e) => return self.fail(event_loop, e),
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.with_mut(|f| {
            translate_window_event(&event, &mut |ev| f.input_state.apply_event(f.input_frame, ev));
        });

        match &event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_mut(|f| {
                    f.gpu.resize(*new_size);
                    *f.resized = true;
                });
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_mut(|f| {
                    f.gpu.resize(f.window.inner_size());
                    *f.resized = true;
                });
            }

            // Exposed by the OS; the last frame may be gone.
            WindowEvent::RedrawRequested => self.scheduler.force_redraw(),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!(
            "exiting after {} presented / {} skipped frames",
            self.scheduler.presented_frames(),
            self.scheduler.skipped_frames()
        );
        // Release the surface while the window is still alive.
        self.window = None;
    }
}
