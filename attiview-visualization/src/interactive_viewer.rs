//! Windowed attitude viewer
//!
//! Owns the winit event loop and the GPU objects, forwards input to a
//! [`ViewerController`] and redraws the composed scene on request.

use crate::input::{pixel_pos, pointer_button, translate_key, KeyInput};
use crate::{MenuCommand, Response, ViewerConfig, ViewerController, ViewerHandler};
use attiview_core::{
    DeadlineTimer, Error, PixelPos, Result, SceneRenderer, SceneTextures, TextureRegistry,
};
use attiview_gpu::{FrameRenderer, GpuContext, GpuTextures};
use attiview_io::RasterDecoder;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

/// Interactive viewer for the attitude ball
pub struct InteractiveViewer {
    config: ViewerConfig,
}

impl InteractiveViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Open the window and run until it is closed
    pub fn run(self) -> Result<()> {
        self.config.validate()?;
        let config = self.config;

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(config.title.as_str())
                .with_inner_size(PhysicalSize::new(config.width, config.height))
                .with_position(PhysicalPosition::new(config.position[0], config.position[1]))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let (gpu, surface) = pollster::block_on(GpuContext::with_surface(window.clone()))?;
        let textures = GpuTextures::new(gpu.device.clone(), gpu.queue.clone());
        let mut registry = TextureRegistry::new(RasterDecoder::new(), textures);
        let scene_textures =
            SceneTextures::load(&mut registry, &config.sphere_texture, &config.ring_texture);

        let size = window.inner_size();
        let mut renderer = FrameRenderer::new(
            gpu,
            surface,
            (size.width, size.height),
            registry.uploader().bind_group_layout(),
            config.render_config(),
        )?;
        let scene = SceneRenderer::new();
        let mut controller = ViewerController::new(&config, DeadlineTimer::new());
        apply(&window, controller.on_resize(size.width, size.height), None);

        let mut pointer = PixelPos::default();
        let mut failure: Option<Error> = None;
        info!("viewer running");

        event_loop
            .run(|event, target| {
                match event {
                    Event::WindowEvent { event, window_id } if window_id == window.id() => {
                        let response = match event {
                            WindowEvent::CloseRequested => controller.on_menu(MenuCommand::Quit),
                            WindowEvent::Resized(new_size) => {
                                renderer.resize(new_size.width, new_size.height);
                                controller.on_resize(new_size.width, new_size.height)
                            }
                            WindowEvent::KeyboardInput { event, .. }
                                if event.state == ElementState::Pressed =>
                            {
                                match translate_key(&event.logical_key) {
                                    Some(KeyInput::Char(ch)) => controller.on_char(ch, pointer),
                                    Some(KeyInput::Special(key)) => {
                                        controller.on_special_key(key, pointer)
                                    }
                                    None => Response::none(),
                                }
                            }
                            WindowEvent::MouseInput { state, button, .. } => controller
                                .on_pointer_button(
                                    pointer_button(button),
                                    state == ElementState::Pressed,
                                    pointer,
                                ),
                            WindowEvent::CursorMoved { position, .. } => {
                                pointer = pixel_pos(position);
                                controller.on_pointer_motion(pointer)
                            }
                            WindowEvent::RedrawRequested => {
                                let frame = scene
                                    .compose(&controller.state().orientation, &scene_textures)
                                    .resolve()
                                    .and_then(|draws| renderer.render(&draws, registry.uploader()));
                                match frame {
                                    Ok(()) => Response::none(),
                                    Err(e) => {
                                        error!("rendering failed: {}", e);
                                        failure = Some(e);
                                        Response::quit()
                                    }
                                }
                            }
                            _ => Response::none(),
                        };
                        if apply(&window, response, Some(target)) {
                            return;
                        }
                    }
                    Event::AboutToWait => {
                        if controller.timer_mut().fire_due(Instant::now()) {
                            let response = controller.on_timer();
                            apply(&window, response, Some(target));
                        }
                    }
                    _ => {}
                }

                match controller.timer().deadline() {
                    Some(deadline) => target.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => target.set_control_flow(ControlFlow::Wait),
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop failed: {}", e)))?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Act on a handler response; returns true once the loop is exiting
fn apply(
    window: &Window,
    response: Response,
    target: Option<&winit::event_loop::EventLoopWindowTarget<()>>,
) -> bool {
    if response.quit {
        if let Some(target) = target {
            target.exit();
        }
        return true;
    }
    if response.redraw {
        window.request_redraw();
    }
    false
}
