//! egui on top of the wgpu surface
//!
//! The whole window is egui: the simulation canvas is painted into a
//! central panel by [`crate::painter`], so a frame is a single render pass
//! that clears to the canvas background and draws the tessellated UI.

use common::{palette, Color, GraphicsContext};
use winit::event::WindowEvent;
use winit::window::Window;

pub struct EguiLayer {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    clear: wgpu::Color,
}

fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(color[0]),
        g: f64::from(color[1]),
        b: f64::from(color[2]),
        a: f64::from(color[3]),
    }
}

impl EguiLayer {
    pub fn new(graphics: &GraphicsContext) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &graphics.window,
            Some(graphics.window.scale_factor() as f32),
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&graphics.device, graphics.config.format, None, 1);
        Self {
            ctx,
            state,
            renderer,
            clear: clear_color(palette::BACKGROUND),
        }
    }

    /// Handle to the egui context; cheap to clone
    pub fn context(&self) -> egui::Context {
        self.ctx.clone()
    }

    /// Returns `true` when egui used the event (e.g. typing in a text box)
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn take_input(&mut self, window: &Window) -> egui::RawInput {
        self.state.take_egui_input(window)
    }

    /// Upload textures, tessellate and present one UI frame
    pub fn paint(&mut self, graphics: &GraphicsContext, output: egui::FullOutput) -> Result<(), wgpu::SurfaceError> {
        let surface = graphics.surface.get_current_texture()?;
        let target = surface.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.state.handle_platform_output(&graphics.window, output.platform_output);
        let primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(&graphics.device, &graphics.queue, *id, delta);
        }

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [graphics.config.width, graphics.config.height],
            pixels_per_point: output.pixels_per_point,
        };
        let mut encoder = graphics.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("ui encoder"),
        });
        let callbacks = self
            .renderer
            .update_buffers(&graphics.device, &graphics.queue, &mut encoder, &primitives, &screen);

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(&mut pass, &primitives, &screen);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        graphics
            .queue
            .submit(callbacks.into_iter().chain(std::iter::once(encoder.finish())));
        surface.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_matches_canvas_background() {
        let color = clear_color(palette::BACKGROUND);
        assert!((color.r - f64::from(palette::BACKGROUND[0])).abs() < 1e-9);
        assert!((color.b - f64::from(palette::BACKGROUND[2])).abs() < 1e-9);
        assert_eq!(color.a, 1.0);
    }
}
