//! Physics Lab
//!
//! Interactive physics simulations with a formula reference and laboratory
//! worksheets. Shows:
//! - Simulation catalog by category, with live parameters and readouts
//! - Equations sidebar for the running simulation
//! - Searchable formula reference
//! - Laboratory worksheets saved per user
//!
//! Controls:
//! - Space: Pause/resume the simulation
//! - R: Reset the simulation
//! - Tab: Next simulation in the catalog
//! - F1: Formula reference

use std::time::Instant;

use common::{AppConfig, FrameHost, GraphicsContext, Locale, MountedSimulation};
use laboratory::{LabKind, LabSession};
use physics_lab::catalog::{Category, SimulationKind};
use physics_lab::equations_ui::{draw_equations_sidebar, draw_formula_reference};
use physics_lab::gui::EguiLayer;
use physics_lab::painter::paint_frame;
use physics_lab::views::{readout_bar, run_controls, ParameterPanel, WorksheetView};
use physics_lab::SessionServices;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Simulation,
    Formulas,
    Laboratory,
}

enum Action {
    Select(SimulationKind),
    Show(View),
    OpenLab(LabKind),
}

struct App {
    ctx: GraphicsContext,
    egui: EguiLayer,
    services: SessionServices,
    host: FrameHost,
    selected: SimulationKind,
    // Only mounted while the simulation view is open
    mounted: Option<MountedSimulation>,
    view: View,
    locale: Locale,
    parameters: ParameterPanel,
    lab: Option<LabSession>,
    worksheet: WorksheetView,
    formula_query: String,
    show_welcome: bool,
    started: Instant,
}

impl App {
    fn new(ctx: GraphicsContext, services: SessionServices) -> Self {
        let egui = EguiLayer::new(&ctx);
        let locale = services.config().locale;
        let show_welcome = services.take_splash();

        let mut app = Self {
            ctx,
            egui,
            services,
            host: FrameHost::new(),
            selected: SimulationKind::Pendulum,
            mounted: None,
            view: View::Simulation,
            locale,
            parameters: ParameterPanel::default(),
            lab: None,
            worksheet: WorksheetView::default(),
            formula_query: String::new(),
            show_welcome,
            started: Instant::now(),
        };
        app.mount_selected();
        app
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Replace the mounted simulation with a fresh one of the selected kind
    fn mount_selected(&mut self) {
        let kind = self.selected;
        let canvas = self.services.config().canvas_size();
        // the previous mount is dropped before the new one subscribes
        MountedSimulation::replace(
            &mut self.mounted,
            kind.slug(),
            || kind.instantiate(canvas),
            &self.host,
            self.ctx.size_vec(),
        );
        self.parameters.clear();
        log::info!("Selected simulation: {}", kind.title(Locale::En));
    }

    fn show(&mut self, view: View) {
        if view == self.view && (view != View::Simulation || self.mounted.is_some()) {
            return;
        }
        self.view = view;
        match view {
            View::Simulation => self.mount_selected(),
            View::Formulas => self.mounted = None,
            View::Laboratory => {
                self.mounted = None;
                if self.lab.is_none() {
                    let kind = self.selected.lab().unwrap_or(LabKind::PendulumPeriod);
                    self.open_lab(kind);
                }
            }
        }
    }

    fn open_lab(&mut self, kind: LabKind) {
        let now = self.now();
        self.lab = Some(self.services.open_lab(kind, now));
        self.worksheet.clear();
        log::info!("Opened laboratory: {}", kind.slug());
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Select(kind) => {
                self.selected = kind;
                self.view = View::Simulation;
                self.mount_selected();
            }
            Action::Show(view) => self.show(view),
            Action::OpenLab(kind) => {
                self.open_lab(kind);
                self.show(View::Laboratory);
            }
        }
    }

    fn next_simulation(&mut self) {
        let index = SimulationKind::ALL
            .iter()
            .position(|&kind| kind == self.selected)
            .unwrap_or(0);
        let next = SimulationKind::ALL[(index + 1) % SimulationKind::ALL.len()];
        self.apply(Action::Select(next));
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.host.resize(self.ctx.size_vec());
    }

    fn update(&mut self) {
        let now = self.now();
        self.host.refresh(now);
    }

    fn build_ui(&mut self, ctx: &egui::Context) -> Option<Action> {
        let mut action = None;
        let locale = self.locale;

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (view, label) in [
                    (View::Simulation, "Simulations"),
                    (View::Formulas, "Formulas"),
                    (View::Laboratory, "Laboratory"),
                ] {
                    if ui.selectable_label(self.view == view, label).clicked() {
                        action = Some(Action::Show(view));
                    }
                }
                ui.separator();
                ui.selectable_value(&mut self.locale, Locale::En, "EN");
                ui.selectable_value(&mut self.locale, Locale::Uz, "UZ");
                ui.separator();
                match &self.services.config().user {
                    Some(user) => ui.label(format!("👤 {user}")),
                    None => ui.label(egui::RichText::new("Not signed in").italics()),
                };
            });
        });

        match self.view {
            View::Simulation => {
                egui::SidePanel::left("catalog")
                    .resizable(true)
                    .default_width(260.0)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            for category in Category::ALL {
                                ui.collapsing(category.title(locale), |ui| {
                                    for kind in SimulationKind::in_category(category) {
                                        let label = ui
                                            .selectable_label(self.selected == kind, kind.title(locale))
                                            .on_hover_text(kind.description());
                                        if label.clicked() && self.selected != kind {
                                            action = Some(Action::Select(kind));
                                        }
                                    }
                                });
                            }

                            ui.separator();
                            ui.heading(self.selected.title(locale));
                            ui.label(egui::RichText::new(self.selected.description()).small());
                            ui.add_space(6.0);

                            if let Some(mounted) = &self.mounted {
                                let mut simulation = mounted.simulation_mut();
                                run_controls(ui, &mut **simulation);
                                ui.add_space(6.0);
                                self.parameters.show(ui, &mut **simulation, locale);
                            }

                            if let Some(lab) = self.selected.lab() {
                                ui.add_space(8.0);
                                if ui.button(format!("🧪 {}", lab.title(locale))).clicked() {
                                    action = Some(Action::OpenLab(lab));
                                }
                            }
                        });
                    });

                draw_equations_sidebar(ctx, &self.selected.formulas());

                if let Some(mounted) = &self.mounted {
                    let simulation = mounted.simulation();
                    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                        readout_bar(ui, &simulation.readouts(), simulation.is_terminal());
                    });
                    egui::CentralPanel::default()
                        .frame(egui::Frame::none().fill(egui::Color32::BLACK))
                        .show(ctx, |ui| {
                            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                            paint_frame(&painter, simulation.frame(), response.rect);
                        });
                }
            }
            View::Formulas => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(kind) = draw_formula_reference(ui, &mut self.formula_query, locale) {
                        action = Some(Action::Select(kind));
                    }
                });
            }
            View::Laboratory => {
                egui::SidePanel::left("labs").default_width(240.0).show(ctx, |ui| {
                    for kind in LabKind::ALL {
                        let current = self.lab.as_ref().map(LabSession::kind) == Some(kind);
                        if ui.selectable_label(current, kind.title(locale)).clicked() && !current {
                            action = Some(Action::OpenLab(kind));
                        }
                    }
                });
                let now = self.now();
                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(lab) = &mut self.lab {
                        self.worksheet.show(ui, lab, self.services.results(), locale, now);
                    }
                });
            }
        }

        if self.show_welcome {
            egui::Window::new("Welcome to Physics Lab")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut self.show_welcome)
                .show(ctx, |ui| {
                    ui.label("Pick a simulation on the left and change its parameters while it runs.");
                    ui.label("The Formulas tab lists the equations behind every simulation.");
                    ui.label("The Laboratory tab records your own measurements.");
                });
        }

        action
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let raw_input = self.egui.take_input(&self.ctx.window);
        let egui_ctx = self.egui.context();
        let mut action = None;
        let output = egui_ctx.run(raw_input, |ctx| action = self.build_ui(ctx));
        if let Some(action) = action {
            self.apply(action);
        }
        self.egui.paint(&self.ctx, output)
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => {
                if let Some(mounted) = &self.mounted {
                    mounted.simulation_mut().toggle_pause();
                }
            }
            KeyCode::KeyR => {
                if let Some(mounted) = &self.mounted {
                    mounted.simulation_mut().reset();
                }
            }
            KeyCode::Tab => self.next_simulation(),
            KeyCode::F1 => self.show(View::Formulas),
            _ => {}
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.on_window_event(&self.ctx.window, event)
    }
}

fn main() {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(&config));

    // The logger only exists once the graphics context is up
    match &loaded {
        Ok(_) => log::info!("Configuration loaded"),
        Err(err) => log::warn!("{err}; falling back to default configuration"),
    }

    let mut app = App::new(ctx, SessionServices::new(config));

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => app.resize(*size),
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key),
                                    state,
                                    ..
                                },
                            ..
                        } if !consumed => app.handle_key(*key, *state),
                        WindowEvent::RedrawRequested => {
                            app.update();
                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => log::error!("Render error: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
