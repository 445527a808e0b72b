/// State of the demo panel, owned by whoever drives the UI frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoPanel {
    pub show_demo_window: bool,
    pub show_another_window: bool,
    pub value: f32,
    pub counter: i32,
    pub clear_color: [f32; 3],
}

impl Default for DemoPanel {
    fn default() -> Self {
        Self {
            show_demo_window: true,
            show_another_window: false,
            value: 0.0,
            counter: 0,
            clear_color: [0.45, 0.55, 0.60],
        }
    }
}

impl DemoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn click_button(&mut self) {
        self.counter += 1;
    }

    /// Lays out the panel for the current egui frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        let dt = ctx.input(|i| i.stable_dt);

        egui::Window::new("Hello, world!").show(ctx, |ui| {
            ui.label("This is some useful text.");
            ui.checkbox(&mut self.show_demo_window, "Demo Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(egui::Slider::new(&mut self.value, 0.0..=1.0).text("float"));
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut self.clear_color);
                ui.label("clear color");
            });

            ui.horizontal(|ui| {
                if ui.button("Button").clicked() {
                    self.click_button();
                }
                ui.label(format!("counter = {}", self.counter));
            });

            ui.label(frame_stats(dt));
        });

        if self.show_another_window {
            egui::Window::new("Another Window")
                .open(&mut self.show_another_window)
                .show(ctx, |ui| {
                    ui.label("Hello from another window!");
                });
        }

        if self.show_demo_window {
            egui::Window::new("Inspection")
                .open(&mut self.show_demo_window)
                .show(ctx, |ui| {
                    ctx.inspection_ui(ui);
                });
        }
    }
}

pub fn frame_stats(dt: f32) -> String {
    let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
    format!(
        "Application average {:.3} ms/frame ({:.1} FPS)",
        dt * 1000.0,
        fps
    )
}
