//! Two stacked axes with pan, rubberband zoom, history and coordinate
//! readout.
//!
//! Run with `cargo run --example navigate`. Set `RUST_LOG=egui_plotnav=debug`
//! to follow the navigation state machine.

use eframe::{NativeOptions, egui};
use egui_plotnav::{Axes, Chart, Figure, Scale};
use tracing_subscriber::EnvFilter;

struct DemoApp {
    chart: Chart,
    status: String,
}

impl DemoApp {
    fn new() -> Self {
        let signal = (0..1000)
            .map(|i| {
                let t = i as f64 / 100.0;
                (t, (-t / 4.0).exp() * (3.0 * t).cos())
            })
            .collect();
        let envelope = (0..1000)
            .map(|i| {
                let t = i as f64 / 100.0;
                (t, (-t / 4.0).exp())
            })
            .collect();
        let spectrum = (1..200)
            .map(|i| {
                let f = i as f64 * 5.0;
                (f, 1.0 / (1.0 + (f / 50.0).powi(2)))
            })
            .collect();

        let mut figure = Figure::new(800, 600).with_title("Damped oscillation");
        figure.add_axes(
            Axes::new([0.1, 0.55, 0.85, 0.38])
                .xlim(0.0, 10.0)
                .ylim(-1.0, 1.0)
                .line("signal", signal, [31, 119, 180])
                .line("envelope", envelope, [255, 127, 14]),
        );
        figure.add_axes(
            Axes::new([0.1, 0.08, 0.85, 0.38])
                .xlim(5.0, 1000.0)
                .ylim(1e-3, 1.0)
                .xscale(Scale::Log10)
                .yscale(Scale::Log10)
                .line("response", spectrum, [44, 160, 44]),
        );

        Self {
            chart: Chart::new(figure),
            status: String::new(),
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("mode: {:?}", self.chart.navigation().mode()));
                if ui.button("Save to temp dir").clicked() {
                    self.status = match self.chart.save_figure(Some(&std::env::temp_dir()), None, None) {
                        Ok(path) => format!("saved {}", path.display()),
                        Err(err) => err.to_string(),
                    };
                }
                ui.label(&self.status);
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(&mut self.chart);
        });
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = DemoApp::new();
    eframe::run_native(
        "egui-plotnav navigation demo",
        NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
