/**
 * OnRide Desktop App - Main Entry Point
 *
 * Implements eframe::App, draining background results once per frame and
 * dispatching to the view for the current screen.
 */
use eframe::egui;
use onride::egui_app::{theme, views, AppState};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("onride=info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 820.0])
            .with_min_inner_size([400.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "OnRide",
        options,
        Box::new(|cc| {
            theme::styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(OnRideApp::default()))
        }),
    )
}

/// Main application state
struct OnRideApp {
    state: AppState,
}

impl Default for OnRideApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for OnRideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_results();

        views::render_top_bar(ctx, &mut self.state);

        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
