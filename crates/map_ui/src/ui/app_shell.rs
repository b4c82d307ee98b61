use std::time::Duration;

use eframe::egui;
use map_core::config::WidgetsConfig;

use crate::app::MapsApp;
use crate::ui::overlays::{render_alert, render_toasts};
use crate::ui::panels::{render_promo_panel, render_ride_panel};

pub fn run(config: WidgetsConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SwiftRide Maps")
            .with_inner_size([1280.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "SwiftRide Maps",
        options,
        Box::new(move |_cc| Ok(Box::new(MapsApp::new(&config)))),
    )
}

impl eframe::App for MapsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick();

        egui::SidePanel::left("ride_map")
            .resizable(false)
            .exact_width(ctx.available_rect().width() / 2.0)
            .show(ctx, |ui| {
                render_ride_panel(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_promo_panel(ui, self);
        });

        render_toasts(ctx, self);
        render_alert(ctx, self);
        self.open_pending_links(ctx);

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
