// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the flyer builder window.

use eframe::egui;
use egui_phosphor::Variant;

use crate::config::FlyerConfig;
use crate::mvu::Services;
use crate::ui::FlyerBuilderApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: &FlyerConfig) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let services = Services::from_config(config);
    log::info!(
        "Shared flyers will be written to {}",
        services.share_target.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flyer Builder",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(FlyerBuilderApp::new(services)))
        }),
    )
}
