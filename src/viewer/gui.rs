use anyhow::{anyhow, Result};
use eframe::egui;

use super::{ViewerWindow, INSTRUCTIONS};

/// Native window geometry for the viewer.
pub fn viewport(window: &ViewerWindow) -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title(window.title.clone())
        .with_inner_size([window.width as f32, window.height as f32])
        .with_resizable(true)
}

pub fn start(window: &ViewerWindow) -> Result<()> {
    log::info!("[GUI] instruction viewer starting...");
    let options = eframe::NativeOptions {
        viewport: viewport(window),
        ..Default::default()
    };

    let title = window.title.clone();
    eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(InstructionsApp { title }))),
    )
    .map_err(|err| anyhow!("Failed to open the instruction window: {err}"))?;

    log::info!("[GUI] instruction viewer closed");
    Ok(())
}

struct InstructionsApp {
    title: String,
}

impl eframe::App for InstructionsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(self.title.as_str());
            });

        // ScrollArea re-measures its content every frame, so the scrollbar
        // always spans the whole block.
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(INSTRUCTIONS).monospace());
                });
        });
    }
}
