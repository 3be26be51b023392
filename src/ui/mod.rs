// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for composing a flyer.
//! Handles layout, form controls, and wiring to export and preview.

pub mod components;

use eframe::egui;

use crate::mvu::{self, AppModel, Command, Msg, Services};
use crate::ui::components::{image_well, preview, share_sheet};

/// Stateful egui application for building and sharing flyers.
pub struct FlyerBuilderApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
    /// GPU copy of the picked image; lives here because textures need the egui context.
    image_texture: Option<egui::TextureHandle>,
    /// Picture of the open preview, which may differ from the form's current one.
    preview_texture: Option<egui::TextureHandle>,
}

impl FlyerBuilderApp {
    /// Spawn the command workers and start with an empty form.
    pub fn new(services: Services) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let model = AppModel {
            available_sources: services.available_sources(),
            ..Default::default()
        };

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(2, 4))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let services = services.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &services);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model,
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
            image_texture: None,
            preview_texture: None,
        }
    }
}

impl eframe::App for FlyerBuilderApp {
    /// Drives a single UI frame: drains worker results, applies messages, and renders panels and modals.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = &ui.ctx().clone();
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
            ctx.request_repaint();
        }

        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            if let Msg::ImagePicked(image) = &msg {
                self.image_texture = Some(ctx.load_texture(
                    "flyer-image",
                    image_well::texture_image(image),
                    egui::TextureOptions::default(),
                ));
            }
            if let Msg::PreviewReady(preview) = &msg {
                self.preview_texture = Some(ctx.load_texture(
                    "flyer-preview-image",
                    image_well::texture_image(&preview.image),
                    egui::TextureOptions::default(),
                ));
            }
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }

        egui::TopBottomPanel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Flyer Builder");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_actions(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_form(ui);
            });
        });

        self.render_overlays(ctx);
    }
}

impl FlyerBuilderApp {
    /// Share and preview triggers. Both always stay clickable; validation happens on click.
    fn render_actions(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(format!("{} Share", egui_phosphor::regular::SHARE_NETWORK))
            .on_hover_text("Create the flyer PDF and share it")
            .clicked()
        {
            self.inbox.push(Msg::ShareRequested);
        }
        if ui
            .button(format!("{} Preview", egui_phosphor::regular::EYE))
            .on_hover_text("Create the flyer PDF and preview it")
            .clicked()
        {
            self.inbox.push(Msg::PreviewRequested);
        }
    }

    /// Title, body, contact, and image well.
    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.label("Title");
        let mut title = self.model.flyer.title.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut title)
                    .hint_text("e.g., Garage Sale")
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            self.inbox.push(Msg::TitleChanged(title));
        }
        ui.add_space(12.0);

        ui.label("Body");
        let mut body = self.model.flyer.body.clone();
        if ui
            .add(
                egui::TextEdit::multiline(&mut body)
                    .hint_text("What is this flyer about?")
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            self.inbox.push(Msg::BodyChanged(body));
        }
        ui.add_space(12.0);

        ui.label("Contact");
        let mut contact = self.model.flyer.contact.clone();
        if ui
            .add(
                egui::TextEdit::multiline(&mut contact)
                    .hint_text("Phone, email, or address")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            self.inbox.push(Msg::ContactChanged(contact));
        }
        ui.label(
            egui::RichText::new("Contact details are repeated on the tear-off tabs.")
                .small()
                .color(egui::Color32::from_gray(110)),
        );
        ui.add_space(12.0);

        let well = image_well::view(
            ui,
            self.model.flyer.image.as_ref(),
            self.model.image_visible,
            self.image_texture.as_ref(),
        );
        self.inbox.extend(well);
    }

    /// Action sheet, share sheet, preview, and alert, in stacking order.
    fn render_overlays(&mut self, ctx: &egui::Context) {
        if self.model.image_sheet_open {
            let msgs = image_well::action_sheet(ctx);
            self.inbox.extend(msgs);
        }

        if let Some(request) = &self.model.share_sheet {
            let msgs = share_sheet::view(ctx, request, &self.model.flyer.title);
            self.inbox.extend(msgs);
        }

        if let Some(model) = &self.model.preview {
            let msgs = preview::view(ctx, model, self.preview_texture.as_ref());
            self.inbox.extend(msgs);
        }

        if let Some(alert) = &self.model.alert {
            egui::Modal::new(egui::Id::new("alert")).show(ctx, |ui| {
                ui.heading(&alert.title);
                ui.add_space(4.0);
                ui.label(&alert.message);
                ui.add_space(8.0);
                if ui.button(&alert.action).clicked() {
                    self.inbox.push(Msg::DismissAlert);
                }
            });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            }
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
        });
    }
}
