use crate::app::PromptForgeApp;
use eframe::egui::{self, RichText};

pub const PROMPT_TEMPLATES: [&str; 5] = [
    "Build a landing page",
    "Build a TikTok game",
    "Build a todo application",
    "Build a food delivery mobile application",
    "Build a CRM tool",
];

pub fn render(app: &mut PromptForgeApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(app.theme.spacing_24 * 3.0);
            ui.label(
                RichText::new("From Idea to App — Delivered in 5 Minutes.")
                    .size(30.0)
                    .strong(),
            );
            ui.label(
                RichText::new("Describe it with a prompt, image, or video — get your app in 5 minutes.")
                    .color(app.theme.text_muted),
            );
            ui.add_space(app.theme.spacing_24);
        });

        ui.vertical_centered(|ui| {
            ui.set_max_width(680.0);
            render_composer(app, ui);
            ui.add_space(app.theme.spacing_8);
            render_attachment_strip(app, ui);
            ui.add_space(app.theme.spacing_16);
            render_templates(app, ui);
        });
    });
}

fn render_composer(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    let frame = app.theme.composer_frame();
    frame.show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut app.composer)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("Describe the app you want to build..."),
        );
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Drop images or videos here to attach")
                    .small()
                    .color(app.theme.text_muted),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let can_submit = !app.composer.trim().is_empty();
                let create = egui::Button::new("Create")
                    .min_size(egui::vec2(72.0, app.theme.button_height));
                if ui.add_enabled(can_submit, create).clicked() {
                    app.submit_prompt();
                }
            });
        });
    });

    if let Some(error) = app.upload_error.clone() {
        ui.label(RichText::new(error).color(app.theme.danger).small());
    }
}

fn render_attachment_strip(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    if app.store.state().attached_files.is_empty() {
        return;
    }

    let mut removed: Option<usize> = None;
    ui.horizontal_wrapped(|ui| {
        for (index, file) in app.store.state().attached_files.iter().enumerate() {
            let kind = if file.is_video() { "video" } else { "image" };
            let label = format!("{} ({kind}, {} KB)", file.name, file.size_bytes / 1024);
            ui.label(RichText::new(label).small());
            if ui
                .small_button("✕")
                .on_hover_text(format!("Remove {kind}"))
                .clicked()
            {
                removed = Some(index);
            }
        }
    });

    if let Some(index) = removed {
        app.remove_attachment(index);
    }
}

fn render_templates(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.horizontal_wrapped(|ui| {
        for template in PROMPT_TEMPLATES {
            let chip = egui::Button::new(template).stroke(app.theme.subtle_button_stroke());
            if ui.add(chip).clicked() {
                app.composer = template.to_string();
            }
        }
    });
}
