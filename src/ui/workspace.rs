use crate::app::PromptForgeApp;
use crate::route::AppRoute;
use crate::store::{Action, CodeFiles, DeviceView, Role, WorkspaceTab};
use eframe::egui::{self, RichText, ScrollArea};

const MOBILE_PREVIEW_WIDTH: f32 = 390.0;
const TABLET_PREVIEW_WIDTH: f32 = 820.0;

/// The fixed artifact set the code browser exposes. Generation overwrites
/// all three wholesale, so the tree never changes shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeArtifact {
    Html,
    Css,
    Js,
}

impl CodeArtifact {
    pub const ALL: [CodeArtifact; 3] = [CodeArtifact::Html, CodeArtifact::Css, CodeArtifact::Js];

    pub fn file_name(self) -> &'static str {
        match self {
            CodeArtifact::Html => "index.html",
            CodeArtifact::Css => "styles.css",
            CodeArtifact::Js => "script.js",
        }
    }

    pub fn content(self, code: &CodeFiles) -> &str {
        match self {
            CodeArtifact::Html => &code.html,
            CodeArtifact::Css => &code.css,
            CodeArtifact::Js => &code.js,
        }
    }
}

pub fn render(app: &mut PromptForgeApp, ctx: &egui::Context) {
    egui::SidePanel::left("chat_panel")
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            render_chat_panel(app, ui);
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        render_preview_panel(app, ui);
    });
}

fn render_chat_panel(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    render_project_header(app, ui);
    ui.separator();

    let transcript_height = (ui.available_height() - 110.0).max(120.0);
    ScrollArea::vertical()
        .id_salt("chat_transcript")
        .max_height(transcript_height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in &app.store.state().messages {
                let (fill, speaker) = match message.role {
                    Role::User => (app.theme.user_bubble, "You"),
                    Role::Assistant => (app.theme.assistant_bubble, "PromptForge"),
                };
                app.theme.bubble_frame(fill).show(ui, |ui| {
                    ui.label(RichText::new(speaker).small().color(app.theme.text_muted));
                    ui.label(&message.content);
                    if let Some(files) = &message.attached_files {
                        ui.horizontal_wrapped(|ui| {
                            for file in files {
                                let kind = if file.is_video() { "video" } else { "image" };
                                ui.label(
                                    RichText::new(format!("[{kind}] {}", file.name))
                                        .small()
                                        .color(app.theme.text_muted),
                                );
                            }
                        });
                    }
                });
                ui.add_space(app.theme.spacing_4);
            }

            if app.scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
    app.scroll_to_bottom = false;

    ui.separator();
    render_chat_composer(app, ui);
}

fn render_project_header(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui.button("←").on_hover_text("Back to home").clicked() {
            app.navigate(AppRoute::Landing);
        }

        match app.rename_buffer.clone() {
            None => {
                ui.strong(&app.store.state().project_name);
                if ui.small_button("Rename").clicked() {
                    app.rename_buffer = Some(app.store.state().project_name.clone());
                }
            }
            Some(mut buffer) => {
                ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(180.0));
                app.rename_buffer = Some(buffer);
                if ui.small_button("Save").clicked() {
                    if let Some(name) = app.rename_buffer.take() {
                        if !name.trim().is_empty() {
                            app.store
                                .dispatch(Action::SetProjectName(name.trim().to_string()));
                        }
                    }
                }
                if ui.small_button("Cancel").clicked() {
                    app.rename_buffer = None;
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_code = !app.store.state().code_files.is_empty();
            if ui
                .add_enabled(has_code, egui::Button::new("Export").small())
                .on_hover_text("Copy the project as JSON")
                .clicked()
            {
                app.export_project(ui.ctx());
            }
        });
    });
}

fn render_chat_composer(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    if let Some(error) = app.upload_error.clone() {
        ui.label(RichText::new(error).color(app.theme.danger).small());
    }

    if !app.store.state().attached_files.is_empty() {
        let mut removed: Option<usize> = None;
        ui.horizontal_wrapped(|ui| {
            for (index, file) in app.store.state().attached_files.iter().enumerate() {
                ui.label(RichText::new(&file.name).small());
                if ui.small_button("✕").clicked() {
                    removed = Some(index);
                }
            }
        });
        if let Some(index) = removed {
            app.remove_attachment(index);
        }
    }

    let generating = app.store.state().is_generating;
    let mut send_now = false;
    ui.horizontal(|ui| {
        let hint = if generating {
            "Generating..."
        } else {
            "Ask for changes..."
        };
        let response = ui.add_enabled(
            !generating,
            egui::TextEdit::singleline(&mut app.chat_input)
                .desired_width(ui.available_width() - 80.0)
                .hint_text(hint),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send_now = true;
        }

        if generating {
            if ui.button("Stop").clicked() {
                app.stop_generation();
            }
        } else {
            let clicked = ui
                .add_enabled(
                    !app.chat_input.trim().is_empty(),
                    egui::Button::new("Send"),
                )
                .clicked();
            send_now |= clicked;
        }
    });

    if send_now && !generating {
        app.send_chat_message();
    }
}

fn render_preview_panel(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let active_tab = app.store.state().active_tab;
        for (tab, label) in [(WorkspaceTab::Preview, "Preview"), (WorkspaceTab::Code, "Code")] {
            if ui.selectable_label(active_tab == tab, label).clicked() {
                app.store.dispatch(Action::SetActiveTab(tab));
            }
        }

        ui.separator();

        let device_view = app.store.state().device_view;
        for device in DeviceView::ALL {
            if ui
                .selectable_label(device_view == device, device.label())
                .clicked()
            {
                app.store.dispatch(Action::SetDeviceView(device));
            }
        }

        ui.separator();

        let mut route = app.store.state().preview_route;
        let before = route;
        egui::ComboBox::from_id_salt("preview_route")
            .selected_text(route.as_path())
            .show_ui(ui, |ui| {
                for candidate in AppRoute::ALL {
                    ui.selectable_value(
                        &mut route,
                        candidate,
                        format!("{} ({})", candidate.as_path(), candidate.label()),
                    );
                }
            });
        if route != before {
            app.store.dispatch(Action::SetPreviewRoute(route));
        }
    });
    ui.separator();

    match app.store.state().active_tab {
        WorkspaceTab::Preview => render_preview_body(app, ui),
        WorkspaceTab::Code => render_code_browser(app, ui),
    }
}

fn render_preview_body(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    if app.store.state().is_generating {
        ui.vertical_centered(|ui| {
            ui.add_space(app.theme.spacing_24 * 2.0);
            ui.spinner();
            ui.add_space(app.theme.spacing_16);
            ui.label(
                RichText::new(
                    "Every great product starts with an idea.\nYou're moments away from seeing yours come to life.",
                )
                .size(18.0)
                .strong(),
            );
            ui.label(
                RichText::new("Hang tight while we generate your full-stack app from your input.")
                    .color(app.theme.text_muted),
            );
            ui.label(
                RichText::new("(Powered by AI – no code, no delays, just creation.)")
                    .small()
                    .color(app.theme.text_muted),
            );
        });
        return;
    }

    if app.store.state().preview_error {
        ui.vertical_centered(|ui| {
            ui.add_space(app.theme.spacing_24 * 2.0);
            ui.label(RichText::new("The preview failed to load.").color(app.theme.danger));
            if ui.button("Regenerate").clicked() {
                app.regenerate();
            }
        });
        return;
    }

    if app.store.state().code_files.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(app.theme.spacing_24 * 2.0);
            ui.label(
                RichText::new("Nothing generated yet. Send a prompt to get started.")
                    .color(app.theme.text_muted),
            );
        });
        return;
    }

    let prompt = app.store.state().prompt.clone();
    let greeting: String = prompt.split_whitespace().take(3).collect::<Vec<_>>().join(" ");
    let route_path = app.store.state().preview_route.as_path().to_string();
    let loaded = app.store.state().preview_loaded;

    let frame_width = match app.store.state().device_view {
        DeviceView::Mobile => MOBILE_PREVIEW_WIDTH,
        DeviceView::Tablet => TABLET_PREVIEW_WIDTH,
        DeviceView::Desktop => ui.available_width() - app.theme.spacing_24,
    };

    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(format!("{route_path} · {}", if loaded { "loaded" } else { "loading…" }))
                .small()
                .color(if loaded { app.theme.text_muted } else { app.theme.warning }),
        );
        ui.set_max_width(frame_width.max(MOBILE_PREVIEW_WIDTH));
        // Facsimile of the scaffold markup. egui hosts no web view, so the
        // surface renders the generated structure natively.
        app.theme.preview_frame().show(ui, |ui| {
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(0x33, 0x33, 0x33));
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Welcome to Your App").size(24.0).strong());
                ui.label(format!("Generated from: \"{prompt}\""));
                ui.add_space(app.theme.spacing_16);
                ui.group(|ui| {
                    ui.label(RichText::new(format!("Hello from {greeting}!")).size(18.0));
                    ui.label("Your app is now ready for customization.");
                    let _ = ui.button("Get Started");
                });
                ui.add_space(app.theme.spacing_16);
                ui.label(RichText::new("© 2024 Generated App").small());
            });
        });
    });
}

fn render_code_browser(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        for artifact in CodeArtifact::ALL {
            if ui
                .selectable_label(app.code_selection == artifact, artifact.file_name())
                .clicked()
            {
                app.code_selection = artifact;
            }
        }
    });
    ui.separator();

    let code = &app.store.state().code_files;
    let content = app.code_selection.content(code);
    ScrollArea::vertical().id_salt("code_browser").show(ui, |ui| {
        if content.is_empty() {
            ui.label(
                RichText::new("Empty until the first generation completes.")
                    .color(app.theme.text_muted),
            );
        } else {
            ui.monospace(content);
        }
    });
}
