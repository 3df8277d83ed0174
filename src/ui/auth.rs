use crate::app::PromptForgeApp;
use crate::auth::OAuthProvider;
use crate::route::AppRoute;
use eframe::egui::{self, RichText};

pub fn render(app: &mut PromptForgeApp, ctx: &egui::Context, route: AppRoute) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(app.theme.spacing_24 * 2.0);
            ui.set_max_width(360.0);

            let frame = app.theme.card_frame();
            frame.show(ui, |ui| match route {
                AppRoute::SignIn => render_sign_in(app, ui),
                AppRoute::SignUp => render_sign_up(app, ui),
                AppRoute::ForgotPassword => render_forgot_password(app, ui),
                // Routed here only for the three auth pages.
                _ => {}
            });
        });
    });
}

fn render_feedback(app: &PromptForgeApp, ui: &mut egui::Ui) {
    if let Some(error) = &app.auth_form.error {
        ui.label(RichText::new(error).color(app.theme.danger));
    }
    if let Some(notice) = &app.auth_form.notice {
        ui.label(RichText::new(notice).color(app.theme.success));
    }
}

fn render_credential_fields(app: &mut PromptForgeApp, ui: &mut egui::Ui, with_password: bool) {
    ui.label(RichText::new("Email").small().color(app.theme.text_muted));
    ui.add(
        egui::TextEdit::singleline(&mut app.auth_form.email)
            .desired_width(f32::INFINITY)
            .hint_text("you@example.com"),
    );
    if with_password {
        ui.label(RichText::new("Password").small().color(app.theme.text_muted));
        ui.add(
            egui::TextEdit::singleline(&mut app.auth_form.password)
                .desired_width(f32::INFINITY)
                .password(true),
        );
    }
}

fn render_oauth_buttons(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.separator();
    for provider in [OAuthProvider::Google, OAuthProvider::GitHub] {
        if ui
            .add_enabled(
                !app.auth_form.submitting,
                egui::Button::new(format!("Continue with {}", provider.label())),
            )
            .clicked()
        {
            app.submit_oauth(provider);
        }
    }
}

fn render_sign_in(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.heading("Sign in");
    if !app.store.state().preserved_prompt.is_empty() {
        ui.label(
            RichText::new("Sign in to continue building your app.")
                .small()
                .color(app.theme.text_muted),
        );
    }
    render_feedback(app, ui);
    render_credential_fields(app, ui, true);

    if ui
        .add_enabled(!app.auth_form.submitting, egui::Button::new("Sign in"))
        .clicked()
    {
        app.submit_sign_in();
    }
    render_oauth_buttons(app, ui);

    ui.separator();
    if ui.link("Forgot password?").clicked() {
        app.navigate(AppRoute::ForgotPassword);
    }
    if ui.link("Need an account? Sign up").clicked() {
        app.navigate(AppRoute::SignUp);
    }
}

fn render_sign_up(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.heading("Create your account");
    render_feedback(app, ui);
    render_credential_fields(app, ui, true);

    if ui
        .add_enabled(!app.auth_form.submitting, egui::Button::new("Sign up"))
        .clicked()
    {
        app.submit_sign_up();
    }
    render_oauth_buttons(app, ui);

    ui.separator();
    if ui.link("Already have an account? Sign in").clicked() {
        app.navigate(AppRoute::SignIn);
    }
}

fn render_forgot_password(app: &mut PromptForgeApp, ui: &mut egui::Ui) {
    ui.heading("Reset your password");
    ui.label(
        RichText::new("We'll email you a link to reset it.")
            .small()
            .color(app.theme.text_muted),
    );
    render_feedback(app, ui);
    render_credential_fields(app, ui, false);

    if ui
        .add_enabled(!app.auth_form.submitting, egui::Button::new("Send reset link"))
        .clicked()
    {
        app.submit_password_reset();
    }

    ui.separator();
    if ui.link("Back to sign in").clicked() {
        app.navigate(AppRoute::SignIn);
    }
}
