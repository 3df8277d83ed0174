use crate::attachments::{self, AttachedFile, BatchKind};
use crate::auth::{AuthState, IdentityClient, OAuthProvider};
use crate::event::AppEvent;
use crate::generation::GenerationController;
use crate::route::AppRoute;
use crate::store::{Action, Store};
use crate::theme::Theme;
use crate::ui;
use crate::ui::workspace::CodeArtifact;
use eframe::egui::{self, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    fn clear_feedback(&mut self) {
        self.error = None;
        self.notice = None;
    }
}

pub struct PromptForgeApp {
    rx: Receiver<AppEvent>,
    identity: IdentityClient,
    generation: GenerationController,
    pub(crate) store: Store,
    pub(crate) auth: AuthState,
    pub(crate) route: AppRoute,
    pub(crate) theme: Theme,
    pub(crate) composer: String,
    pub(crate) chat_input: String,
    pub(crate) upload_error: Option<String>,
    pub(crate) auth_form: AuthForm,
    pub(crate) rename_buffer: Option<String>,
    pub(crate) code_selection: CodeArtifact,
    pub(crate) scroll_to_bottom: bool,
    diagnostics_log: Vec<String>,
}

impl PromptForgeApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        identity: IdentityClient,
        generation: GenerationController,
    ) -> Self {
        Self {
            rx,
            identity,
            generation,
            store: Store::new(),
            auth: AuthState::default(),
            route: AppRoute::Landing,
            theme: Theme::default(),
            composer: String::new(),
            chat_input: String::new(),
            upload_error: None,
            auth_form: AuthForm::default(),
            rename_buffer: None,
            code_selection: CodeArtifact::Html,
            scroll_to_bottom: false,
            diagnostics_log: Vec::new(),
        }
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "promptforge", "{message}");
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message));
    }

    /// Route change with the auth guard applied. Entering the workspace
    /// runs the generation entry guard; a rejected entry bounces back to
    /// the landing page, mirroring the redirect the workspace view does.
    pub(crate) fn navigate(&mut self, route: AppRoute) {
        let target = if route.requires_auth() && !self.auth.is_authenticated {
            self.log_diagnostic(format!(
                "navigation to {} denied, redirecting to sign-in",
                route.as_path()
            ));
            AppRoute::auth_failure_redirect()
        } else {
            route
        };

        if matches!(
            target,
            AppRoute::SignIn | AppRoute::SignUp | AppRoute::ForgotPassword
        ) {
            self.auth_form.clear_feedback();
        }

        self.route = target;

        if target == AppRoute::Workspace {
            if self.generation.begin(&mut self.store, self.auth.is_authenticated) {
                self.scroll_to_bottom = true;
                self.log_diagnostic("generation started");
            } else {
                self.log_diagnostic("workspace entered without a prompt, returning home");
                self.route = AppRoute::Landing;
            }
        }
    }

    /// Landing composer submit. Unauthenticated visitors get their prompt
    /// and attachments preserved across the sign-in redirect.
    pub(crate) fn submit_prompt(&mut self) {
        let prompt = self.composer.trim().to_string();
        if prompt.is_empty() {
            return;
        }

        if !self.auth.is_authenticated {
            let files = self.store.state().attached_files.clone();
            self.store.dispatch(Action::PreservePrompt {
                prompt: self.composer.clone(),
                files,
            });
            self.log_diagnostic("prompt preserved across sign-in redirect");
            self.navigate(AppRoute::SignIn);
            return;
        }

        self.store.dispatch(Action::SetPrompt(self.composer.clone()));
        self.composer.clear();
        self.navigate(AppRoute::Workspace);
    }

    /// Follow-up prompt from the workspace chat; re-enters the scripted
    /// generation flow with the new text.
    pub(crate) fn send_chat_message(&mut self) {
        let text = self.chat_input.trim().to_string();
        if text.is_empty() || self.store.state().is_generating {
            return;
        }

        self.chat_input.clear();
        self.store.dispatch(Action::SetPrompt(text));
        if self.generation.begin(&mut self.store, self.auth.is_authenticated) {
            self.scroll_to_bottom = true;
            self.log_diagnostic("generation started");
        }
    }

    pub(crate) fn stop_generation(&mut self) {
        if self.generation.stop(&mut self.store) {
            self.scroll_to_bottom = true;
            self.log_diagnostic("generation cancelled by user");
        }
    }

    pub(crate) fn regenerate(&mut self) {
        self.store.dispatch(Action::SetPreviewError(false));
        if self.generation.begin(&mut self.store, self.auth.is_authenticated) {
            self.scroll_to_bottom = true;
            self.log_diagnostic("regeneration started after preview error");
        }
    }

    pub(crate) fn attach_files(&mut self, incoming: Vec<AttachedFile>, batch: Option<BatchKind>) {
        let admission =
            attachments::admit(&self.store.state().attached_files, incoming, batch);
        self.upload_error = admission.error.as_ref().map(ToString::to_string);
        if let Some(error) = &admission.error {
            self.log_diagnostic(format!("attachment rejected: {error}"));
        }
        self.store.dispatch(Action::SetFiles(admission.files));
    }

    pub(crate) fn remove_attachment(&mut self, index: usize) {
        let mut files = self.store.state().attached_files.clone();
        if index < files.len() {
            files.remove(index);
            self.store.dispatch(Action::SetFiles(files));
        }
        self.upload_error = None;
    }

    pub(crate) fn submit_sign_in(&mut self) {
        self.auth_form.clear_feedback();
        self.auth_form.submitting = true;
        self.auth.is_loading = true;
        self.identity
            .sign_in(self.auth_form.email.clone(), self.auth_form.password.clone());
    }

    pub(crate) fn submit_sign_up(&mut self) {
        self.auth_form.clear_feedback();
        self.auth_form.submitting = true;
        self.auth.is_loading = true;
        self.identity
            .sign_up(self.auth_form.email.clone(), self.auth_form.password.clone());
    }

    pub(crate) fn submit_oauth(&mut self, provider: OAuthProvider) {
        self.auth_form.clear_feedback();
        self.auth_form.submitting = true;
        self.auth.is_loading = true;
        self.identity.sign_in_with_provider(provider);
    }

    pub(crate) fn submit_password_reset(&mut self) {
        self.auth_form.clear_feedback();
        self.auth_form.submitting = true;
        self.identity
            .request_password_reset(self.auth_form.email.clone());
    }

    /// Copies the project (name, prompt, generated files) to the clipboard
    /// as pretty-printed JSON.
    pub(crate) fn export_project(&mut self, ctx: &egui::Context) {
        match serde_json::to_string_pretty(&self.store.state().snapshot()) {
            Ok(json) => {
                ctx.copy_text(json);
                self.log_diagnostic("project exported to clipboard as JSON");
            }
            Err(err) => self.log_diagnostic(format!("project export failed: {err}")),
        }
    }

    pub(crate) fn sign_out(&mut self) {
        self.identity.sign_out();
        self.log_diagnostic("sign-out requested");
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.apply_event(event);
                    ctx.request_repaint();
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AuthCompleted(Ok(profile)) => {
                self.log_diagnostic(format!("signed in as {}", profile.email));
                self.auth.is_authenticated = true;
                self.auth.is_loading = false;
                self.auth.profile = Some(profile);
                self.auth_form.submitting = false;
                self.auth_form.password.clear();

                let preserved_prompt = self.store.state().preserved_prompt.clone();
                if !preserved_prompt.is_empty() {
                    let preserved_files = self.store.state().preserved_files.clone();
                    self.store.dispatch(Action::SetPrompt(preserved_prompt));
                    self.store.dispatch(Action::SetFiles(preserved_files));
                    self.store.dispatch(Action::ClearPreserved);
                    self.composer.clear();
                    self.log_diagnostic("restored preserved prompt after sign-in");
                    self.navigate(AppRoute::auth_success_redirect());
                } else if matches!(
                    self.route,
                    AppRoute::SignIn | AppRoute::SignUp | AppRoute::ForgotPassword
                ) {
                    self.navigate(AppRoute::Landing);
                }
            }
            AppEvent::AuthCompleted(Err(message)) => {
                self.log_diagnostic(format!("sign-in failed: {message}"));
                self.auth.is_loading = false;
                self.auth_form.submitting = false;
                self.auth_form.error = Some(message);
            }
            AppEvent::SignedOut => {
                self.log_diagnostic("signed out");
                self.auth = AuthState::default();
                self.navigate(AppRoute::Landing);
            }
            AppEvent::PasswordResetSent(Ok(email)) => {
                self.log_diagnostic(format!("password reset link sent to {email}"));
                self.auth_form.submitting = false;
                self.auth_form.notice = Some(format!("Password reset link sent to {email}."));
            }
            AppEvent::PasswordResetSent(Err(message)) => {
                self.auth_form.submitting = false;
                self.auth_form.error = Some(message);
            }
            AppEvent::GenerationFinished { generation_id } => {
                if self.generation.finish(&mut self.store, generation_id) {
                    self.scroll_to_bottom = true;
                    self.log_diagnostic("generation completed");
                } else {
                    self.log_diagnostic(format!(
                        "stale completion for generation {generation_id} dropped (pending: {:?})",
                        self.generation.pending_generation()
                    ));
                }
            }
            AppEvent::PreviewLoaded => {
                self.store.dispatch(Action::SetPreviewLoaded(true));
            }
            AppEvent::PreviewError => {
                self.store.dispatch(Action::SetPreviewError(true));
                self.log_diagnostic("preview surface reported a load failure");
            }
        }
    }

    /// Files dropped anywhere on the window become attachment candidates.
    /// Drops are untagged batches, so per-file rejections surface the
    /// first file's own message.
    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let incoming: Vec<AttachedFile> = dropped
            .iter()
            .map(|file| {
                let name = file
                    .path
                    .as_ref()
                    .and_then(|path| path.file_name())
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.name.clone());
                let size_bytes = file.bytes.as_ref().map(|bytes| bytes.len() as u64).unwrap_or(0);
                AttachedFile::new(name.clone(), attachments::media_type_for_name(&name), size_bytes)
            })
            .collect();

        self.attach_files(incoming, None);
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("PromptForge");
                ui.separator();
                if ui.button("Home").clicked() {
                    self.navigate(AppRoute::Landing);
                }
                if ui.button("Pricing").clicked() {
                    self.navigate(AppRoute::Pricing);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.auth.is_authenticated {
                        let display_name = self
                            .auth
                            .profile
                            .as_ref()
                            .map(|profile| profile.display_name.clone())
                            .unwrap_or_default();
                        if ui.button("Sign out").clicked() {
                            self.sign_out();
                        }
                        ui.label(RichText::new(display_name).color(self.theme.text_muted));
                    } else if self.auth.is_loading {
                        ui.spinner();
                        ui.label(RichText::new("Checking session...").color(self.theme.text_muted));
                    } else {
                        if ui.button("Sign up").clicked() {
                            self.navigate(AppRoute::SignUp);
                        }
                        if ui.button("Sign in").clicked() {
                            self.navigate(AppRoute::SignIn);
                        }
                    }
                });
            });
        });
    }

    fn render_diagnostics(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("diagnostics_panel")
            .resizable(false)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Diagnostics")
                    .default_open(false)
                    .show(ui, |ui| {
                        ScrollArea::vertical()
                            .id_salt("diagnostics_log")
                            .max_height(90.0)
                            .stick_to_bottom(true)
                            .show(ui, |ui| {
                                for entry in &self.diagnostics_log {
                                    ui.label(entry);
                                }
                            });
                    });
            });
    }
}

impl eframe::App for PromptForgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);

        if matches!(self.route, AppRoute::Landing | AppRoute::Workspace) {
            self.collect_dropped_files(ctx);
        }

        self.render_top_bar(ctx);
        self.render_diagnostics(ctx);

        let route = self.route;
        match route {
            AppRoute::Landing => ui::landing::render(self, ctx),
            AppRoute::Workspace => ui::workspace::render(self, ctx),
            AppRoute::SignIn | AppRoute::SignUp | AppRoute::ForgotPassword => {
                ui::auth::render(self, ctx, route)
            }
            AppRoute::Pricing => ui::pricing::render(self, ctx),
        }
    }
}
