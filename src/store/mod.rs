use crate::attachments::AttachedFile;
use crate::route::AppRoute;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::{Instant, SystemTime};

pub mod naming;

pub const DEFAULT_PROJECT_NAME: &str = "ai-sketchpad-70";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: SystemTime,
    pub attached_files: Option<Vec<AttachedFile>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFiles {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl CodeFiles {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceTab {
    Preview,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceView {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceView {
    pub const ALL: [DeviceView; 3] = [DeviceView::Mobile, DeviceView::Tablet, DeviceView::Desktop];

    pub fn label(self) -> &'static str {
        match self {
            DeviceView::Mobile => "Mobile",
            DeviceView::Tablet => "Tablet",
            DeviceView::Desktop => "Desktop",
        }
    }
}

/// The whole client state, owned by [`Store`] and mutated only through
/// dispatched [`Action`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub prompt: String,
    pub attached_files: Vec<AttachedFile>,
    pub project_name: String,
    pub messages: Vec<Message>,
    pub code_files: CodeFiles,
    pub active_tab: WorkspaceTab,
    pub preview_route: AppRoute,
    pub device_view: DeviceView,
    pub is_generating: bool,
    pub generation_started_at: Option<Instant>,
    pub preview_error: bool,
    pub preview_loaded: bool,
    pub preserved_prompt: String,
    pub preserved_files: Vec<AttachedFile>,
    /// Vestigial duplicate of the identity gate's flag. Nothing writes it
    /// except [`Action::SetLoginStatus`]; auth decisions read
    /// `AuthState::is_authenticated` instead. Kept because existing call
    /// sites may still read either flag.
    pub is_logged_in: bool,
}

impl AppState {
    fn initial() -> Self {
        Self {
            prompt: String::new(),
            attached_files: Vec::new(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            messages: Vec::new(),
            code_files: CodeFiles::default(),
            active_tab: WorkspaceTab::Preview,
            preview_route: AppRoute::Workspace,
            device_view: DeviceView::Desktop,
            is_generating: false,
            generation_started_at: None,
            preview_error: false,
            preview_loaded: false,
            preserved_prompt: String::new(),
            preserved_files: Vec::new(),
            is_logged_in: false,
        }
    }
}

/// Borrowed view of the pieces that make up an exported project, for the
/// workspace Export action.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSnapshot<'a> {
    pub project_name: &'a str,
    pub prompt: &'a str,
    pub code_files: &'a CodeFiles,
}

impl AppState {
    pub fn snapshot(&self) -> ProjectSnapshot<'_> {
        ProjectSnapshot {
            project_name: &self.project_name,
            prompt: &self.prompt,
            code_files: &self.code_files,
        }
    }
}

/// Closed union of state transitions. The match in [`Store::dispatch`] is
/// exhaustive, so adding a kind forces every consumer to be revisited.
#[derive(Debug, Clone)]
pub enum Action {
    SetPrompt(String),
    SetFiles(Vec<AttachedFile>),
    SetProjectName(String),
    AddMessage {
        role: Role,
        content: String,
        attached_files: Option<Vec<AttachedFile>>,
    },
    UpdateLastMessage {
        content: String,
    },
    SetCodeFiles(CodeFiles),
    SetActiveTab(WorkspaceTab),
    SetPreviewRoute(AppRoute),
    SetDeviceView(DeviceView),
    SetGenerating(bool),
    SetGenerationStartTime(Option<Instant>),
    SetPreviewError(bool),
    SetPreviewLoaded(bool),
    PreservePrompt {
        prompt: String,
        files: Vec<AttachedFile>,
    },
    ClearPreserved,
    ClearFilesAfterSubmit,
    /// Vestigial, see [`AppState::is_logged_in`].
    SetLoginStatus(bool),
}

/// Single source of truth. Transitions are synchronous and never fail; no
/// I/O happens inside `dispatch`. Message ids come from a store-owned
/// counter and are strictly increasing. The RNG feeds the project-name
/// suffix and is seedable for tests.
pub struct Store {
    state: AppState,
    next_message_id: u64,
    rng: StdRng,
}

impl Store {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            state: AppState::initial(),
            next_message_id: 1,
            rng,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetPrompt(prompt) => {
                if !prompt.trim().is_empty() {
                    self.state.project_name = naming::derive_project_name(&prompt, &mut self.rng);
                }
                self.state.prompt = prompt;
            }
            Action::SetFiles(files) => {
                // Wholesale replacement. The attachment cap lives in the
                // admission validator, not here.
                self.state.attached_files = files;
            }
            Action::SetProjectName(name) => {
                self.state.project_name = name;
            }
            Action::AddMessage {
                role,
                content,
                attached_files,
            } => {
                let id = self.next_message_id;
                self.next_message_id += 1;
                self.state.messages.push(Message {
                    id,
                    role,
                    content,
                    timestamp: SystemTime::now(),
                    attached_files,
                });
            }
            Action::UpdateLastMessage { content } => {
                if let Some(last) = self.state.messages.last_mut() {
                    last.content = content;
                }
            }
            Action::SetCodeFiles(code_files) => {
                self.state.code_files = code_files;
            }
            Action::SetActiveTab(tab) => {
                self.state.active_tab = tab;
            }
            Action::SetPreviewRoute(route) => {
                self.state.preview_route = route;
            }
            Action::SetDeviceView(device) => {
                self.state.device_view = device;
            }
            Action::SetGenerating(flag) => {
                self.state.is_generating = flag;
            }
            Action::SetGenerationStartTime(instant) => {
                self.state.generation_started_at = instant;
            }
            Action::SetPreviewError(flag) => {
                self.state.preview_error = flag;
            }
            Action::SetPreviewLoaded(flag) => {
                self.state.preview_loaded = flag;
            }
            Action::PreservePrompt { prompt, files } => {
                self.state.preserved_prompt = prompt;
                self.state.preserved_files = files;
            }
            Action::ClearPreserved => {
                self.state.preserved_prompt.clear();
                self.state.preserved_files.clear();
            }
            Action::ClearFilesAfterSubmit => {
                self.state.attached_files.clear();
            }
            Action::SetLoginStatus(flag) => {
                self.state.is_logged_in = flag;
            }
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
