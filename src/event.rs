use crate::auth::Profile;

/// Everything asynchronous funnels through one channel into the UI loop:
/// identity outcomes, the generation timer, and preview surface signals.
#[derive(Debug, Clone)]
pub enum AppEvent {
    AuthCompleted(Result<Profile, String>),
    SignedOut,
    PasswordResetSent(Result<String, String>),
    GenerationFinished { generation_id: u64 },
    PreviewLoaded,
    PreviewError,
}
