use crate::event::AppEvent;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use tokio::runtime::Handle;
use tokio::time::{self, Duration};

/// Simulated round-trip latency for every identity operation.
const MOCK_LATENCY: Duration = Duration::from_millis(400);

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub fn label(self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::GitHub => "GitHub",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::GitHub => "github",
        }
    }
}

/// Snapshot of the identity gate as the UI sees it. Updated only from
/// [`AppEvent`]s; nothing else writes it.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub profile: Option<Profile>,
}

/// Client for the external identity service. This build ships a mock: each
/// operation spawns a short task on the runtime and reports its outcome
/// over the event channel, the same shape a real backend client would use.
#[derive(Clone)]
pub struct IdentityClient {
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl IdentityClient {
    pub fn new(tx: mpsc::Sender<AppEvent>, runtime_handle: Handle) -> Self {
        Self { tx, runtime_handle }
    }

    pub fn sign_in(&self, email: String, password: String) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            time::sleep(MOCK_LATENCY).await;
            let _ = tx.send(AppEvent::AuthCompleted(authenticate(&email, &password)));
        });
    }

    pub fn sign_up(&self, email: String, password: String) {
        // The mock treats registration like a first sign-in: same
        // validation, immediately authenticated on success.
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            time::sleep(MOCK_LATENCY).await;
            let _ = tx.send(AppEvent::AuthCompleted(authenticate(&email, &password)));
        });
    }

    pub fn sign_in_with_provider(&self, provider: OAuthProvider) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            time::sleep(MOCK_LATENCY).await;
            let slug = provider.slug();
            let profile = Profile {
                user_id: format!("user-{slug}-demo"),
                email: format!("demo@{slug}.example"),
                display_name: format!("{} user", provider.label()),
            };
            let _ = tx.send(AppEvent::AuthCompleted(Ok(profile)));
        });
    }

    pub fn sign_out(&self) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            time::sleep(MOCK_LATENCY).await;
            let _ = tx.send(AppEvent::SignedOut);
        });
    }

    pub fn request_password_reset(&self, email: String) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            time::sleep(MOCK_LATENCY).await;
            let result = if is_well_formed_email(&email) {
                Ok(email)
            } else {
                Err("Enter a valid email address.".to_string())
            };
            let _ = tx.send(AppEvent::PasswordResetSent(result));
        });
    }
}

fn is_well_formed_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn authenticate(email: &str, password: &str) -> Result<Profile, String> {
    if !is_well_formed_email(email) {
        return Err("Enter a valid email address.".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.".to_string());
    }

    let local = email.split('@').next().unwrap_or_default();
    Ok(Profile {
        user_id: format!("user-{local}"),
        email: email.to_string(),
        display_name: local.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[test]
    fn well_formed_credentials_authenticate() {
        let profile = authenticate("ada@example.com", "hunter22").expect("should authenticate");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.display_name, "ada");
        assert_eq!(profile.user_id, "user-ada");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "nodomain", "@example.com", "ada@", "a@b@c"] {
            let err = authenticate(email, "hunter22").expect_err("should reject");
            assert_eq!(err, "Enter a valid email address.");
        }
    }

    #[test]
    fn short_passwords_are_rejected() {
        let err = authenticate("ada@example.com", "12345").expect_err("should reject");
        assert_eq!(err, "Password must be at least 6 characters.");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn sign_in_reports_its_outcome_over_the_channel() {
        let (tx, rx) = mpsc::channel();
        let client = IdentityClient::new(tx, Handle::current());

        client.sign_in("ada@example.com".to_string(), "hunter22".to_string());
        let event = tokio::task::spawn_blocking(move || rx.recv_timeout(StdDuration::from_secs(2)))
            .await
            .expect("join")
            .expect("an auth event should arrive");

        match event {
            AppEvent::AuthCompleted(Ok(profile)) => assert_eq!(profile.display_name, "ada"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn oauth_sign_in_yields_a_canned_profile() {
        let (tx, rx) = mpsc::channel();
        let client = IdentityClient::new(tx, Handle::current());

        client.sign_in_with_provider(OAuthProvider::GitHub);
        let event = tokio::task::spawn_blocking(move || rx.recv_timeout(StdDuration::from_secs(2)))
            .await
            .expect("join")
            .expect("an auth event should arrive");

        match event {
            AppEvent::AuthCompleted(Ok(profile)) => {
                assert_eq!(profile.email, "demo@github.example");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn password_reset_validates_the_email() {
        let (tx, rx) = mpsc::channel();
        let client = IdentityClient::new(tx, Handle::current());

        client.request_password_reset("not-an-email".to_string());
        let event = tokio::task::spawn_blocking(move || rx.recv_timeout(StdDuration::from_secs(2)))
            .await
            .expect("join")
            .expect("a reset event should arrive");

        match event {
            AppEvent::PasswordResetSent(Err(message)) => {
                assert_eq!(message, "Enter a valid email address.");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
