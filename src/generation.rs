use crate::event::AppEvent;
use crate::store::{Action, CodeFiles, Role, Store};
use std::sync::mpsc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_millis(2000);

/// How long the simulated preview surface takes to report a load signal
/// after generation settles.
const PREVIEW_SETTLE_DELAY: Duration = Duration::from_millis(150);

const THINKING_PLACEHOLDER: &str = "Thinking...";
const CANCELLED_MESSAGE: &str = "This message was cancelled.";

struct PendingGeneration {
    id: u64,
    timer: JoinHandle<()>,
}

/// Sequences the simulated generation flow: a synchronous burst of store
/// transitions on entry, then a single-shot timer whose completion arrives
/// back through the event channel.
///
/// The pending timer is a real handle: `stop` aborts it and forgets its id,
/// so a completion racing a cancellation can never land. Stale
/// [`AppEvent::GenerationFinished`] deliveries are dropped by id.
pub struct GenerationController {
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
    delay: Duration,
    pending: Option<PendingGeneration>,
    next_id: u64,
}

impl GenerationController {
    pub fn new(tx: mpsc::Sender<AppEvent>, runtime_handle: Handle) -> Self {
        Self::with_delay(tx, runtime_handle, DEFAULT_GENERATION_DELAY)
    }

    pub fn with_delay(tx: mpsc::Sender<AppEvent>, runtime_handle: Handle, delay: Duration) -> Self {
        Self {
            tx,
            runtime_handle,
            delay,
            pending: None,
            next_id: 0,
        }
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|pending| pending.id)
    }

    /// Entry guard plus the Idle→Thinking transition. Returns false without
    /// touching the store when the visitor is unauthenticated or the prompt
    /// is empty; the caller is expected to navigate back to the landing
    /// page in that case.
    pub fn begin(&mut self, store: &mut Store, authenticated: bool) -> bool {
        let prompt = store.state().prompt.clone();
        if !authenticated || prompt.trim().is_empty() {
            return false;
        }

        let attachments = store.state().attached_files.clone();
        store.dispatch(Action::AddMessage {
            role: Role::User,
            content: prompt,
            attached_files: (!attachments.is_empty()).then_some(attachments),
        });
        store.dispatch(Action::ClearFilesAfterSubmit);
        store.dispatch(Action::SetGenerationStartTime(Some(Instant::now())));
        store.dispatch(Action::SetGenerating(true));
        store.dispatch(Action::SetPreviewError(false));
        store.dispatch(Action::SetPreviewLoaded(false));
        store.dispatch(Action::AddMessage {
            role: Role::Assistant,
            content: THINKING_PLACEHOLDER.to_string(),
            attached_files: None,
        });

        self.schedule_completion();
        true
    }

    /// Thinking→Completed. Ignores deliveries whose id no longer matches
    /// the pending generation (a stopped or superseded run).
    pub fn finish(&mut self, store: &mut Store, generation_id: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.id == generation_id => {}
            _ => return false,
        }
        self.pending = None;

        let prompt = store.state().prompt.clone();
        let elapsed_seconds = store
            .state()
            .generation_started_at
            .map(|started| started.elapsed().as_secs_f32().round() as u64)
            .unwrap_or(0);

        store.dispatch(Action::SetCodeFiles(scaffold_code(&prompt)));
        store.dispatch(Action::SetGenerating(false));
        store.dispatch(Action::UpdateLastMessage {
            content: format!(
                "Thought for {elapsed_seconds}s\n\nPerfect! I've generated your app based on \
                 \"{prompt}\". You can see the live preview and explore the HTML, CSS, and \
                 JavaScript code. What would you like to modify or add next?"
            ),
        });

        self.settle_preview(!store.state().code_files.is_empty());
        true
    }

    /// User-initiated stop. Only valid while a generation is in flight;
    /// aborts the pending timer so the completion cannot fire afterwards.
    pub fn stop(&mut self, store: &mut Store) -> bool {
        if !store.state().is_generating {
            return false;
        }

        if let Some(pending) = self.pending.take() {
            pending.timer.abort();
        }

        store.dispatch(Action::SetGenerating(false));
        store.dispatch(Action::SetPreviewLoaded(false));
        store.dispatch(Action::AddMessage {
            role: Role::Assistant,
            content: CANCELLED_MESSAGE.to_string(),
            attached_files: None,
        });
        true
    }

    fn schedule_completion(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.timer.abort();
        }

        self.next_id += 1;
        let id = self.next_id;
        let tx = self.tx.clone();
        let delay = self.delay;
        let timer = self.runtime_handle.spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(AppEvent::GenerationFinished { generation_id: id });
        });
        self.pending = Some(PendingGeneration { id, timer });
    }

    fn settle_preview(&self, loaded: bool) {
        let tx = self.tx.clone();
        self.runtime_handle.spawn(async move {
            time::sleep(PREVIEW_SETTLE_DELAY).await;
            let event = if loaded {
                AppEvent::PreviewLoaded
            } else {
                AppEvent::PreviewError
            };
            let _ = tx.send(event);
        });
    }
}

const SCAFFOLD_HTML: &str = r#"<div class="app-container">
  <header class="header">
    <h1>Welcome to Your App</h1>
    <p>Generated from: "{{prompt}}"</p>
  </header>

  <main class="main-content">
    <div class="card">
      <h2>Hello from {{greeting}}!</h2>
      <p>Your app is now ready for customization.</p>
      <button onclick="handleClick()" class="cta-button">Get Started</button>
    </div>
  </main>

  <footer class="footer">
    <p>&copy; 2024 Generated App</p>
  </footer>
</div>"#;

const SCAFFOLD_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
  line-height: 1.6;
  color: #333;
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  min-height: 100vh;
}

.app-container {
  max-width: 1200px;
  margin: 0 auto;
  padding: 20px;
}

.header {
  text-align: center;
  color: white;
  margin-bottom: 40px;
}

.header h1 {
  font-size: 3rem;
  font-weight: 700;
  margin-bottom: 10px;
}

.header p {
  font-size: 1.2rem;
  opacity: 0.9;
}

.main-content {
  display: flex;
  justify-content: center;
  margin-bottom: 40px;
}

.card {
  background: rgba(255, 255, 255, 0.9);
  backdrop-filter: blur(10px);
  border-radius: 20px;
  padding: 40px;
  text-align: center;
  box-shadow: 0 20px 40px rgba(0, 0, 0, 0.1);
  max-width: 500px;
}

.card h2 {
  font-size: 2rem;
  margin-bottom: 15px;
  color: #333;
}

.card p {
  font-size: 1.1rem;
  margin-bottom: 25px;
  color: #666;
}

.cta-button {
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  color: white;
  border: none;
  padding: 15px 30px;
  font-size: 1.1rem;
  border-radius: 50px;
  cursor: pointer;
  transition: transform 0.2s, box-shadow 0.2s;
}

.cta-button:hover {
  transform: translateY(-2px);
  box-shadow: 0 10px 20px rgba(0, 0, 0, 0.2);
}

.footer {
  text-align: center;
  color: white;
  opacity: 0.8;
  margin-top: 40px;
}

@media (max-width: 768px) {
  .header h1 {
    font-size: 2rem;
  }

  .card {
    margin: 0 20px;
    padding: 30px 20px;
  }
}"#;

const SCAFFOLD_JS: &str = r#"console.log('Generated app is ready!');

function handleClick() {
  alert('Welcome to your generated app! Start customizing it by chatting with the AI.');
}

// Add some interactivity
document.addEventListener('DOMContentLoaded', function() {
  console.log('App initialized for: {{prompt}}');

  // Add smooth scroll behavior
  document.documentElement.style.scrollBehavior = 'smooth';

  // Add click animations
  const button = document.querySelector('.cta-button');
  if (button) {
    button.addEventListener('click', function(e) {
      const ripple = document.createElement('span');
      ripple.style.cssText = `
        position: absolute;
        border-radius: 50%;
        background: rgba(255,255,255,0.6);
        transform: scale(0);
        animation: ripple 0.6s linear;
        pointer-events: none;
      `;

      const rect = this.getBoundingClientRect();
      const size = Math.max(rect.width, rect.height);
      ripple.style.width = ripple.style.height = size + 'px';
      ripple.style.left = e.clientX - rect.left - size / 2 + 'px';
      ripple.style.top = e.clientY - rect.top - size / 2 + 'px';

      this.style.position = 'relative';
      this.appendChild(ripple);

      setTimeout(() => ripple.remove(), 600);
    });
  }
});

// Add ripple animation CSS
const style = document.createElement('style');
style.textContent = `
  @keyframes ripple {
    to {
      transform: scale(4);
      opacity: 0;
    }
  }
`;
document.head.appendChild(style);"#;

/// Canned scaffold artifacts, parameterized only by template substitution.
/// No synthesis happens here.
pub fn scaffold_code(prompt: &str) -> CodeFiles {
    let greeting: String = prompt.split_whitespace().take(3).collect::<Vec<_>>().join(" ");
    CodeFiles {
        html: SCAFFOLD_HTML
            .replace("{{prompt}}", prompt)
            .replace("{{greeting}}", &greeting),
        css: SCAFFOLD_CSS.to_string(),
        js: SCAFFOLD_JS.replace("{{prompt}}", prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DeviceView, WorkspaceTab};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration as StdDuration;

    fn store_with_prompt(prompt: &str) -> Store {
        let mut store = Store::with_rng(StdRng::seed_from_u64(9));
        store.dispatch(Action::SetPrompt(prompt.to_string()));
        store
    }

    fn controller(delay: Duration) -> (GenerationController, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            GenerationController::with_delay(tx, Handle::current(), delay),
            rx,
        )
    }

    #[test]
    fn scaffold_embeds_the_prompt() {
        let code = scaffold_code("Build a todo app");
        assert!(code.html.contains("Build a todo app"));
        assert!(code.html.contains("Hello from Build a todo!"));
        assert!(code.js.contains("App initialized for: Build a todo app"));
        assert!(!code.css.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn entry_guard_blocks_unauthenticated_and_empty_prompts() {
        let (mut controller, _rx) = controller(DEFAULT_GENERATION_DELAY);

        let mut store = store_with_prompt("Build a todo app");
        assert!(!controller.begin(&mut store, false));
        assert!(store.state().messages.is_empty());
        assert!(!store.state().is_generating);

        let mut store = store_with_prompt("   ");
        assert!(!controller.begin(&mut store, true));
        assert!(store.state().messages.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn full_generation_scenario() {
        let (mut controller, rx) = controller(Duration::from_millis(20));
        let mut store = store_with_prompt("Build a todo app");

        assert!(controller.begin(&mut store, true));
        {
            let state = store.state();
            assert_eq!(state.messages.len(), 2);
            assert_eq!(state.messages[0].role, Role::User);
            assert_eq!(state.messages[0].content, "Build a todo app");
            assert_eq!(state.messages[1].content, "Thinking...");
            assert!(state.is_generating);
            assert!(!state.preview_error);
            assert!(!state.preview_loaded);
        }

        let event = tokio::task::spawn_blocking(move || rx.recv_timeout(StdDuration::from_secs(2)))
            .await
            .expect("join")
            .expect("the completion timer should fire");
        let AppEvent::GenerationFinished { generation_id } = event else {
            panic!("unexpected event: {event:?}");
        };
        assert!(controller.finish(&mut store, generation_id));

        let state = store.state();
        assert!(state.code_files.html.contains("Build a todo app"));
        assert!(!state.is_generating);
        let last = state.messages.last().expect("transcript should not be empty");
        assert!(last.content.starts_with("Thought for "));
        assert!(last.content.contains("todo app"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn begin_carries_attachments_into_the_user_message_and_clears_them() {
        use crate::attachments::AttachedFile;

        let (mut controller, _rx) = controller(DEFAULT_GENERATION_DELAY);
        let mut store = store_with_prompt("Build a gallery");
        let file = AttachedFile::new("mock.png", "image/png", 256);
        store.dispatch(Action::SetFiles(vec![file.clone()]));

        assert!(controller.begin(&mut store, true));
        let state = store.state();
        assert_eq!(state.messages[0].attached_files, Some(vec![file]));
        assert!(state.attached_files.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_cancels_the_pending_timer_and_appends_the_cancellation() {
        let (mut controller, rx) = controller(Duration::from_secs(30));
        let mut store = store_with_prompt("Build a todo app");

        assert!(controller.begin(&mut store, true));
        let stale_id = controller
            .pending_generation()
            .expect("a generation should be pending");

        assert!(controller.stop(&mut store));
        {
            let state = store.state();
            assert!(!state.is_generating);
            assert!(!state.preview_loaded);
            let last = state.messages.last().expect("transcript should not be empty");
            assert_eq!(last.content, "This message was cancelled.");
        }

        // Even a delivery that was already in flight must not land.
        assert!(!controller.finish(&mut store, stale_id));
        let last = store
            .state()
            .messages
            .last()
            .expect("transcript should not be empty");
        assert_eq!(last.content, "This message was cancelled.");
        assert!(store.state().code_files.is_empty());

        // The aborted timer never reports.
        let outcome =
            tokio::task::spawn_blocking(move || rx.recv_timeout(StdDuration::from_millis(200)))
                .await
                .expect("join");
        assert!(outcome.is_err(), "aborted timer should stay silent");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_without_a_running_generation_is_rejected() {
        let (mut controller, _rx) = controller(DEFAULT_GENERATION_DELAY);
        let mut store = store_with_prompt("Build a todo app");
        assert!(!controller.stop(&mut store));
        assert!(store.state().messages.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn a_second_begin_supersedes_the_first_pending_run() {
        let (mut controller, _rx) = controller(Duration::from_secs(30));
        let mut store = store_with_prompt("Build a todo app");

        assert!(controller.begin(&mut store, true));
        let first_id = controller.pending_generation().expect("pending");

        store.dispatch(Action::SetPrompt("Build a chess site".to_string()));
        assert!(controller.begin(&mut store, true));
        let second_id = controller.pending_generation().expect("pending");
        assert_ne!(first_id, second_id);

        assert!(!controller.finish(&mut store, first_id));
        assert!(controller.finish(&mut store, second_id));
        assert!(store.state().code_files.html.contains("Build a chess site"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn finishing_reports_a_preview_load_signal() {
        let (mut controller, rx) = controller(Duration::from_millis(10));
        let mut store = store_with_prompt("Build a todo app");

        assert!(controller.begin(&mut store, true));
        let event = tokio::task::spawn_blocking(move || {
            rx.recv_timeout(StdDuration::from_secs(2)).map(|first| (first, rx))
        })
        .await
        .expect("join")
        .expect("the completion timer should fire");
        let (first, rx) = event;
        let AppEvent::GenerationFinished { generation_id } = first else {
            panic!("unexpected event: {first:?}");
        };
        assert!(controller.finish(&mut store, generation_id));

        let settled = tokio::task::spawn_blocking(move || rx.recv_timeout(StdDuration::from_secs(2)))
            .await
            .expect("join")
            .expect("the preview surface should settle");
        assert!(matches!(settled, AppEvent::PreviewLoaded));
    }

    #[test]
    fn generation_flags_default_off() {
        let store = Store::with_rng(StdRng::seed_from_u64(1));
        assert!(!store.state().is_generating);
        assert_eq!(store.state().active_tab, WorkspaceTab::Preview);
        assert_eq!(store.state().device_view, DeviceView::Desktop);
    }
}
