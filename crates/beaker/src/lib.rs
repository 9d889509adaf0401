//! # Beaker
//!
//! The application facade: wires the tutor chat, the editor surface, and
//! the run orchestrator together, and persists the two user preferences
//! (theme flag, last-edited buffer) on every change.
//!
//! The host UI renders what this crate exposes; Beaker itself never
//! touches a rendering surface.

use std::sync::Arc;

use beaker_core::Context;
use beaker_core::event::{appearance, editor as editor_events};
use chat::Transcript;
use editor::EditorSurface;
use oracle::{ChatSession, Oracle};
use runner::Runner;
use settings::{CODE_KEY, PreferenceStore, THEME_KEY};
use theme::{Theme, ThemeKind};

/// Buffer contents for a first-time user
pub const DEFAULT_CODE: &str = "print(\"Hello, Beaker!\")\n\
# Lab note: this code is like a chemical reaction;\n\
# it takes reactants in and yields a product (the output).";

/// Seeded tutor greeting; shown instantly, costs no oracle call
pub const WELCOME_MESSAGE: &str = "\
Hi! 👋 I'm **Beaker**! 🧪 Your personal code-lab partner.\n\n\
I hear you like general chemistry. Excellent! ⚗️ We'll combine code \
elements the way we combine elements on the bench.\n\n\
Ready? Our first experiment is the **PRINT** command: it's how we write \
an observation into the lab notebook.\n\n\
Shall we start? 🚀";

/// The assembled tutor application
pub struct App {
    context: Context,
    theme: Theme,
    editor: EditorSurface,
    runner: Arc<Runner>,
    session: ChatSession,
    chat: Transcript,
}

impl App {
    /// Boot against the user preference file
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self::with_preferences(oracle, PreferenceStore::load_user())
    }

    /// Boot with an explicit preference store (tests, embedded hosts)
    pub fn with_preferences(oracle: Arc<dyn Oracle>, preferences: PreferenceStore) -> Self {
        let theme_kind: ThemeKind = preferences.get_or(THEME_KEY, ThemeKind::Light);
        let code = preferences.get_or(CODE_KEY, DEFAULT_CODE.to_string());

        let context = Context::new(preferences);
        let editor = EditorSurface::with_text(code);
        let runner = Arc::new(Runner::new(Arc::clone(&oracle)));
        let session = ChatSession::new(oracle);

        let mut chat = Transcript::new();
        chat.push_model(WELCOME_MESSAGE);

        tracing::info!(version = env!("CARGO_PKG_VERSION"), "⚗️ beaker initialized");

        Self {
            context,
            theme: Theme::for_kind(theme_kind),
            editor,
            runner,
            session,
            chat,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Flip the theme flag, persist it, and notify subscribers
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.context
            .preferences()
            .write()
            .set(THEME_KEY, self.theme.kind);
        self.context.events().emit(appearance::ThemeChanged {
            dark: self.theme.kind.is_dark(),
        });
    }

    pub fn editor(&self) -> &EditorSurface {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorSurface {
        &mut self.editor
    }

    /// The host input's text changed: update the surface and persist the
    /// buffer.
    pub fn on_editor_change(&mut self, text: &str, cursor: usize) {
        self.editor.on_change(text, cursor);
        self.context.preferences().write().set(CODE_KEY, text);
        self.context.events().emit(editor_events::BufferChanged {
            text: text.to_string(),
        });
    }

    pub fn runner(&self) -> &Arc<Runner> {
        &self.runner
    }

    /// Run the current buffer through the oracle simulation
    pub async fn run(&self) -> Option<runner::RunOutcome> {
        self.runner.run(self.editor.text()).await
    }

    /// Explain the current buffer without a run phase
    pub async fn explain(&self) -> bool {
        self.runner.explain(self.editor.text()).await
    }

    pub fn chat(&self) -> &Transcript {
        &self.chat
    }

    /// Send a chat message and stream the tutor's reply into the
    /// transcript, fragment by fragment.
    pub async fn send_chat(&mut self, message: impl Into<String>) {
        use futures::StreamExt;

        let message = message.into();
        if message.trim().is_empty() {
            return;
        }

        self.chat.push_user(&message);
        self.chat.begin_reply();

        let mut fragments = self.session.send(message);
        while let Some(fragment) = fragments.next().await {
            self.chat.append_fragment(&fragment);
        }
    }
}
