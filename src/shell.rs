//! Top-level application state.
//!
//! [`AppState`] is the login/tab/suggestions routing. [`App`] owns it together
//! with the scheduler, the upload workflow and the chat session, and routes
//! every fired timer to its owner.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::chat::ChatSession;
use crate::config::MaestroConfig;
use crate::error::UploadError;
use crate::events::TimerEvent;
use crate::scheduler::Scheduler;
use crate::upload::{CandidateFile, FileId, FileValidator};
use crate::workflow::{Signal, SummaryWorkflow, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Upload,
}

/// Sidebar entries. Dashboard and Settings have no page of their own and
/// lead to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Chat,
    UploadFiles,
    Settings,
}

impl NavItem {
    pub const ALL: [NavItem; 4] = [
        NavItem::Dashboard,
        NavItem::Chat,
        NavItem::UploadFiles,
        NavItem::Settings,
    ];

    pub fn target(self) -> Tab {
        match self {
            NavItem::UploadFiles => Tab::Upload,
            NavItem::Dashboard | NavItem::Chat | NavItem::Settings => Tab::Chat,
        }
    }
}

impl fmt::Display for NavItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavItem::Dashboard => write!(f, "Dashboard"),
            NavItem::Chat => write!(f, "Chat"),
            NavItem::UploadFiles => write!(f, "Upload Files"),
            NavItem::Settings => write!(f, "Settings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub logged_in: bool,
    pub active_tab: Tab,
    pub suggestions_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            logged_in: false,
            active_tab: Tab::Chat,
            suggestions_visible: false,
        }
    }
}

impl AppState {
    /// No credentials are checked.
    pub fn login(&mut self) {
        self.logged_in = true;
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn navigate(&mut self, item: NavItem) {
        if self.logged_in {
            self.active_tab = item.target();
        }
    }

    /// Only the Chat and Upload Files entries are ever highlighted.
    pub fn is_highlighted(&self, item: NavItem) -> bool {
        matches!(item, NavItem::Chat | NavItem::UploadFiles) && item.target() == self.active_tab
    }

    pub fn header_title(&self) -> &'static str {
        match self.active_tab {
            Tab::Chat => "MarketMaestro Assistant",
            Tab::Upload => "File Upload",
        }
    }

    pub fn on_summarized(&mut self) {
        self.suggestions_visible = true;
        self.active_tab = Tab::Chat;
    }
}

pub struct App {
    pub state: AppState,
    session_id: Uuid,
    scheduler: Scheduler<TimerEvent>,
    workflow: SummaryWorkflow,
    chat: ChatSession,
}

impl App {
    pub fn new(config: &MaestroConfig, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let session_id = Uuid::new_v4();
        debug!(%session_id, max_files = config.max_files, "app created");
        Self {
            state: AppState::default(),
            session_id,
            scheduler: Scheduler::new(),
            workflow: SummaryWorkflow::new(
                FileValidator::new(config.max_files),
                config.completion_timing(),
                config.summarize_delay_ms,
                Arc::clone(&catalog),
            ),
            chat: ChatSession::new(config.chat_reply_delay_ms, catalog),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn workflow(&self) -> &SummaryWorkflow {
        &self.workflow
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    pub fn scheduler(&self) -> &Scheduler<TimerEvent> {
        &self.scheduler
    }

    pub fn login(&mut self) {
        self.state.login();
        info!(session_id = %self.session_id, "logged in");
    }

    pub fn logout(&mut self) {
        self.state.logout();
        info!(session_id = %self.session_id, "logged out");
    }

    pub fn upload(&mut self, candidates: &[CandidateFile]) -> Result<Vec<FileId>, UploadError> {
        self.workflow.submit(candidates, &mut self.scheduler)
    }

    pub fn summarize(&mut self) -> Transition {
        self.workflow.summarize(&mut self.scheduler)
    }

    /// Close the summary dialog, switching back to chat with suggestions on.
    pub fn close_dialog(&mut self) -> Option<Signal> {
        let signal = self.workflow.close_dialog();
        if signal == Some(Signal::Summarized) {
            self.state.on_summarized();
        }
        signal
    }

    pub fn reopen_dialog(&mut self) -> bool {
        self.workflow.reopen_dialog()
    }

    pub fn ask(&mut self, query: &str) -> bool {
        self.chat.ask(query, &mut self.scheduler)
    }

    /// Copy a suggested query into the chat draft. Suggestions are only
    /// offered once a summary has been closed.
    pub fn use_suggestion(&mut self, index: usize) -> Option<&str> {
        if !self.state.suggestions_visible {
            debug!(index, "suggestions hidden");
            return None;
        }
        self.chat.use_suggestion(index)
    }

    pub fn submit_draft(&mut self) -> bool {
        self.chat.submit(&mut self.scheduler)
    }

    /// Move virtual time forward and apply whatever fired.
    pub fn advance(&mut self, ms: u64) -> Vec<Signal> {
        let fired = self.scheduler.advance(ms);
        fired.into_iter().flat_map(|e| self.dispatch(e)).collect()
    }

    /// Fire the next queued timer, if any.
    pub fn step(&mut self) -> Option<Vec<Signal>> {
        let event = self.scheduler.advance_to_next()?;
        Some(self.dispatch(event))
    }

    /// Fire timers until the queue is empty.
    pub fn run_until_idle(&mut self) -> Vec<Signal> {
        let mut signals = Vec::new();
        while let Some(fired) = self.step() {
            signals.extend(fired);
        }
        signals
    }

    fn dispatch(&mut self, event: TimerEvent) -> Vec<Signal> {
        match event {
            TimerEvent::AssistantReply => {
                self.chat.handle(event);
                Vec::new()
            }
            TimerEvent::FileCompleted(_) | TimerEvent::SummaryReady => self.workflow.handle(event),
        }
    }
}
