//! Simulated chat transcript.
//!
//! A [`ChatSession`] records user questions and answers each one, after a
//! fixed delay on the scheduler, with the same canned reply and the catalog's
//! financial metrics.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{Catalog, FinancialMetric, Insight, SuggestedQuery};
use crate::events::TimerEvent;
use crate::scheduler::Scheduler;

pub const ASSISTANT_REPLY: &str = "Here are the financial metrics based on your query:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Metrics sharing a category, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricGroup {
    pub category: String,
    pub metrics: Vec<FinancialMetric>,
}

/// Group metrics by category. Categories keep the order in which they are
/// first seen.
pub fn group_metrics(metrics: &[FinancialMetric]) -> Vec<MetricGroup> {
    let mut groups: Vec<MetricGroup> = Vec::new();
    for metric in metrics {
        match groups.iter_mut().find(|g| g.category == metric.category) {
            Some(group) => group.metrics.push(metric.clone()),
            None => groups.push(MetricGroup {
                category: metric.category.clone(),
                metrics: vec![metric.clone()],
            }),
        }
    }
    groups
}

pub struct ChatSession {
    messages: Vec<ChatMessage>,
    draft: String,
    loading: bool,
    results_visible: bool,
    reply_delay_ms: u64,
    catalog: Arc<Catalog>,
}

impl ChatSession {
    pub fn new(reply_delay_ms: u64, catalog: Arc<Catalog>) -> Self {
        Self {
            messages: Vec::new(),
            draft: String::new(),
            loading: false,
            results_visible: false,
            reply_delay_ms,
            catalog,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    pub fn suggested_queries(&self) -> &[SuggestedQuery] {
        &self.catalog.suggested_queries
    }

    pub fn related_insights(&self) -> &[Insight] {
        &self.catalog.related_insights
    }

    pub fn grouped_metrics(&self) -> Vec<MetricGroup> {
        group_metrics(&self.catalog.metrics)
    }

    /// Copy a suggested query into the draft.
    pub fn use_suggestion(&mut self, index: usize) -> Option<&str> {
        let query = self.catalog.suggested_queries.get(index)?.query.clone();
        self.draft = query;
        Some(self.draft.as_str())
    }

    /// Send the current draft.
    ///
    /// Blank drafts and sends while a reply is outstanding are ignored.
    /// The draft itself is cleared only when the reply arrives.
    pub fn submit(&mut self, scheduler: &mut Scheduler<TimerEvent>) -> bool {
        if self.loading || self.draft.trim().is_empty() {
            debug!(loading = self.loading, "chat submit ignored");
            return false;
        }

        info!(query = %self.draft, "chat query sent");
        self.messages
            .push(ChatMessage::new(Role::User, self.draft.clone()));
        self.loading = true;
        self.results_visible = false;
        scheduler.schedule(self.reply_delay_ms, TimerEvent::AssistantReply);
        true
    }

    /// Set the draft and send it in one step.
    pub fn ask(&mut self, query: impl Into<String>, scheduler: &mut Scheduler<TimerEvent>) -> bool {
        self.set_draft(query);
        self.submit(scheduler)
    }

    /// Apply a fired timer. Returns `true` when a reply was appended.
    pub fn handle(&mut self, event: TimerEvent) -> bool {
        if event != TimerEvent::AssistantReply || !self.loading {
            return false;
        }
        self.messages
            .push(ChatMessage::new(Role::Assistant, ASSISTANT_REPLY));
        self.draft.clear();
        self.loading = false;
        self.results_visible = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        ChatSession::new(1000, Arc::new(Catalog::default()))
    }

    #[test]
    fn reply_arrives_after_delay() {
        let mut chat = session();
        let mut sched = Scheduler::new();

        assert!(chat.ask("What was revenue?", &mut sched));
        assert!(chat.is_loading());
        assert!(!chat.results_visible());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::User);

        assert!(sched.advance(999).is_empty());
        for event in sched.advance(1) {
            assert!(chat.handle(event));
        }

        assert!(!chat.is_loading());
        assert!(chat.results_visible());
        assert!(chat.draft().is_empty());
        assert_eq!(chat.messages()[1].role, Role::Assistant);
        assert_eq!(chat.messages()[1].content, ASSISTANT_REPLY);
    }

    #[test]
    fn blank_query_is_ignored() {
        let mut chat = session();
        let mut sched = Scheduler::new();
        assert!(!chat.ask("   \n", &mut sched));
        assert!(chat.messages().is_empty());
        assert!(sched.is_idle());
    }

    #[test]
    fn second_query_ignored_while_loading() {
        let mut chat = session();
        let mut sched = Scheduler::new();
        chat.ask("first", &mut sched);
        assert!(!chat.ask("second", &mut sched));
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn suggestion_fills_draft() {
        let mut chat = session();
        assert_eq!(
            chat.use_suggestion(1),
            Some("How did net interest income perform?")
        );
        assert_eq!(chat.draft(), "How did net interest income perform?");
        assert_eq!(chat.use_suggestion(99), None);
    }

    #[test]
    fn metrics_grouped_in_first_seen_order() {
        let groups = session().grouped_metrics();
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Financial Performance",
                "Credit Quality",
                "Loans and Deposits"
            ]
        );
        assert_eq!(groups[0].metrics.len(), 4);
        assert_eq!(groups[1].metrics.len(), 2);
        assert_eq!(groups[2].metrics.len(), 2);
    }

    #[test]
    fn grouping_merges_non_adjacent_categories() {
        let m = |c: &str, v: &str| FinancialMetric {
            category: c.into(),
            value: v.into(),
            details: None,
            trend: crate::catalog::Trend::Neutral,
        };
        let groups = group_metrics(&[m("A", "1"), m("B", "2"), m("A", "3")]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].metrics[1].value, "3");
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut chat = session();
        assert!(!chat.handle(TimerEvent::SummaryReady));
        assert!(!chat.handle(TimerEvent::AssistantReply));
    }

    #[test]
    fn message_ids_are_unique() {
        let mut chat = session();
        let mut sched = Scheduler::new();
        chat.ask("q", &mut sched);
        for e in sched.advance(1000) {
            chat.handle(e);
        }
        assert_ne!(chat.messages()[0].id, chat.messages()[1].id);
    }
}
