//! Drives an [`App`]'s virtual clock from the terminal front end.

use std::time::Duration;

use tokio::time::sleep;

use crate::shell::App;
use crate::workflow::Signal;

/// How simulated delays are spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Fire timers back to back.
    Instant,
    /// Sleep for each delay before firing.
    Realtime,
}

impl Pacing {
    pub fn from_flag(realtime: bool) -> Self {
        if realtime {
            Pacing::Realtime
        } else {
            Pacing::Instant
        }
    }
}

/// Fire timers until `done` holds or the queue runs dry.
///
/// `on_signal` sees every signal as it is raised.
pub async fn drive_until<D, S>(
    app: &mut App,
    pacing: Pacing,
    done: D,
    mut on_signal: S,
) -> Vec<Signal>
where
    D: Fn(&App) -> bool,
    S: FnMut(&App, &Signal),
{
    let mut signals = Vec::new();
    while !done(app) {
        let Some(wait_ms) = app.scheduler().next_due_in() else {
            break;
        };
        if pacing == Pacing::Realtime && wait_ms > 0 {
            sleep(Duration::from_millis(wait_ms)).await;
        }
        if let Some(fired) = app.step() {
            for signal in &fired {
                on_signal(app, signal);
            }
            signals.extend(fired);
        }
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::MaestroConfig;
    use crate::upload::CandidateFile;
    use crate::workflow::WorkflowState;

    fn fast_config() -> MaestroConfig {
        MaestroConfig {
            completion_base_ms: 5,
            completion_stagger_ms: 5,
            summarize_delay_ms: 5,
            chat_reply_delay_ms: 5,
            ..MaestroConfig::default()
        }
    }

    #[tokio::test]
    async fn instant_pacing_stops_at_condition() {
        let mut app = App::new(&MaestroConfig::default(), Catalog::default());
        app.upload(&[
            CandidateFile::new("a.txt", 1, "text/plain"),
            CandidateFile::new("b.txt", 1, "text/plain"),
        ])
        .unwrap();

        let signals = drive_until(
            &mut app,
            Pacing::Instant,
            |a| a.workflow().state() == WorkflowState::ReadyToSummarize,
            |_, _| {},
        )
        .await;

        assert_eq!(signals.len(), 3);
        assert_eq!(signals.last(), Some(&Signal::DialogOpened));
        assert_eq!(app.scheduler().now(), 1500);
    }

    #[tokio::test]
    async fn realtime_pacing_waits_for_delays() {
        let mut app = App::new(&fast_config(), Catalog::default());
        app.upload(&[CandidateFile::new("a.txt", 1, "text/plain")])
            .unwrap();

        let started = std::time::Instant::now();
        let mut seen = 0;
        drive_until(&mut app, Pacing::Realtime, |_| false, |_, _| seen += 1).await;

        assert!(started.elapsed() >= Duration::from_millis(5));
        assert_eq!(seen, 2);
        assert!(app.scheduler().is_idle());
    }

    #[test]
    fn pacing_from_flag() {
        assert_eq!(Pacing::from_flag(true), Pacing::Realtime);
        assert_eq!(Pacing::from_flag(false), Pacing::Instant);
    }
}
