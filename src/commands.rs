//! Subcommand implementations.

use anyhow::{Result, bail};
use tracing::info;

use crate::error::MaestroError;
use crate::runner::{Pacing, drive_until};
use crate::shell::{App, NavItem};
use crate::ui::{Renderer, Spinner};
use crate::upload::{CandidateFile, PDF_MEDIA_TYPE};
use crate::workflow::{Signal, Transition, WorkflowState};

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub pacing: Pacing,
    pub json: bool,
}

/// Upload `candidates`, wait for every file, summarize, and close the dialog.
pub async fn upload_and_summarize(
    app: &mut App,
    renderer: &Renderer,
    candidates: &[CandidateFile],
    out: Output,
) -> Result<()> {
    app.state.navigate(NavItem::UploadFiles);
    renderer.header(&app.state);
    renderer.upload_hint(app.workflow().remaining_slots());

    if let Err(err) = app.upload(candidates) {
        renderer.upload_error(&err);
        return Err(MaestroError::from(err).into());
    }
    renderer.file_rows(&app.workflow().rows());

    let spinner = Spinner::start(&format!("Uploading {} file(s)", candidates.len()));
    drive_until(
        app,
        out.pacing,
        |a| a.workflow().dialog_open(),
        |a, signal| {
            if let Signal::FileCompleted(id) = signal
                && let Some(file) = a.workflow().files().iter().find(|t| t.id == *id)
            {
                spinner.println(format!("  uploaded {}", file.file.name));
            }
        },
    )
    .await;
    spinner.finish();

    if !app.workflow().dialog_open() {
        bail!("uploads did not complete");
    }
    renderer.file_rows(&app.workflow().rows());
    println!();
    renderer.processed_table(&app.workflow().processed_files());

    if let Transition::Unchanged(state) = app.summarize() {
        bail!("cannot summarize from {state}");
    }
    let spinner = Spinner::start("Summarizing Files");
    drive_until(
        app,
        out.pacing,
        |a| a.workflow().state() == WorkflowState::Done,
        |_, _| spinner.set_message("Please wait while we process your documents...".into()),
    )
    .await;
    spinner.finish();

    match app.workflow().report() {
        Some(report) if out.json => renderer.report_json(report)?,
        Some(report) => renderer.report(report),
        None => bail!("summary did not finish"),
    }

    app.close_dialog();
    info!(tab = ?app.state.active_tab, "summary dialog closed");
    Ok(())
}

/// Send one chat query and print the transcript.
pub async fn ask(
    app: &mut App,
    renderer: &Renderer,
    query: Option<&str>,
    suggestion: usize,
    out: Output,
) -> Result<()> {
    app.state.navigate(NavItem::Chat);
    renderer.header(&app.state);
    if app.state.suggestions_visible {
        renderer.suggestions(app.chat().suggested_queries());
        println!();
    }

    let sent = match query {
        Some(q) => app.ask(q),
        None => {
            if !app.state.suggestions_visible {
                bail!("suggested queries are shown after a summary is closed");
            }
            if app.use_suggestion(suggestion).is_none() {
                bail!("no suggested query at index {suggestion}");
            }
            app.submit_draft()
        }
    };
    if !sent {
        bail!("query is empty");
    }

    let spinner = Spinner::start("Thinking");
    drive_until(app, out.pacing, |a| !a.chat().is_loading(), |_, _| {}).await;
    spinner.finish();

    renderer.transcript(app.chat());
    Ok(())
}

fn demo_batch() -> Vec<CandidateFile> {
    vec![
        CandidateFile::new("report.pdf", 2_936_012, PDF_MEDIA_TYPE),
        CandidateFile::new("analyst-notes.md", 18_432, "text/markdown"),
    ]
}

/// Scripted tour of every screen.
pub async fn demo(app: &mut App, renderer: &Renderer, out: Output) -> Result<()> {
    renderer.header(&app.state);
    println!();

    // A rejected batch first, to show the error line.
    app.state.navigate(NavItem::UploadFiles);
    if let Err(err) = app.upload(&[CandidateFile::new("chart.png", 48_000, "image/png")]) {
        renderer.upload_error(&err);
    }
    println!();

    upload_and_summarize(app, renderer, &demo_batch(), out).await?;
    println!();
    ask(app, renderer, None, 0, out).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::MaestroConfig;
    use crate::shell::Tab;

    fn out() -> Output {
        Output {
            pacing: Pacing::Instant,
            json: false,
        }
    }

    fn app() -> App {
        console::set_colors_enabled(false);
        let mut app = App::new(&MaestroConfig::default(), Catalog::default());
        app.login();
        app
    }

    #[tokio::test]
    async fn demo_runs_to_chat() {
        let mut app = app();
        demo(&mut app, &Renderer::default(), out()).await.unwrap();

        assert_eq!(app.state.active_tab, Tab::Chat);
        assert!(app.state.suggestions_visible);
        assert_eq!(app.workflow().state(), WorkflowState::Collecting);
        assert_eq!(app.chat().messages().len(), 2);
    }

    #[tokio::test]
    async fn upload_rejection_is_an_error() {
        let mut app = app();
        let batch: Vec<_> = (0..6)
            .map(|i| CandidateFile::new(format!("{i}.txt"), 1, "text/plain"))
            .collect();
        let err = upload_and_summarize(&mut app, &Renderer::default(), &batch, out())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Upload rejected: Maximum 5 files allowed");
    }

    #[tokio::test]
    async fn unknown_suggestion_is_an_error() {
        let mut app = app();
        app.state.on_summarized();
        let err = ask(&mut app, &Renderer::default(), None, 42, out())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no suggested query at index 42");
    }

    #[tokio::test]
    async fn hidden_suggestions_cannot_be_sent() {
        let mut app = app();
        let err = ask(&mut app, &Renderer::default(), None, 0, out())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "suggested queries are shown after a summary is closed"
        );
        assert!(app.chat().messages().is_empty());
    }
}
