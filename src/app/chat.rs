//! `agentdesk chat`: interactive REPL and one-shot mode.

use agentdesk::api::TaskApi;
use agentdesk::build_info;
use agentdesk::chat::{ChatSession, ChatSnapshot};
use agentdesk::config::ChatConfig;
use agentdesk::error::AppError;
use agentdesk::tui::{settings, ChatPrinter, Renderer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::debug;

/// Prints whatever the session published since the last flush.
struct LiveView<'a> {
    renderer: &'a Renderer,
    printer: ChatPrinter,
    snapshots: watch::Receiver<ChatSnapshot>,
}

impl<'a> LiveView<'a> {
    fn new(renderer: &'a Renderer, snapshots: watch::Receiver<ChatSnapshot>) -> Self {
        Self {
            renderer,
            printer: ChatPrinter::new(renderer.chat_style()),
            snapshots,
        }
    }

    fn flush(&mut self) {
        let snapshot = self.snapshots.borrow_and_update().clone();
        self.renderer.raw(&self.printer.update(&snapshot));
    }

    fn finish(&mut self) {
        self.flush();
        self.renderer.raw(&self.printer.finish());
    }
}

/// Run the chat surface. Returns the process exit code.
pub(crate) async fn run_chat<A: TaskApi>(
    renderer: &Renderer,
    api: A,
    chat: &ChatConfig,
    message: Option<String>,
) -> Result<i32, AppError> {
    let session = ChatSession::new(api, chat);
    match message {
        Some(message) => run_one_shot(renderer, session, message).await,
        None => run_repl(renderer, session).await,
    }
}

async fn run_one_shot<A: TaskApi>(
    renderer: &Renderer,
    mut session: ChatSession<A>,
    message: String,
) -> Result<i32, AppError> {
    let mut view = LiveView::new(renderer, session.watch());
    view.flush();

    if !submit(renderer, &mut session, message).await {
        renderer.error("message is empty");
        return Ok(2);
    }
    view.flush();
    if !session.has_subscription() {
        // Submission failed; the error bubble is already on screen.
        return Ok(1);
    }

    while session.has_subscription() {
        tokio::select! {
            signal = session.next_signal() => {
                session.handle_signal(signal);
                view.flush();
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted while streaming");
                session.close();
            }
        }
    }
    view.finish();
    Ok(0)
}

async fn run_repl<A: TaskApi>(
    renderer: &Renderer,
    mut session: ChatSession<A>,
) -> Result<i32, AppError> {
    renderer.header(&build_info::startup_metadata_line());
    renderer.hint(settings::CHAT_HINT);

    let mut view = LiveView::new(renderer, session.watch());
    view.flush();
    renderer.prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let text = line.trim();
                if text == settings::CHAT_QUIT_COMMAND {
                    break;
                }
                if text.is_empty() {
                    renderer.prompt();
                    continue;
                }
                view.finish();
                if !submit(renderer, &mut session, line).await {
                    renderer.warn("a task is still being submitted");
                }
                view.flush();
                if !session.has_subscription() {
                    renderer.prompt();
                }
            }
            signal = session.next_signal() => {
                session.handle_signal(signal);
                view.flush();
                if !session.has_subscription() {
                    view.finish();
                    renderer.prompt();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        }
    }

    session.close();
    view.finish();
    Ok(0)
}

/// Submit `message` with a spinner while the task endpoint answers.
async fn submit<A: TaskApi>(
    renderer: &Renderer,
    session: &mut ChatSession<A>,
    message: String,
) -> bool {
    let _progress = renderer.progress(settings::LABEL_SUBMITTING);
    session.send(message).await
}
