//! Event polling, intent dispatch and redraws for the chat screen.
//!
//! Terminal input is read on a background task and forwarded over a
//! channel. The main loop wakes on input, on conversation changes published
//! by the controller, and on a short tick that animates the pending
//! indicators.

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event};
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::chat_client::HttpChatClient;
use crate::core::config::settings::Settings;
use crate::core::controller::ExchangeController;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;
use crate::ui::view::ChatView;
use crate::ui::welcome::next_suggestion;

use super::keybindings::{map_key, map_mouse, ChatIntent};
use super::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const ANIMATION_TICK: Duration = Duration::from_millis(100);

fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while !cancel.is_cancelled() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(%err, "failed to read terminal event");
                        continue;
                    }
                },
                Ok(false) => tokio::task::yield_now().await,
                Err(err) => {
                    warn!(%err, "terminal event polling failed");
                    break;
                }
            }
        }
    })
}

pub async fn run_chat(settings: Settings) -> Result<(), Box<dyn Error>> {
    let transport = HttpChatClient::new(&settings.base_url)?;
    let base_url = transport.base_url().to_string();
    let controller = ExchangeController::new(Arc::new(transport), settings.request_timeout);
    let theme = Theme::from_name(&settings.theme).unwrap_or_default();
    let mut view = ChatView::new(theme, settings.show_suggestions);

    info!(
        %base_url,
        timeout_secs = controller.request_timeout().as_secs(),
        "starting chat session"
    );

    let mut terminal = setup_terminal()?;
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    let reader = spawn_event_reader(event_tx, cancel.clone());

    let result = main_loop(&mut terminal, &controller, &mut view, event_rx).await;

    cancel.cancel();
    if let Err(err) = reader.await {
        debug!(%err, "event reader task ended abnormally");
    }
    restore_terminal(&mut terminal)?;
    result
}

async fn main_loop(
    terminal: &mut ChatTerminal,
    controller: &ExchangeController,
    view: &mut ChatView,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<(), Box<dyn Error>> {
    let mut changes = controller.subscribe();
    let mut ticker = tokio::time::interval(ANIMATION_TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    draw(terminal, controller, view)?;

    loop {
        let request_redraw = tokio::select! {
            maybe_event = event_rx.recv() => {
                let Some(ev) = maybe_event else {
                    break;
                };
                handle_event(controller, view, ev);
                // Drain whatever else is queued before the next frame.
                while let Ok(ev) = event_rx.try_recv() {
                    handle_event(controller, view, ev);
                }
                true
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                view.on_conversation_changed(controller.is_pending());
                true
            }
            _ = ticker.tick() => controller.is_pending(),
        };

        if view.exit_requested {
            break;
        }
        if request_redraw {
            draw(terminal, controller, view)?;
        }
    }

    Ok(())
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &ExchangeController,
    view: &mut ChatView,
) -> Result<(), Box<dyn Error>> {
    let snapshot = controller.snapshot();
    terminal.draw(|f| ui(f, &snapshot, view))?;
    Ok(())
}

fn handle_event(controller: &ExchangeController, view: &mut ChatView, ev: Event) {
    let intent = match ev {
        Event::Key(key) => map_key(&key),
        Event::Mouse(mouse) => map_mouse(&mouse),
        Event::Paste(text) => Some(ChatIntent::Paste(text)),
        _ => None,
    };
    if let Some(intent) = intent {
        apply_intent(controller, view, intent);
    }
}

fn apply_intent(controller: &ExchangeController, view: &mut ChatView, intent: ChatIntent) {
    match intent {
        ChatIntent::Quit => view.exit_requested = true,
        ChatIntent::Submit => match controller.begin_submit() {
            Ok(in_flight) => {
                debug!(chars = in_flight.text().chars().count(), "requesting reply");
                tokio::spawn(in_flight.settle());
            }
            Err(reason) => debug!(?reason, "submit ignored"),
        },
        ChatIntent::InsertChar(c) => {
            controller.edit_draft(|draft| draft.push(c));
        }
        ChatIntent::InsertNewline => {
            controller.edit_draft(|draft| draft.push('\n'));
        }
        ChatIntent::Paste(text) => {
            controller.edit_draft(|draft| draft.push_str(&text));
        }
        ChatIntent::DeleteBackward => {
            controller.edit_draft(|draft| {
                draft.pop();
            });
        }
        ChatIntent::ClearDraft => {
            if !controller.is_pending() {
                controller.on_clear_draft();
            }
        }
        ChatIntent::CycleSuggestion => {
            let index = next_suggestion(view.selected_suggestion);
            pick_suggestion(controller, view, index);
        }
        ChatIntent::PickSuggestion(index) => pick_suggestion(controller, view, index),
        ChatIntent::ScrollUp(lines) => view.scroll.scroll_up(lines),
        ChatIntent::ScrollDown(lines) => {
            view.scroll
                .scroll_down(lines, view.transcript_lines, view.transcript_height)
        }
        ChatIntent::PageUp => {
            let page = view.page_size();
            view.scroll.scroll_up(page);
        }
        ChatIntent::PageDown => {
            let page = view.page_size();
            view.scroll
                .scroll_down(page, view.transcript_lines, view.transcript_height);
        }
        ChatIntent::ScrollToBottom => view.scroll.scroll_to_bottom(),
    }
}

fn pick_suggestion(controller: &ExchangeController, view: &mut ChatView, index: usize) {
    let welcome_visible =
        view.show_suggestions && controller.read(|session| session.conversation.is_empty());
    if welcome_visible && controller.apply_suggestion(index) {
        view.selected_suggestion = Some(index);
    }
}
