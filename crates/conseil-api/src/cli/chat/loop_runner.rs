//! Main chat loop orchestration.
//!
//! Mounts a session, then multiplexes three sources until the controller
//! navigates: published snapshots (rendered), visitor input (forwarded), and
//! the navigation signal (confirmation view + conversion).

use std::io::Write;

use console::style;
use tracing::info;

use conseil_core::conversion::ConversionTracker;
use conseil_core::session::controller::SessionController;
use conseil_core::session::navigation::ChannelNavigator;

use crate::cli::ChatArgs;
use crate::cli::contact::resolve_contact;
use crate::state::AppState;

use super::banner::{print_confirmation, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatView;

/// How the input loop stopped.
enum Exit {
    /// The controller signalled navigation.
    Navigated(String),
    /// The visitor pressed Ctrl+D.
    Detached,
    /// The controller stopped publishing without navigating.
    Closed,
}

/// Run an interactive consultation.
pub async fn run_chat_loop(state: &AppState, args: ChatArgs) -> anyhow::Result<()> {
    let metadata = resolve_contact(args)?;
    let first_name = metadata.first_name().to_string();

    let (navigator, mut navigation) = ChannelNavigator::channel();
    let handle = SessionController::mount(
        metadata,
        state.session_settings(),
        state.reply_client(),
        state.dispatcher(),
        navigator,
    )?;
    info!(session_id = %handle.session_id(), "Consultation started");

    print_welcome_banner(&first_name, &handle.session_id().to_string());

    let prompt = format!("  {} ", style("Vous >").green().bold());
    let (mut input, mut out) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let mut view = ChatView::new();
    let mut updates = handle.subscribe();
    let mut ended = false;

    let exit = loop {
        tokio::select! {
            biased;

            Some(destination) = navigation.recv() => break Exit::Navigated(destination),

            changed = updates.changed() => {
                if changed.is_err() {
                    break Exit::Closed;
                }
                let snapshot = updates.borrow_and_update().clone();
                view.render(&snapshot, &mut out)?;
                if snapshot.is_ended() && !ended {
                    ended = true;
                    input.update_prompt("");
                }
            }

            event = input.read_line(), if !ended => match event {
                InputEvent::Message(text) if text.is_empty() => {}
                InputEvent::Message(text) => match commands::parse(&text) {
                    Some(ChatCommand::End) => handle.end().await,
                    Some(ChatCommand::Help) => commands::write_help(&mut out)?,
                    Some(ChatCommand::Unknown(name)) => writeln!(
                        out,
                        "  {} Commande inconnue : {}. Tapez /aide.",
                        style("?").yellow().bold(),
                        style(name).dim()
                    )?,
                    None => match handle.send(&text).await {
                        Ok(()) => input.add_history(text),
                        Err(e) => view.rejected(&e, &mut out)?,
                    },
                },
                InputEvent::Interrupted => writeln!(
                    out,
                    "  {}",
                    style("Tapez /fin pour terminer, ou Ctrl+D pour quitter.").dim()
                )?,
                InputEvent::Eof => break Exit::Detached,
            },
        }
    };

    view.finish();
    input.close();

    let destination = match exit {
        Exit::Navigated(destination) => {
            // The session task returns once summary delivery has settled.
            handle.unmount().await?;
            Some(destination)
        }
        Exit::Detached => {
            println!("\n  {}", style("Fin de la consultation...").dim());
            let task = handle.unmount();
            let destination = navigation.recv().await;
            task.await?;
            destination
        }
        Exit::Closed => navigation.try_recv().ok(),
    };

    if let Some(destination) = destination {
        print_confirmation(&destination);
        state.conversion_tracker().record_conversion();
    }
    Ok(())
}
