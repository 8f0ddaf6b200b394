use crate::egui::Context; // b/c of re-export
use tokio::sync::mpsc::{Sender, Receiver};
use tokio::sync::mpsc::error::TrySendError;
use tokio;
use log;
use crate::interface::*;

mod dispatch;
use dispatch::dispatch;

#[tokio::main]
pub async fn worker_thread(sender : Sender<DispatchEvent>, receiver : Receiver<DispatchRequest>, ctx : Context) {
  let client = reqwest::Client::new();
  execute_dispatch_loop(sender, receiver, client, ctx).await;
}

/// Dispatches one request at a time; rapid presses queue in the channel, so
/// outcomes reach the panel in press order.
async fn execute_dispatch_loop(
  sender : Sender<DispatchEvent>,
  mut receiver : Receiver<DispatchRequest>,
  client : reqwest::Client,
  egui_ctx : Context)
{
  loop {
    let request = match receiver.recv().await {
      Some( request ) => request,
      None => {
        log::warn!("Command channel is closed. Probably GUI is dead, exiting....");
        break;
      },
    };

    log::debug!("Dispatching command {}", request.command);

    // last_command is set before the outcome is known, but only for
    // attempts that actually go out
    if request.config.is_configured() {
      send_event(&sender, DispatchEvent::Attempted { command : request.command.clone() }, &egui_ctx);
    }

    let outcome = dispatch(&client, &request.config, &request.command).await;
    send_event(&sender, DispatchEvent::Resolved { outcome }, &egui_ctx);
  }
}

fn send_event(sender : &Sender<DispatchEvent>, event : DispatchEvent, egui_ctx : &Context) {
  match sender.try_send(event) {
    Ok(()) => egui_ctx.request_repaint(),
    Err( TrySendError::Full( _ ) ) => log::warn!("Failed to send event, GUI is not consuming it!"),
    Err( TrySendError::Closed( _ ) ) => log::warn!("Failed to send event - channel is closed. Probably GUI is dead."),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::sync::mpsc::channel;

  fn full_config() -> RemoteConfig {
    RemoteConfig {
      ha_url : "http://127.0.0.1:1".to_string(),
      token : "tok123".to_string(),
      entity_id : "remote.samsung_tv".to_string(),
    }
  }

  #[tokio::test]
  async fn skipped_request_emits_no_attempt() {
    let (event_sender, mut event_receiver) = channel::<DispatchEvent>(10);
    let (request_sender, request_receiver) = channel::<DispatchRequest>(10);

    let ctx = Context::default();
    let loop_handle = tokio::task::spawn(execute_dispatch_loop(
      event_sender,
      request_receiver,
      reqwest::Client::new(),
      ctx,
    ));

    request_sender
      .send(DispatchRequest { config : RemoteConfig::default(), command : "POWER".to_string() })
      .await
      .unwrap();

    let event = event_receiver.recv().await.unwrap();
    assert_eq!(event, DispatchEvent::Resolved { outcome : DispatchOutcome::Skipped });

    drop(request_sender);
    loop_handle.await.unwrap();
  }

  #[tokio::test]
  async fn attempt_precedes_resolution() {
    let (event_sender, mut event_receiver) = channel::<DispatchEvent>(10);
    let (request_sender, request_receiver) = channel::<DispatchRequest>(10);

    let ctx = Context::default();
    let loop_handle = tokio::task::spawn(execute_dispatch_loop(
      event_sender,
      request_receiver,
      reqwest::Client::new(),
      ctx,
    ));

    // port 1 refuses the connection, so the dispatch itself fails
    request_sender
      .send(DispatchRequest { config : full_config(), command : "MUTE".to_string() })
      .await
      .unwrap();

    let first = event_receiver.recv().await.unwrap();
    assert_eq!(first, DispatchEvent::Attempted { command : "MUTE".to_string() });

    let second = event_receiver.recv().await.unwrap();
    match second {
      DispatchEvent::Resolved { outcome : DispatchOutcome::Failure( FailureReason::Transport( _ ) ) } => (),
      other => panic!("expected a transport failure, got {:?}", other),
    }

    drop(request_sender);
    loop_handle.await.unwrap();
  }
}
