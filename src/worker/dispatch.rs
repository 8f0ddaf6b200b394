use reqwest::Client;
use serde::Serialize;
use log;

use crate::interface::{RemoteConfig, DispatchOutcome, FailureReason};

#[derive(Serialize)]
struct SendCommandBody<'a> {
  entity_id : &'a str,
  command : &'a str,
}

/// Sends one symbolic command to the hub. Exactly one request per call, no
/// retries; the command string goes through verbatim, the vocabulary is a
/// convention between the hub and the device driver.
///
/// Every path ends in a DispatchOutcome, this function does not fail.
pub async fn dispatch(client : &Client, config : &RemoteConfig, command : &str) -> DispatchOutcome {
  if !config.is_configured() {
    log::debug!("Not configured, skipping command {}", command);
    return DispatchOutcome::Skipped;
  }

  let url = format!("{}/api/services/remote/send_command", config.ha_url);
  let body = SendCommandBody { entity_id : &config.entity_id, command };

  let response = client
    .post(&url)
    .bearer_auth(&config.token)
    .json(&body)
    .send()
    .await;

  match response {
    Ok( response ) => {
      let status = response.status();
      if status.is_success() {
        DispatchOutcome::Success
      } else {
        log::warn!("Command {} rejected by hub : {}", command, status);
        DispatchOutcome::Failure( FailureReason::Protocol( status.as_u16() ) )
      }
    },
    Err( e ) => {
      log::warn!("Failed to send command {} : {}", command, e);
      DispatchOutcome::Failure( FailureReason::Transport( e.to_string() ) )
    },
  }
}
