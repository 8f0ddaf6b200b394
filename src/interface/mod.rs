use std::option::Option;

pub const DEFAULT_ENTITY_ID : &str = "remote.samsung_tv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
  pub ha_url : String,
  pub token : String,
  pub entity_id : String,
}

impl Default for RemoteConfig {
  fn default() -> Self {
    RemoteConfig {
      ha_url : String::new(),
      token : String::new(),
      entity_id : DEFAULT_ENTITY_ID.to_string(),
    }
  }
}

impl RemoteConfig {
  /// All three fields are required before anything goes on the wire.
  pub fn is_configured(&self) -> bool {
    !self.ha_url.is_empty() && !self.token.is_empty() && !self.entity_id.is_empty()
  }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionState {
  pub is_connected : bool,
  pub last_command : Option<String>,
}

impl ConnectionState {
  /// Records the command before its outcome is known. Not rolled back on
  /// failure, the label reflects intent rather than confirmed delivery.
  pub fn note_attempt(&mut self, command : &str) {
    self.last_command = Some( command.to_string() );
  }

  pub fn apply(&mut self, outcome : &DispatchOutcome) {
    match outcome {
      DispatchOutcome::Success => self.is_connected = true,
      DispatchOutcome::Failure( _ ) => self.is_connected = false,
      // a skipped dispatch neither confirms nor denies connectivity
      DispatchOutcome::Skipped => (),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
  Skipped,
  Success,
  Failure( FailureReason ),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
  Protocol( u16 ),
  Transport( String ),
}

#[derive(Debug, Clone)]
pub struct DispatchRequest {
  pub config : RemoteConfig,
  pub command : String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
  Attempted { command : String },
  Resolved { outcome : DispatchOutcome },
}
