use eframe::egui;
use crate::egui::*;
use crate::egui::widget_text::RichText;
use tokio::sync::mpsc::{channel, Sender, Receiver};
use tokio::sync::mpsc::error::TryRecvError;
use std::thread;
use log;

use crate::interface::*;
use crate::storage::ConfigStore;
use crate::worker::worker_thread;

const NUMBER_KEYS : [(&str, &str); 12] = [
  ("1", "1"), ("2", "2"), ("3", "3"),
  ("4", "4"), ("5", "5"), ("6", "6"),
  ("7", "7"), ("8", "8"), ("9", "9"),
  ("PRE", "PRECH"), ("0", "0"), ("EPG", "GUIDE"),
];

const COLOR_KEYS : [(&str, Color32); 4] = [
  ("RED", Color32::from_rgb(220, 38, 38)),
  ("GREEN", Color32::from_rgb(22, 163, 74)),
  ("YELLOW", Color32::from_rgb(234, 179, 8)),
  ("BLUE", Color32::from_rgb(37, 99, 235)),
];

const SOURCES : [(&str, &str); 4] = [
  ("HDMI1", "HDMI 1"),
  ("HDMI2", "HDMI 2"),
  ("HDMI3", "HDMI 3"),
  ("HDMI4", "HDMI 4"),
];

pub struct RemotePanel {
  config : RemoteConfig,
  connection : ConnectionState,
  store : ConfigStore,
  settings_open : bool,
  draft_url : String,
  draft_token : String,
  draft_entity : String,
  receiver : Receiver<DispatchEvent>,
  sender : Sender<DispatchRequest>,
}

impl RemotePanel {
  pub fn new(cc : &eframe::CreationContext<'_>, store : ConfigStore) -> Self {
    const MAX_NUM_MESSAGES : usize = 10;

    let config = store.load().unwrap_or_default();

    let (worker_sender, gui_receiver) = channel::<DispatchEvent>(MAX_NUM_MESSAGES);
    let (gui_sender, worker_receiver) = channel::<DispatchRequest>(MAX_NUM_MESSAGES);

    let ctx = cc.egui_ctx.clone();

    let mut style = (*ctx.style()).clone();
    style.visuals.selection.bg_fill = Color32::from_rgb(37, 99, 235);
    ctx.set_style(style);

    // it detaches but we are control it via channels
    thread::spawn(move|| worker_thread(worker_sender, worker_receiver, ctx));

    RemotePanel {
      config,
      connection : ConnectionState::default(),
      store,
      settings_open : false,
      draft_url : String::new(),
      draft_token : String::new(),
      draft_entity : String::new(),
      receiver : gui_receiver,
      sender : gui_sender,
    }
  }

  /// Every button funnels through here with its symbolic label. The working
  /// config travels with the request as a snapshot.
  fn send_command(&self, command : &str) {
    let request = DispatchRequest {
      config : self.config.clone(),
      command : command.to_string(),
    };
    if let Err( err ) = self.sender.try_send( request ) {
      log::error!("Failed to send {:?} command. Ignoring.", err);
    }
  }

  /// Memory first, storage second; a failed write only costs durability.
  fn save_settings(&mut self) {
    self.config = RemoteConfig {
      ha_url : self.draft_url.clone(),
      token : self.draft_token.clone(),
      entity_id : self.draft_entity.clone(),
    };
    if let Err( e ) = self.store.save(&self.config) {
      log::warn!("Failed to save configuration : {}. Keeping it in memory only.", e);
    }
  }

  fn open_settings(&mut self) {
    self.draft_url = self.config.ha_url.clone();
    self.draft_token = self.config.token.clone();
    self.draft_entity = if self.config.entity_id.is_empty() {
      DEFAULT_ENTITY_ID.to_string()
    } else {
      self.config.entity_id.clone()
    };
    self.settings_open = true;
  }

  fn command_button(&self, ui : &mut Ui, text : impl Into<WidgetText>, command : &str) {
    if ui.button(text).clicked() {
      self.send_command(command);
    }
  }

  fn header(&mut self, ui : &mut Ui) {
    ui.horizontal(|ui| {
      ui.heading("Samsung TV");

      let dot_color = if self.connection.is_connected {
        Color32::GREEN
      } else {
        Color32::DARK_GRAY
      };
      ui.label( RichText::new("●").color(dot_color) );

      let status_text = match &self.connection.last_command {
        Some( command ) => format!("Last command: {}", command),
        None => "Not connected".to_string(),
      };
      ui.label( RichText::new(status_text).small().weak() );

      ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        if ui.button("⚙").clicked() {
          self.open_settings();
        }
      });
    });
  }

  fn power_row(&self, ui : &mut Ui) {
    ui.horizontal(|ui| {
      self.command_button(ui, RichText::new("⏻").color(Color32::RED), "POWER");
      self.command_button(ui, "Home", "HOME");
      self.command_button(ui, "Menu", "MENU");
      self.command_button(ui, "Back", "BACK");
    });
  }

  fn navigation_pad(&self, ui : &mut Ui) {
    ui.vertical_centered(|ui| {
      Grid::new("navigation pad")
       .min_col_width(42.0)
       .show(ui, |ui| {
         ui.add_visible(false, Separator::default());
         self.command_button(ui, "⏶", "UP");
         ui.end_row();

         self.command_button(ui, "⏴", "LEFT");
         self.command_button(ui, RichText::new("OK").strong(), "OK");
         self.command_button(ui, "⏵", "RIGHT");
         ui.end_row();

         ui.add_visible(false, Separator::default());
         self.command_button(ui, "⏷", "DOWN");
         ui.end_row();
      });
    });
  }

  fn volume_channel_controls(&self, ui : &mut Ui) {
    ui.columns(2, |columns| {
      columns[0].vertical_centered(|ui| {
        ui.label( RichText::new("VOLUME").small().weak() );
        self.command_button(ui, "+", "VOLUME_UP");
        self.command_button(ui, "Mute", "MUTE");
        self.command_button(ui, "-", "VOLUME_DOWN");
      });
      columns[1].vertical_centered(|ui| {
        ui.label( RichText::new("CHANNEL").small().weak() );
        self.command_button(ui, "+", "CHANNEL_UP");
        self.command_button(ui, "List", "CH_LIST");
        self.command_button(ui, "-", "CHANNEL_DOWN");
      });
    });
  }

  fn playback_row(&self, ui : &mut Ui) {
    ui.vertical_centered(|ui| {
      ui.label( RichText::new("PLAYBACK").small().weak() );
      ui.horizontal(|ui| {
        self.command_button(ui, "⏪", "REWIND");
        self.command_button(ui, "▶", "PLAY");
        self.command_button(ui, "⏸", "PAUSE");
        self.command_button(ui, "⏹", "STOP");
        self.command_button(ui, "⏩", "FF");
      });
    });
  }

  fn number_pad(&self, ui : &mut Ui) {
    ui.vertical_centered(|ui| {
      ui.label( RichText::new("NUMBERS").small().weak() );
      Grid::new("number pad")
       .min_col_width(42.0)
       .show(ui, |ui| {
         for (index, (label, command)) in NUMBER_KEYS.iter().enumerate() {
           self.command_button(ui, *label, command);
           if index % 3 == 2 {
             ui.end_row();
           }
         }
      });
    });
  }

  fn color_row(&self, ui : &mut Ui) {
    ui.horizontal(|ui| {
      for (command, color) in COLOR_KEYS.iter() {
        if ui.add( Button::new("      ").fill(*color) ).clicked() {
          self.send_command(command);
        }
      }
    });
  }

  fn source_selector(&self, ui : &mut Ui) {
    ComboBox::from_id_source("source selector")
      .selected_text("Input source")
      .show_ui(ui, |ui| {
        for (command, label) in SOURCES.iter() {
          if ui.selectable_label(false, *label).clicked() {
            self.send_command(command);
          }
        }
      });
  }

  fn settings_window(&mut self, ctx : &Context) {
    if !self.settings_open {
      return;
    }

    let mut open = self.settings_open;
    let mut save_clicked = false;

    egui::Window::new("Home Assistant Connection")
      .open(&mut open)
      .collapsible(false)
      .resizable(false)
      .show(ctx, |ui| {
        ui.label("Enter your Home Assistant access data.");
        ui.add_space(8.0);

        ui.label("Home Assistant URL");
        ui.add( TextEdit::singleline(&mut self.draft_url).hint_text("http://homeassistant.local:8123") );

        ui.label("Long-Lived Access Token");
        ui.add( TextEdit::singleline(&mut self.draft_token).password(true).hint_text("eyJ0eXAiOi...") );
        ui.small("Create a token under: Profile → Long-Lived Access Tokens");

        ui.label("Remote Entity ID");
        ui.add( TextEdit::singleline(&mut self.draft_entity).hint_text(DEFAULT_ENTITY_ID) );

        ui.add_space(8.0);
        if ui.button("Save").clicked() {
          save_clicked = true;
        }
      });

    if save_clicked {
      self.save_settings();
      open = false;
    }
    self.settings_open = open;
  }
}

impl eframe::App for RemotePanel {
  fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {

    // events are transitions, apply them all in arrival order
    loop {
      match self.receiver.try_recv() {
        Ok( DispatchEvent::Attempted { command } ) => self.connection.note_attempt(&command),
        Ok( DispatchEvent::Resolved { outcome } ) => self.connection.apply(&outcome),
        Err( TryRecvError::Disconnected ) => {
          log::error!("Worker thread is dead. Closing...");
          frame.close();
          break;
        },
        _ => break,
      }
    }

    egui::CentralPanel::default().show(ctx, |ui| {
      self.header(ui);
      ui.separator();

      self.power_row(ui);
      ui.add_space(10.0);
      self.navigation_pad(ui);
      ui.add_space(10.0);
      self.volume_channel_controls(ui);
      ui.add_space(10.0);
      self.playback_row(ui);
      ui.add_space(10.0);
      self.number_pad(ui);
      ui.add_space(10.0);
      self.color_row(ui);
      ui.add_space(10.0);
      self.source_selector(ui);
    });

    self.settings_window(ctx);
  }
}
