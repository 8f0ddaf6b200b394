mod interface;
mod storage;
mod worker;
mod gui;

use eframe::egui;
use env_logger;
use gui::RemotePanel;
use storage::ConfigStore;


fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let store = match ConfigStore::from_default_location() {
    Ok( store ) => store,
    Err( e ) => {
      log::error!("Failed to locate the configuration directory : {}. Exiting.", e);
      return;
    },
  };

  let mut native_options = eframe::NativeOptions::default();
  native_options.initial_window_size = Some( egui::vec2(360.0, 760.0) );

  if let Err( e ) = eframe::run_native(
      "TV Remote",
      native_options,
      Box::new(move |cc| Box::new(RemotePanel::new(cc, store)) )
    )  {
    log::error!("Failed to run TV Remote {:?}", e);
  };
}
