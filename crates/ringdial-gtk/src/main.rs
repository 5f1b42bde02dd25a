use relm4::prelude::*;
use ringdial_gtk::config;
use ringdial_gtk::gui::app::AppModel;
use ringdial_gtk::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.ringdial.Ringdial");

    app.run::<AppModel>((config, rx));
}
