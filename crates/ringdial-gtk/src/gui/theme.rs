use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

const CANVAS_CSS: &str = "
.ringdial-canvas {
    background: none;
    background-color: transparent;
}
";

/// Colors the painter takes from the GTK theme instead of the scene: the canvas
/// backdrop and legend text without an explicit fill.
pub struct ThemeColors {
    pub backdrop: Srgba<f64>,
    pub text: Srgba<f64>,
}

fn to_srgba(color: &gdk::RGBA) -> Srgba<f64> {
    Srgba::new(
        f64::from(color.red()),
        f64::from(color.green()),
        f64::from(color.blue()),
        f64::from(color.alpha()),
    )
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let lookup = |name: &str| context.lookup_color(name).as_ref().map(to_srgba);

        let backdrop =
            lookup("theme_base_color").unwrap_or_else(|| Srgba::new(0.12, 0.12, 0.12, 1.0));
        // legend text is always opaque
        let mut text = lookup("theme_fg_color").unwrap_or_else(|| Srgba::new(0.9, 0.9, 0.9, 1.0));
        text.alpha = 1.0;

        Self { backdrop, text }
    }
}

pub fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display, skipping canvas CSS");
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(CANVAS_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
