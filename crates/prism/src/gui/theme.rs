use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

const STAGE_CSS: &str = "
.prism-window {
    background-color: @theme_bg_color;
}

.prism-stage {
    background: none;
}

.prism-stage:focus-visible {
    outline: 2px solid @theme_selected_bg_color;
    outline-offset: -4px;
}
";

/// Cube palette, taken from the active GTK theme where it names a colour.
pub struct ThemeColors {
    pub face: Srgba<f64>,
    pub border: Srgba<f64>,
    pub label: Srgba<f64>,
    pub shade: Srgba<f64>,
    pub badge: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let themed = |name: &str, fallback: Srgba<f64>| {
            context
                .lookup_color(name)
                .map(to_srgba)
                .unwrap_or(fallback)
        };

        Self {
            face: themed("theme_base_color", Srgba::new(0.12, 0.12, 0.16, 1.0)),
            border: with_alpha(
                themed("theme_selected_bg_color", Srgba::new(0.4, 0.4, 0.8, 1.0)),
                0.6,
            ),
            label: themed("theme_fg_color", Srgba::new(0.95, 0.95, 0.95, 1.0)),
            shade: Srgba::new(0.0, 0.0, 0.0, 1.0),
            badge: with_alpha(
                themed("accent_bg_color", Srgba::new(0.85, 0.2, 0.3, 1.0)),
                0.9,
            ),
        }
    }
}

fn to_srgba(color: gdk::RGBA) -> Srgba<f64> {
    Srgba::new(
        color.red().into(),
        color.green().into(),
        color.blue().into(),
        color.alpha().into(),
    )
}

fn with_alpha(color: Srgba<f64>, alpha: f64) -> Srgba<f64> {
    Srgba { alpha, ..color }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STAGE_CSS);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
