use palette::Srgb;

pub mod model;
pub mod view;

pub use model::{DragState, Slider, SliderUpdate, pointer_angle};
pub use view::{SliderNodes, format_value, legend_row_origin};

pub const SLIDER_WIDTH: f64 = 10.0; // ring thickness
pub const START_ANGLE: f64 = -90.0; // 12 o'clock
pub const TRACK_COLOR: Srgb<u8> = Srgb::new(0xd3, 0xd3, 0xd3);
pub const MARKER_FILL: Srgb<u8> = Srgb::new(0xff, 0xff, 0xff);
pub const MARKER_RADIUS: f64 = SLIDER_WIDTH * 0.9;

// Legend rows stack downwards from the top-left corner of the container
pub const LEGEND_LEFT: f64 = 10.0;
pub const LEGEND_TOP: f64 = 10.0;
pub const LEGEND_ROW_HEIGHT: f64 = 24.0;
pub const LEGEND_SWATCH_SIZE: f64 = 14.0;
pub const LEGEND_TEXT_GAP: f64 = 8.0;
pub const LEGEND_FONT_SIZE: f64 = 14.0;
