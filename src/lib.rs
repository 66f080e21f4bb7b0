//! Flipstyle is the style and animation engine behind a flipbook page editor.
//!
//! It converts colors, parses and serializes gradients, wraps and composes stroked or
//! gradient-filled text (natively or as a synthesized SVG background), mirrors every visual
//! decision onto element attributes, and drives a cancellable animation preview.
//!
//! The editing surface is [`EditorSession`]: select an element, feed it control edits, and
//! advance its virtual clock to run debounced persistence, layout-settle ticks and preview
//! deadlines.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod color;
pub(crate) mod host;
pub mod persist;
pub(crate) mod runtime;
pub(crate) mod session;
pub(crate) mod style;
pub(crate) mod text;

pub use crate::foundation::core::{ElementId, Insets, Size, clamp_percent, fmt_num};
pub use crate::foundation::error::{StyleError, StyleResult};

pub use crate::color::convert::{
    ColorValue, CssColor, Hsv, HsvPercent, Rgb, hex_to_rgb, hsv_to_rgb, is_strict_hex,
    parse_css_color, rgb_to_hex, rgb_to_hsv,
};
pub use crate::color::gradient::{Gradient, GradientKind, GradientStop};

pub use crate::text::measure::{FontDescriptor, MonospaceMeasurer, ParleyMeasurer, TextMeasurer};
pub use crate::text::wrap::{WrapRequest, WrappedLine, WrappedLines};

pub use crate::animation::ease::Easing;
pub use crate::animation::registry::{
    DefaultTiming, Effect, EffectRegistry, Iterations, Keyframe, Motion, NONE_EFFECT,
};
pub use crate::animation::scheduler::{
    ANIMATION_RESIDUE_PROPERTIES, AnimatedFrame, Animatable, AnimationStage,
    DEFAULT_PREVIEW_EPSILON, FillMode, NativeAnimation, NativeTiming, PreviewHandle,
    PreviewScheduler, PreviewState,
};
pub use crate::animation::settings::{
    AnimationBundle, AnimationEdit, AnimationSettings, AnimationTrigger, DELAY_RANGE_S,
    DURATION_RANGE_S, InteractAction, SPEED_RANGE, TriggerContext,
};

pub use crate::style::compositor::{
    COMPOSITOR_PROPERTIES, Composition, Compositor, LayoutSnapshot, RenderMode, StylePatch,
    choose_mode,
};
pub use crate::style::raster::{RasterImage, font_database, parse_svg, rasterize_svg};
pub use crate::style::state::{
    DashPattern, ElementStyleState, FillKind, FillStyle, Paint, PaintTarget, StrokePosition,
    StrokeStyle, StrokeType, StyleEdit,
};
pub use crate::style::svg::{
    SvgLine, SvgPaint, SvgStroke, SvgTextDocument, TextAnchor, escape as escape_markup,
    svg_data_uri,
};

pub use crate::persist::guard::{GuardState, SyncGuard};
pub use crate::persist::schema::{AnimationSnapshot, StoredColor, StyleSnapshot};

pub use crate::host::capability::{ColorSampler, PickOutcome, SamplerCapability};
pub use crate::host::element::{ComputedStyle, Document, Element, HostEditor, LineHeight, TextAlign};

pub use crate::runtime::timers::{Debouncer, TimerId, TimerQueue};

pub use crate::session::controller::AnimationSettingsController;
pub use crate::session::editor::{EditorSession, SessionConfig, SessionEvent};
