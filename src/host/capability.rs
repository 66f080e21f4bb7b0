use crate::color::convert::{ColorValue, Rgb};
use crate::foundation::error::StyleResult;

/// Platform color-sampling capability (an eyedropper).
pub trait ColorSampler {
    /// Sample a color from the screen. `Ok(None)` means the user dismissed the sampler.
    fn sample(&mut self) -> StyleResult<Option<Rgb>>;
}

/// Capability-checked optional sampler injected into the session.
#[derive(Default)]
pub enum SamplerCapability {
    Available(Box<dyn ColorSampler>),
    #[default]
    Unsupported,
}

/// Result of a pick request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    Picked(ColorValue),
    Cancelled,
    Unsupported,
}

impl SamplerCapability {
    pub fn available(sampler: impl ColorSampler + 'static) -> Self {
        Self::Available(Box::new(sampler))
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Run the sampler. Missing capability and sampler failures are logged and reported as
    /// [`PickOutcome::Unsupported`]; they never propagate.
    pub fn pick(&mut self) -> PickOutcome {
        let Self::Available(sampler) = self else {
            tracing::warn!("color sampling is not supported on this platform");
            return PickOutcome::Unsupported;
        };
        match sampler.sample() {
            Ok(Some(rgb)) => PickOutcome::Picked(ColorValue::from_rgb(rgb)),
            Ok(None) => PickOutcome::Cancelled,
            Err(err) => {
                tracing::warn!(%err, "color sampler failed");
                PickOutcome::Unsupported
            }
        }
    }
}

impl std::fmt::Debug for SamplerCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("SamplerCapability::Available"),
            Self::Unsupported => f.write_str("SamplerCapability::Unsupported"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/capability.rs"]
mod tests;
