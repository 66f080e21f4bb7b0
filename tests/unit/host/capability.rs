use super::*;
use crate::foundation::error::StyleError;

struct Fixed(StyleResult<Option<Rgb>>);

impl ColorSampler for Fixed {
    fn sample(&mut self) -> StyleResult<Option<Rgb>> {
        match &self.0 {
            Ok(v) => Ok(*v),
            Err(_) => Err(StyleError::unsupported("eyedropper denied")),
        }
    }
}

#[test]
fn missing_capability_is_reported_not_raised() {
    let mut cap = SamplerCapability::default();
    assert!(!cap.is_supported());
    assert_eq!(cap.pick(), PickOutcome::Unsupported);
}

#[test]
fn sampler_outcomes() {
    let rgb = Rgb::new(1, 2, 3);
    let mut cap = SamplerCapability::available(Fixed(Ok(Some(rgb))));
    assert!(cap.is_supported());
    assert_eq!(cap.pick(), PickOutcome::Picked(ColorValue::from_rgb(rgb)));

    let mut cap = SamplerCapability::available(Fixed(Ok(None)));
    assert_eq!(cap.pick(), PickOutcome::Cancelled);

    let mut cap = SamplerCapability::available(Fixed(Err(StyleError::unsupported("x"))));
    assert_eq!(cap.pick(), PickOutcome::Unsupported);
}
