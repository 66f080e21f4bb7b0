use super::*;

#[test]
fn clamp_percent_saturates_both_ends() {
    assert_eq!(clamp_percent(150.0), 100);
    assert_eq!(clamp_percent(-20.0), 0);
    assert_eq!(clamp_percent(42.4), 42);
    assert_eq!(clamp_percent(42.5), 43);
    assert_eq!(clamp_percent(f64::NAN), 0);
    assert_eq!(clamp_percent(f64::INFINITY), 0);
}

#[test]
fn fmt_num_trims_trailing_zeros() {
    assert_eq!(fmt_num(2.0, 3), "2");
    assert_eq!(fmt_num(0.5, 3), "0.5");
    assert_eq!(fmt_num(0.25, 2), "0.25");
    assert_eq!(fmt_num(1.0 / 3.0, 2), "0.33");
    assert_eq!(fmt_num(-0.0001, 2), "0");
    assert_eq!(fmt_num(120.0, 0), "120");
}

#[test]
fn element_id_display() {
    assert_eq!(ElementId(7).to_string(), "el7");
}
