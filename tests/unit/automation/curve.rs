use super::*;

#[test]
fn interpolate_empty_is_zero() {
    assert_eq!(interpolate(&[], 3.0), 0.0);
}

#[test]
fn interpolate_single_key_is_constant() {
    let kfs = [Keyframe::new(2.0, 0.7)];
    assert_eq!(interpolate(&kfs, 0.0), 0.7);
    assert_eq!(interpolate(&kfs, 9.0), 0.7);
}

#[test]
fn interpolate_is_linear_with_flat_extrapolation() {
    let kfs = [Keyframe::new(1.0, 0.0), Keyframe::new(3.0, 1.0)];
    assert_eq!(interpolate(&kfs, 0.0), 0.0);
    assert_eq!(interpolate(&kfs, 2.0), 0.5);
    assert_eq!(interpolate(&kfs, 1.5), 0.25);
    assert_eq!(interpolate(&kfs, 10.0), 1.0);
}

#[test]
fn interpolate_hits_exact_keys() {
    let kfs = [
        Keyframe::new(0.0, 0.2),
        Keyframe::new(1.0, 0.8),
        Keyframe::new(2.0, 0.4),
    ];
    assert_eq!(interpolate(&kfs, 1.0), 0.8);
    assert!((interpolate(&kfs, 1.5) - 0.6).abs() < 1e-12);
}

#[test]
fn upsert_overwrites_within_tolerance() {
    let mut curve = AutomationCurve::new("speed", Keyframe::new(5.0, 0.1));
    assert!(!curve.upsert(5.005, 0.9, TimeConstraints::default()).unwrap());
    assert_eq!(curve.keyframes.len(), 1);
    assert_eq!(curve.keyframes[0].value, 0.9);
    assert_eq!(curve.keyframes[0].time, 5.0);
}

#[test]
fn upsert_inserts_sorted() {
    let mut curve = AutomationCurve::new("speed", Keyframe::new(5.0, 0.1));
    assert!(curve.upsert(1.0, 0.2, TimeConstraints::default()).unwrap());
    assert!(curve.upsert(3.0, 0.3, TimeConstraints::default()).unwrap());
    let times: Vec<f64> = curve.keyframes.iter().map(|k| k.time).collect();
    assert_eq!(times, vec![1.0, 3.0, 5.0]);
}

#[test]
fn upsert_pushes_new_key_clear_of_neighbours() {
    let mut curve = AutomationCurve::new("speed", Keyframe::new(5.0, 0.1));
    assert!(curve.upsert(5.015, 0.9, TimeConstraints::default()).unwrap());
    assert!((curve.keyframes[1].time - 5.02).abs() < 1e-12);
    assert!(crate::automation::keyframe::validate_keyframes(&curve.keyframes).valid);
}

#[test]
fn upsert_clamps_into_constraints() {
    let mut curve = AutomationCurve::new("speed", Keyframe::new(1.0, 0.1));
    curve.upsert(9.0, 0.4, TimeConstraints::new(0.0, 4.0)).unwrap();
    assert_eq!(curve.keyframes[1].time, 4.0);
}

#[test]
fn upsert_without_room_leaves_curve_alone() {
    let mut curve = AutomationCurve::new("speed", Keyframe::new(4.0, 0.1));
    let err = curve.upsert(4.015, 0.4, TimeConstraints::new(0.0, 4.015)).unwrap_err();
    assert!(matches!(err, SeqError::Validation(_)));
    assert_eq!(curve.keyframes.len(), 1);
}

#[test]
fn removing_last_keyframe_prunes_curve() {
    let mut auto = Automation::default();
    auto.add_keyframe("hue", 1.0, 0.5).unwrap();
    assert!(auto.curve("hue").is_some());
    assert!(auto.remove_keyframe("hue", 1.004));
    assert!(auto.curve("hue").is_none());
    assert!(auto.is_empty());
}

#[test]
fn removing_one_of_many_keeps_curve() {
    let mut auto = Automation::default();
    auto.add_keyframe("hue", 1.0, 0.5).unwrap();
    auto.add_keyframe("hue", 2.0, 0.6).unwrap();
    assert!(auto.remove_keyframe("hue", 2.0));
    assert_eq!(auto.curve("hue").unwrap().keyframes.len(), 1);
    assert!(!auto.remove_keyframe("hue", 7.0));
    assert!(!auto.remove_keyframe("missing", 1.0));
}

#[test]
fn replace_with_empty_list_prunes() {
    let mut auto = Automation::default();
    auto.add_keyframe("zoom", 1.0, 0.5).unwrap();
    auto.replace("zoom", Vec::new());
    assert!(auto.curve("zoom").is_none());
}

#[test]
fn bounds_span_all_curves() {
    let mut auto = Automation::default();
    assert_eq!(auto.keyframe_bounds(), None);
    auto.add_keyframe("a", 2.0, 0.0).unwrap();
    auto.add_keyframe("a", 4.0, 0.0).unwrap();
    auto.add_keyframe("b", 1.0, 0.0).unwrap();
    auto.add_keyframe("b", 3.0, 0.0).unwrap();
    assert_eq!(auto.keyframe_bounds(), Some((1.0, 4.0)));
    assert_eq!(auto.keyframe_count(), 4);
    assert!(auto.clear("a"));
    assert_eq!(auto.keyframe_bounds(), Some((1.0, 3.0)));
}
