//! End-to-end behaviour of the interactive session over a text surface

use approx::assert_relative_eq;
use dipole_core::render::ContourScale;
use dipole_core::{
    Axis, ChargeId, InteractiveSession, RenderSurface, SessionConfig, TextSurface, Vec2,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn started() -> InteractiveSession<TextSurface> {
    let mut session = InteractiveSession::new(SessionConfig::default(), TextSurface::new()).unwrap();
    session.recompute_and_render().unwrap();
    session
}

#[test]
fn test_initial_frame() {
    let session = started();
    let frame = session.surface().last_frame().unwrap();
    assert_eq!(frame.grid().width(), 20);
    assert_eq!(frame.grid().height(), 20);
    assert_eq!(frame.labels().separation, "Separation: 2.00 m");
    assert_eq!(frame.labels().positive_x, "-1.0");
    assert_eq!(frame.labels().negative_x, "1.0");
    assert_eq!(frame.half_extent(), 5.0);
    assert_eq!(frame.position_bound(), 4.5);
}

#[test]
fn test_moving_negative_charge_to_origin() {
    let mut session = started();
    session.set_position(ChargeId::Negative, Axis::X, 0.0).unwrap();
    assert_relative_eq!(session.state().separation(), 1.0);
    assert_eq!(
        session.surface().last_frame().unwrap().labels().separation,
        "Separation: 1.00 m"
    );
}

#[test]
fn test_every_update_clamps_into_range() {
    let mut session = started();
    let requests = [
        (ChargeId::Positive, Axis::X, -9.0, -4.5),
        (ChargeId::Positive, Axis::Y, 4.49, 4.49),
        (ChargeId::Negative, Axis::X, 100.0, 4.5),
        (ChargeId::Negative, Axis::Y, -4.5, -4.5),
    ];
    for (id, axis, requested, expected) in requests {
        session.set_position(id, axis, requested).unwrap();
        let p = session.state().charge(id).position();
        assert_eq!(p[axis.index()], expected, "{id:?} {axis}");
        assert!(p.iter().all(|c| c.abs() <= 4.5));
    }
    assert_eq!(session.surface().frames_presented(), 5);
}

#[test]
fn test_slider_readout_has_one_decimal() {
    let mut session = started();
    session.set_position(ChargeId::Positive, Axis::Y, 1.26).unwrap();
    let labels = session.surface().last_frame().unwrap().labels().clone();
    assert_eq!(labels.coordinate(ChargeId::Positive, Axis::Y), "1.3");
}

#[test]
fn test_coincident_charges_render() {
    let mut session = started();
    session.set_position(ChargeId::Negative, Axis::X, -1.0).unwrap();
    let frame = session.surface().last_frame().unwrap();
    assert_eq!(frame.separation(), 0.0);
    assert_eq!(frame.labels().separation, "Separation: 0.00 m");
    assert!(frame.magnitude().as_slice().iter().all(|m| m.is_finite()));
}

#[test]
fn test_nan_update_is_dropped() {
    let mut session = started();
    session.set_position(ChargeId::Positive, Axis::X, f32::NAN).unwrap();
    assert_eq!(session.state().charge(ChargeId::Positive).position(), Vec2::new(-1.0, 0.0));
    assert_eq!(session.surface().frames_presented(), 1);
}

#[test]
fn test_reset_after_moves() {
    let mut session = started();
    session.set_position(ChargeId::Positive, Axis::X, 2.0).unwrap();
    session.set_position(ChargeId::Negative, Axis::Y, 2.0).unwrap();
    session.reset().unwrap();
    assert_eq!(session.state().separation(), 2.0);
    assert_eq!(session.surface().frames_presented(), 4);
}

#[test]
fn test_partial_config_from_json() {
    let json = r#"{ "resolution": 12, "display": { "contour_scale": "Logarithmic" } }"#;
    let config: SessionConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.resolution, 12);
    assert_eq!(config.display.contour_scale, ContourScale::Logarithmic);
    assert_eq!(config.display.contour_levels, 20);
    assert_eq!(config.position_bound, 4.5);
    assert_eq!(config.initial_positive, Vec2::new(-1.0, 0.0));

    let mut session = InteractiveSession::new(config, TextSurface::new()).unwrap();
    session.recompute_and_render().unwrap();
    assert_eq!(session.grid().width(), 12);
}

/// Surface that fails on demand, to check errors reach the caller
#[derive(Default)]
struct FlakySurface {
    fail: bool,
    presented: usize,
}

impl RenderSurface for FlakySurface {
    type Error = String;

    fn present(&mut self, _frame: &dipole_core::FieldFrame) -> Result<(), String> {
        if self.fail {
            return Err("display lost".to_string());
        }
        self.presented += 1;
        Ok(())
    }
}

#[test]
fn test_surface_errors_propagate() {
    let mut session = InteractiveSession::new(SessionConfig::default(), FlakySurface::default()).unwrap();
    session.set_position(ChargeId::Positive, Axis::X, 0.5).unwrap();
    session.surface_mut().fail = true;
    let err = session.set_position(ChargeId::Positive, Axis::X, 0.7).unwrap_err();
    assert_eq!(err, "display lost");
    // The position change still happened; only the redraw failed
    assert_eq!(session.state().charge(ChargeId::Positive).position().x, 0.7);
    assert_eq!(session.surface().presented, 1);
}
