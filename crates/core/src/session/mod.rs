//! Interactive session
//!
//! Owns the two-charge state, the fixed sample grid, the evaluator, and a
//! rendering surface. Every accepted position change triggers a full
//! recompute and redraw. All mutation goes through `&mut self`, so a redraw
//! can never be re-entered while it is in progress.

pub mod config;
pub mod state;

pub use config::{
    DisplayConfig, SessionConfig, DEFAULT_CONTOUR_LEVELS, DEFAULT_HALF_EXTENT,
    DEFAULT_MARKER_RADIUS, DEFAULT_POSITION_BOUND, DEFAULT_RESOLUTION,
};
pub use state::{SessionLabels, SessionState};

use crate::core_types::{Axis, ChargeId};
use crate::error::DipoleError;
use crate::grid::SampleGrid;
use crate::render::{FieldFrame, RenderSurface};
use crate::solver::{CoulombSolver, FrameTimer, ProfilerScope};
use std::sync::Arc;
use tracing::{debug, info};

/// A dipole bound to a rendering surface
pub struct InteractiveSession<S: RenderSurface> {
    config: SessionConfig,
    grid: Arc<SampleGrid>,
    solver: CoulombSolver,
    state: SessionState,
    timer: FrameTimer,
    surface: S,
}

impl<S: RenderSurface> InteractiveSession<S> {
    /// Validate `config` and build the grid and evaluator
    ///
    /// Nothing is drawn until the first `recompute_and_render`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for any parameter outside its valid range.
    pub fn new(config: SessionConfig, surface: S) -> Result<Self, DipoleError> {
        config.validate()?;
        let grid = Arc::new(SampleGrid::square(config.half_extent, config.resolution)?);
        let solver = CoulombSolver::new(config.coulomb_constant, config.regularization)?;
        let state = SessionState::new(
            config.charge_magnitude,
            config.initial_positive,
            config.initial_negative,
        );

        info!(
            resolution = config.resolution,
            half_extent = config.half_extent,
            position_bound = config.position_bound,
            k = solver.k(),
            q = config.charge_magnitude,
            "Session created"
        );

        Ok(Self {
            config,
            grid,
            solver,
            state,
            timer: FrameTimer::new(),
            surface,
        })
    }

    /// Move one coordinate of one charge and redraw
    ///
    /// `value` is clamped to `[-position_bound, position_bound]`. NaN carries
    /// no position and is ignored without a redraw.
    ///
    /// # Errors
    ///
    /// Whatever the surface reports while presenting the new frame.
    pub fn set_position(&mut self, id: ChargeId, axis: Axis, value: f32) -> Result<(), S::Error> {
        if value.is_nan() {
            debug!(charge = ?id, %axis, "Ignoring NaN position");
            return Ok(());
        }

        let bound = self.config.position_bound;
        let clamped = value.clamp(-bound, bound);
        if clamped != value {
            debug!(charge = ?id, %axis, requested = value, clamped, "Position clamped");
        }

        self.state.charge_mut(id).set_coordinate(axis, clamped);
        self.recompute_and_render()
    }

    /// Evaluate the field on the grid and hand a full frame to the surface
    ///
    /// # Errors
    ///
    /// Whatever the surface reports while presenting.
    pub fn recompute_and_render(&mut self) -> Result<(), S::Error> {
        let scope = ProfilerScope::new("recompute_and_render");

        let field = self.solver.evaluate(&self.grid, &self.state.charges());
        let frame = FieldFrame::new(
            Arc::clone(&self.grid),
            field,
            &self.state,
            self.solver.k(),
            self.solver.epsilon(),
            self.config.half_extent,
            self.config.position_bound,
            self.config.display,
        );
        debug!(
            separation = frame.separation(),
            max_magnitude = frame.magnitude_range().1,
            "Field recomputed"
        );

        self.surface.present(&frame)?;
        self.timer.record(scope.elapsed_ms());
        Ok(())
    }

    /// Restore the configured start positions and redraw
    ///
    /// # Errors
    ///
    /// Whatever the surface reports while presenting.
    pub fn reset(&mut self) -> Result<(), S::Error> {
        info!("Session reset");
        for (id, p) in [
            (ChargeId::Positive, self.config.initial_positive),
            (ChargeId::Negative, self.config.initial_negative),
        ] {
            self.state.charge_mut(id).set_position(p);
        }
        self.recompute_and_render()
    }

    /// Current charge positions
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The validated configuration this session was built from
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The fixed sample grid
    #[must_use]
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Timing of the last recompute-and-render cycles
    #[must_use]
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// The surface frames are presented to
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for front-end state such as focus or theme
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down the session and return its surface
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec2;
    use crate::render::TextSurface;
    use approx::assert_relative_eq;

    fn session() -> InteractiveSession<TextSurface> {
        InteractiveSession::new(SessionConfig::default(), TextSurface::new()).unwrap()
    }

    #[test]
    fn test_new_does_not_draw() {
        let s = session();
        assert_eq!(s.surface().frames_presented(), 0);
        assert_eq!(s.state().separation(), 2.0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let cfg = SessionConfig {
            resolution: 1,
            ..Default::default()
        };
        let err = InteractiveSession::new(cfg, TextSurface::new()).err().unwrap();
        assert!(matches!(err, DipoleError::InvalidConfig { parameter: "resolution", .. }));
    }

    #[test]
    fn test_set_position_clamps_and_redraws() {
        let mut s = session();
        s.set_position(ChargeId::Positive, Axis::X, -10.0).unwrap();
        assert_eq!(s.state().charge(ChargeId::Positive).position().x, -4.5);
        assert_eq!(s.surface().frames_presented(), 1);

        s.set_position(ChargeId::Negative, Axis::Y, 7.25).unwrap();
        assert_eq!(s.state().charge(ChargeId::Negative).position().y, 4.5);
        assert_eq!(s.surface().frames_presented(), 2);
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut s = session();
        s.set_position(ChargeId::Negative, Axis::X, f32::NAN).unwrap();
        assert_eq!(s.state().charge(ChargeId::Negative).position(), Vec2::new(1.0, 0.0));
        assert_eq!(s.surface().frames_presented(), 0);
    }

    #[test]
    fn test_infinities_clamp_to_bound() {
        let mut s = session();
        s.set_position(ChargeId::Positive, Axis::Y, f32::INFINITY).unwrap();
        s.set_position(ChargeId::Negative, Axis::Y, f32::NEG_INFINITY).unwrap();
        assert_eq!(s.state().charge(ChargeId::Positive).position().y, 4.5);
        assert_eq!(s.state().charge(ChargeId::Negative).position().y, -4.5);
    }

    #[test]
    fn test_frame_reflects_update() {
        let mut s = session();
        s.set_position(ChargeId::Negative, Axis::X, 0.0).unwrap();
        let frame = s.surface().last_frame().unwrap();
        assert_relative_eq!(frame.separation(), 1.0);
        assert_eq!(frame.labels().separation, "Separation: 1.00 m");
        assert_eq!(frame.labels().negative_x, "0.0");
    }

    #[test]
    fn test_reset_restores_initial_positions() {
        let mut s = session();
        s.set_position(ChargeId::Positive, Axis::X, 3.0).unwrap();
        s.set_position(ChargeId::Positive, Axis::Y, -2.0).unwrap();
        s.reset().unwrap();
        assert_eq!(s.state().charge(ChargeId::Positive).position(), Vec2::new(-1.0, 0.0));
        assert_eq!(s.surface().frames_presented(), 3);
    }

    #[test]
    fn test_timer_records_each_frame() {
        let mut s = session();
        s.recompute_and_render().unwrap();
        assert!(s.timer().last_frame_time_ms() >= 0.0);
        let surface = s.into_surface();
        assert_eq!(surface.frames_presented(), 1);
    }
}
