pub mod definition;
pub mod frame;
pub mod polar;
pub mod quadratic_form;

use std::f64::consts::PI;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::ConicError, r2::R2};

use definition::{Definition, Family, Kind, Parent};
use frame::CanonicalFrame;
use quadratic_form::QuadraticForm;

/// Parameter interval swept by [`Conic::sample`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn new(start: f64, end: f64) -> Self {
        Range { start, end }
    }

    pub fn default_for(family: Family) -> Self {
        match family {
            Family::Ellipse | Family::General => Range::new(0., 2. * PI),
            Family::Hyperbola => Range::new(-PI, PI),
            Family::Parabola => Range::new(-10., 10.),
        }
    }

    /// `n` evenly spaced parameters, both endpoints included when `n >= 2`; `n == 1` yields
    /// only `start`, `n == 0` nothing.
    pub fn linspace(&self, n: usize) -> impl Iterator<Item = f64> + '_ {
        let step = if n > 1 { (self.end - self.start) / (n - 1) as f64 } else { 0. };
        (0..n).map(move |i| if n > 1 && i + 1 == n { self.end } else { self.start + step * i as f64 })
    }
}

/// A conic section with a cached quadratic form and canonical frame.
///
/// [`Conic::refresh`] re-reads the (live) definition and rebuilds both; [`Conic::evaluate`] only
/// reads them. Construction performs the first refresh.
#[derive(Debug, Clone)]
pub struct Conic {
    definition: Definition,
    range: Range,
    quadratic_form: QuadraticForm,
    frame: CanonicalFrame,
    refreshes: usize,
}

impl Conic {
    pub fn new(definition: Definition) -> Self {
        let range = Range::default_for(definition.family());
        let (frame, quadratic_form) = Conic::build(&definition);
        Conic { definition, range, quadratic_form, frame, refreshes: 1 }
    }

    pub fn from_parents(kind: Kind, parents: Vec<Parent>) -> Result<Self, ConicError> {
        Ok(Conic::new(Definition::from_parents(kind, parents)?))
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    fn build(definition: &Definition) -> (CanonicalFrame, QuadraticForm) {
        match definition {
            Definition::EllipseFociPoint { f0, f1, .. } | Definition::EllipseFociAxis { f0, f1, .. } => {
                let (f0, f1) = (f0.get(), f1.get());
                CanonicalFrame::ellipse(&f0, &f1, definition.major_axis_for(&f0, &f1))
            }
            Definition::HyperbolaFociPoint { f0, f1, .. } | Definition::HyperbolaFociAxis { f0, f1, .. } => {
                let (f0, f1) = (f0.get(), f1.get());
                CanonicalFrame::hyperbola(&f0, &f1, definition.major_axis_for(&f0, &f1))
            }
            Definition::Parabola { focus, directrix } => CanonicalFrame::parabola(&focus.get(), &directrix.get()),
            Definition::FivePoints(points) => {
                let points = [points[0].get(), points[1].get(), points[2].get(), points[3].get(), points[4].get()];
                let m = QuadraticForm::five_points(&points);
                (CanonicalFrame::diagonalize(&m), m)
            }
            Definition::SixCoefficients { a00, a11, a22, a01, a02, a12 } => {
                let m = QuadraticForm::six_coefficients(a00.get(), a11.get(), a22.get(), a01.get(), a02.get(), a12.get());
                (CanonicalFrame::diagonalize(&m), m)
            }
        }
    }

    /// Rebuild the quadratic form and canonical frame from the current inputs.
    pub fn refresh(&mut self) -> &CanonicalFrame {
        let (frame, quadratic_form) = Conic::build(&self.definition);
        self.frame = frame;
        self.quadratic_form = quadratic_form;
        self.refreshes += 1;
        debug!("refresh #{} ({:?}): M = {}", self.refreshes, self.family(), self.quadratic_form);
        &self.frame
    }

    /// Point at parameter `t`, from the frame cached by the last refresh.
    pub fn evaluate(&self, t: f64) -> R2<f64> {
        self.frame.evaluate(t)
    }

    pub fn x(&self, t: f64) -> f64 {
        self.evaluate(t).x
    }

    pub fn y(&self, t: f64) -> f64 {
        self.evaluate(t).y
    }

    /// Two-argument form: refresh first unless `suspend_update`.
    pub fn polar_form(&mut self, t: f64, suspend_update: bool) -> R2<f64> {
        if !suspend_update {
            self.refresh();
        }
        self.evaluate(t)
    }

    /// Refresh once, then evaluate `n` parameters spanning the range.
    ///
    /// Non-finite points (asymptotes, undefined branches) are returned as-is.
    pub fn sample(&mut self, n: usize) -> Result<Vec<R2<f64>>, ConicError> {
        if n < 2 {
            return Err(ConicError::InvalidSampleCount(n));
        }
        self.refresh();
        let range = self.range;
        let points: Vec<R2<f64>> = range.linspace(n).map(|t| self.evaluate(t)).collect();
        trace!("sampled {} points over [{}, {}]", points.len(), range.start, range.end);
        Ok(points)
    }

    /// Center (ellipse, hyperbola, general) or vertex-axis foot (parabola).
    ///
    /// Read live for the closed-form families; for general conics it derives from the quadratic
    /// form cached by the last refresh.
    pub fn midpoint(&self) -> R2<f64> {
        match &self.definition {
            Definition::Parabola { focus, directrix } => directrix.get().foot(&focus.get()),
            Definition::FivePoints(_) | Definition::SixCoefficients { .. } => self.quadratic_form.center(),
            _ => match self.definition.foci() {
                Some((f0, f1)) => f0.midpoint(&f1),
                None => R2::new(f64::NAN, f64::NAN),
            },
        }
    }

    pub fn family(&self) -> Family {
        self.definition.family()
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn quadratic_form(&self) -> &QuadraticForm {
        &self.quadratic_form
    }

    pub fn frame(&self) -> &CanonicalFrame {
        &self.frame
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Number of refreshes so far, including the one at construction.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}
