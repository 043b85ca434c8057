use std::fmt;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::ConicError, line::Line, live::Live, r2::R2};

/// What the caller asked to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Ellipse,
    Hyperbola,
    Parabola,
    Conic,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Ellipse => "ellipse",
            Kind::Hyperbola => "hyperbola",
            Kind::Parabola => "parabola",
            Kind::Conic => "conic",
        };
        write!(f, "{}", s)
    }
}

/// Which parametrization applies; [`Kind::Conic`] definitions are always [`Family::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Ellipse,
    Hyperbola,
    Parabola,
    General,
}

#[derive(Debug, Clone)]
pub enum Parent {
    Point(Live<R2<f64>>),
    Line(Live<Line>),
    Number(Live<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentType {
    Point,
    Line,
    Number,
}

impl Parent {
    pub fn parent_type(&self) -> ParentType {
        match self {
            Parent::Point(_) => ParentType::Point,
            Parent::Line(_) => ParentType::Line,
            Parent::Number(_) => ParentType::Number,
        }
    }
}

impl From<R2<f64>> for Parent {
    fn from(p: R2<f64>) -> Self {
        Parent::Point(p.into())
    }
}

impl From<Line> for Parent {
    fn from(l: Line) -> Self {
        Parent::Line(l.into())
    }
}

impl From<f64> for Parent {
    fn from(v: f64) -> Self {
        Parent::Number(v.into())
    }
}

/// Geometric definition of a conic. Every field is re-read on each refresh.
#[derive(Debug, Clone)]
pub enum Definition {
    EllipseFociPoint { f0: Live<R2<f64>>, f1: Live<R2<f64>>, point: Live<R2<f64>> },
    EllipseFociAxis { f0: Live<R2<f64>>, f1: Live<R2<f64>>, major_axis: Live<f64> },
    HyperbolaFociPoint { f0: Live<R2<f64>>, f1: Live<R2<f64>>, point: Live<R2<f64>> },
    HyperbolaFociAxis { f0: Live<R2<f64>>, f1: Live<R2<f64>>, major_axis: Live<f64> },
    Parabola { focus: Live<R2<f64>>, directrix: Live<Line> },
    FivePoints([Live<R2<f64>>; 5]),
    /// `a00·x² + a11·y² + a22 + 2·a01·xy + 2·a02·x + 2·a12·y = 0`
    SixCoefficients {
        a00: Live<f64>,
        a11: Live<f64>,
        a22: Live<f64>,
        a01: Live<f64>,
        a02: Live<f64>,
        a12: Live<f64>,
    },
}

impl Definition {
    /// Accepted parent shapes per [`Kind`], as listed in [`ConicError::UnrecognizedParents`].
    pub fn accepted(kind: Kind) -> Vec<&'static str> {
        match kind {
            Kind::Ellipse | Kind::Hyperbola => vec!["[point, point, point]", "[point, point, number]"],
            Kind::Parabola => vec!["[point, line]"],
            Kind::Conic => vec!["[point; 5]", "[number; 6]"],
        }
    }

    pub fn from_parents(kind: Kind, parents: Vec<Parent>) -> Result<Definition, ConicError> {
        use Parent as P;
        let types: Vec<ParentType> = parents.iter().map(Parent::parent_type).collect();
        let def = match (kind, parents.as_slice()) {
            (Kind::Ellipse, [P::Point(f0), P::Point(f1), P::Point(p)]) =>
                Some(Definition::EllipseFociPoint { f0: f0.clone(), f1: f1.clone(), point: p.clone() }),
            (Kind::Ellipse, [P::Point(f0), P::Point(f1), P::Number(a)]) =>
                Some(Definition::EllipseFociAxis { f0: f0.clone(), f1: f1.clone(), major_axis: a.clone() }),
            (Kind::Hyperbola, [P::Point(f0), P::Point(f1), P::Point(p)]) =>
                Some(Definition::HyperbolaFociPoint { f0: f0.clone(), f1: f1.clone(), point: p.clone() }),
            (Kind::Hyperbola, [P::Point(f0), P::Point(f1), P::Number(a)]) =>
                Some(Definition::HyperbolaFociAxis { f0: f0.clone(), f1: f1.clone(), major_axis: a.clone() }),
            (Kind::Parabola, [P::Point(focus), P::Line(directrix)]) =>
                Some(Definition::Parabola { focus: focus.clone(), directrix: directrix.clone() }),
            (Kind::Conic, [P::Point(p0), P::Point(p1), P::Point(p2), P::Point(p3), P::Point(p4)]) =>
                Some(Definition::FivePoints([p0.clone(), p1.clone(), p2.clone(), p3.clone(), p4.clone()])),
            (Kind::Conic, [P::Number(a00), P::Number(a11), P::Number(a22), P::Number(a01), P::Number(a02), P::Number(a12)]) =>
                Some(Definition::SixCoefficients {
                    a00: a00.clone(),
                    a11: a11.clone(),
                    a22: a22.clone(),
                    a01: a01.clone(),
                    a02: a02.clone(),
                    a12: a12.clone(),
                }),
            _ => None,
        };
        def.ok_or_else(|| ConicError::UnrecognizedParents {
            kind,
            parents: types,
            accepted: Definition::accepted(kind),
        })
    }

    pub fn family(&self) -> Family {
        match self {
            Definition::EllipseFociPoint { .. } | Definition::EllipseFociAxis { .. } => Family::Ellipse,
            Definition::HyperbolaFociPoint { .. } | Definition::HyperbolaFociAxis { .. } => Family::Hyperbola,
            Definition::Parabola { .. } => Family::Parabola,
            Definition::FivePoints(_) | Definition::SixCoefficients { .. } => Family::General,
        }
    }

    /// Foci of an ellipse or hyperbola.
    pub fn foci(&self) -> Option<(R2<f64>, R2<f64>)> {
        match self {
            Definition::EllipseFociPoint { f0, f1, .. }
            | Definition::EllipseFociAxis { f0, f1, .. }
            | Definition::HyperbolaFociPoint { f0, f1, .. }
            | Definition::HyperbolaFociAxis { f0, f1, .. } => Some((f0.get(), f1.get())),
            _ => None,
        }
    }

    /// Major axis length (`2a`) of an ellipse or hyperbola, read from the live inputs.
    pub fn major_axis(&self) -> Option<f64> {
        self.foci().map(|(f0, f1)| self.major_axis_for(&f0, &f1))
    }

    /// Major axis against already-read foci, so one refresh sees a single snapshot of each
    /// input. `NaN` for non-focal definitions.
    pub fn major_axis_for(&self, f0: &R2<f64>, f1: &R2<f64>) -> f64 {
        match self {
            Definition::EllipseFociPoint { point, .. } => {
                let p = point.get();
                p.distance(f0) + p.distance(f1)
            }
            Definition::HyperbolaFociPoint { point, .. } => {
                let p = point.get();
                (p.distance(f0) - p.distance(f1)).abs()
            }
            Definition::EllipseFociAxis { major_axis, .. }
            | Definition::HyperbolaFociAxis { major_axis, .. } => major_axis.get(),
            _ => f64::NAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Parent {
        R2::new(x, y).into()
    }

    #[test]
    fn decision_table() {
        let def = Definition::from_parents(Kind::Ellipse, vec![p(-1., 4.), p(-1., -4.), p(1., 1.)]).unwrap();
        assert_eq!(def.family(), Family::Ellipse);
        assert!(matches!(def, Definition::EllipseFociPoint { .. }));

        let def = Definition::from_parents(Kind::Hyperbola, vec![p(-1., 0.), p(1., 0.), 1.5.into()]).unwrap();
        assert!(matches!(def, Definition::HyperbolaFociAxis { .. }));
        assert_eq!(def.major_axis(), Some(1.5));

        let def = Definition::from_parents(Kind::Parabola, vec![p(0., 1.), Line::new(1., 0., 1.).into()]).unwrap();
        assert_eq!(def.family(), Family::Parabola);

        let def = Definition::from_parents(Kind::Conic, vec![p(1., 5.), p(1., 2.), p(2., 0.), p(0., 0.), p(-1., 5.)]).unwrap();
        assert!(matches!(def, Definition::FivePoints(_)));

        let coeffs: Vec<Parent> = [1., 1., -1., 0., 0., 0.].into_iter().map(Parent::from).collect();
        let def = Definition::from_parents(Kind::Conic, coeffs).unwrap();
        assert_eq!(def.family(), Family::General);
    }

    #[test]
    fn unrecognized() {
        let err = Definition::from_parents(Kind::Parabola, vec![p(0., 1.), p(1., 1.)]).unwrap_err();
        assert_eq!(err, ConicError::UnrecognizedParents {
            kind: Kind::Parabola,
            parents: vec![ParentType::Point, ParentType::Point],
            accepted: vec!["[point, line]"],
        });
        let msg = err.to_string();
        assert!(msg.contains("parabola"), "{}", msg);
        assert!(msg.contains("[point, line]"), "{}", msg);

        let err = Definition::from_parents(Kind::Conic, vec![p(0., 0.); 4]).unwrap_err();
        assert!(matches!(err, ConicError::UnrecognizedParents { kind: Kind::Conic, .. }));
    }

    #[test]
    fn hyperbola_through_point() {
        let def = Definition::from_parents(Kind::Hyperbola, vec![p(-2., 0.), p(2., 0.), p(3., 0.)]).unwrap();
        // |5 - 1|
        assert_eq!(def.major_axis(), Some(4.));
        assert_eq!(def.foci(), Some((R2::new(-2., 0.), R2::new(2., 0.))));
    }
}
