//! Serializable, constant-valued conic definitions (JSON interchange for the CLI and WASM
//! bindings).

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    conic::{definition::{Kind, Parent}, Conic, Range as ConicRange},
    error::ConicError,
    line::Line,
    r2::R2,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(untagged)]
pub enum ParentSpec {
    Point(R2<f64>),
    Line(Line),
    Number(f64),
}

impl From<ParentSpec> for Parent {
    fn from(p: ParentSpec) -> Self {
        match p {
            ParentSpec::Point(p) => p.into(),
            ParentSpec::Line(l) => l.into(),
            ParentSpec::Number(v) => v.into(),
        }
    }
}

/// e.g. `{ "kind": "ellipse", "parents": [{ "x": -1, "y": 4 }, { "x": -1, "y": -4 }, 9] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct ConicSpec {
    pub kind: Kind,
    pub parents: Vec<ParentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[tsify(optional, type = "Range")]
    pub range: Option<ConicRange>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(ConicSpec),
    Many(Vec<ConicSpec>),
}

impl ConicSpec {
    /// Parse a single spec object or an array of them.
    pub fn from_json(s: &str) -> Result<Vec<ConicSpec>, serde_json::Error> {
        Ok(match serde_json::from_str(s)? {
            OneOrMany::One(spec) => vec![spec],
            OneOrMany::Many(specs) => specs,
        })
    }

    pub fn build(&self) -> Result<Conic, ConicError> {
        let parents = self.parents.iter().cloned().map(Parent::from).collect();
        let conic = Conic::from_parents(self.kind, parents)?;
        Ok(match self.range {
            Some(range) => conic.with_range(range),
            None => conic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conic::{definition::Family, Range};

    #[test]
    fn parse_ellipse() {
        let spec: ConicSpec = serde_json::from_str(
            r#"{ "kind": "ellipse", "parents": [{ "x": -1, "y": 4 }, { "x": -1, "y": -4 }, 9] }"#,
        ).unwrap();
        assert_eq!(spec.parents[2], ParentSpec::Number(9.));
        let conic = spec.build().unwrap();
        assert_eq!(conic.family(), Family::Ellipse);
        assert_eq!(conic.definition().major_axis(), Some(9.));
    }

    #[test]
    fn parse_parabola_with_range() {
        let spec: ConicSpec = serde_json::from_str(
            r#"{ "kind": "parabola", "parents": [{ "x": 0, "y": 1 }, { "c": 1, "a": 0, "b": 1 }], "range": { "start": -2, "end": 2 } }"#,
        ).unwrap();
        assert_eq!(spec.parents[1], ParentSpec::Line(Line::new(1., 0., 1.)));
        let conic = spec.build().unwrap();
        assert_eq!(conic.range(), Range::new(-2., 2.));
    }

    #[test]
    fn unrecognized_shape() {
        let spec: ConicSpec = serde_json::from_str(r#"{ "kind": "hyperbola", "parents": [1, 2] }"#).unwrap();
        let err = spec.build().unwrap_err();
        assert!(matches!(err, ConicError::UnrecognizedParents { kind: Kind::Hyperbola, .. }));
    }

    #[test]
    fn one_or_many() {
        let one = r#"{ "kind": "conic", "parents": [1, 1, -1, 0, 0, 0] }"#;
        assert_eq!(ConicSpec::from_json(one).unwrap().len(), 1);
        let many = format!("[{}, {}]", one, one);
        assert_eq!(ConicSpec::from_json(&many).unwrap().len(), 2);
        assert!(ConicSpec::from_json(r#"{ "kind": "circle", "parents": [] }"#).is_err());
    }

    #[test]
    fn roundtrip() {
        let spec = ConicSpec {
            kind: Kind::Conic,
            parents: vec![1., 1., -1., 0., 0., 0.].into_iter().map(ParentSpec::Number).collect(),
            range: None,
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"kind":"conic","parents":[1.0,1.0,-1.0,0.0,0.0,0.0]}"#);
        assert_eq!(serde_json::from_str::<ConicSpec>(&json).unwrap(), spec);
    }
}
