//! Parameter maps and per-family parameter tables.
//!
//! A [`ParamMap`] is what callers send: a flat, loosely typed JSON object.
//! Each family declares a table of [`ParamSpec`]s; [`Resolved`] looks values
//! up through that table, applying aliases, defaults, coercions and bounds.

use crate::errors::BuildError;
use crate::float_types::{MIN_RADIUS, Real};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Flat parameter map, keyed by parameter name.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Parse a parameter map from a JSON object.
pub fn params_from_json(json: &str) -> Result<ParamMap, BuildError> {
    serde_json::from_str(json)
        .map_err(|err| BuildError::invalid_parameter("<json>", err.to_string()))
}

/// A loosely typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Explicit `null`; treated as if the key were absent
    Null,
    Bool(bool),
    Number(Real),
    Text(String),
    Holes(Vec<HoleSpec>),
}

impl ParamValue {
    fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Null => "null",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Number(_) => "number",
            ParamValue::Text(_) => "string",
            ParamValue::Holes(_) => "hole list",
        }
    }
}

impl From<Real> for ParamValue {
    fn from(value: Real) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_owned())
    }
}

impl From<Vec<HoleSpec>> for ParamValue {
    fn from(value: Vec<HoleSpec>) -> Self {
        ParamValue::Holes(value)
    }
}

/// A through-hole in face-local coordinates, measured from the face centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHole")]
pub struct HoleSpec {
    pub d_mm: Real,
    pub x_mm: Real,
    pub z_mm: Real,
}

impl HoleSpec {
    pub const fn new(x_mm: Real, z_mm: Real, d_mm: Real) -> Self {
        HoleSpec { d_mm, x_mm, z_mm }
    }

    /// Radius actually cut: never below [`MIN_RADIUS`].
    pub fn effective_radius(&self) -> Real {
        MIN_RADIUS.max(self.d_mm / 2.0)
    }

    /// Reject positions or diameters that are not finite numbers.
    pub fn check(&self, key: &str) -> Result<Self, BuildError> {
        for (field, value) in [("d_mm", self.d_mm), ("x_mm", self.x_mm), ("z_mm", self.z_mm)] {
            if !value.is_finite() {
                return Err(BuildError::invalid_dimension(format!("{key}.{field}"), value));
            }
        }
        Ok(*self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHole {
    // Tried first: a struct would also accept a bare sequence in field order
    Triple([Real; 3]),
    Record(HoleRecord),
}

/// Every spelling a hole record may use. When several spellings of one
/// field are present the first in declaration order wins, so `z_mm`
/// beats `y_mm`, `z` and `y`.
#[derive(Deserialize)]
struct HoleRecord {
    d_mm: Option<Real>,
    diameter: Option<Real>,
    diam_mm: Option<Real>,
    diameter_mm: Option<Real>,
    d: Option<Real>,
    x_mm: Option<Real>,
    x: Option<Real>,
    z_mm: Option<Real>,
    y_mm: Option<Real>,
    z: Option<Real>,
    y: Option<Real>,
}

impl HoleRecord {
    fn into_spec(self) -> HoleSpec {
        let d = self.d_mm.or(self.diameter).or(self.diam_mm).or(self.diameter_mm).or(self.d);
        let x = self.x_mm.or(self.x);
        let z = self.z_mm.or(self.y_mm).or(self.z).or(self.y);
        HoleSpec::new(x.unwrap_or(0.0), z.unwrap_or(0.0), d.unwrap_or(0.0))
    }
}

impl From<RawHole> for HoleSpec {
    fn from(raw: RawHole) -> Self {
        match raw {
            RawHole::Triple([x, z, d]) => HoleSpec::new(x, z, d),
            RawHole::Record(r) => r.into_spec(),
        }
    }
}

/// How a parameter is interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Number { default: Real },
    /// A hole diameter; clamped rather than rejected when too small
    Diameter { default: Real },
    /// One of a fixed set of choices
    Text { default: &'static str, choices: &'static [&'static str] },
    Flag { default: bool },
    Holes,
}

/// One row of a family's parameter table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    pub min: Option<Real>,
    pub max: Option<Real>,
    pub kind: ParamKind,
}

impl ParamSpec {
    const fn with_kind(key: &'static str, kind: ParamKind) -> Self {
        ParamSpec {
            key,
            aliases: &[],
            min: None,
            max: None,
            kind,
        }
    }

    pub const fn number(key: &'static str, default: Real) -> Self {
        Self::with_kind(key, ParamKind::Number { default })
    }

    pub const fn diameter(key: &'static str, default: Real) -> Self {
        Self::with_kind(key, ParamKind::Diameter { default })
    }

    pub const fn text(
        key: &'static str,
        default: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self::with_kind(key, ParamKind::Text { default, choices })
    }

    pub const fn flag(key: &'static str, default: bool) -> Self {
        Self::with_kind(key, ParamKind::Flag { default })
    }

    pub const fn holes(key: &'static str) -> Self {
        Self::with_kind(key, ParamKind::Holes)
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn range(mut self, min: Real, max: Real) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub const fn at_most(mut self, max: Real) -> Self {
        self.max = Some(max);
        self
    }

    fn matches(&self, name: &str) -> bool {
        self.key == name || self.aliases.contains(&name)
    }

    /// The default as a [`ParamValue`].
    pub fn default_value(&self) -> ParamValue {
        match self.kind {
            ParamKind::Number { default } | ParamKind::Diameter { default } => {
                ParamValue::Number(default)
            },
            ParamKind::Text { default, .. } => ParamValue::Text(default.to_owned()),
            ParamKind::Flag { default } => ParamValue::Bool(default),
            ParamKind::Holes => ParamValue::Holes(Vec::new()),
        }
    }

    fn check_bounds(&self, value: Real) -> Result<Real, BuildError> {
        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if !value.is_finite() || below || above {
            return Err(BuildError::invalid_dimension(self.key, value));
        }
        Ok(value)
    }
}

/// The documented defaults of a table, as a parameter map.
pub fn defaults(table: &[ParamSpec]) -> ParamMap {
    table
        .iter()
        .map(|spec| (spec.key.to_owned(), spec.default_value()))
        .collect()
}

fn parse_number(key: &str, text: &str) -> Result<Real, BuildError> {
    text.trim()
        .replace(',', ".")
        .parse::<Real>()
        .map_err(|_| BuildError::invalid_parameter(key, format!("`{text}` is not a number")))
}

fn normalize_choice(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '×' { 'x' } else { c.to_ascii_lowercase() })
        .collect()
}

/// A parameter map viewed through one family's table.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    family: &'static str,
    table: &'static [ParamSpec],
    params: &'a ParamMap,
}

impl<'a> Resolved<'a> {
    pub fn new(family: &'static str, table: &'static [ParamSpec], params: &'a ParamMap) -> Self {
        for name in params.keys() {
            if !table.iter().any(|spec| spec.matches(name)) {
                debug!(family, key = %name, "ignoring unknown parameter");
            }
        }
        Resolved {
            family,
            table,
            params,
        }
    }

    fn spec(&self, key: &str) -> Result<&'static ParamSpec, BuildError> {
        self.table.iter().find(|spec| spec.key == key).ok_or_else(|| {
            BuildError::invalid_parameter(key, format!("not declared for `{}`", self.family))
        })
    }

    /// First non-null value among the key and its aliases.
    fn raw(&self, spec: &ParamSpec) -> Option<&'a ParamValue> {
        std::iter::once(spec.key)
            .chain(spec.aliases.iter().copied())
            .filter_map(|name| self.params.get(name))
            .find(|value| !matches!(value, ParamValue::Null))
    }

    fn wrong_type(spec: &ParamSpec, expected: &str, found: &ParamValue) -> BuildError {
        BuildError::invalid_parameter(
            spec.key,
            format!("expected {expected}, found {}", found.type_name()),
        )
    }

    fn number_value(spec: &ParamSpec, value: &ParamValue) -> Result<Real, BuildError> {
        match value {
            ParamValue::Number(n) => Ok(*n),
            ParamValue::Text(s) => parse_number(spec.key, s),
            other => Err(Self::wrong_type(spec, "a number", other)),
        }
    }

    /// A bounded numeric dimension.
    pub fn number(&self, key: &str) -> Result<Real, BuildError> {
        let spec = self.spec(key)?;
        let ParamKind::Number { default } = spec.kind else {
            return Err(BuildError::invalid_parameter(key, "not a numeric parameter"));
        };
        let value = match self.raw(spec) {
            Some(value) => Self::number_value(spec, value)?,
            None => default,
        };
        spec.check_bounds(value)
    }

    /// A hole diameter: finite and within the upper bound, then clamped so
    /// the cut radius is at least [`MIN_RADIUS`].
    pub fn diameter(&self, key: &str) -> Result<Real, BuildError> {
        let spec = self.spec(key)?;
        let ParamKind::Diameter { default } = spec.kind else {
            return Err(BuildError::invalid_parameter(key, "not a diameter parameter"));
        };
        let value = match self.raw(spec) {
            Some(value) => Self::number_value(spec, value)?,
            None => default,
        };
        if !value.is_finite() || spec.max.is_some_and(|max| value > max) {
            return Err(BuildError::invalid_dimension(spec.key, value));
        }
        Ok(value.max(2.0 * MIN_RADIUS))
    }

    /// One of the declared choices, returned in its canonical spelling.
    ///
    /// A bare number `n` is read as the square choice `"{n}x{n}"`.
    pub fn choice(&self, key: &str) -> Result<&'static str, BuildError> {
        let spec = self.spec(key)?;
        let ParamKind::Text { default, choices } = spec.kind else {
            return Err(BuildError::invalid_parameter(key, "not a text parameter"));
        };
        let wanted = match self.raw(spec) {
            None => return Ok(default),
            Some(ParamValue::Text(s)) => normalize_choice(s),
            Some(ParamValue::Number(n)) => format!("{n}x{n}"),
            Some(other) => return Err(Self::wrong_type(spec, "a string", other)),
        };
        choices
            .iter()
            .copied()
            .find(|choice| normalize_choice(choice) == wanted)
            .ok_or_else(|| {
                BuildError::invalid_parameter(
                    spec.key,
                    format!("unknown value `{wanted}` (expected one of {})", choices.join(", ")),
                )
            })
    }

    pub fn flag(&self, key: &str) -> Result<bool, BuildError> {
        let spec = self.spec(key)?;
        let ParamKind::Flag { default } = spec.kind else {
            return Err(BuildError::invalid_parameter(key, "not a flag parameter"));
        };
        match self.raw(spec) {
            None => Ok(default),
            Some(ParamValue::Bool(b)) => Ok(*b),
            Some(ParamValue::Number(n)) => Ok(*n != 0.0),
            Some(ParamValue::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                other => Err(BuildError::invalid_parameter(
                    spec.key,
                    format!("`{other}` is not a boolean"),
                )),
            },
            Some(other) => Err(Self::wrong_type(spec, "a boolean", other)),
        }
    }

    /// Free-form holes. A JSON string holding a hole list is accepted too.
    pub fn holes(&self, key: &str) -> Result<Vec<HoleSpec>, BuildError> {
        let spec = self.spec(key)?;
        if spec.kind != ParamKind::Holes {
            return Err(BuildError::invalid_parameter(key, "not a hole list parameter"));
        }
        let holes = match self.raw(spec) {
            None => Vec::new(),
            Some(ParamValue::Holes(holes)) => holes.clone(),
            Some(ParamValue::Text(s)) if s.trim().is_empty() => Vec::new(),
            Some(ParamValue::Text(s)) => serde_json::from_str(s).map_err(|err| {
                BuildError::invalid_parameter(spec.key, format!("malformed hole list: {err}"))
            })?,
            Some(other) => return Err(Self::wrong_type(spec, "a list of holes", other)),
        };
        holes.iter().map(|hole| hole.check(spec.key)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: &[ParamSpec] = &[
        ParamSpec::number("width", 120.0).aliases(&["router_width"]).range(20.0, 1000.0),
        ParamSpec::diameter("hole_d_mm", 5.0).aliases(&["hole"]).at_most(30.0),
        ParamSpec::text("pattern", "100x100", &["75x75", "100x100", "100x200"]),
        ParamSpec::flag("ventilated", false),
        ParamSpec::holes("holes"),
    ];

    fn map(json: &str) -> ParamMap {
        params_from_json(json).unwrap()
    }

    #[test]
    fn defaults_apply_to_missing_and_null() {
        let params = map(r#"{"width": null}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.number("width").unwrap(), 120.0);
        assert_eq!(r.diameter("hole_d_mm").unwrap(), 5.0);
        assert_eq!(r.choice("pattern").unwrap(), "100x100");
        assert!(!r.flag("ventilated").unwrap());
        assert!(r.holes("holes").unwrap().is_empty());
    }

    #[test]
    fn aliases_and_string_numbers() {
        let params = map(r#"{"router_width": "150,5", "hole": "4.5"}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.number("width").unwrap(), 150.5);
        assert_eq!(r.diameter("hole_d_mm").unwrap(), 4.5);
    }

    #[test]
    fn primary_key_wins_over_alias() {
        let params = map(r#"{"router_width": 50, "width": 60}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.number("width").unwrap(), 60.0);
    }

    #[test]
    fn out_of_bounds_is_invalid_dimension() {
        let params = map(r#"{"width": 5}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(
            r.number("width").unwrap_err(),
            BuildError::invalid_dimension("width", 5.0)
        );
        let params = map(r#"{"hole": 31}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert!(matches!(r.diameter("hole_d_mm"), Err(BuildError::InvalidDimension { .. })));
    }

    #[test]
    fn non_positive_diameters_clamp() {
        for raw in ["0", "-4", "0.05"] {
            let params = map(&format!(r#"{{"hole_d_mm": {raw}}}"#));
            let r = Resolved::new("test", TABLE, &params);
            assert_eq!(r.diameter("hole_d_mm").unwrap(), 2.0 * MIN_RADIUS);
        }
        let params = map(r#"{"hole_d_mm": "nan"}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert!(matches!(r.diameter("hole_d_mm"), Err(BuildError::InvalidDimension { .. })));
    }

    #[test]
    fn wrong_types_and_unknown_choices() {
        let params = map(r#"{"width": true, "pattern": "123x4", "ventilated": "maybe"}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert!(matches!(r.number("width"), Err(BuildError::InvalidParameter { .. })));
        assert!(matches!(r.choice("pattern"), Err(BuildError::InvalidParameter { .. })));
        assert!(matches!(r.flag("ventilated"), Err(BuildError::InvalidParameter { .. })));
        assert!(matches!(r.number("depth"), Err(BuildError::InvalidParameter { .. })));
    }

    #[test]
    fn choices_are_normalized() {
        let params = map(r#"{"pattern": " 75 X 75 "}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.choice("pattern").unwrap(), "75x75");
        let params = map(r#"{"pattern": 100}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.choice("pattern").unwrap(), "100x100");
    }

    #[test]
    fn hole_records_accept_aliases_and_triples() {
        let params = map(
            r#"{"holes": [
                {"x": 1, "y": 2, "diameter": 3},
                [4, 5, 6],
                {"x_mm": 7, "z_mm": 8, "d_mm": 9},
                {}
            ]}"#,
        );
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(
            r.holes("holes").unwrap(),
            vec![
                HoleSpec::new(1.0, 2.0, 3.0),
                HoleSpec::new(4.0, 5.0, 6.0),
                HoleSpec::new(7.0, 8.0, 9.0),
                HoleSpec::new(0.0, 0.0, 0.0),
            ]
        );
        assert_eq!(HoleSpec::new(0.0, 0.0, 0.0).effective_radius(), MIN_RADIUS);
    }

    #[test]
    fn several_spellings_of_one_field() {
        let params = map(r#"{"holes": [{"y_mm": 1, "z_mm": 2, "y": 3, "d": 4, "d_mm": 5}]}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.holes("holes").unwrap(), vec![HoleSpec::new(0.0, 2.0, 5.0)]);
    }

    #[test]
    fn holes_from_json_string() {
        let params = map(r#"{"holes": "[[10, 0, 4]]"}"#);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.holes("holes").unwrap(), vec![HoleSpec::new(10.0, 0.0, 4.0)]);
    }

    #[test]
    fn defaults_round_trip() {
        let params = defaults(TABLE);
        let r = Resolved::new("test", TABLE, &params);
        assert_eq!(r.number("width").unwrap(), 120.0);
        assert_eq!(r.choice("pattern").unwrap(), "100x100");
    }
}
