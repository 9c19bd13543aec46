//! The catalog of chaotic vector fields particles are carried through.
//!
//! Each [`VectorField`] is either a continuous flow, advanced with one explicit
//! Euler step per frame, or a discrete map, iterated once per frame with the
//! time step ignored.
//!
//! # Field Types
//!
//! - **Flows** (3D): Lorenz, Rössler, Halvorsen, Chen, Aizawa, Dadras
//! - **Maps** (2D): Clifford, Peter de Jong
//!
//! Every flow carries its own derivative scale. Halvorsen is stiffer than the
//! others and uses `0.005` where the rest use `0.01`.
//!
//! # Example
//!
//! ```ignore
//! use attractool::prelude::*;
//!
//! let schema = FieldRegistry::schema("lorenz")?;
//! let params = ParameterSet::defaults(schema.field);
//! let next = FieldRegistry::step("lorenz", DVec3::ONE, &params, 1.0)?;
//! ```

use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::error::ConfigurationError;
use crate::params::ParameterSet;

/// Initial range used for fields that do not declare their own.
pub const FALLBACK_INITIAL_RANGE: InitialRange = InitialRange::cube(-5.0, 5.0);

/// Number of state axes a field evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Two axes (x, y). The `z` component of a particle is held at zero.
    Planar,
    /// Three axes (x, y, z).
    Spatial,
}

impl Dimension {
    /// Number of axes.
    pub fn axes(&self) -> usize {
        match self {
            Dimension::Planar => 2,
            Dimension::Spatial => 3,
        }
    }
}

/// Schema entry for a single tunable coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Parameter name, as shown to users.
    pub name: &'static str,
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
    /// Slider granularity.
    pub step: f64,
    /// Value restored on reset.
    pub default: f64,
}

impl ParamSpec {
    const fn new(name: &'static str, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self { name, min, max, step, default }
    }

    /// Clamp `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Snap `value` onto the step grid anchored at `min`, staying in range.
    pub fn snap(&self, value: f64) -> f64 {
        if self.step <= 0.0 {
            return self.clamp(value);
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

/// Axis-aligned box initial particle positions are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialRange {
    /// Lower corner.
    pub min: DVec3,
    /// Upper corner.
    pub max: DVec3,
}

impl InitialRange {
    /// Cube spanning `[min, max]` on all three axes.
    pub const fn cube(min: f64, max: f64) -> Self {
        Self {
            min: DVec3::new(min, min, min),
            max: DVec3::new(max, max, max),
        }
    }

    /// Square spanning `[min, max]` on x and y, flat in z.
    pub const fn square(min: f64, max: f64) -> Self {
        Self {
            min: DVec3::new(min, min, 0.0),
            max: DVec3::new(max, max, 0.0),
        }
    }

    /// Whether `point` lies inside the box (bounds inclusive).
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// How a field turns the current state into the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Integration {
    /// Continuous flow: `state + derivative * derivative_scale * dt`.
    Flow {
        /// Per-field multiplier applied to the derivative.
        derivative_scale: f64,
    },
    /// Discrete map: the next state is the map applied once.
    Map,
}

/// Static description of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// The field this schema describes.
    pub field: VectorField,
    /// Identifier used in configuration and on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// State dimensionality.
    pub dimension: Dimension,
    /// Tunable coefficients in declaration order.
    pub params: &'static [ParamSpec],
    /// Flow or map.
    pub integration: Integration,
    /// Declared spawn box, if the field has one.
    pub declared_range: Option<InitialRange>,
    /// View zoom that frames the attractor on a typical window.
    pub scale_hint: f64,
}

impl FieldSchema {
    /// Spawn box, falling back to [`FALLBACK_INITIAL_RANGE`].
    pub fn initial_range(&self) -> InitialRange {
        self.declared_range.unwrap_or(FALLBACK_INITIAL_RANGE)
    }

    /// Look up a parameter by name, returning its index and spec.
    pub fn param(&self, name: &str) -> Option<(usize, &'static ParamSpec)> {
        self.params.iter().enumerate().find(|(_, p)| p.name == name)
    }
}

static LORENZ: FieldSchema = FieldSchema {
    field: VectorField::Lorenz,
    id: "lorenz",
    name: "Lorenz",
    dimension: Dimension::Spatial,
    params: &[
        ParamSpec::new("sigma", 10.0, 0.0, 50.0, 0.1),
        ParamSpec::new("rho", 28.0, 0.0, 50.0, 0.1),
        ParamSpec::new("beta", 2.667, 0.0, 10.0, 0.1),
    ],
    integration: Integration::Flow { derivative_scale: 0.01 },
    declared_range: None,
    scale_hint: 10.0,
};

static ROSSLER: FieldSchema = FieldSchema {
    field: VectorField::Rossler,
    id: "rossler",
    name: "Rössler",
    dimension: Dimension::Spatial,
    params: &[
        ParamSpec::new("a", 0.2, 0.0, 1.0, 0.01),
        ParamSpec::new("b", 0.2, 0.0, 1.0, 0.01),
        ParamSpec::new("c", 5.7, 0.0, 10.0, 0.1),
    ],
    integration: Integration::Flow { derivative_scale: 0.01 },
    declared_range: None,
    scale_hint: 15.0,
};

static HALVORSEN: FieldSchema = FieldSchema {
    field: VectorField::Halvorsen,
    id: "halvorsen",
    name: "Halvorsen",
    dimension: Dimension::Spatial,
    params: &[ParamSpec::new("a", 1.4, 0.0, 5.0, 0.1)],
    integration: Integration::Flow { derivative_scale: 0.005 },
    declared_range: None,
    scale_hint: 20.0,
};

static CHEN: FieldSchema = FieldSchema {
    field: VectorField::Chen,
    id: "chen",
    name: "Chen",
    dimension: Dimension::Spatial,
    params: &[
        ParamSpec::new("a", 35.0, 0.0, 50.0, 0.5),
        ParamSpec::new("b", 3.0, 0.0, 10.0, 0.1),
        ParamSpec::new("c", 28.0, 0.0, 50.0, 0.5),
    ],
    integration: Integration::Flow { derivative_scale: 0.01 },
    declared_range: None,
    scale_hint: 8.0,
};

static AIZAWA: FieldSchema = FieldSchema {
    field: VectorField::Aizawa,
    id: "aizawa",
    name: "Aizawa",
    dimension: Dimension::Spatial,
    params: &[
        ParamSpec::new("a", 0.95, 0.0, 2.0, 0.01),
        ParamSpec::new("b", 0.7, 0.0, 2.0, 0.01),
        ParamSpec::new("c", 0.6, 0.0, 2.0, 0.01),
        ParamSpec::new("d", 3.5, 0.0, 5.0, 0.1),
    ],
    integration: Integration::Flow { derivative_scale: 0.01 },
    declared_range: Some(InitialRange::cube(-1.0, 1.0)),
    scale_hint: 100.0,
};

static DADRAS: FieldSchema = FieldSchema {
    field: VectorField::Dadras,
    id: "dadras",
    name: "Dadras",
    dimension: Dimension::Spatial,
    params: &[
        ParamSpec::new("p", 3.0, 0.0, 10.0, 0.1),
        ParamSpec::new("q", 2.7, 0.0, 10.0, 0.1),
    ],
    integration: Integration::Flow { derivative_scale: 0.01 },
    declared_range: None,
    scale_hint: 12.0,
};

static CLIFFORD: FieldSchema = FieldSchema {
    field: VectorField::Clifford,
    id: "clifford",
    name: "Clifford",
    dimension: Dimension::Planar,
    params: &[
        ParamSpec::new("a", -1.4, -3.0, 3.0, 0.01),
        ParamSpec::new("b", 1.6, -3.0, 3.0, 0.01),
        ParamSpec::new("c", 1.0, -3.0, 3.0, 0.01),
        ParamSpec::new("d", 0.7, -3.0, 3.0, 0.01),
    ],
    integration: Integration::Map,
    declared_range: Some(InitialRange::square(-2.0, 2.0)),
    scale_hint: 1.0,
};

static DEJONG: FieldSchema = FieldSchema {
    field: VectorField::DeJong,
    id: "dejong",
    name: "Peter de Jong",
    dimension: Dimension::Planar,
    params: &[
        ParamSpec::new("a", 1.4, -3.0, 3.0, 0.01),
        ParamSpec::new("b", -2.3, -3.0, 3.0, 0.01),
        ParamSpec::new("c", 2.4, -3.0, 3.0, 0.01),
        ParamSpec::new("d", -2.1, -3.0, 3.0, 0.01),
    ],
    integration: Integration::Map,
    declared_range: Some(InitialRange::square(-2.0, 2.0)),
    scale_hint: 1.0,
};

/// A named dynamical system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorField {
    /// Lorenz (1963) convection model, the butterfly.
    #[default]
    Lorenz,
    /// Rössler band attractor.
    Rossler,
    /// Halvorsen cyclically symmetric attractor.
    Halvorsen,
    /// Chen double scroll.
    Chen,
    /// Aizawa sphere-with-tube attractor.
    Aizawa,
    /// Dadras four-wing attractor.
    Dadras,
    /// Clifford map.
    Clifford,
    /// Peter de Jong map.
    DeJong,
}

impl VectorField {
    /// Every field, in catalog order.
    pub const ALL: [VectorField; 8] = [
        VectorField::Lorenz,
        VectorField::Rossler,
        VectorField::Halvorsen,
        VectorField::Chen,
        VectorField::Aizawa,
        VectorField::Dadras,
        VectorField::Clifford,
        VectorField::DeJong,
    ];

    /// Static schema for this field.
    pub fn schema(&self) -> &'static FieldSchema {
        match self {
            VectorField::Lorenz => &LORENZ,
            VectorField::Rossler => &ROSSLER,
            VectorField::Halvorsen => &HALVORSEN,
            VectorField::Chen => &CHEN,
            VectorField::Aizawa => &AIZAWA,
            VectorField::Dadras => &DADRAS,
            VectorField::Clifford => &CLIFFORD,
            VectorField::DeJong => &DEJONG,
        }
    }

    /// Identifier used in configuration.
    pub fn id(&self) -> &'static str {
        self.schema().id
    }

    /// State dimensionality.
    pub fn dimension(&self) -> Dimension {
        self.schema().dimension
    }

    /// The field after this one, wrapping around.
    pub fn next(&self) -> VectorField {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Unscaled rate of change at `state`.
    ///
    /// For maps this is the displacement one iteration would apply.
    pub fn derivative(&self, state: DVec3, params: &ParameterSet) -> DVec3 {
        let DVec3 { x, y, z } = state;
        match self {
            VectorField::Lorenz => {
                let [sigma, rho, beta] = params.coefficients();
                DVec3::new(sigma * (y - x), x * (rho - z) - y, x * y - beta * z)
            }
            VectorField::Rossler => {
                let [a, b, c] = params.coefficients();
                DVec3::new(-y - z, x + a * y, b + z * (x - c))
            }
            VectorField::Halvorsen => {
                let [a] = params.coefficients();
                DVec3::new(
                    -a * x - y - z * (y + x),
                    -a * y - z - x * (z + y),
                    -a * z - x - y * (x + z),
                )
            }
            VectorField::Chen => {
                let [a, b, c] = params.coefficients();
                DVec3::new(a * (y - x), (c - a) * x - x * z + c * y, x * y - b * z)
            }
            VectorField::Aizawa => {
                let [a, b, c, d] = params.coefficients();
                DVec3::new(
                    (z - b) * x - d * y,
                    d * x + (z - b) * y,
                    c + z * (a - z * z) + (x * x + y * y) / 2.0,
                )
            }
            VectorField::Dadras => {
                let [p, q] = params.coefficients();
                DVec3::new(y - x, x * z + p * y, q * z + x * y)
            }
            VectorField::Clifford | VectorField::DeJong => self.iterate(state, params) - state,
        }
    }

    /// Apply a discrete map once. Flows return `state` unchanged.
    fn iterate(&self, state: DVec3, params: &ParameterSet) -> DVec3 {
        let DVec3 { x, y, .. } = state;
        match self {
            VectorField::Clifford => {
                let [a, b, c, d] = params.coefficients();
                DVec3::new(
                    (a * y).sin() + c * (a * x).cos(),
                    (b * x).sin() + d * (b * y).cos(),
                    0.0,
                )
            }
            VectorField::DeJong => {
                let [a, b, c, d] = params.coefficients();
                DVec3::new((a * y).sin() - (b * x).cos(), (c * x).sin() - (d * y).cos(), 0.0)
            }
            _ => state,
        }
    }

    /// Advance `state` by one step of logical length `dt`.
    ///
    /// Pure: identical inputs always produce bit-identical outputs. Never
    /// fails; NaN and infinities propagate.
    pub fn step(&self, state: DVec3, params: &ParameterSet, dt: f64) -> DVec3 {
        debug_assert_eq!(params.field(), *self, "parameter set belongs to another field");
        match self.schema().integration {
            Integration::Flow { derivative_scale } => {
                state + self.derivative(state, params) * (derivative_scale * dt)
            }
            Integration::Map => self.iterate(state, params),
        }
    }

    /// The defining equations, one line per axis.
    pub fn equations(&self) -> &'static [&'static str] {
        match self {
            VectorField::Lorenz => &["dx/dt = σ(y − x)", "dy/dt = x(ρ − z) − y", "dz/dt = xy − βz"],
            VectorField::Rossler => &["dx/dt = −y − z", "dy/dt = x + ay", "dz/dt = b + z(x − c)"],
            VectorField::Halvorsen => &[
                "dx/dt = −ax − y − z(y + x)",
                "dy/dt = −ay − z − x(z + y)",
                "dz/dt = −az − x − y(x + z)",
            ],
            VectorField::Chen => &["dx/dt = a(y − x)", "dy/dt = (c − a)x − xz + cy", "dz/dt = xy − bz"],
            VectorField::Aizawa => &[
                "dx/dt = (z − b)x − dy",
                "dy/dt = dx + (z − b)y",
                "dz/dt = c + z(a − z²) + (x² + y²)/2",
            ],
            VectorField::Dadras => &["dx/dt = y − x", "dy/dt = xz + py", "dz/dt = qz + xy"],
            VectorField::Clifford => &["x' = sin(ay) + c·cos(ax)", "y' = sin(bx) + d·cos(by)"],
            VectorField::DeJong => &["x' = sin(ay) − cos(bx)", "y' = sin(cx) − cos(dy)"],
        }
    }
}

impl fmt::Display for VectorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VectorField {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.id() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownField(s.to_string()))
    }
}

/// Lookup of fields by identifier.
///
/// The catalog is fixed at compile time; this type only provides the
/// string-keyed entry points configuration code needs.
pub struct FieldRegistry;

impl FieldRegistry {
    /// All fields in catalog order.
    pub fn list_fields() -> &'static [VectorField] {
        &VectorField::ALL
    }

    /// Schema for the field registered as `id`.
    pub fn schema(id: &str) -> Result<&'static FieldSchema, ConfigurationError> {
        Ok(id.parse::<VectorField>()?.schema())
    }

    /// Step the field registered as `id`.
    ///
    /// `params` must have been built for that same field.
    pub fn step(
        id: &str,
        state: DVec3,
        params: &ParameterSet,
        dt: f64,
    ) -> Result<DVec3, ConfigurationError> {
        let field = id.parse::<VectorField>()?;
        if params.field() != field {
            return Err(ConfigurationError::ParameterMismatch {
                field: field.id().to_string(),
                params: params.field().id().to_string(),
            });
        }
        Ok(field.step(state, params, dt))
    }
}
