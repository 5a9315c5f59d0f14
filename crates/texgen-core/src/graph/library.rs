//! Built-in texture nodes.

use noise::{NoiseFn, Perlin};

use super::GraphError;
use super::value::Value;

/// Pixel coordinate and output dimensions for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Sample {
    /// Position normalised to `0.0..=1.0` on both axes.
    pub fn uv(&self) -> (f64, f64) {
        let u = f64::from(self.x) / f64::from(self.width.saturating_sub(1).max(1));
        let v = f64::from(self.y) / f64::from(self.height.saturating_sub(1).max(1));
        (u, v)
    }
}

/// Seeded 3D Perlin noise.
#[derive(Debug, Clone)]
pub struct Noise {
    scale: [f64; 3],
    offset: [f64; 3],
    perlin: Perlin,
}

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self {
            scale: [1.0; 3],
            offset: [0.0; 3],
            perlin: Perlin::new(seed),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: [f64; 3]) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: [f64; 3]) -> Self {
        self.offset = offset;
        self
    }

    fn sample(&self, sample: Sample) -> f64 {
        let (u, v) = sample.uv();
        let point = [
            (u + self.offset[0]) * self.scale[0],
            (v + self.offset[1]) * self.scale[1],
            self.offset[2] * self.scale[2],
        ];
        self.perlin.get(point)
    }
}

/// Colour ramp indexed by input intensity.
///
/// Stops are kept sorted by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<(Value, f64)>,
}

impl Gradient {
    pub fn new(mut stops: Vec<(Value, f64)>) -> Result<Self, GraphError> {
        if stops.len() < 2 {
            return Err(GraphError::InvalidGradient(stops.len()));
        }
        stops.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[(Value, f64)] {
        &self.stops
    }

    /// Colour at `t`. Values outside the stop range clamp to the end stops.
    pub fn sample(&self, t: f64) -> Value {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Value::Nothing;
        };
        if t < first.1 {
            return first.0;
        }
        if t >= last.1 {
            return last.0;
        }

        self.stops
            .windows(2)
            .find(|pair| pair[0].1 <= t && t < pair[1].1)
            .map_or(last.0, |pair| {
                let (from, start) = pair[0];
                let (to, end) = pair[1];
                let f = (t - start) / (end - start);
                let a = from.fractions();
                let b = to.fractions();
                Value::Channels(std::array::from_fn(|i| a[i] * (1.0 - f) + b[i] * f))
            })
    }
}

/// Behaviour of one node in the texture graph.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Emits the same value for every pixel.
    Constant(Value),
    Noise(Noise),
    Gradient(Gradient),
    /// `first * factor + second * (1 - factor)`, per channel.
    Mix,
    Invert,
    /// Alternates black cells with the input.
    Checker { cell: u32 },
    /// Final texture; exactly one per graph.
    Output,
}

const NO_PORTS: &[&str] = &[];
const SINGLE_INPUT: &[&str] = &["input"];
const MIX_PORTS: &[&str] = &["first", "second", "factor"];

impl NodeKind {
    /// Names of the ports this node reads.
    pub fn input_ports(&self) -> &'static [&'static str] {
        match self {
            Self::Constant(_) | Self::Noise(_) => NO_PORTS,
            Self::Mix => MIX_PORTS,
            Self::Gradient(_) | Self::Invert | Self::Checker { .. } | Self::Output => SINGLE_INPUT,
        }
    }

    /// Resolves `port` to its canonical static name.
    pub fn port(&self, port: &str) -> Option<&'static str> {
        self.input_ports().iter().copied().find(|p| *p == port)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Constant(_) => "Static",
            Self::Noise(_) => "Noise",
            Self::Gradient(_) => "Gradient",
            Self::Mix => "Mix",
            Self::Invert => "Invert",
            Self::Checker { .. } => "Checker",
            Self::Output => "Output",
        }
    }

    /// Computes this node's value at `sample`. Unconnected ports read as [`Value::Nothing`].
    pub fn evaluate(&self, sample: Sample, input: impl Fn(&str) -> Value) -> Value {
        match self {
            Self::Constant(value) => *value,
            Self::Noise(noise) => Value::Float(noise.sample(sample)),
            Self::Gradient(gradient) => gradient.sample(input("input").intensity()),
            Self::Mix => mix(input("first"), input("second"), input("factor")),
            Self::Invert => {
                let [r, g, b, a] = input("input").fractions();
                Value::Channels([1.0 - r, 1.0 - g, 1.0 - b, a])
            }
            Self::Checker { cell } => {
                let cell = (*cell).max(1);
                if (sample.x / cell + sample.y / cell) % 2 == 0 {
                    Value::rgb(0, 0, 0)
                } else {
                    input("input")
                }
            }
            Self::Output => input("input"),
        }
    }
}

/// A missing factor blends evenly.
fn mix(first: Value, second: Value, factor: Value) -> Value {
    let factor = match factor {
        Value::Nothing => [0.5; 4],
        Value::Float(f) => [f; 4],
        other => other.fractions(),
    }
    .map(|f| f.clamp(0.0, 1.0));

    let a = first.fractions();
    let b = second.fractions();
    Value::Channels(std::array::from_fn(|i| {
        a[i] * factor[i] + b[i] * (1.0 - factor[i])
    }))
}
