//! A library for computing closed-form trajectories of small regulatory networks.
//!
//! Every `Product` of a `LogicNetwork` follows a first-order production/decay law
//! `dX/dt = const_rate + self_rate * X` which is switched on and off by its regulators.
//! Regulators act through `Switch`es: a switch watches the trajectory of its regulator and
//! toggles whenever the regulator crosses a concentration threshold. Multiple switches
//! are combined into a single on/off timeline by a `SwitchBoard`.
//!
//! Trajectories are never integrated numerically. Each product is solved into a
//! `Trajectory`, a sequence of `Segment`s with an exact exponential (or linear) formula,
//! and threshold crossings are found by inverting these formulas analytically.
//!
//! ```rust
//! use biodivine_lib_logic_kinetics::LogicNetwork;
//! use biodivine_lib_logic_kinetics::Monotonicity::Activation;
//!
//! let mut network = LogicNetwork::new();
//! network.add_product("A", 2.0, -0.5, 0.0, "protein")?;
//! network.add_product("B", 1.0, -0.5, 0.0, "protein")?;
//! network.add_regulation("A", "B", 2.0, Activation)?;
//!
//! let b = network.find_product("B").unwrap();
//! let samples: Vec<(f64, f64)> = network.evaluate(b, 0.0, 10.0, 0.5).unwrap().collect();
//! assert_eq!(samples.len(), 20);
//! # Ok::<(), String>(())
//! ```

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::iter::Map;
use std::ops::Range;

/// Error types produced by the solver.
pub mod error;

/// **(internal)** Implements the text model parser for `LogicNetwork` objects.
mod _model_parser;
/// **(internal)** Utility methods for `Break`.
mod _impl_break;
/// **(internal)** `LogicNetwork` to model string.
mod _impl_display_logic_network;
/// **(internal)** Conversions and formatting of `NodeId`, `SwitchId` and `BoardId`.
mod _impl_ids;
/// **(internal)** Rate-derived quantities of `Kinetics` and the `KineticsReport`.
mod _impl_kinetics;
/// **(internal)** Construction and inspection of `LogicNetwork`.
mod _impl_logic_network;
/// **(internal)** GraphViz export of `LogicNetwork`.
mod _impl_logic_network_to_dot;
/// **(internal)** Utility methods for `Product`.
mod _impl_product;
/// **(internal)** Closed-form evaluation and inversion of `Segment`s.
mod _impl_segment;
/// **(internal)** Recursive solver of products, switches and switch boards.
mod _impl_solver;
/// **(internal)** Threshold crossings of `Switch`es.
mod _impl_switch;
/// **(internal)** Merging of switch timelines in `SwitchBoard`s.
mod _impl_switch_board;
/// **(internal)** Construction and sampling of `Trajectory`.
mod _impl_trajectory;

pub use error::CyclicDependency;

/// Self rates with absolute value below this limit are treated as zero, in which case
/// a product grows linearly as `const_rate * t`.
pub const LINEAR_RATE_EPSILON: f64 = 1e-5;

lazy_static! {
    /// A regular expression that matches the identifiers of products.
    pub static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_{}]+$").unwrap();
}

/// A type-safe index of a `Product` inside a `LogicNetwork`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

/// A type-safe index of a `Switch` inside a `LogicNetwork`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SwitchId(usize);

/// A type-safe index of a `SwitchBoard` inside a `LogicNetwork`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BoardId(usize);

/// Possible effects of a `Switch` on its target.
///
/// An activation turns the target on when the regulator rises above the threshold,
/// an inhibition turns it off.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Monotonicity {
    Activation,
    Inhibition,
}

/// Rate constants of the law `dX/dt = const_rate + self_rate * X`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinetics {
    const_rate: f64,
    self_rate: f64,
}

/// A summary of the `Kinetics` of one product, as consumed by textual reports.
///
/// The steady state and reaction time are only present when the product
/// is not in the linear mode.
#[derive(Clone, Debug, PartialEq)]
pub struct KineticsReport {
    name: String,
    kind: String,
    initial_value: f64,
    const_rate: f64,
    self_rate: f64,
    steady_rate: Option<f64>,
    reaction_time: Option<f64>,
}

/// A timestamped toggle of a regulatory signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Break {
    time: f64,
    active: bool,
}

/// One closed-form piece of a `Trajectory`.
///
/// `Active` pieces converge towards the steady rate, `Inactive` pieces only decay
/// (or grow) through the self rate. `Constant` is the value before the first break and
/// `Linear` is used for the whole trajectory when the self rate is (almost) zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Constant {
        value: f64,
    },
    Active {
        start: f64,
        initial: f64,
        steady: f64,
        rate: f64,
    },
    Inactive {
        start: f64,
        initial: f64,
        rate: f64,
    },
    Linear {
        slope: f64,
    },
}

/// A solved, piecewise closed-form trajectory of a `Product`.
///
/// There is always exactly one more segment than there are breaks: segment `i + 1`
/// starts at `breaks[i]` and ends at `breaks[i + 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    breaks: Vec<Break>,
    segments: Vec<Segment>,
}

/// A lazy sequence of `(t, X(t))` samples of a `Trajectory` over `[t0, t1)`.
///
/// The sequence can be restarted by cloning it before it is consumed.
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    trajectory: &'a Trajectory,
    t0: f64,
    t1: f64,
    step: f64,
    index: usize,
}

/// The input of a `Product`: either a single switch, or a board merging several switches.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Gate {
    Switch(SwitchId),
    Board(BoardId),
}

/// A node of a `LogicNetwork`.
///
/// Besides its kinetics, a product remembers its regulators (`parents`), the products it
/// regulates (`children`), the switches that target it and its `Gate`. Once solved, it
/// also owns its `Trajectory`.
#[derive(Clone, Debug)]
pub struct Product {
    name: String,
    kind: String,
    kinetics: Kinetics,
    initial_value: f64,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    switches: Vec<SwitchId>,
    gate: Option<Gate>,
    trajectory: Option<Trajectory>,
}

/// An edge of a `LogicNetwork` which turns a regulator trajectory into a list of
/// threshold crossing times.
///
/// A switch without a `regulator` is a root switch: its `times` are given explicitly
/// and it is solved from the moment it is created.
#[derive(Clone, Debug)]
pub struct Switch {
    regulator: Option<NodeId>,
    target: Option<NodeId>,
    threshold: f64,
    monotonicity: Monotonicity,
    times: Option<Vec<f64>>,
}

/// A rule combining the states of several switches into one.
///
/// `And` is true when all switches are active, `Or` when at least one is active.
#[derive(Clone, Copy)]
pub enum Combination {
    And,
    Or,
    Custom(fn(&[bool]) -> bool),
}

/// Merges the timelines of several switches into a single timeline using a `Combination`.
///
/// The switches are only referenced, the same switch can appear in several boards.
#[derive(Clone, Debug)]
pub struct SwitchBoard {
    switches: Vec<SwitchId>,
    combination: Combination,
    breaks: Option<Vec<Break>>,
}

/// A regulatory network of `Product`s connected by `Switch`es and `SwitchBoard`s.
///
/// Every product has at most one `Gate`. When a product should respond to several
/// regulators, their switches must be merged by a `SwitchBoard` first.
///
/// A network can be described using a custom string format. Each line is a product
/// declaration, a regulation, a root switch, a board or a comment (starting with `#`):
///
/// ```text
///  # Products: kind(const_rate, self_rate, initial_value)
///  A: protein(2.0, -0.5, 0.0)
///  B: RNA(1.0, -0.25)
///  C: protein(1.0, -1.0, 0.5)
///
///  # Products with several regulators need a board.
///  C = and
///
///  [1.0, 6.0] -> A
///  A -> B @ 2.0
///  A -> C @ 1.0
///  B -| C @ 3.0
/// ```
#[derive(Clone, Debug, Default)]
pub struct LogicNetwork {
    products: Vec<Product>,
    switches: Vec<Switch>,
    boards: Vec<SwitchBoard>,
    product_to_index: FxHashMap<String, NodeId>,
}

/// An iterator over all `NodeId`s of a `LogicNetwork`.
pub type NodeIdIterator = Map<Range<usize>, fn(usize) -> NodeId>;

/// An iterator over all `SwitchId`s of a `LogicNetwork`.
pub type SwitchIdIterator = Map<Range<usize>, fn(usize) -> SwitchId>;
