use crate::{Combination, Monotonicity};
use lazy_static::lazy_static;
use regex::Regex;

/// **(internal)** `LogicNetwork` parsing.
mod _from_string_for_logic_network;
/// **(internal)** Parsing of individual model lines.
mod _from_string_for_model_line;

lazy_static! {
    /// Matches a product declaration, e.g. `A: protein(2.0, -0.5, 0.0)`.
    static ref PRODUCT_RE: Regex = Regex::new(
        r"^(?P<name>[a-zA-Z0-9_{}]+)\s*:\s*(?P<kind>[a-zA-Z0-9_]+)\s*\((?P<args>[^()]*)\)$"
    ).unwrap();

    /// Matches a regulation with a threshold, e.g. `A -| B @ 2.0`.
    static ref REGULATION_RE: Regex = Regex::new(
        r"^(?P<regulator>[a-zA-Z0-9_{}]+)\s*-(?P<monotonicity>[>|])\s*(?P<target>[a-zA-Z0-9_{}]+)\s*@\s*(?P<threshold>\S+)$"
    ).unwrap();

    /// Matches a root switch attached to a product, e.g. `[0.5, 0.7] -> A`.
    static ref ROOT_SWITCH_RE: Regex = Regex::new(
        r"^\[(?P<times>[^\[\]]*)\]\s*-(?P<monotonicity>[>|])\s*(?P<target>[a-zA-Z0-9_{}]+)$"
    ).unwrap();

    /// Matches a switch board declaration, e.g. `C = and`.
    static ref BOARD_RE: Regex = Regex::new(
        r"^(?P<target>[a-zA-Z0-9_{}]+)\s*=\s*(?P<combination>and|or)$"
    ).unwrap();
}

/// **(internal)** A helper enum for representing a parsed line of the model format that
/// has not been integrated into a `LogicNetwork` yet.
#[derive(Clone, Debug)]
pub(crate) enum ModelLine {
    Product {
        name: String,
        kind: String,
        const_rate: f64,
        self_rate: f64,
        initial_value: f64,
    },
    Regulation {
        regulator: String,
        target: String,
        threshold: f64,
        monotonicity: Monotonicity,
    },
    RootSwitch {
        target: String,
        times: Vec<f64>,
        monotonicity: Monotonicity,
    },
    Board {
        target: String,
        combination: Combination,
    },
}

/// **(internal)** Arrow of a regulation in the model format.
pub(crate) fn arrow_string(monotonicity: Monotonicity) -> &'static str {
    match monotonicity {
        Monotonicity::Activation => "->",
        Monotonicity::Inhibition => "-|",
    }
}
