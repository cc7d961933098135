use crate::{Gate, Kinetics, KineticsReport, NodeId, Product, SwitchId, Trajectory};

impl Product {
    pub(crate) fn new(name: &str, kind: &str, kinetics: Kinetics, initial_value: f64) -> Product {
        Product {
            name: name.to_string(),
            kind: kind.to_string(),
            kinetics,
            initial_value,
            parents: Vec::new(),
            children: Vec::new(),
            switches: Vec::new(),
            gate: None,
            trajectory: None,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// An informative label of the product, like `protein` or `RNA`.
    pub fn get_kind(&self) -> &String {
        &self.kind
    }

    pub fn kinetics(&self) -> &Kinetics {
        &self.kinetics
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Switches that target this product (in the order in which they were attached).
    pub fn switches(&self) -> &[SwitchId] {
        &self.switches
    }

    pub fn gate(&self) -> Option<Gate> {
        self.gate
    }

    pub fn is_solved(&self) -> bool {
        self.trajectory.is_some()
    }

    /// The solved trajectory, or `None` if the product is not solved yet.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Summary of the product kinetics. Does not require the product to be solved.
    pub fn report(&self) -> KineticsReport {
        KineticsReport::new(&self.name, &self.kind, self.initial_value, &self.kinetics)
    }
}
