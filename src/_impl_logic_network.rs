use crate::{
    BoardId, Combination, Gate, Kinetics, LogicNetwork, Monotonicity, NodeId, NodeIdIterator,
    Product, Switch, SwitchBoard, SwitchId, SwitchIdIterator, ID_REGEX,
};
use fxhash::FxHashSet;
use std::ops::Index;

/// Methods for safely constructing new instances of `LogicNetwork`s.
impl LogicNetwork {
    /// Create a new empty `LogicNetwork`.
    pub fn new() -> LogicNetwork {
        LogicNetwork::default()
    }

    /// Add a new `Product` with the kinetics `dX/dt = const_rate + self_rate * X`.
    ///
    /// Returns `Err` if the name is invalid or already taken, or when some of the
    /// numeric values are not finite.
    pub fn add_product(
        &mut self,
        name: &str,
        const_rate: f64,
        self_rate: f64,
        initial_value: f64,
        kind: &str,
    ) -> Result<NodeId, String> {
        if !LogicNetwork::is_valid_name(name) {
            return Err(format!("Invalid product name: `{}`.", name));
        }
        if self.find_product(name).is_some() {
            return Err(format!("Product named `{}` already exists.", name));
        }
        if !(const_rate.is_finite() && self_rate.is_finite() && initial_value.is_finite()) {
            return Err(format!(
                "Invalid kinetics of `{}`: rates and initial value must be finite.",
                name
            ));
        }
        let id = NodeId(self.products.len());
        let kinetics = Kinetics::new(const_rate, self_rate);
        self.products
            .push(Product::new(name, kind, kinetics, initial_value));
        self.product_to_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Add a new regulation: `regulator` switches `target` whenever it crosses `threshold`.
    ///
    /// The new `Switch` becomes the gate of `target`, or joins its `SwitchBoard`.
    /// Returns `Err` if the products do not exist, the threshold is not finite, or when
    /// `target` is already gated by a single switch (use a board to combine regulators).
    pub fn add_regulation(
        &mut self,
        regulator: &str,
        target: &str,
        threshold: f64,
        monotonicity: Monotonicity,
    ) -> Result<SwitchId, String> {
        let regulator = self.get_regulator(regulator)?;
        let target = self.get_target(target)?;
        if !threshold.is_finite() {
            return Err(format!("Invalid regulation: threshold {} is not finite.", threshold));
        }
        self.assert_accepts_switch(target)?;
        let id = SwitchId(self.switches.len());
        self.switches
            .push(Switch::regulated(regulator, threshold, monotonicity));
        self.attach_switch(target, id)?;
        Ok(id)
    }

    /// Add a root `Switch` which toggles at the given `times`. The switch is not attached
    /// to any product yet (see `attach_switch` and `add_switch_board`).
    ///
    /// Returns `Err` if the times are not finite or not sorted.
    pub fn add_root_switch(
        &mut self,
        threshold: f64,
        monotonicity: Monotonicity,
        times: Vec<f64>,
    ) -> Result<SwitchId, String> {
        if times.iter().any(|t| !t.is_finite()) {
            return Err(format!("Invalid switch times {:?}: times must be finite.", times));
        }
        if times.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(format!("Invalid switch times {:?}: times must be sorted.", times));
        }
        let id = SwitchId(self.switches.len());
        self.switches
            .push(Switch::root(threshold, monotonicity, times));
        Ok(id)
    }

    /// Make `switch` an input of `target`. The switch becomes the gate of `target`,
    /// or joins its `SwitchBoard`.
    ///
    /// Returns `Err` if the switch is already attached to a product, or when `target`
    /// is already gated by a single switch.
    pub fn attach_switch(&mut self, target: NodeId, switch: SwitchId) -> Result<(), String> {
        self.assert_product(target)?;
        self.assert_switch(switch)?;
        if let Some(current) = self.switches[switch.0].target {
            return Err(format!(
                "Invalid switch: {} is already attached to {}.",
                switch,
                self.get_product_name(current)
            ));
        }
        self.assert_accepts_switch(target)?;

        // Every product gated by the same board sees the new switch.
        let affected = match self.products[target.0].gate {
            None => {
                self.products[target.0].gate = Some(Gate::Switch(switch));
                vec![target]
            }
            Some(Gate::Board(board)) => {
                let board_switches = &mut self.boards[board.0].switches;
                if !board_switches.contains(&switch) {
                    board_switches.push(switch);
                }
                self.boards[board.0].breaks = None;
                self.gated_by(board)
            }
            Some(Gate::Switch(_)) => unreachable!("Checked by `assert_accepts_switch`."),
        };
        self.switches[switch.0].target = Some(target);
        self.products[target.0].switches.push(switch);
        for product in affected {
            if let Some(regulator) = self.switches[switch.0].regulator {
                self.link(regulator, product);
            }
            self.invalidate(product);
        }
        Ok(())
    }

    /// Add a `SwitchBoard` which merges the given `switches` using the `combination` rule.
    ///
    /// The board only references the switches; it has to be assigned to a product
    /// using `set_gate`.
    pub fn add_switch_board(
        &mut self,
        switches: Vec<SwitchId>,
        combination: Combination,
    ) -> Result<BoardId, String> {
        for switch in &switches {
            self.assert_switch(*switch)?;
        }
        let id = BoardId(self.boards.len());
        self.boards.push(SwitchBoard::new(switches, combination));
        Ok(id)
    }

    /// Add an empty `SwitchBoard` that gates `target`. Regulations added to `target`
    /// later are merged by this board.
    pub fn add_regulated_board(
        &mut self,
        target: &str,
        combination: Combination,
    ) -> Result<BoardId, String> {
        let target = self.get_target(target)?;
        self.assert_no_gate(target)?;
        let board = self.add_switch_board(Vec::new(), combination)?;
        self.set_gate(target, Gate::Board(board))?;
        Ok(board)
    }

    /// Set the `Gate` of a product that has no gate yet.
    pub fn set_gate(&mut self, target: NodeId, gate: Gate) -> Result<(), String> {
        self.assert_product(target)?;
        self.assert_no_gate(target)?;
        match gate {
            Gate::Switch(switch) => self.attach_switch(target, switch),
            Gate::Board(board) => {
                self.assert_board(board)?;
                self.products[target.0].gate = Some(gate);
                let regulators: Vec<NodeId> = self.boards[board.0]
                    .switches
                    .iter()
                    .filter_map(|s| self.switches[s.0].regulator)
                    .collect();
                for regulator in regulators {
                    self.link(regulator, target);
                }
                self.invalidate(target);
                Ok(())
            }
        }
    }

    /// **(internal)** Utility method to safely obtain a regulator product (using an appropriate error message).
    fn get_regulator(&self, name: &str) -> Result<NodeId, String> {
        self.find_product(name)
            .ok_or(format!("Invalid regulation: Unknown regulator {}.", name))
    }

    /// **(internal)** Utility method to safely obtain a target product (using an appropriate error message).
    fn get_target(&self, name: &str) -> Result<NodeId, String> {
        self.find_product(name)
            .ok_or(format!("Invalid regulation: Unknown target {}.", name))
    }

    fn assert_product(&self, id: NodeId) -> Result<(), String> {
        if id.0 < self.products.len() {
            Ok(())
        } else {
            Err(format!("Unknown product id: {}.", id))
        }
    }

    fn assert_switch(&self, id: SwitchId) -> Result<(), String> {
        if id.0 < self.switches.len() {
            Ok(())
        } else {
            Err(format!("Unknown switch id: {}.", id))
        }
    }

    fn assert_board(&self, id: BoardId) -> Result<(), String> {
        if id.0 < self.boards.len() {
            Ok(())
        } else {
            Err(format!("Unknown switch board id: {}.", id))
        }
    }

    /// **(internal)** A product accepts a new switch unless it is already gated by one.
    fn assert_accepts_switch(&self, target: NodeId) -> Result<(), String> {
        if let Some(Gate::Switch(_)) = self.products[target.0].gate {
            Err(format!(
                "Invalid regulation: {} is already regulated by a switch. Use a switch board to combine regulators.",
                self.get_product_name(target)
            ))
        } else {
            Ok(())
        }
    }

    fn assert_no_gate(&self, target: NodeId) -> Result<(), String> {
        if self.products[target.0].gate.is_some() {
            Err(format!(
                "Product {} already has a gate.",
                self.get_product_name(target)
            ))
        } else {
            Ok(())
        }
    }

    /// **(internal)** All products whose gate is the given `board`.
    fn gated_by(&self, board: BoardId) -> Vec<NodeId> {
        self.products()
            .filter(|id| self.products[id.0].gate == Some(Gate::Board(board)))
            .collect()
    }

    /// **(internal)** Register the reciprocal `regulator -> target` links.
    fn link(&mut self, regulator: NodeId, target: NodeId) {
        if !self.products[target.0].parents.contains(&regulator) {
            self.products[target.0].parents.push(regulator);
        }
        if !self.products[regulator.0].children.contains(&target) {
            self.products[regulator.0].children.push(target);
        }
    }

    /// **(internal)** Forget the solved state of `product` and of everything that
    /// (transitively) depends on it.
    fn invalidate(&mut self, product: NodeId) {
        let mut dirty = self.transitive_targets(product);
        dirty.insert(product);
        for id in &dirty {
            self.products[id.0].trajectory = None;
        }
        for switch in self.switches.iter_mut() {
            if let Some(regulator) = switch.regulator {
                if dirty.contains(&regulator) {
                    switch.times = None;
                }
            }
        }
        let gated_boards: FxHashSet<BoardId> = dirty
            .iter()
            .filter_map(|id| match self.products[id.0].gate {
                Some(Gate::Board(board)) => Some(board),
                _ => None,
            })
            .collect();
        let switches = &self.switches;
        for (i, board) in self.boards.iter_mut().enumerate() {
            let stale = board
                .switches
                .iter()
                .any(|s| switches[s.0].times.is_none());
            if stale || gated_boards.contains(&BoardId(i)) {
                board.breaks = None;
            }
        }
    }
}

/// Some basic utility methods for inspecting the `LogicNetwork`.
impl LogicNetwork {
    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    pub fn num_switches(&self) -> usize {
        self.switches.len()
    }

    pub fn num_boards(&self) -> usize {
        self.boards.len()
    }

    /// Find a `NodeId` for the given name, or `None` if the product does not exist.
    pub fn find_product(&self, name: &str) -> Option<NodeId> {
        self.product_to_index.get(name).cloned()
    }

    pub fn get_product(&self, id: NodeId) -> &Product {
        &self.products[id.0]
    }

    /// Shorthand for `self.get_product(id).get_name()`.
    pub fn get_product_name(&self, id: NodeId) -> &String {
        &self.products[id.0].name
    }

    pub fn get_switch(&self, id: SwitchId) -> &Switch {
        &self.switches[id.0]
    }

    pub fn get_board(&self, id: BoardId) -> &SwitchBoard {
        &self.boards[id.0]
    }

    /// Return a sorted list of products that regulate the given `target`.
    pub fn regulators(&self, target: NodeId) -> Vec<NodeId> {
        let mut regulators = self.products[target.0].parents.clone();
        regulators.sort();
        regulators
    }

    /// Return a sorted list of products that are regulated by the given `regulator`.
    pub fn targets(&self, regulator: NodeId) -> Vec<NodeId> {
        let mut targets = self.products[regulator.0].children.clone();
        targets.sort();
        targets
    }

    /// Return the set of direct as well as transitive regulators of `target`.
    pub fn transitive_regulators(&self, target: NodeId) -> FxHashSet<NodeId> {
        let mut regulators = FxHashSet::default();
        fn r_regulators(network: &LogicNetwork, target: NodeId, regulators: &mut FxHashSet<NodeId>) {
            for regulator in &network.products[target.0].parents {
                if regulators.insert(*regulator) {
                    r_regulators(network, *regulator, regulators);
                }
            }
        }
        r_regulators(self, target, &mut regulators);
        regulators
    }

    /// Return the set of direct as well as transitive targets of `regulator`.
    pub fn transitive_targets(&self, regulator: NodeId) -> FxHashSet<NodeId> {
        let mut targets = FxHashSet::default();
        fn r_targets(network: &LogicNetwork, regulator: NodeId, targets: &mut FxHashSet<NodeId>) {
            for target in &network.products[regulator.0].children {
                if targets.insert(*target) {
                    r_targets(network, *target, targets);
                }
            }
        }
        r_targets(self, regulator, &mut targets);
        targets
    }

    /// Return an iterator over all product ids of this network.
    pub fn products(&self) -> NodeIdIterator {
        (0..self.products.len()).map(NodeId)
    }

    /// Return an iterator over all switch ids of this network.
    pub fn switches(&self) -> SwitchIdIterator {
        (0..self.switches.len()).map(SwitchId)
    }

    /// A static check that allows to verify validity of a product name.
    pub fn is_valid_name(name: &str) -> bool {
        ID_REGEX.is_match(name)
    }
}

/// Allow indexing `LogicNetwork` using `NodeId` objects.
impl Index<NodeId> for LogicNetwork {
    type Output = Product;

    fn index(&self, index: NodeId) -> &Self::Output {
        self.get_product(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::Monotonicity::{Activation, Inhibition};
    use crate::{Combination, Gate, LogicNetwork, NodeId};

    fn network(names: &[&str]) -> LogicNetwork {
        let mut network = LogicNetwork::new();
        for name in names {
            network.add_product(name, 2.0, -0.5, 0.0, "protein").unwrap();
        }
        network
    }

    #[test]
    fn test_logic_network_construction() {
        let mut network = network(&["a", "b", "c", "d"]);
        assert!(network.add_product("a", 1.0, 1.0, 0.0, "RNA").is_err());
        assert!(network.add_product("a b", 1.0, 1.0, 0.0, "RNA").is_err());
        assert!(network.add_product("e", f64::NAN, 1.0, 0.0, "RNA").is_err());

        let ab = network.add_regulation("a", "b", 1.0, Activation).unwrap();
        assert!(network.add_regulation("x", "b", 1.0, Activation).is_err());
        assert!(network.add_regulation("a", "x", 1.0, Activation).is_err());
        assert!(network.add_regulation("a", "c", f64::INFINITY, Activation).is_err());
        // `b` already has a single switch, a second regulator needs a board.
        assert!(network.add_regulation("c", "b", 1.0, Inhibition).is_err());
        assert_eq!(1, network.num_switches());

        let board = network.add_regulated_board("d", Combination::Or).unwrap();
        network.add_regulation("a", "d", 1.0, Activation).unwrap();
        network.add_regulation("b", "d", 2.0, Inhibition).unwrap();
        assert_eq!(2, network.get_board(board).switches().len());
        assert!(network.add_regulated_board("d", Combination::And).is_err());

        let a = network.find_product("a").unwrap();
        let b = network.find_product("b").unwrap();
        let d = network.find_product("d").unwrap();
        assert_eq!(Some(Gate::Switch(ab)), network[b].gate());
        assert_eq!(Some(b), network.get_switch(ab).target());
        assert_eq!(vec![a], network.regulators(b));
        assert_eq!(vec![a, b], network.regulators(d));
        assert_eq!(vec![b, d], network.targets(a));
        assert!(network.transitive_regulators(d).contains(&a));
        assert!(network.transitive_targets(a).contains(&d));
        assert!(!network.transitive_targets(d).contains(&a));
        assert_eq!("b", network.get_product_name(NodeId::from(1)));
        assert_eq!(4, network.products().count());
    }

    #[test]
    fn test_root_switches_and_gates() {
        let mut network = network(&["a", "b"]);
        let a = network.find_product("a").unwrap();
        let b = network.find_product("b").unwrap();
        assert!(network
            .add_root_switch(0.0, Activation, vec![1.0, f64::NAN])
            .is_err());
        assert!(network
            .add_root_switch(0.0, Activation, vec![2.0, 1.0])
            .is_err());

        let s1 = network
            .add_root_switch(0.0, Activation, vec![1.0, 3.0])
            .unwrap();
        let s2 = network
            .add_root_switch(0.0, Activation, vec![2.0, 4.0])
            .unwrap();
        let board = network
            .add_switch_board(vec![s1, s2], Combination::And)
            .unwrap();
        network.set_gate(a, Gate::Board(board)).unwrap();
        assert!(network.set_gate(a, Gate::Switch(s1)).is_err());

        // Switches are exclusively attached to one product.
        network.attach_switch(b, s1).unwrap();
        assert!(network.attach_switch(a, s1).is_err());
        assert!(network.attach_switch(b, s2).is_err());
        assert_eq!(Some(Gate::Switch(s1)), network[b].gate());
        assert!(network.regulators(a).is_empty());
    }

    #[test]
    fn board_switch_is_not_duplicated() {
        let mut network = network(&["a"]);
        let a = network.find_product("a").unwrap();
        let switch = network
            .add_root_switch(0.0, Activation, vec![1.0])
            .unwrap();
        let board = network
            .add_switch_board(vec![switch], Combination::Or)
            .unwrap();
        network.set_gate(a, Gate::Board(board)).unwrap();
        network.attach_switch(a, switch).unwrap();
        assert_eq!(&[switch], network.get_board(board).switches());
        assert_eq!(Some(a), network.get_switch(switch).target());
    }
}
