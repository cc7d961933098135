use crate::_impl_switch::threshold_crossings;
use crate::_impl_switch_board::merge_breaks;
use crate::{
    BoardId, Break, CyclicDependency, Gate, KineticsReport, LogicNetwork, NodeId, Samples,
    SwitchId, Trajectory,
};

/// Solving and evaluation of product trajectories.
///
/// Products are solved on demand, depth-first: before a product is solved, all of its
/// regulators and the switches (and boards) of its gate are solved. Everything that is
/// solved stays solved until the network structure changes.
impl LogicNetwork {
    /// Solve the trajectory of the given `product` (and everything it depends on).
    ///
    /// Solving an already solved product does nothing. Returns `Err` when the product
    /// transitively regulates itself.
    pub fn solve(&mut self, product: NodeId) -> Result<(), CyclicDependency> {
        self.solve_product(product, &mut Vec::new())
    }

    /// Solve the trajectories of all products in the network.
    pub fn solve_all(&mut self) -> Result<(), CyclicDependency> {
        for product in self.products() {
            self.solve(product)?;
        }
        Ok(())
    }

    /// Sample the trajectory of `product` over `[t0, t1)` with a fixed `step`, solving the
    /// product first if necessary.
    pub fn evaluate(
        &mut self,
        product: NodeId,
        t0: f64,
        t1: f64,
        step: f64,
    ) -> Result<Samples<'_>, CyclicDependency> {
        self.solve(product)?;
        let trajectory = self.products[product.0]
            .trajectory
            .as_ref()
            .expect("Product trajectory is available after solve.");
        Ok(trajectory.samples(t0, t1, step))
    }

    /// The breaks of the given `switch`, solving its regulator first if necessary.
    pub fn switch_breaks(&mut self, switch: SwitchId) -> Result<Vec<Break>, CyclicDependency> {
        self.solve_switch(switch, &mut Vec::new())?;
        Ok(self.switches[switch.0].get_breaks())
    }

    /// The merged breaks of the given `board`, solving its switches first if necessary.
    pub fn board_breaks(&mut self, board: BoardId) -> Result<Vec<Break>, CyclicDependency> {
        self.solve_board(board, &mut Vec::new())?;
        Ok(self.boards[board.0].get_breaks())
    }

    /// Kinetics summary of the given `product`. The product does not need to be solved.
    pub fn report(&self, product: NodeId) -> KineticsReport {
        self.products[product.0].report()
    }

    /// **(internal)** Solve `id`, where `stack` holds the products whose solving is
    /// in progress. Reaching a product that is already on the stack means a cycle.
    fn solve_product(
        &mut self,
        id: NodeId,
        stack: &mut Vec<NodeId>,
    ) -> Result<(), CyclicDependency> {
        if self.products[id.0].is_solved() {
            return Ok(());
        }
        if let Some(position) = stack.iter().position(|it| *it == id) {
            let mut cycle: Vec<String> = stack[position..]
                .iter()
                .map(|it| self.get_product_name(*it).clone())
                .collect();
            cycle.push(self.get_product_name(id).clone());
            return Err(CyclicDependency::new(cycle));
        }

        stack.push(id);
        for parent in self.products[id.0].parents.clone() {
            self.solve_product(parent, stack)?;
        }
        let breaks = match self.products[id.0].gate {
            None => Vec::new(),
            Some(Gate::Switch(switch)) => {
                self.solve_switch(switch, stack)?;
                self.switches[switch.0].get_breaks()
            }
            Some(Gate::Board(board)) => {
                self.solve_board(board, stack)?;
                self.boards[board.0].get_breaks()
            }
        };
        stack.pop();

        let product = &mut self.products[id.0];
        if cfg!(feature = "print-progress") {
            println!(
                "Solving product {} with {} break(s).",
                product.name,
                breaks.len()
            );
        }
        product.trajectory = Some(Trajectory::build(
            &product.kinetics,
            product.initial_value,
            breaks,
        ));
        Ok(())
    }

    fn solve_switch(
        &mut self,
        id: SwitchId,
        stack: &mut Vec<NodeId>,
    ) -> Result<(), CyclicDependency> {
        let switch = &self.switches[id.0];
        if switch.is_solved() {
            return Ok(());
        }
        // Root switches are solved when created.
        let Some(regulator) = switch.regulator else {
            return Ok(());
        };
        let threshold = switch.threshold;

        self.solve_product(regulator, stack)?;
        let times = self.products[regulator.0]
            .trajectory
            .as_ref()
            .map(|trajectory| threshold_crossings(trajectory, threshold))
            .unwrap_or_default();
        if cfg!(feature = "print-progress") {
            println!(
                "Switch {} of {} crosses {} at {:?}.",
                id,
                self.get_product_name(regulator),
                threshold,
                times
            );
        }
        self.switches[id.0].times = Some(times);
        Ok(())
    }

    fn solve_board(
        &mut self,
        id: BoardId,
        stack: &mut Vec<NodeId>,
    ) -> Result<(), CyclicDependency> {
        if self.boards[id.0].is_solved() {
            return Ok(());
        }
        let switches = self.boards[id.0].switches.clone();
        let mut streams = Vec::with_capacity(switches.len());
        for switch in switches {
            self.solve_switch(switch, stack)?;
            streams.push(self.switches[switch.0].get_breaks());
        }
        let board = &mut self.boards[id.0];
        board.breaks = Some(merge_breaks(&streams, board.combination));
        Ok(())
    }
}
