use crate::{Gate, LogicNetwork, Monotonicity};
use std::io::Write;

impl LogicNetwork {
    /// Export this logic network to a `.dot` format.
    ///
    /// In the representation, we use red and green color to distinguish inhibiting and
    /// activating switches. Edges are labelled by the switch threshold, root switches are
    /// shown as small point nodes and products gated by a board mention its combination.
    pub fn to_dot(&self) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_as_dot(&mut buffer)
            .expect("I/O error converting `LogicNetwork` to `.dot`.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in .dot string.")
    }

    pub fn write_as_dot(&self, output: &mut dyn Write) -> Result<(), std::io::Error> {
        writeln!(output, "digraph G {{")?;
        for product in self.products() {
            let label = match self[product].gate() {
                Some(Gate::Board(board)) => match self.get_board(board).combination().name() {
                    Some(name) => format!("{} ({})", self.get_product_name(product), name),
                    None => format!("{} (custom)", self.get_product_name(product)),
                },
                _ => self.get_product_name(product).clone(),
            };
            writeln!(
                output,
                "v{} [shape=box, label=\"{}\", style=filled];",
                product.0, label
            )?;
        }
        for id in self.switches() {
            let switch = self.get_switch(id);
            let target = match switch.target() {
                Some(target) => target,
                None => continue,
            };
            let (color, arrow) = match switch.monotonicity() {
                Monotonicity::Activation => ("#4abd73", "normal"),
                Monotonicity::Inhibition => ("#d05d5d", "tee"),
            };
            match switch.regulator() {
                Some(regulator) => writeln!(
                    output,
                    "v{} -> v{} [label=\"{:?}\", color=\"{}\", arrowhead=\"{}\"];",
                    regulator.0,
                    target.0,
                    switch.threshold(),
                    color,
                    arrow,
                )?,
                None => {
                    writeln!(output, "s{} [shape=point];", id.0)?;
                    writeln!(
                        output,
                        "s{} -> v{} [color=\"{}\", arrowhead=\"{}\"];",
                        id.0, target.0, color, arrow,
                    )?;
                }
            }
        }
        writeln!(output, "}}")?;
        Ok(())
    }
}
