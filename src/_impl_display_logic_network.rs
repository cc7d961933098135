use crate::_model_parser::arrow_string;
use crate::{Gate, LogicNetwork};
use std::fmt::{Display, Error, Formatter};

/// Writes the network in the model format accepted by `LogicNetwork::try_from`.
///
/// Switches that are not attached to any product cannot be expressed in the format and
/// are skipped. Boards with a custom combination are written as comments.
impl Display for LogicNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for product in &self.products {
            writeln!(
                f,
                "{}: {}({:?}, {:?}, {:?})",
                product.name,
                product.kind,
                product.kinetics.const_rate(),
                product.kinetics.self_rate(),
                product.initial_value
            )?;
        }
        for product in &self.products {
            if let Some(Gate::Board(board)) = product.gate {
                match self.boards[board.0].combination.name() {
                    Some(name) => writeln!(f, "{} = {}", product.name, name)?,
                    None => writeln!(f, "# {} = custom", product.name)?,
                }
            }
        }
        for switch in &self.switches {
            let Some(target) = switch.target else {
                continue;
            };
            let arrow = arrow_string(switch.monotonicity);
            match (switch.regulator, switch.times()) {
                (Some(regulator), _) => writeln!(
                    f,
                    "{} {} {} @ {:?}",
                    self.get_product_name(regulator),
                    arrow,
                    self.get_product_name(target),
                    switch.threshold
                )?,
                (None, times) => {
                    let times: Vec<String> = times
                        .unwrap_or(&[])
                        .iter()
                        .map(|t| format!("{:?}", t))
                        .collect();
                    writeln!(
                        f,
                        "[{}] {} {}",
                        times.join(", "),
                        arrow,
                        self.get_product_name(target)
                    )?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::LogicNetwork;
    use std::convert::TryFrom;

    #[test]
    fn test_logic_network_to_string() {
        let model = "A: protein(2.0, -0.5, 0.0)\nB: RNA(1.0, -0.25, 0.0)\nC: protein(1.0, 0.0, 0.5)\nC = or\n[1.0, 6.0] -> A\nA -> B @ 2.0\nA -> C @ 1.0\nB -| C @ 3.0\n[] -| B\n";
        // The last line is rejected: `B` is already regulated by `A`.
        assert!(LogicNetwork::try_from(model).is_err());

        let model = model.replace("[] -| B\n", "[0.5] -| C\n");
        let network = LogicNetwork::try_from(model.as_str()).unwrap();
        assert_eq!(model, network.to_string());
    }
}
