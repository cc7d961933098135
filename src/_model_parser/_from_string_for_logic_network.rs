use crate::_model_parser::ModelLine;
use crate::LogicNetwork;
use std::convert::TryFrom;

impl TryFrom<&str> for LogicNetwork {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // trim lines and remove comments
        let lines = value.lines().filter_map(|l| {
            let line = l.trim();
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(line)
            }
        });

        let mut model_lines = Vec::new();
        for line in lines {
            model_lines.push(ModelLine::try_from(line)?);
        }

        let mut network = LogicNetwork::new();

        // Products have to exist before anything can reference them.
        for line in &model_lines {
            if let ModelLine::Product {
                name,
                kind,
                const_rate,
                self_rate,
                initial_value,
            } = line
            {
                network.add_product(name, *const_rate, *self_rate, *initial_value, kind)?;
            }
        }

        // Boards go next, so that switches of their targets end up merged.
        for line in &model_lines {
            if let ModelLine::Board {
                target,
                combination,
            } = line
            {
                network.add_regulated_board(target, *combination)?;
            }
        }

        // Switches are created in the order in which they appear in the model.
        for line in model_lines {
            match line {
                ModelLine::Regulation {
                    regulator,
                    target,
                    threshold,
                    monotonicity,
                } => {
                    network.add_regulation(&regulator, &target, threshold, monotonicity)?;
                }
                ModelLine::RootSwitch {
                    target,
                    times,
                    monotonicity,
                } => {
                    let target_id = network
                        .find_product(&target)
                        .ok_or(format!("Invalid root switch: Unknown target {}.", target))?;
                    let switch = network.add_root_switch(0.0, monotonicity, times)?;
                    network.attach_switch(target_id, switch)?;
                }
                ModelLine::Product { .. } | ModelLine::Board { .. } => (),
            }
        }

        Ok(network)
    }
}
