use crate::_model_parser::{ModelLine, BOARD_RE, PRODUCT_RE, REGULATION_RE, ROOT_SWITCH_RE};
use crate::{Combination, Monotonicity};
use std::convert::TryFrom;

impl TryFrom<&str> for ModelLine {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let line = value.trim();
        if let Some(captures) = PRODUCT_RE.captures(line) {
            let args = parse_numbers(&captures["args"])?;
            let (const_rate, self_rate, initial_value) = match args.as_slice() {
                [c, s] => (*c, *s, 0.0),
                [c, s, i] => (*c, *s, *i),
                _ => {
                    return Err(format!(
                        "Product `{}` expects (const_rate, self_rate[, initial_value]), but {} values were given.",
                        &captures["name"],
                        args.len()
                    ))
                }
            };
            Ok(ModelLine::Product {
                name: captures["name"].to_string(),
                kind: captures["kind"].to_string(),
                const_rate,
                self_rate,
                initial_value,
            })
        } else if let Some(captures) = REGULATION_RE.captures(line) {
            Ok(ModelLine::Regulation {
                regulator: captures["regulator"].to_string(),
                target: captures["target"].to_string(),
                threshold: parse_number(&captures["threshold"])?,
                monotonicity: parse_monotonicity(&captures["monotonicity"]),
            })
        } else if let Some(captures) = ROOT_SWITCH_RE.captures(line) {
            Ok(ModelLine::RootSwitch {
                target: captures["target"].to_string(),
                times: parse_numbers(&captures["times"])?,
                monotonicity: parse_monotonicity(&captures["monotonicity"]),
            })
        } else if let Some(captures) = BOARD_RE.captures(line) {
            let combination = if &captures["combination"] == "and" {
                Combination::And
            } else {
                Combination::Or
            };
            Ok(ModelLine::Board {
                target: captures["target"].to_string(),
                combination,
            })
        } else {
            Err(format!("String \"{}\" is not a valid model line.", value))
        }
    }
}

fn parse_monotonicity(arrow: &str) -> Monotonicity {
    if arrow == ">" {
        Monotonicity::Activation
    } else {
        Monotonicity::Inhibition
    }
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid number: `{}`.", value.trim()))
}

/// **(internal)** Parse a comma separated list of numbers (possibly empty).
fn parse_numbers(value: &str) -> Result<Vec<f64>, String> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    value.split(',').map(parse_number).collect()
}

#[cfg(test)]
mod tests {
    use crate::_model_parser::ModelLine;
    use crate::Monotonicity::{Activation, Inhibition};
    use std::convert::TryFrom;

    #[test]
    fn parse_model_line_valid() {
        match ModelLine::try_from("  A : protein( 2.0, -0.5, 1 ) ").unwrap() {
            ModelLine::Product {
                name,
                kind,
                const_rate,
                self_rate,
                initial_value,
            } => {
                assert_eq!("A", name);
                assert_eq!("protein", kind);
                assert_eq!((2.0, -0.5, 1.0), (const_rate, self_rate, initial_value));
            }
            other => panic!("Unexpected line {:?}.", other),
        }

        match ModelLine::try_from("B: RNA(1e-1, 0)").unwrap() {
            ModelLine::Product { initial_value, const_rate, .. } => {
                assert_eq!(0.0, initial_value);
                assert_eq!(0.1, const_rate);
            }
            other => panic!("Unexpected line {:?}.", other),
        }

        match ModelLine::try_from("hello_world -| world_123 @ 2.5").unwrap() {
            ModelLine::Regulation {
                regulator,
                target,
                threshold,
                monotonicity,
            } => {
                assert_eq!("hello_world", regulator);
                assert_eq!("world_123", target);
                assert_eq!(2.5, threshold);
                assert_eq!(Inhibition, monotonicity);
            }
            other => panic!("Unexpected line {:?}.", other),
        }

        match ModelLine::try_from("[0.5, 0.7,1.3] -> A").unwrap() {
            ModelLine::RootSwitch {
                target,
                times,
                monotonicity,
            } => {
                assert_eq!("A", target);
                assert_eq!(vec![0.5, 0.7, 1.3], times);
                assert_eq!(Activation, monotonicity);
            }
            other => panic!("Unexpected line {:?}.", other),
        }

        match ModelLine::try_from("[] -| A").unwrap() {
            ModelLine::RootSwitch { times, .. } => assert!(times.is_empty()),
            other => panic!("Unexpected line {:?}.", other),
        }

        match ModelLine::try_from("C = or").unwrap() {
            ModelLine::Board {
                target,
                combination,
            } => {
                assert_eq!("C", target);
                assert_eq!(Some("or"), combination.name());
            }
            other => panic!("Unexpected line {:?}.", other),
        }
    }

    #[test]
    fn parse_model_line_invalid() {
        assert!(ModelLine::try_from("").is_err());
        assert!(ModelLine::try_from("A: protein(1.0)").is_err());
        assert!(ModelLine::try_from("A: protein(1.0, x)").is_err());
        assert!(ModelLine::try_from("A -> B").is_err());
        assert!(ModelLine::try_from("A -> B @ two").is_err());
        assert!(ModelLine::try_from("A -? B @ 1.0").is_err());
        assert!(ModelLine::try_from("[1.0, ] -> A").is_err());
        assert!(ModelLine::try_from("C = xor").is_err());
        assert!(ModelLine::try_from("v?r -> B @ 1.0").is_err());
    }
}
