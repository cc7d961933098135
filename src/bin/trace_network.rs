use biodivine_lib_logic_kinetics::LogicNetwork;
use std::convert::TryFrom;
use std::io::Read;

/// Read a model from stdin, solve it and print the trajectory of every product to stdout.
///
/// Usage: `trace-network [t0 t1 step] < model.txt`
///
/// Without an explicit window, each product is sampled over eight of its reaction times.
fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let window = match args.len() {
        0 => None,
        3 => match parse_window(&args) {
            Ok(window) => Some(window),
            Err(e) => fail(&e),
        },
        _ => fail("Expected either no arguments or `t0 t1 step`."),
    };

    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        fail(&format!("Cannot read model: {}", e));
    }

    let mut network = match LogicNetwork::try_from(buffer.as_str()) {
        Ok(network) => network,
        Err(e) => fail(&e),
    };
    if let Err(e) = network.solve_all() {
        fail(&e.to_string());
    }
    eprintln!("Solved {} products.", network.num_products());

    for product in network.products() {
        let product = &network[product];
        print!("{}", product.report());
        let (t0, t1, step) = window.unwrap_or_else(|| product.kinetics().sample_window());
        if let Some(trajectory) = product.trajectory() {
            for (t, value) in trajectory.samples(t0, t1, step) {
                println!("{}\t{}", t, value);
            }
        }
        println!();
    }
}

fn parse_window(args: &[String]) -> Result<(f64, f64, f64), String> {
    let mut values = Vec::new();
    for arg in args {
        let value = arg
            .parse::<f64>()
            .map_err(|_| format!("Invalid number: `{}`.", arg))?;
        values.push(value);
    }
    if !(values[0].is_finite() && values[1].is_finite()) {
        return Err(format!("Invalid window: [{}, {}).", values[0], values[1]));
    }
    if !(values[2].is_finite() && values[2] > 0.0) {
        return Err(format!("Invalid step: {}.", values[2]));
    }
    Ok((values[0], values[1], values[2]))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
