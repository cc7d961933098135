/// An error which is returned when a product transitively regulates itself, so its
/// trajectory cannot be resolved from the trajectories of its regulators.
///
/// The `cycle` lists product names along the detected loop, starting and ending
/// with the same product.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CyclicDependency {
    cycle: Vec<String>,
}

impl CyclicDependency {
    /// Create a new error instance with the given product cycle.
    pub fn new(cycle: Vec<String>) -> CyclicDependency {
        CyclicDependency { cycle }
    }

    /// The names of products on the cycle.
    pub fn cycle(&self) -> &[String] {
        &self.cycle
    }
}

impl std::fmt::Display for CyclicDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cyclic dependency between products: {}.", self.cycle.join(" -> "))
    }
}

impl std::error::Error for CyclicDependency {}

#[cfg(test)]
mod tests {
    use crate::CyclicDependency;

    #[test]
    fn cyclic_dependency_message() {
        let error = CyclicDependency::new(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(error.cycle().len(), 3);
        assert_eq!(
            "Cyclic dependency between products: a -> b -> a.",
            error.to_string()
        );
    }
}
