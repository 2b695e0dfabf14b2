use crate::recipe::Instruction;
use crate::report::{Finding, Severity};

/// Warn once if any `RUN` is a single, unchained command.
pub fn check_optimized_run(instructions: &[Instruction]) -> Vec<Finding> {
    let offender = instructions
        .iter()
        .find(|i| i.is("RUN") && !i.value.contains("&&"));

    match offender {
        Some(_) => vec![Finding::new(
            "Combine RUN commands to reduce image layers.",
            Severity::Warn,
            "Use '&&' to chain commands in a single RUN.",
        )],
        None => Vec::new(),
    }
}
