use crate::recipe::Instruction;
use crate::report::{Finding, Severity};

/// Pass as soon as any `USER` names someone other than `root`.
///
/// The scan stops at the first such instruction, so a later `USER root`
/// does not undo an earlier non-root user.
pub fn check_non_root_user(instructions: &[Instruction]) -> Vec<Finding> {
    if instructions
        .iter()
        .any(|i| i.is("USER") && i.value != "root")
    {
        return Vec::new();
    }

    vec![Finding::new(
        "No non-root user specified.",
        Severity::Fail,
        "Consider adding a non-root USER instruction.",
    )]
}
