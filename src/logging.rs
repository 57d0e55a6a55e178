use crate::gradcheck::{GradCheckReport, Mismatch};

/// Format a single gradient mismatch.
pub fn format_mismatch(m: &Mismatch) -> String {
    format!(
        "Gradient mismatch at ({}, {}): analytic {:.6e}, numerical {:.6e}, rel error {:.3e}",
        m.row, m.col, m.analytic, m.numerical, m.rel_error
    )
}

/// Format the outcome of a named gradient check.
pub fn format_check(label: &str, report: &GradCheckReport) -> String {
    if report.passed() {
        format!(
            "{label}: gradient check passed ({} coords, max rel error {:.3e})",
            report.checked, report.max_rel_error
        )
    } else {
        format!(
            "{label}: gradient check FAILED ({} of {} coords, max rel error {:.3e})",
            report.mismatches.len(),
            report.checked,
            report.max_rel_error
        )
    }
}

/// Log a named gradient check at info level, or error level on failure.
pub fn log_check(label: &str, report: &GradCheckReport) {
    if report.passed() {
        log::info!("{}", format_check(label, report));
    } else {
        log::error!("{}", format_check(label, report));
    }
}
