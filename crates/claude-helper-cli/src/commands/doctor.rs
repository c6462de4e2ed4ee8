//! Doctor CLI command
//!
//! Handles: claude-helper doctor [--fix]

use claude_helper_core::doctor::{self, CheckStatus, DoctorReport};

use super::Context;

/// Run diagnostics. Returns `false` when a check is still failing.
pub fn execute(fix: bool, ctx: &Context) -> anyhow::Result<bool> {
    println!("Claude Helper Doctor\n");

    if ctx.verbose > 0 {
        println!("System Information");
        for (name, value) in doctor::system_info(ctx.platform, env!("CARGO_PKG_VERSION")) {
            println!("  {name:<14} {value}");
        }
        println!();
    }

    let report = doctor::run(&ctx.manager, fix);
    print_report(&report);
    Ok(report.is_healthy())
}

fn print_report(report: &DoctorReport) {
    for section in report.sections() {
        println!("{section}");
        let checks: Vec<_> = report
            .checks
            .iter()
            .filter(|c| c.section == section)
            .collect();
        let width = checks.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for check in checks {
            println!(
                "  [{:<5}] {:<width$}  {}",
                check.status.label(),
                check.name,
                check.message
            );
        }
        println!();
    }

    let issues = report.issues();
    if issues == 0 {
        println!("All checks passed.");
        if report.warnings() > 0 {
            println!("{} warning(s).", report.warnings());
        }
        return;
    }

    println!("Found {issues} issue(s), fixed {}.", report.fixed());
    if report.failures() > 0 {
        let fixable = report
            .checks
            .iter()
            .any(|c| c.status == CheckStatus::Fail && c.section == "Directories");
        if fixable {
            println!("Run 'claude-helper doctor --fix' to create missing directories.");
        }
    }
}
