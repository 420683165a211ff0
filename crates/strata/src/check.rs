use std::process::ExitCode;

use anyhow::Result;
use strata_conf::diagnostics::{Diagnostic, Report};

use crate::util::{print_json, InputArgs};

pub fn cmd_check(input: &InputArgs) -> Result<ExitCode> {
    let src = input.read()?;

    match input.parse(&src) {
        Ok(_) => {
            print_json(&Report::ok())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let report = Report::ok().with_diagnostics(vec![Diagnostic::from(&err)]);
            print_json(&report)?;
            Ok(ExitCode::from(20))
        }
    }
}
