use std::process::ExitCode;

/// Process exit status of `ann`.
///
/// `ann` has no partial-success outcome, so there is no separate failure code.
///
/// - `Success` (0): registry written, directories cleaned, scan printed, or
///   configuration updated (including "nothing to remove")
/// - `Error` (2): missing or unreadable `go.mod`, unreadable source file,
///   output directory owned by another package, or a configuration edit
///   that could not be loaded or saved
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
