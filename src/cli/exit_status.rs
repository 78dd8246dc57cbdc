use std::process::ExitCode;

/// Exit status for the CLI, following common conventions for batch tools.
///
/// - `Success` (0): the run completed, including a successful dry run
/// - `Error` (2): the run aborted on a fatal error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed successfully.
    Success,
    /// Run aborted on a fatal error (bad mapping, invalid XML, write failure).
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
