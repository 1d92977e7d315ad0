use std::process::ExitCode;

fn main() -> ExitCode {
    steelqual_cli::run()
}
