use std::process::ExitCode;

fn main() -> ExitCode {
    match textprep::apps::run_preprocess(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
