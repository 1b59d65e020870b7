use std::process::ExitCode;

use dataprep::output as out;
use dataprep::DataPrepError;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = dataprep::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e
                .downcast_ref::<DataPrepError>()
                .map(DataPrepError::code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
