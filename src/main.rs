use clap::Parser;
use clap::error::ErrorKind;
use ecr_image_sizes::cli::{Args, Runner};
use ecr_image_sizes::{ReportError, logging};
use std::process::ExitCode;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            logging::init(false);
            return fail(ReportError::from(err));
        }
    };

    logging::init(args.verbose);

    match Runner::new(args.credentials()).run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => fail(err),
    }
}

fn fail(err: ReportError) -> ExitCode {
    error!("{}", err);
    ExitCode::from(err.exit_code())
}
