//! Command-line argument parsing

use crate::config::Credentials;
use crate::error::Result;
use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "ecr-image-sizes")]
#[command(about = "AWS ECR Authenticator: report the sizes of images tagged \"latest\"")]
#[command(version)]
pub struct Args {
    /// AWS Access Key
    #[arg(value_name = "AWS_ACCESS_KEY")]
    pub aws_access_key: String,

    /// AWS Secret Key
    #[arg(value_name = "AWS_SECRET_KEY")]
    pub aws_secret_key: String,

    /// Verbose output
    #[arg(
        long = "verbose",
        short = 'v',
        help = "Enable debug logging (RUST_LOG takes precedence)"
    )]
    pub verbose: bool,
}

impl Args {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.aws_access_key.clone(), self.aws_secret_key.clone())
    }
}

/// Parse the process arguments, `argv[0]` included, into credentials.
///
/// Any parse failure is a [`crate::ReportError::Credentials`].
pub fn read_credentials<I, T>(args: I) -> Result<Credentials>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(args)?;
    Ok(args.credentials())
}
