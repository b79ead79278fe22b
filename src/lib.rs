//! ECR Image Sizes Library
//!
//! Authenticates to AWS ECR with a static key pair, reads the image metadata of every
//! repository, and reports the sizes of images tagged `latest`, largest first.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod registry;
pub mod report;

pub use config::Credentials;
pub use error::{ApiError, ReportError, Result};
pub use registry::{EcrClient, ImageDetail, LayerCheck, LayerFailure, RegistryApi};
pub use report::{ImageSizeRecord, ImageSizes, SizeReport, SizeReporter};
