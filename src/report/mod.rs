//! Image size report
//!
//! [`SizeReporter`] walks the repositories of a registry, keeps one [`ImageSizeRecord`] per
//! `"latest"`-tagged image in an [`ImageSizes`] accumulator, and turns the result into a
//! [`SizeReport`] sorted by size, largest first.

use crate::config::{LATEST_TAG, bytes_to_gb};
use crate::error::{ReportError, Result};
use crate::output::{Cell, GridTable};
use crate::registry::{ImageDetail, RegistryApi};
use std::collections::HashMap;
use tracing::{debug, info};

pub const NAME_HEADER: &str = "Docker Image Name";
pub const SIZE_HEADER: &str = "Docker Image Size (GB)";

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSizeRecord {
    /// `<repository>:<first tag>`
    pub name: String,
    pub size_gb: f64,
}

impl ImageSizeRecord {
    pub fn new(name: impl Into<String>, size_gb: f64) -> Self {
        Self {
            name: name.into(),
            size_gb,
        }
    }
}

/// Name to size mapping that remembers insertion order.
///
/// Inserting an existing name replaces its size in place; the record keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSizes {
    records: Vec<ImageSizeRecord>,
    positions: HashMap<String, usize>,
}

impl ImageSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: ImageSizeRecord) {
        match self.positions.get(&record.name) {
            Some(&position) => self.records[position].size_gb = record.size_gb,
            None => {
                self.positions.insert(record.name.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.positions
            .get(name)
            .map(|&position| self.records[position].size_gb)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageSizeRecord> {
        self.records.iter()
    }

    /// Sort the records by size, largest first. Equal sizes keep insertion order.
    pub fn build_report(self) -> SizeReport {
        let mut rows = self.records;
        rows.sort_by(|a, b| b.size_gb.total_cmp(&a.size_gb));
        SizeReport { rows }
    }
}

impl Extend<ImageSizeRecord> for ImageSizes {
    fn extend<T: IntoIterator<Item = ImageSizeRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

/// Records for every image in `repository` that carries the `latest` tag.
///
/// The record is named after the image's first tag, which is not necessarily `latest`.
/// A missing size counts as zero bytes.
pub fn latest_image_records(repository: &str, images: &[ImageDetail]) -> Vec<ImageSizeRecord> {
    images
        .iter()
        .filter(|image| image.has_tag(LATEST_TAG))
        .filter_map(|image| {
            let first_tag = image.image_tags.first()?;
            let size_gb = bytes_to_gb(image.image_size_in_bytes.unwrap_or(0));
            Some(ImageSizeRecord::new(
                format!("{}:{}", repository, first_tag),
                size_gb,
            ))
        })
        .collect()
}

/// Rows of the final report, sorted by size descending
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeReport {
    rows: Vec<ImageSizeRecord>,
}

impl SizeReport {
    pub fn rows(&self) -> &[ImageSizeRecord] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_table(&self) -> GridTable {
        let mut table = GridTable::new([NAME_HEADER, SIZE_HEADER]);
        for row in &self.rows {
            table.add_row(vec![Cell::Text(row.name.clone()), Cell::Number(row.size_gb)]);
        }
        table
    }

    pub fn render(&self) -> Result<String> {
        Ok(self.to_table().render()?)
    }
}

pub struct SizeReporter<'a, R: RegistryApi + ?Sized> {
    client: &'a R,
}

impl<'a, R: RegistryApi + ?Sized> SizeReporter<'a, R> {
    pub fn new(client: &'a R) -> Self {
        Self { client }
    }

    pub async fn list_repositories(&self) -> Result<Vec<String>> {
        info!("Getting list of all Aws ECR repositories...");

        let names = self
            .client
            .describe_repositories()
            .await
            .map_err(ReportError::ListRepositories)?;

        info!("List of Aws ECR repositories: {:?}", names);
        Ok(names)
    }

    /// Add the `latest` images of `repository` to `sizes`, returning how many matched.
    pub async fn record_image_sizes(&self, repository: &str, sizes: &mut ImageSizes) -> Result<usize> {
        info!("Getting size of Docker image in repository: {}...", repository);

        let images = self
            .client
            .describe_images(repository)
            .await
            .map_err(|source| ReportError::ImageSizes {
                repository: repository.to_string(),
                source,
            })?;

        let records = latest_image_records(repository, &images);
        let matched = records.len();
        debug!(
            "{} images in {}, {} tagged {}",
            images.len(),
            repository,
            matched,
            LATEST_TAG
        );

        sizes.extend(records);
        Ok(matched)
    }

    /// Collect sizes for each repository in order. The first failure aborts the scan.
    pub async fn scan(&self, repositories: &[String]) -> Result<ImageSizes> {
        let mut sizes = ImageSizes::new();
        for repository in repositories {
            self.record_image_sizes(repository, &mut sizes).await?;
        }
        Ok(sizes)
    }

    /// Sort the collected sizes and log the rendered table.
    pub fn build_report(&self, sizes: ImageSizes) -> Result<SizeReport> {
        info!("Building table of top Docker image sizes...");

        let report = sizes.build_report();
        let table = report.render()?;
        info!("{}", table);

        Ok(report)
    }
}
