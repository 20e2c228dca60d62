//! Discovery of the packages in a source space.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;

use crate::diagnostics::CollectResults;

mod manifest;


pub const MANIFEST_FILE: &str = "package.xml";

/// Any directory containing this file is skipped, along with everything under it.
pub const IGNORE_MARKER: &str = "CATKIN_IGNORE";

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Package {
    pub name: String,
    pub path: Utf8PathBuf,
}

#[derive(thiserror::Error, miette::Diagnostic, Debug)]
pub enum PackageError {
    #[error("Couldn't search the source space: {0}")]
    Walk(#[from] ignore::Error),
    #[error("Couldn't read {0}: {1}")]
    Io(Utf8PathBuf, std::io::Error),
    #[error("Found a path that wasn't UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),
    #[error("Couldn't parse the package manifest at {path}: {source}")]
    Manifest {
        path: Utf8PathBuf,
        source: quick_xml::Error,
    },
    #[error("The package manifest at {0} doesn't have a <name>")]
    #[diagnostic(help("every package.xml needs a <name> element under <package>"))]
    MissingName(Utf8PathBuf),
    #[error("There are multiple packages named '{name}': {first} and {second}")]
    #[diagnostic(help("rename one of them, or add a CATKIN_IGNORE file to skip one"))]
    DuplicatePackage {
        name: String,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },
    #[error("Given package '{0}' is not in the workspace")]
    UnknownPackage(String),
    #[error("Encountered some errors when reading package manifests")]
    InvalidManifests(#[related] Vec<PackageError>),
}

/// Finds every package under `source_space`, sorted by name.
#[tracing::instrument]
pub fn find_packages(source_space: &Utf8Path) -> Result<Vec<Package>, PackageError> {
    let mut package_dirs = WalkBuilder::new(source_space)
        .standard_filters(false)
        .hidden(true)
        .filter_entry(|entry| {
            let is_dir = entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or_default();
            !(is_dir && entry.path().join(IGNORE_MARKER).exists())
        })
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_name() == MANIFEST_FILE => {
                let dir = entry.path().parent()?.to_owned();
                Some(Utf8PathBuf::from_path_buf(dir).map_err(PackageError::NonUtf8Path))
            }
            Ok(_) => None,
            Err(e) => Some(Err(PackageError::from(e))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Parents sort before their children, so anything nested inside an
    // earlier package can be dropped.
    package_dirs.sort();
    let mut outermost: Vec<Utf8PathBuf> = Vec::with_capacity(package_dirs.len());
    for dir in package_dirs {
        if outermost.iter().any(|package| dir.starts_with(package)) {
            tracing::debug!(%dir, "Ignoring nested package");
            continue;
        }
        outermost.push(dir);
    }

    let mut packages = outermost
        .into_iter()
        .map(read_package)
        .collect_results()
        .map_err(PackageError::InvalidManifests)?;

    packages.sort();

    let mut seen = HashMap::<&str, &Utf8Path>::with_capacity(packages.len());
    for package in &packages {
        if let Some(first) = seen.insert(&package.name, &package.path) {
            return Err(PackageError::DuplicatePackage {
                name: package.name.clone(),
                first: first.to_owned(),
                second: package.path.clone(),
            });
        }
    }

    tracing::info!(count = packages.len(), "Found packages");

    Ok(packages)
}

fn read_package(dir: Utf8PathBuf) -> Result<Package, PackageError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let contents = std::fs::read_to_string(&manifest_path)
        .map_err(|e| PackageError::Io(manifest_path.clone(), e))?;

    let name = manifest::parse_package_name(&contents)
        .map_err(|source| PackageError::Manifest {
            path: manifest_path.clone(),
            source,
        })?
        .ok_or(PackageError::MissingName(manifest_path))?;

    Ok(Package { name, path: dir })
}

/// Narrows `packages` down to the `requested` names, or all of them if none were requested.
pub fn select_packages(
    packages: &[Package],
    requested: &[String],
) -> Result<Vec<Package>, PackageError> {
    if requested.is_empty() {
        return Ok(packages.to_vec());
    }

    requested
        .iter()
        .map(|name| {
            packages
                .iter()
                .find(|package| package.name == *name)
                .cloned()
                .ok_or_else(|| PackageError::UnknownPackage(name.clone()))
        })
        .collect()
}

/// Finds the package that contains `path`, if any.
pub fn package_containing<'a>(packages: &'a [Package], path: &Utf8Path) -> Option<&'a Package> {
    packages
        .iter()
        .filter(|package| path.starts_with(&package.path))
        .max_by_key(|package| package.path.components().count())
}
