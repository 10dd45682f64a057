use std::process::ExitCode;
use std::sync::Arc;

use clap::{Arg, Command};

use fhirguard::{FhirSpec, FhirVersion, ResourceValidator};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("validate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate FHIR resource documents against the R4/R4B spec tables")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("JSON file containing the resource to validate")
                .required(true),
        )
        .arg(
            Arg::new("resource-type")
                .short('t')
                .long("resource-type")
                .value_name("TYPE")
                .help("Validate as this resource type instead of reading resourceType"),
        )
        .arg(
            Arg::new("fhir-version")
                .short('f')
                .long("fhir-version")
                .value_name("VERSION")
                .help("FHIR version of the spec tables to load")
                .default_value("4.0.1"),
        )
        .get_matches();

    let file: &String = matches.get_one("file").unwrap();
    let version_str: &String = matches.get_one("fhir-version").unwrap();

    match run(file, matches.get_one::<String>("resource-type"), version_str) {
        Ok(resource_type) => {
            println!("{file}: valid {resource_type}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{file}: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(file: &str, resource_type: Option<&String>, version_str: &str) -> Result<String, String> {
    let version: FhirVersion = version_str.parse().map_err(|e| format!("{e}"))?;
    let spec = FhirSpec::for_version(version).map_err(|e| format!("{e}"))?;
    let validator = ResourceValidator::new(Arc::new(spec));

    let contents =
        std::fs::read_to_string(file).map_err(|e| format!("failed to read file: {e}"))?;
    let resource: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| format!("failed to parse JSON: {e}"))?;

    match resource_type {
        Some(name) => {
            validator
                .validate_named(&resource, name)
                .map_err(|e| format!("{e}"))?;
            Ok(name.clone())
        }
        None => {
            let resolved = validator
                .validate_document(&resource)
                .map_err(|e| format!("{e}"))?;
            Ok(resolved.to_string())
        }
    }
}
