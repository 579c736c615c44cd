// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Parameter Schema Generator
//!
//! Generates the JSON schema of the task file `params` section from the Rust
//! types defined in src/params.rs, so the published schema never drifts from
//! the code.
//!
//! Usage:
//!   cargo run --bin paramgen
//!
//! The generated file is written to deploy/schema/ with a proper header.

use ontap_service_policy::params::params_schema;
use std::fs;
use std::path::Path;

const COPYRIGHT_HEADER: &str = "# Copyright (c) 2025 Erick Bourgeois, firestoned
# SPDX-License-Identifier: MIT
#
# This file is AUTO-GENERATED from src/params.rs
# DO NOT EDIT MANUALLY - Run `cargo run --bin paramgen` to regenerate
#
";

const SCHEMA_FILE: &str = "service-policy-params.schema.yaml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("deploy/schema");

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    println!("Generating parameter schema from src/params.rs...");

    let yaml = serde_yaml::to_string(&params_schema())?;
    let content = format!("{COPYRIGHT_HEADER}{yaml}");

    let output_path = output_dir.join(SCHEMA_FILE);
    fs::write(&output_path, content)?;

    println!("  ✓ Generated {SCHEMA_FILE}");
    println!("\nValidate a task file's params section against deploy/schema/{SCHEMA_FILE}");

    Ok(())
}
