// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    parsing: ParsingLimits,
    validation: ValidationLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ParsingLimits {
    max_expression_length: usize,
    max_parameter_length: usize,
    max_parameter_count: usize,
    max_key_nesting_depth: usize,
}

#[derive(serde::Deserialize)]
struct ValidationLimits {
    max_ordinal_positions: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TRIGGER_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=TRIGGER_CONFIG_DIR");

    let profile = env::var("TRIGGER_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("TRIGGER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of trigger_validator directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_EXPRESSION_LENGTH: usize = 1_048_576;
    const ABSOLUTE_MAX_KEY_NESTING_DEPTH: usize = 64;

    if config.parsing.max_expression_length > ABSOLUTE_MAX_EXPRESSION_LENGTH {
        panic!("SECURITY: max_expression_length exceeds absolute maximum");
    }

    if config.parsing.max_parameter_length > config.parsing.max_expression_length {
        panic!("SECURITY: max_parameter_length cannot exceed max_expression_length");
    }

    if config.parsing.max_key_nesting_depth > ABSOLUTE_MAX_KEY_NESTING_DEPTH {
        panic!("SECURITY: max_key_nesting_depth exceeds absolute maximum");
    }

    if config.parsing.max_parameter_count == 0 {
        panic!("CONFIG: max_parameter_count must allow at least one parameter");
    }

    if config.validation.max_ordinal_positions == 0 {
        panic!("CONFIG: max_ordinal_positions must be at least 1");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.parsing.max_expression_length > 65_536 {
        panic!("PRODUCTION: max_expression_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod parsing {{
        pub const MAX_EXPRESSION_LENGTH: usize = {};
        pub const MAX_PARAMETER_LENGTH: usize = {};
        pub const MAX_PARAMETER_COUNT: usize = {};
        pub const MAX_KEY_NESTING_DEPTH: usize = {};
    }}

    pub mod validation {{
        pub const MAX_ORDINAL_POSITIONS: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Parsing
        config.parsing.max_expression_length,
        config.parsing.max_parameter_length,
        config.parsing.max_parameter_count,
        config.parsing.max_key_nesting_depth,
        // Validation
        config.validation.max_ordinal_positions,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
